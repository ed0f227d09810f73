//! Staged recognizer for `char*[*[*]] NAME[N][M] = { {"..", ..}, .. };`.

use core::ops::Range;

use tracing::{debug, trace};

use crate::decode::cursor::Cursor;
use crate::decode::escape::decode_quoted;
use crate::decode::skipper::{skip, skip_past};
use crate::error::ErrorKind;
use crate::options::Options;
use crate::result::{Declarator, Diagnostic, Diagnostics, ParseResult};
use crate::table::{Table, TableBuilder};

const MODIFIERS: [&[u8]; 3] = [b"const", b"static", b"volatile"];
const MAX_POINTER_DEPTH: u8 = 3;
const MAX_DIMS: usize = 2;
/// `char*` with two dimensions, `char**` with one, `char***` with none.
const FULL_RANK: usize = 3;

/// One phase of the recognizer. Only `Seeking` may repeat; every other
/// transition moves forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    Seeking,
    TypePrefix,
    Identifier { pointer_depth: u8 },
    ArrayDims { pointer_depth: u8, name: String },
    Assignment(Declarator),
    TableBody(Declarator),
    Done {
        declarator: Declarator,
        table: Table,
        end: usize,
    },
    Failed { table: Table },
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Seeking => "seeking",
            Stage::TypePrefix => "type_prefix",
            Stage::Identifier { .. } => "identifier",
            Stage::ArrayDims { .. } => "array_dims",
            Stage::Assignment(_) => "assignment",
            Stage::TableBody(_) => "table_body",
            Stage::Done { .. } => "done",
            Stage::Failed { .. } => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Done { .. } | Stage::Failed { .. })
    }
}

fn is_identifier(token: &[u8]) -> bool {
    match token.split_first() {
        Some((first, rest)) => {
            (first.is_ascii_alphabetic() || *first == b'_')
                && rest.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'_')
        }
        None => false,
    }
}

fn text(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}

/// Owns all state of one parse; nothing outlives [`Parser::parse`].
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    options: &'a Options,
    diagnostics: Diagnostics,
    decl_begin: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a [u8], options: &'a Options) -> Self {
        Self::with_range(input, 0..input.len(), options)
    }

    pub fn with_range(input: &'a [u8], range: Range<usize>, options: &'a Options) -> Self {
        Self {
            cursor: Cursor::with_range(input, range),
            options,
            diagnostics: Diagnostics::default(),
            decl_begin: 0,
        }
    }

    /// Runs the stages until the declaration is complete, a fatal error occurs or
    /// the input is exhausted.
    pub fn parse(mut self) -> ParseResult {
        let mut stage = Stage::Seeking;
        loop {
            stage = match stage {
                Stage::Done {
                    declarator,
                    table,
                    end,
                } => {
                    debug!(
                        name = %declarator.name,
                        rows = table.len(),
                        begin = self.decl_begin,
                        end,
                        "string table parsed"
                    );
                    return ParseResult {
                        ok: true,
                        table,
                        diagnostics: self.diagnostics,
                        declarator,
                        decl_begin: self.decl_begin,
                        decl_end: end,
                    };
                }
                Stage::Failed { table } => {
                    return ParseResult {
                        ok: false,
                        table,
                        diagnostics: self.diagnostics,
                        ..ParseResult::default()
                    };
                }
                stage => self.step(stage),
            };
        }
    }

    /// Clears whitespace and comments, then performs one stage transition.
    pub fn step(&mut self, stage: Stage) -> Stage {
        if stage.is_terminal() {
            return stage;
        }
        self.skip();
        let result = match stage {
            Stage::Seeking => self.seek(),
            Stage::TypePrefix => self.type_prefix(),
            Stage::Identifier { pointer_depth } => self.identifier(pointer_depth),
            Stage::ArrayDims {
                pointer_depth,
                name,
            } => self.array_dims(pointer_depth, name),
            Stage::Assignment(declarator) => self.assignment(declarator),
            Stage::TableBody(declarator) => Ok(self.table_body(declarator)),
            terminal => Ok(terminal),
        };
        let next = result.unwrap_or_else(|d| {
            self.report(d);
            Stage::Failed {
                table: Table::new(),
            }
        });
        trace!(stage = next.name(), pos = self.cursor.pos(), "stage transition");
        next
    }

    fn skip(&mut self) {
        skip(&mut self.cursor, self.options.line_comments);
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        debug!(
            line = diagnostic.line,
            column = diagnostic.column,
            "parse failed: {}",
            diagnostic.kind
        );
        self.diagnostics.push(diagnostic);
    }

    fn diagnostic(&self, offset: usize, kind: ErrorKind) -> Diagnostic {
        Diagnostic::at(self.cursor.input(), offset, kind)
    }

    /// Text of whatever sits under the cursor, for messages.
    fn found(&self) -> String {
        let token = self.cursor.token_chars();
        if !token.is_empty() {
            return format!("`{}`", text(token));
        }
        match self.cursor.current() {
            Some(b) => format!("`{}`", char::from(b).escape_default()),
            None => "end of input".to_string(),
        }
    }

    fn expected(&self, expected: &'static str, context: &'static str) -> Diagnostic {
        let kind = ErrorKind::Expected {
            expected,
            context,
            found: self.found(),
        };
        self.diagnostic(self.cursor.pos(), kind)
    }

    /// Consumes `byte` and the blanks after it, or fails naming what was found.
    fn expect(
        &mut self,
        byte: u8,
        expected: &'static str,
        context: &'static str,
    ) -> Result<(), Diagnostic> {
        if self.cursor.current() != Some(byte) {
            return Err(self.expected(expected, context));
        }
        self.cursor.advance();
        self.skip();
        Ok(())
    }

    fn seek(&mut self) -> Result<Stage, Diagnostic> {
        loop {
            let token = self.cursor.token_chars();
            if self.cursor.state().is_special() || !MODIFIERS.contains(&token) {
                break;
            }
            self.cursor.advance_by(token.len());
            self.skip();
        }
        if self.cursor.token_chars() == b"char" && !self.cursor.state().is_special() {
            self.decl_begin = self.cursor.pos();
            self.cursor.advance_by(4);
            return Ok(Stage::TypePrefix);
        }
        trace!(pos = self.cursor.pos(), "skipping statement");
        if skip_past(&mut self.cursor, b';', self.options.line_comments) {
            return Ok(Stage::Seeking);
        }
        Err(self.diagnostic(self.cursor.pos(), ErrorKind::NoDeclaration))
    }

    fn type_prefix(&mut self) -> Result<Stage, Diagnostic> {
        if self.cursor.current() != Some(b'*') {
            return Err(self.expected("*", "after `char`"));
        }
        let mut pointer_depth = 0u8;
        while pointer_depth < MAX_POINTER_DEPTH && self.cursor.current() == Some(b'*') {
            self.cursor.advance();
            self.skip();
            pointer_depth += 1;
        }
        Ok(Stage::Identifier { pointer_depth })
    }

    fn identifier(&mut self, pointer_depth: u8) -> Result<Stage, Diagnostic> {
        let token = self.cursor.token_chars();
        if !is_identifier(token) {
            let found = self.found();
            return Err(self.diagnostic(self.cursor.pos(), ErrorKind::InvalidIdentifier { found }));
        }
        self.cursor.advance_by(token.len());
        Ok(Stage::ArrayDims {
            pointer_depth,
            name: text(token),
        })
    }

    fn array_dims(&mut self, pointer_depth: u8, name: String) -> Result<Stage, Diagnostic> {
        let mut dims = Vec::new();
        while dims.len() < MAX_DIMS && self.cursor.current() == Some(b'[') {
            self.cursor.advance();
            self.skip();
            dims.push(self.dimension()?);
            self.expect(b']', "]", "after array dimension")?;
        }
        if self.options.require_full_rank && usize::from(pointer_depth) + dims.len() != FULL_RANK {
            let kind = ErrorKind::RankMismatch {
                pointer_depth,
                dims: dims.len(),
            };
            return Err(self.diagnostic(self.decl_begin, kind));
        }
        Ok(Stage::Assignment(Declarator {
            pointer_depth,
            name,
            dims,
        }))
    }

    /// The size between `[` and `]`; `None` when left empty.
    fn dimension(&mut self) -> Result<Option<u64>, Diagnostic> {
        let pos = self.cursor.pos();
        let digits = self.cursor.token_chars();
        let valid = digits.iter().all(u8::is_ascii_digit)
            && (!digits.is_empty() || self.options.allow_empty_dims);
        if !valid {
            let found = self.found();
            return Err(self.diagnostic(pos, ErrorKind::InvalidDimension { found }));
        }
        if digits.is_empty() {
            return Ok(None);
        }
        let digits = text(digits);
        let size = digits
            .parse::<u64>()
            .map_err(|_| self.diagnostic(pos, ErrorKind::DimensionOverflow { digits: digits.clone() }))?;
        self.cursor.advance_by(digits.len());
        self.skip();
        Ok(Some(size))
    }

    fn assignment(&mut self, declarator: Declarator) -> Result<Stage, Diagnostic> {
        if self.cursor.current() != Some(b'=') {
            return Err(self.expected("=", "after declarator"));
        }
        self.cursor.advance();
        Ok(Stage::TableBody(declarator))
    }

    fn table_body(&mut self, declarator: Declarator) -> Stage {
        let mut builder = TableBuilder::new();
        if let Err(d) = self.initializer(&mut builder) {
            self.report(d);
            return Stage::Failed {
                table: builder.finish(),
            };
        }
        Stage::Done {
            declarator,
            table: builder.finish(),
            end: self.cursor.pos(),
        }
    }

    fn initializer(&mut self, builder: &mut TableBuilder) -> Result<(), Diagnostic> {
        self.expect(b'{', "{", "to open the table initializer")?;
        while self.cursor.current() == Some(b'{') {
            builder.new_row();
            self.cursor.advance();
            self.skip();
            let empty_row = self.options.allow_empty_rows && self.cursor.current() == Some(b'}');
            if !empty_row {
                self.row(builder)?;
            }
            self.expect(b'}', "}", "to close the row")?;
            if self.cursor.current() != Some(b',') {
                break;
            }
            self.cursor.advance();
            self.skip();
        }
        self.expect(b'}', "}", "to close the table initializer")?;
        if self.cursor.current() != Some(b';') {
            return Err(self.expected(";", "after the table initializer"));
        }
        self.cursor.advance();
        Ok(())
    }

    fn row(&mut self, builder: &mut TableBuilder) -> Result<(), Diagnostic> {
        if self.cursor.current() != Some(b'"') {
            return Err(self.expected("\"", "to open a string"));
        }
        while self.cursor.current() == Some(b'"') {
            self.string_literal(builder)?;
            self.skip();
            if self.cursor.current() != Some(b',') {
                break;
            }
            self.cursor.advance();
            self.skip();
        }
        Ok(())
    }

    /// Decodes the literal under the cursor into a new cell. On failure the
    /// partially decoded value is still appended.
    fn string_literal(&mut self, builder: &mut TableBuilder) -> Result<(), Diagnostic> {
        self.cursor.advance();
        let body_start = self.cursor.pos();
        match decode_quoted(self.cursor.remaining(), self.options.hex_escape_max_digits) {
            Ok((cell, used)) => {
                self.cursor.advance_by(used);
                builder.append_cell(cell);
                Ok(())
            }
            Err(e) => {
                builder.append_cell(e.partial);
                Err(self.diagnostic(body_start + e.offset, e.kind))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> ParseResult {
        Parser::new(input.as_bytes(), &Options::default()).parse()
    }

    #[test]
    fn identifiers() {
        assert!(is_identifier(b"_t1"));
        assert!(is_identifier(b"t"));
        assert!(!is_identifier(b"1t"));
        assert!(!is_identifier(b""));
    }

    #[test]
    fn step_moves_forward_through_stages() {
        let opts = Options::default();
        let mut p = Parser::new(b"char ** t [2] = {{\"a\"}};", &opts);
        let mut names = Vec::new();
        let mut stage = Stage::Seeking;
        while !stage.is_terminal() {
            stage = p.step(stage);
            names.push(stage.name());
        }
        assert_eq!(
            names,
            [
                "type_prefix",
                "identifier",
                "array_dims",
                "assignment",
                "table_body",
                "done"
            ]
        );
    }

    #[test]
    fn seeking_loops_over_unrelated_statements() {
        let opts = Options::default();
        let mut p = Parser::new(b"int a; int b; char* t = {};", &opts);
        assert_eq!(p.step(Stage::Seeking), Stage::Seeking);
        assert_eq!(p.step(Stage::Seeking), Stage::Seeking);
        assert_eq!(p.step(Stage::Seeking), Stage::TypePrefix);
    }

    #[test]
    fn pointer_depth_is_capped_at_three() {
        let r = run("char****t = {};");
        assert!(!r.ok);
        assert!(r.diagnostics.mentions("expected identifier"));
    }

    #[test]
    fn third_dimension_is_rejected() {
        let r = run("char* t[1][1][1] = {};");
        assert!(!r.ok);
        assert!(r.diagnostics.mentions("expected `=`"));
    }

    #[test]
    fn empty_table_is_accepted() {
        let r = run("char** t = { };");
        assert!(r.ok);
        assert!(r.table.is_empty());
    }

    #[test]
    fn decode_failure_keeps_partial_cell() {
        let r = run(r#"char** t = { {"ok", "ab\qcd"} };"#);
        assert!(!r.ok);
        assert_eq!(r.table.rows(), &[vec!["ok", "ab"]]);
    }
}
