use core::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::error::{Error, ErrorKind};
use crate::table::Table;

/// The `char*... NAME[..][..]` head of a recognized declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Declarator {
    /// Number of `*` after `char` (1 to 3)
    pub pointer_depth: u8,
    pub name: String,
    /// Declared sizes; `None` for `[]`
    pub dims: Vec<Option<u64>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Diagnostic {
    /// Byte offset into the input buffer
    pub offset: usize,
    /// 1-based
    pub line: usize,
    /// 1-based, counted in bytes
    pub column: usize,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub kind: ErrorKind,
}

impl Diagnostic {
    pub fn at(input: &[u8], offset: usize, kind: ErrorKind) -> Self {
        let offset = offset.min(input.len());
        let before = &input[..offset];
        let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |p| p + 1);
        Self {
            offset,
            line,
            column: offset - line_start + 1,
            kind,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}: {}", self.line, self.column, self.kind)
    }
}

impl From<Diagnostic> for Error {
    fn from(d: Diagnostic) -> Self {
        Error::Syntax {
            line: d.line,
            column: d.column,
            kind: d.kind,
        }
    }
}

/// Append-only log of messages produced while parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    pub fn last(&self) -> Option<&Diagnostic> {
        self.0.last()
    }

    /// True when any message's text contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.0.iter().any(|d| d.to_string().contains(needle))
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = core::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in &self.0 {
            writeln!(f, "{d}")?;
        }
        Ok(())
    }
}

/// Outcome of one parse call.
///
/// `table`, `declarator`, `decl_begin` and `decl_end` are meaningful only when
/// `ok` is true; after a failure the table holds whatever was collected before the
/// fatal error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ParseResult {
    pub ok: bool,
    pub table: Table,
    pub diagnostics: Diagnostics,
    pub declarator: Declarator,
    /// Offset of the `c` of `char`
    pub decl_begin: usize,
    /// Offset just past the terminating `;`
    pub decl_end: usize,
}

impl ParseResult {
    /// The parsed table, or the fatal diagnostic as an [`Error`].
    pub fn into_result(self) -> crate::Result<Table> {
        if self.ok {
            return Ok(self.table);
        }
        match self.diagnostics.last() {
            Some(d) => Err(d.clone().into()),
            None => Err(Error::Message("parse failed without a diagnostic".into())),
        }
    }

    /// Byte range of the recognized declaration, when there is one.
    pub fn span(&self) -> Option<core::ops::Range<usize>> {
        self.ok.then_some(self.decl_begin..self.decl_end)
    }
}
