//! Bounds-checked view over the input buffer with quote/comment tracking.

use core::ops::Range;

/// Which comment form is currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    Line,
    Block,
}

/// Which quote form is currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteKind {
    Single,
    Double,
}

/// At most one comment and at most one quote can be open; quotes are only
/// tracked while no comment is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanState {
    pub comment: Option<CommentKind>,
    pub quote: Option<QuoteKind>,
}

impl ScanState {
    pub fn in_line_comment(&self) -> bool {
        self.comment == Some(CommentKind::Line)
    }

    pub fn in_block_comment(&self) -> bool {
        self.comment == Some(CommentKind::Block)
    }

    pub fn in_single_quote(&self) -> bool {
        self.quote == Some(QuoteKind::Single)
    }

    pub fn in_double_quote(&self) -> bool {
        self.quote == Some(QuoteKind::Double)
    }

    /// Inside a comment or a quote.
    pub fn is_special(&self) -> bool {
        self.comment.is_some() || self.quote.is_some()
    }
}

/// Fixed `start..end` bounds plus the moving `current` position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SourceSpan {
    start: usize,
    end: usize,
    current: usize,
}

#[inline]
pub fn is_token_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

pub struct Cursor<'a> {
    input: &'a [u8],
    span: SourceSpan,
    state: ScanState,
    terminated: bool,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_range(input, 0..input.len())
    }

    /// Cursor over `range` of `input`; the range is clamped to the buffer and
    /// positions stay relative to the whole buffer.
    pub fn with_range(input: &'a [u8], range: Range<usize>) -> Self {
        let end = range.end.min(input.len());
        let start = range.start.min(end);
        let mut cursor = Self {
            input,
            span: SourceSpan {
                start,
                end,
                current: start,
            },
            state: ScanState::default(),
            terminated: false,
        };
        cursor.track_quote();
        cursor
    }

    pub fn input(&self) -> &'a [u8] {
        self.input
    }

    pub fn pos(&self) -> usize {
        self.span.current
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// True once `current` reaches `end`; from then on the scan is over and
    /// `advance` no longer moves.
    pub fn at_end(&mut self) -> bool {
        if self.span.current >= self.span.end {
            self.terminated = true;
        }
        self.terminated
    }

    /// The byte under the cursor.
    pub fn current(&self) -> Option<u8> {
        self.remaining().first().copied()
    }

    /// Up to `n` bytes from the current position; shorter near the end.
    pub fn peek(&self, n: usize) -> &'a [u8] {
        let rest = self.remaining();
        &rest[..n.min(rest.len())]
    }

    /// Everything from the current position to the end of the span.
    pub fn remaining(&self) -> &'a [u8] {
        if self.terminated {
            return &[];
        }
        &self.input[self.span.current..self.span.end]
    }

    /// Longest run of `[A-Za-z0-9_]` starting at the current position.
    pub fn token_chars(&self) -> &'a [u8] {
        let rest = self.remaining();
        let len = rest.iter().take_while(|&&b| is_token_char(b)).count();
        &rest[..len]
    }

    /// Moves one byte forward. Outside comments the byte arrived at is checked
    /// for an unescaped quote, which opens or closes the matching quote state.
    pub fn advance(&mut self) {
        if self.at_end() {
            return;
        }
        self.span.current += 1;
        if self.state.comment.is_none() {
            self.track_quote();
        }
    }

    pub fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    pub(crate) fn open_comment(&mut self, kind: CommentKind) {
        self.state.comment = Some(kind);
    }

    pub(crate) fn close_comment(&mut self) {
        self.state.comment = None;
    }

    /// Jumps forward without quote tracking; only valid while a comment is open.
    #[cfg(feature = "perf_memchr")]
    pub(crate) fn skip_comment_bytes(&mut self, n: usize) {
        debug_assert!(self.state.comment.is_some());
        self.span.current = (self.span.current + n).min(self.span.end);
    }

    fn track_quote(&mut self) {
        let pos = self.span.current;
        if pos >= self.span.end {
            return;
        }
        let quote = match self.input[pos] {
            b'"' => QuoteKind::Double,
            b'\'' => QuoteKind::Single,
            _ => return,
        };
        if self.is_escaped(pos) {
            return;
        }
        match self.state.quote {
            None => self.state.quote = Some(quote),
            Some(open) if open == quote => self.state.quote = None,
            Some(_) => {}
        }
    }

    /// An odd run of backslashes right before `pos` escapes it. Nothing before
    /// the span start counts.
    fn is_escaped(&self, pos: usize) -> bool {
        let run = self.input[self.span.start..pos]
            .iter()
            .rev()
            .take_while(|&&b| b == b'\\')
            .count();
        run % 2 == 1
    }
}
