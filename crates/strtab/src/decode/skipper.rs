//! Whitespace and comment skipping.

use crate::decode::cursor::{CommentKind, Cursor};
use crate::options::LineCommentPolicy;

#[inline]
fn is_blank(b: u8) -> bool {
    b.is_ascii_whitespace() || b.is_ascii_control()
}

/// Consumes whitespace, control bytes and comments. Comment openers are only
/// recognized while no quote is open.
pub fn skip(cursor: &mut Cursor<'_>, policy: LineCommentPolicy) {
    while !cursor.at_end() {
        match cursor.state().comment {
            Some(CommentKind::Line) => skip_line_comment(cursor, policy),
            Some(CommentKind::Block) => skip_block_comment(cursor),
            None => {
                let Some(b) = cursor.current() else { break };
                if is_blank(b) {
                    cursor.advance();
                    continue;
                }
                if cursor.state().quote.is_some() {
                    break;
                }
                match cursor.peek(2) {
                    b"//" => open(cursor, CommentKind::Line),
                    b"/*" => open(cursor, CommentKind::Block),
                    _ => break,
                }
            }
        }
    }
}

fn open(cursor: &mut Cursor<'_>, kind: CommentKind) {
    cursor.open_comment(kind);
    cursor.advance_by(2);
}

/// Runs until the line comment is closed, promoted or the input ends.
fn skip_line_comment(cursor: &mut Cursor<'_>, policy: LineCommentPolicy) {
    if policy == LineCommentPolicy::Swallow {
        jump_to_newline(cursor);
    }
    while let Some(b) = cursor.current() {
        if b == b'\n' {
            cursor.close_comment();
            cursor.advance();
            return;
        }
        if policy == LineCommentPolicy::PromoteBlock && cursor.peek(2) == b"/*" {
            cursor.open_comment(CommentKind::Block);
            cursor.advance_by(2);
            return;
        }
        cursor.advance();
    }
    cursor.at_end();
}

fn skip_block_comment(cursor: &mut Cursor<'_>) {
    jump_to_block_end(cursor);
    while cursor.current().is_some() {
        if cursor.peek(2) == b"*/" {
            cursor.advance();
            cursor.close_comment();
            cursor.advance();
            return;
        }
        cursor.advance();
    }
    cursor.at_end();
}

#[cfg(feature = "perf_memchr")]
fn jump_to_newline(cursor: &mut Cursor<'_>) {
    let rest = cursor.remaining();
    let n = memchr::memchr(b'\n', rest).unwrap_or(rest.len());
    cursor.skip_comment_bytes(n);
}

#[cfg(not(feature = "perf_memchr"))]
fn jump_to_newline(_cursor: &mut Cursor<'_>) {}

#[cfg(feature = "perf_memchr")]
fn jump_to_block_end(cursor: &mut Cursor<'_>) {
    let rest = cursor.remaining();
    let n = memchr::memmem::find(rest, b"*/").unwrap_or(rest.len());
    cursor.skip_comment_bytes(n);
}

#[cfg(not(feature = "perf_memchr"))]
fn jump_to_block_end(_cursor: &mut Cursor<'_>) {}

/// Moves past the next `target` byte that sits outside quotes and comments.
/// Returns false when the input ends first.
pub fn skip_past(cursor: &mut Cursor<'_>, target: u8, policy: LineCommentPolicy) -> bool {
    loop {
        skip(cursor, policy);
        let Some(b) = cursor.current() else {
            return false;
        };
        let quoted = cursor.state().quote.is_some();
        cursor.advance();
        if b == target && !quoted {
            return true;
        }
    }
}
