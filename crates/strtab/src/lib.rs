#![doc = include_str!("../README.md")]

pub mod error;
pub mod options;
pub mod table;
pub mod result;
pub mod encode;
pub mod decode;

pub use crate::decode::escape::{DecodeError, unescape, unescape_with};
pub use crate::decode::parser::{Parser, Stage};
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::options::{Layout, LineCommentPolicy, Options};
pub use crate::result::{Declarator, Diagnostic, Diagnostics, ParseResult};
pub use crate::table::{Row, Table, TableBuilder};

use std::io::{Read, Write};
use std::ops::Range;

/// Finds and decodes the first string table declaration in `input`.
///
/// Never fails outright: a missing or malformed declaration comes back with
/// `ok == false` and diagnostics describing why.
#[tracing::instrument(level = "debug", skip_all, fields(len = input.len()))]
pub fn parse(input: &[u8], options: &Options) -> ParseResult {
    Parser::new(input, options).parse()
}

/// Like [`parse`], restricted to `range` of `input`. Offsets in the result stay
/// relative to the whole buffer.
#[tracing::instrument(level = "debug", skip_all, fields(start = range.start, end = range.end))]
pub fn parse_range(input: &[u8], range: Range<usize>, options: &Options) -> ParseResult {
    Parser::with_range(input, range, options).parse()
}

pub fn decode_from_str(s: &str, options: &Options) -> Result<Table> {
    parse(s.as_bytes(), options).into_result()
}

pub fn decode_from_reader<R: Read>(mut reader: R, options: &Options) -> Result<Table> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    parse(&buf, options).into_result()
}

pub fn encode_to_string(table: &Table, options: &Options) -> String {
    crate::encode::encode_table(table, options)
}

/// Renders the full `char*... NAME[..] = {...};` statement of a successful parse.
pub fn encode_declaration(result: &ParseResult, options: &Options) -> Option<String> {
    result
        .ok
        .then(|| crate::encode::encode_declaration(&result.declarator, &result.table, options))
}

pub fn encode_to_writer<W: Write>(mut writer: W, table: &Table, options: &Options) -> Result<()> {
    let s = encode_to_string(table, options);
    writer.write_all(s.as_bytes())?;
    Ok(())
}
