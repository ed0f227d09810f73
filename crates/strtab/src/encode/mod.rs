//! Re-serializes parsed tables into C initializer and declaration text.

pub mod primitives;
pub mod writer;

use crate::options::Options;
use crate::result::Declarator;
use crate::table::Table;

use self::primitives::format_dimension;
use self::writer::TableWriter;

/// The brace initializer alone: `{ {"a", "b"}, {"c"} }`.
pub fn encode_table(table: &Table, options: &Options) -> String {
    let mut w = TableWriter::new(options.indent);
    w.table(table, options.layout);
    w.into_string()
}

/// A complete statement: `char** NAME[N] = { ... };` followed by a newline.
pub fn encode_declaration(declarator: &Declarator, table: &Table, options: &Options) -> String {
    let mut w = TableWriter::new(options.indent);
    w.push_str("char");
    for _ in 0..declarator.pointer_depth.max(1) {
        w.push_str("*");
    }
    w.push_str(" ");
    w.push_str(&declarator.name);
    for size in &declarator.dims {
        w.push_str(&format_dimension(*size));
    }
    w.push_str(" = ");
    w.table(table, options.layout);
    w.push_str(";\n");
    w.into_string()
}
