use crate::encode::primitives::escape_and_quote_into;
use crate::options::Layout;
use crate::table::Table;

/// Builds initializer text, one line at a time for the expanded layout.
pub struct TableWriter {
    out: String,
    indent_cache: String,
    indent: usize,
}

impl TableWriter {
    pub fn new(indent: usize) -> Self {
        Self {
            out: String::new(),
            indent_cache: String::new(),
            indent,
        }
    }

    fn write_indent(&mut self, depth: usize) {
        let width = depth * self.indent;
        if width == 0 {
            return;
        }
        if self.indent_cache.len() < width {
            self.indent_cache
                .extend(core::iter::repeat(' ').take(width - self.indent_cache.len()));
        }
        self.out.push_str(&self.indent_cache[..width]);
    }

    pub fn push_str(&mut self, s: &str) {
        self.out.push_str(s);
    }

    pub fn table(&mut self, table: &Table, layout: Layout) {
        if table.is_empty() {
            self.out.push_str("{}");
            return;
        }
        match layout {
            Layout::Expanded => self.expanded(table),
            Layout::Compact => self.compact(table),
        }
    }

    fn expanded(&mut self, table: &Table) {
        self.out.push_str("{\n");
        for (r, row) in table.iter().enumerate() {
            if r > 0 {
                self.out.push_str(",\n");
            }
            self.write_indent(1);
            if row.is_empty() {
                self.out.push_str("{}");
                continue;
            }
            self.out.push_str("{\n");
            for (c, cell) in row.iter().enumerate() {
                if c > 0 {
                    self.out.push_str(",\n");
                }
                self.write_indent(2);
                escape_and_quote_into(&mut self.out, cell);
            }
            self.out.push('\n');
            self.write_indent(1);
            self.out.push('}');
        }
        self.out.push_str("\n}");
    }

    fn compact(&mut self, table: &Table) {
        self.out.push_str("{ ");
        for (r, row) in table.iter().enumerate() {
            if r > 0 {
                self.out.push_str(", ");
            }
            self.out.push('{');
            for (c, cell) in row.iter().enumerate() {
                if c > 0 {
                    self.out.push_str(", ");
                }
                escape_and_quote_into(&mut self.out, cell);
            }
            self.out.push('}');
        }
        self.out.push_str(" }");
    }

    pub fn into_string(self) -> String {
        self.out
    }
}
