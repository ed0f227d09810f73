//! Row/table data model and the accumulator that grows it.

#[cfg(feature = "serde")]
use serde::Serialize;

/// One brace-delimited group of decoded strings, in source order.
pub type Row = Vec<String>;

/// Every row found in one declaration's initializer, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Total number of cells across all rows.
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}

impl From<Vec<Row>> for Table {
    fn from(rows: Vec<Row>) -> Self {
        Self { rows }
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = core::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl core::ops::Index<usize> for Table {
    type Output = Row;

    fn index(&self, index: usize) -> &Row {
        &self.rows[index]
    }
}

/// Pure accumulator: no validation happens here.
#[derive(Debug, Default)]
pub struct TableBuilder {
    table: Table,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an empty row and makes it the current one.
    pub fn new_row(&mut self) {
        self.table.rows.push(Row::new());
    }

    /// Appends a cell to the current row, opening one first if none exists yet.
    pub fn append_cell(&mut self, cell: String) {
        match self.table.rows.last_mut() {
            Some(row) => row.push(cell),
            None => self.table.rows.push(vec![cell]),
        }
    }

    pub fn finish(self) -> Table {
        self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_keep_source_order() {
        let mut b = TableBuilder::new();
        b.new_row();
        b.append_cell("a".into());
        b.append_cell("b".into());
        b.new_row();
        b.append_cell("c".into());
        let t = b.finish();
        assert_eq!(t.rows(), &[vec!["a", "b"], vec!["c"]]);
        assert_eq!(t.cell_count(), 3);
    }

    #[test]
    fn append_without_row_opens_one() {
        let mut b = TableBuilder::new();
        b.append_cell("x".into());
        assert_eq!(b.finish(), Table::from(vec![vec!["x".to_string()]]));
    }

    #[test]
    fn empty_rows_are_kept() {
        let mut b = TableBuilder::new();
        b.new_row();
        b.new_row();
        let t = b.finish();
        assert_eq!(t.len(), 2);
        assert!(t[0].is_empty());
    }
}
