/// How a `/*` met inside a `//` comment is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCommentPolicy {
    /// The line comment runs to end of line; an embedded `/*` is comment text.
    #[default]
    Swallow,
    /// An embedded `/*` turns the line comment into a block comment that ends at `*/`.
    PromoteBlock,
}

/// Layout used when rendering a table back into initializer text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// One row brace and one cell per line
    #[default]
    Expanded,
    /// Everything on a single line: `{ {"a", "b"}, {"c"} }`
    Compact,
}

#[derive(Debug, Clone)]
pub struct Options {
    pub line_comments: LineCommentPolicy,
    /// Accept `[]` (unspecified size) in array dimensions
    pub allow_empty_dims: bool,
    /// Accept rows written as `{}`
    pub allow_empty_rows: bool,
    /// Require pointer stars plus array dimensions to add up to three
    pub require_full_rank: bool,
    /// Most hex digits a `\x` escape consumes, 1 to 8 (default: 8)
    pub hex_escape_max_digits: usize,
    /// Layout for rendering
    pub layout: Layout,
    /// Indentation size for the expanded layout (default: 2 spaces)
    pub indent: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            line_comments: LineCommentPolicy::default(),
            allow_empty_dims: true,
            allow_empty_rows: false,
            require_full_rank: false,
            hex_escape_max_digits: crate::decode::escape::HEX_MAX_DIGITS,
            layout: Layout::default(),
            indent: 2,
        }
    }
}
