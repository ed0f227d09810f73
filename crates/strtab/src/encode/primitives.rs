use core::fmt::Write as _;

fn is_control(c: char) -> bool {
    let u = c as u32;
    u < 0x20 || u == 0x7F
}

/// Short escape for `c`, if the decoder has one.
fn named_escape(c: char) -> Option<&'static str> {
    Some(match c {
        '"' => "\\\"",
        '\\' => "\\\\",
        '\n' => "\\n",
        '\t' => "\\t",
        '\r' => "\\r",
        '\u{07}' => "\\a",
        '\u{08}' => "\\b",
        '\u{1B}' => "\\e",
        '\u{0C}' => "\\f",
        '\u{0B}' => "\\v",
        '\0' => "\\0",
        _ => return None,
    })
}

/// True when `c` cannot appear raw inside a rendered literal.
pub fn needs_escape(c: char) -> bool {
    c == '"' || c == '\\' || is_control(c) || !c.is_ascii()
}

/// Appends `s` as a double-quoted literal body. Everything outside printable
/// ASCII is written as `\uXXXX` or `\UXXXXXXXX`; both are read back with a
/// fixed digit cap, so a following hex digit never joins the escape.
pub fn escape_and_quote_into(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        if !needs_escape(c) {
            out.push(c);
            continue;
        }
        match named_escape(c) {
            Some(e) => out.push_str(e),
            None if (c as u32) <= 0xFFFF => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            None => {
                let _ = write!(out, "\\U{:08X}", c as u32);
            }
        }
    }
    out.push('"');
}

pub fn escape_and_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    escape_and_quote_into(&mut out, s);
    out
}

/// `[N]` or `[]` for an unspecified size.
pub fn format_dimension(size: Option<u64>) -> String {
    match size {
        Some(n) => format!("[{n}]"),
        None => "[]".to_string(),
    }
}
