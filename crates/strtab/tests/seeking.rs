use strtab::{ErrorKind, LineCommentPolicy, Options, parse};

#[test]
fn semicolon_inside_string_does_not_end_statement() {
    let src = r#"int x = "a;b"; char** t = { {"ok"} };"#;
    let r = parse(src.as_bytes(), &Options::default());
    assert!(r.ok, "{}", r.diagnostics);
    assert_eq!(r.table[0], vec!["ok"]);
    assert_eq!(r.decl_begin, src.find("char").unwrap());
}

#[test]
fn char_keyword_inside_string_is_not_a_declaration() {
    let src = r#"const char_t* s = "x; char* t = {};"; char** real = { {"y"} };"#;
    let r = parse(src.as_bytes(), &Options::default());
    assert!(r.ok, "{}", r.diagnostics);
    assert_eq!(r.declarator.name, "real");
}

#[test]
fn semicolon_in_char_literal_is_skipped() {
    let src = r#"int c = ';'; char** t = { {"a"} };"#;
    let r = parse(src.as_bytes(), &Options::default());
    assert!(r.ok, "{}", r.diagnostics);
}

#[test]
fn double_quote_inside_char_literal() {
    let src = r#"int q = '"'; char** t = { {"a"} };"#;
    assert!(parse(src.as_bytes(), &Options::default()).ok);
}

#[test]
fn commented_out_declaration_is_ignored() {
    let src = "// char** t = {{\"old\"}};\n/* char** u = {{\"older\"}}; */\nchar** v = {{\"new\"}};";
    let r = parse(src.as_bytes(), &Options::default());
    assert!(r.ok, "{}", r.diagnostics);
    assert_eq!(r.declarator.name, "v");
    assert_eq!(r.table[0], vec!["new"]);
}

#[test]
fn semicolon_inside_comment_is_ignored() {
    let src = "int a /* ; */ = 1; char** t = {{\"a\"}};";
    assert!(parse(src.as_bytes(), &Options::default()).ok);
}

#[test]
fn unrelated_char_types_are_skipped() {
    let src = r#"unsigned char* buf; charset x; char** t = {{"a"}};"#;
    let r = parse(src.as_bytes(), &Options::default());
    assert!(r.ok, "{}", r.diagnostics);
}

#[test]
fn no_declaration_is_reported() {
    for src in ["", "   ", "int a; int b;", "// only a comment", "{ {\"bad\\q\"} };"] {
        let r = parse(src.as_bytes(), &Options::default());
        assert!(!r.ok, "{src:?}");
        assert_eq!(r.diagnostics.len(), 1);
        assert_eq!(r.diagnostics.last().unwrap().kind, ErrorKind::NoDeclaration);
    }
}

#[test]
fn unbalanced_quote_runs_to_end() {
    let r = parse(br#"int x = "open; char** t = {{"a"}};"#, &Options::default());
    assert!(!r.ok);
}

#[test]
fn line_comment_swallows_block_opener_by_default() {
    let src = "// see /* here\nchar** t = {{\"a\"}}; // */";
    let r = parse(src.as_bytes(), &Options::default());
    assert!(r.ok, "{}", r.diagnostics);
}

#[test]
fn line_comment_can_promote_block_opener() {
    let src = "// see /* here\nchar** t = {{\"a\"}}; */ char** u = {{\"b\"}};";
    let opts = Options {
        line_comments: LineCommentPolicy::PromoteBlock,
        ..Options::default()
    };
    let r = parse(src.as_bytes(), &opts);
    assert!(r.ok, "{}", r.diagnostics);
    assert_eq!(r.declarator.name, "u");

    let r = parse(src.as_bytes(), &Options::default());
    assert_eq!(r.declarator.name, "t");
}

#[test]
fn crlf_line_endings() {
    let src = "int a;\r\n// c\r\nchar** t = {\r\n  {\"a\"}\r\n};\r\n";
    let r = parse(src.as_bytes(), &Options::default());
    assert!(r.ok, "{}", r.diagnostics);
}

#[test]
fn statement_without_semicolon_hides_following_declaration() {
    let opts = Options::default();
    for prefix in ["#include <stdio.h>\n", "void f(void) { g(); }\n"] {
        let src = format!("{prefix}char** t = {{ {{\"a\"}} }};");
        let r = parse(src.as_bytes(), &opts);
        assert!(!r.ok, "{prefix:?}");
        assert_eq!(r.diagnostics.last().unwrap().kind, ErrorKind::NoDeclaration);

        let start = src.find("char").unwrap();
        let r = strtab::parse_range(src.as_bytes(), start..src.len(), &opts);
        assert!(r.ok, "{}", r.diagnostics);
        assert_eq!(r.decl_begin, start);
    }
}
