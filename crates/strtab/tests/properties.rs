//! Property tests: termination and determinism on arbitrary input, and the
//! render-then-parse round trip.

use proptest::prelude::*;
use strtab::{Declarator, Layout, Options, Table, encode::encode_declaration, parse};

fn fragment() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "char", "static", "const", "int", "*", " ", "t", "[", "2", "]", "=", "{", "}", "\"",
        "'", "a", "\\", "n", "x4", ",", ";", "//", "/*", "*/", "\n", "\t",
    ])
}

fn source_like() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(fragment(), 0..64).prop_map(|v| v.concat().into_bytes())
}

fn table() -> impl Strategy<Value = Table> {
    prop::collection::vec(prop::collection::vec(any::<String>(), 1..5), 0..5).prop_map(Table::from)
}

fn check_result_shape(input: &[u8], r: &strtab::ParseResult) {
    if r.ok {
        assert!(r.decl_begin < r.decl_end);
        assert!(r.decl_end <= input.len());
        assert!(input[r.decl_begin..].starts_with(b"char"));
        assert_eq!(input[r.decl_end - 1], b';');
    } else {
        assert!(!r.diagnostics.is_empty());
    }
}

proptest! {
    #[test]
    fn arbitrary_bytes_terminate_deterministically(input in prop::collection::vec(any::<u8>(), 0..512)) {
        let opts = Options::default();
        let a = parse(&input, &opts);
        let b = parse(&input, &opts);
        prop_assert_eq!(&a, &b);
        check_result_shape(&input, &a);
    }

    #[test]
    fn source_like_input_terminates_deterministically(input in source_like()) {
        for opts in [
            Options::default(),
            Options { allow_empty_rows: true, allow_empty_dims: false, ..Options::default() },
            Options { line_comments: strtab::LineCommentPolicy::PromoteBlock, ..Options::default() },
        ] {
            let a = parse(&input, &opts);
            let b = parse(&input, &opts);
            prop_assert_eq!(&a, &b);
            check_result_shape(&input, &a);
        }
    }

    #[test]
    fn rendered_tables_parse_back(t in table(), compact in any::<bool>()) {
        let opts = Options {
            layout: if compact { Layout::Compact } else { Layout::Expanded },
            ..Options::default()
        };
        let decl = Declarator { pointer_depth: 2, name: "t".into(), dims: vec![None] };
        let src = encode_declaration(&decl, &t, &opts);
        let r = parse(src.as_bytes(), &opts);
        prop_assert!(r.ok, "{}\n{}", src, r.diagnostics);
        prop_assert_eq!(r.table, t);
        prop_assert_eq!(r.declarator, decl);
    }

    #[test]
    fn reparsing_a_rendering_is_stable(t in table()) {
        let opts = Options::default();
        let first = strtab::encode_to_string(&t, &opts);
        let parsed = strtab::decode_from_str(&format!("char** t = {first};"), &opts).unwrap();
        prop_assert_eq!(strtab::encode_to_string(&parsed, &opts), first);
    }
}
