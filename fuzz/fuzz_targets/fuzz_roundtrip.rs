#![no_main]
use libfuzzer_sys::fuzz_target;
use strtab::{Declarator, Layout, Options, Table, encode::encode_declaration, parse};

fuzz_target!(|input: (Vec<Vec<String>>, bool)| {
    let (rows, compact) = input;
    let table = Table::from(rows);
    let opts = Options {
        allow_empty_rows: true,
        layout: if compact { Layout::Compact } else { Layout::Expanded },
        ..Options::default()
    };
    let decl = Declarator {
        pointer_depth: 1,
        name: "table".into(),
        dims: vec![Some(table.len() as u64), None],
    };
    let src = encode_declaration(&decl, &table, &opts);
    let r = parse(src.as_bytes(), &opts);
    if !r.ok {
        panic!("rendered table failed to parse:\n{}\n{}", src, r.diagnostics);
    }
    assert_eq!(r.table, table);
    assert_eq!(r.declarator, decl);
});
