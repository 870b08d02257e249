//! End-to-end integration test for the merge workflow
//!
//! This test exercises the complete flow: load -> merge -> render ->
//! reload -> verify.

mod fixtures;

use docsync_content::{DiffMode, EditKind, merge, progress, render_source, search};
use fixtures::{HEAP_EN, HEAP_ZH, bilingual_zh_cn, load};
use pretty_assertions::assert_eq;

#[test]
fn test_merge_edits_every_documented_declaration() {
    let source = load(HEAP_ZH, "heap_zh.go");
    let mut target = load(HEAP_EN, "heap.go");

    let report = merge(&source, &mut target).unwrap();

    assert!(!report.style_mismatch);
    assert!(report.edits.iter().all(|e| e.kind == EditKind::Merge));
    let identifiers: Vec<&str> = report.edits.iter().map(|e| e.identifier.as_str()).collect();
    for expected in ["OK", "Item", "Item.value", "Pop"] {
        assert!(identifiers.contains(&expected), "missing edit for {expected}");
    }
}

#[test]
fn test_rendered_file_keeps_both_languages() {
    let rendered = bilingual_zh_cn();

    assert!(rendered.starts_with(
        "// Copyright 2009 The Go Authors. All rights reserved.\n\n//go:build ignore\n\n"
    ));
    assert!(rendered.contains("package heap // import \"container/heap\"\n"));
    assert!(rendered.contains("\t// OK is success.\n\n\t// OK 表示成功。\n\tOK Code = 0\n"));
    assert!(rendered.contains("\t// The value of the item.\n\n\t// 元素的值。\n\tvalue string\n"));
    assert!(rendered.contains("// Pop 从堆中移除最小元素（根据 Less）。\nfunc Pop(h Interface) any\n"));
    assert!(!rendered.contains("h.Len()"));
}

#[test]
fn test_reloaded_file_is_fully_translated() {
    let rendered = bilingual_zh_cn();
    let tree = load(&rendered, "doc_zh_CN.go");

    assert!(tree.bilingual);
    assert_eq!(progress(&tree), 100);
    let pop = search(&tree, "Pop").unwrap().decl;
    assert_eq!(pop.doc.as_ref().unwrap().text(), "Pop 从堆中移除最小元素（根据 Less）。\n");
}

#[test]
fn test_rendering_a_reloaded_file_is_stable() {
    let rendered = bilingual_zh_cn();
    let tree = load(&rendered, "doc_zh_CN.go");

    assert_eq!(render_source(&tree).unwrap(), rendered);
}

#[test]
fn test_reloaded_file_matches_the_package_declarations() {
    let english = load(HEAP_EN, "heap.go");
    let bilingual = load(&bilingual_zh_cn(), "doc_zh_CN.go");

    let records = docsync_content::diff(&english, &bilingual, DiffMode::Full);

    assert!(records.iter().all(|r| r.kind == docsync_content::DiscrepancyKind::Doc));
    assert!(records.iter().any(|r| r.identifier == "Pop"));
}

#[test]
fn test_source_files_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc_zh_CN.go");
    std::fs::write(&path, bilingual_zh_cn()).unwrap();

    let tree = docsync_go::parse_file(&path).unwrap();
    assert!(tree.bilingual);
    assert_eq!(progress(&tree), 100);
}
