//! Scenario tests for keeping translated documentation in step with an
//! upstream package

mod fixtures;

use docsync_content::{
    DiffMode, DiscrepancyKind, EditKind, diff, normalize, progress, render_source, replace, search,
};
use docsync_text::wrap;
use fixtures::{HEAP_EN, bilingual_zh_cn, load};
use pretty_assertions::assert_eq;
use rstest::rstest;

// =============================================================================
// Propagating a finished translation
// =============================================================================

#[test]
fn test_replace_completes_a_sibling_translation() {
    let source = load(&bilingual_zh_cn(), "doc_zh_CN.go");
    let mut target = load(HEAP_EN, "doc_zh_TW.go");
    assert_eq!(progress(&target), 0);

    let report = replace(&mut target, &source).unwrap();
    assert!(!report.is_empty());
    assert!(report.edits.iter().all(|e| e.kind == EditKind::Translate));
    assert!(report.edits.iter().any(|e| e.identifier == "Item.value"));

    let reloaded = load(&render_source(&target).unwrap(), "doc_zh_TW.go");
    assert_eq!(progress(&reloaded), 100);
    let pop = search(&reloaded, "Pop").unwrap().decl;
    assert_eq!(pop.doc.as_ref().unwrap().text(), "Pop 从堆中移除最小元素（根据 Less）。\n");
}

#[test]
fn test_replace_leaves_finished_translations_alone() {
    let source = load(&bilingual_zh_cn(), "doc_zh_CN.go");
    let mut target = load(HEAP_EN, "doc_zh_TW.go");
    replace(&mut target, &source).unwrap();
    let mut reloaded = load(&render_source(&target).unwrap(), "doc_zh_TW.go");

    let report = replace(&mut reloaded, &source).unwrap();
    assert!(report.is_empty());
}

#[rstest]
#[case("doc_zh_TW.go", "doc_zh_CN.go", false)]
#[case("heap.go", "doc_zh_CN.go", true)]
#[case("doc_zh_TW.go", "heap_zh.go", true)]
fn test_replace_requires_bilingual_names(
    #[case] target_name: &str,
    #[case] source_name: &str,
    #[case] skipped: bool,
) {
    let source = load(&bilingual_zh_cn(), source_name);
    let mut target = load(HEAP_EN, target_name);

    let report = replace(&mut target, &source).unwrap();
    assert_eq!(report.style_mismatch, skipped);
    assert_eq!(report.is_empty(), skipped);
}

// =============================================================================
// Detecting upstream changes
// =============================================================================

#[test]
fn test_upstream_doc_change_is_reported() {
    let before = load(HEAP_EN, "heap.go");
    let after = load(&HEAP_EN.replace("minimum element", "smallest element"), "heap.go");

    let records = diff(&before, &after, DiffMode::Full);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind, DiscrepancyKind::Doc);
    assert_eq!(records[0].identifier, "Pop");
    assert!(records[0].side_b.contains("smallest element"));
}

#[test]
fn test_upstream_reflow_is_not_a_change() {
    let before = load(HEAP_EN, "heap.go");
    let reflowed = HEAP_EN.replace(
        "// Pop removes the minimum element (according to Less) from the heap.",
        "// Pop removes the minimum element\n// (according to Less) from the heap.",
    );
    let after = load(&reflowed, "heap.go");

    assert!(diff(&before, &after, DiffMode::Full).is_empty());
}

#[test]
fn test_upstream_signature_change_is_reported() {
    let before = load(HEAP_EN, "heap.go");
    let after = load(&HEAP_EN.replace("func Pop(h Interface) any", "func Pop(h Interface) (any, bool)"), "heap.go");

    let records = diff(&before, &after, DiffMode::First);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind, DiscrepancyKind::Signature);
}

#[test]
fn test_removed_declaration_is_reported() {
    let before = load(HEAP_EN, "heap.go");
    let trimmed = HEAP_EN.replace(
        "// An Item is something we manage in a priority queue.\ntype Item struct {\n\t// The value of the item.\n\tvalue string\n}\n",
        "",
    );
    let after = load(&trimmed, "heap.go");

    let records = diff(&before, &after, DiffMode::Full);
    assert!(records.iter().any(|r| r.kind == DiscrepancyKind::Missing && r.identifier == "Item"));
}

// =============================================================================
// Reflowing translated text
// =============================================================================

#[test]
fn test_wrapping_wide_text_keeps_its_content() {
    let text = "堆是一种树形数据结构，每个节点都小于等于其子节点，最小元素位于根部。";

    let wrapped = wrap(text, "// ", 20);
    let lines: Vec<&str> = wrapped.lines().collect();
    assert!(lines.len() > 1);
    assert!(lines.iter().all(|line| line.starts_with("// ")));

    let joined: Vec<&str> = lines.iter().map(|line| &line[3..]).collect();
    assert_eq!(normalize(&joined.join("\n")), text);
}
