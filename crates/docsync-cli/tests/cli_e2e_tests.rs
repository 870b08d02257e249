//! CLI end-to-end tests that invoke the compiled `docsync` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

const HEAP: &str = "// Package heap provides heap operations.
package heap

// Pop removes the minimum element.
func Pop(h Interface) any

// Push pushes the element x onto the heap.
func Push(h Interface, x any)
";

const HEAP_ZH: &str = "// heap 包提供堆操作。
package heap

// Pop 移除最小元素。
func Pop(h Interface) any

// Push 将元素 x 压入堆中。
func Push(h Interface, x any)
";

/// Get a Command for the docsync binary
fn docsync() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("docsync"));
    cmd.env_remove("DOCSYNC_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

/// Stdout of a successful run
fn stdout(cmd: &mut Command) -> String {
    let out = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(out).unwrap()
}

// ============================================================================
// Help and no-command
// ============================================================================

#[test]
fn test_help_output() {
    docsync()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("bilingual Go documentation"));
}

#[test]
fn test_no_command_shows_help_hint() {
    docsync()
        .assert()
        .success()
        .stdout(predicate::str::contains("--help"));
}

// ============================================================================
// diff
// ============================================================================

#[test]
fn test_diff_identical_files_exit_zero() {
    let dir = tempdir().unwrap();
    let a = write(&dir, "a.go", HEAP);
    let b = write(&dir, "b.go", HEAP);

    docsync().args(["diff", arg(&a), arg(&b)]).assert().success();
}

#[test]
fn test_diff_reports_changed_doc() {
    let dir = tempdir().unwrap();
    let a = write(&dir, "a.go", HEAP);
    let b = write(&dir, "b.go", &HEAP.replace("minimum", "maximum"));

    docsync()
        .args(["diff", arg(&a), arg(&b)])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("TEXT:"))
        .stdout(predicate::str::contains("maximum"));
}

#[test]
fn test_diff_json_lists_every_record_with_full() {
    let dir = tempdir().unwrap();
    let a = write(&dir, "a.go", HEAP);
    let b = write(&dir, "b.go", HEAP_ZH);

    let out = docsync()
        .args(["diff", "--full", "--json", arg(&a), arg(&b)])
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();
    let records: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(records.as_array().unwrap().len(), 3);
    assert_eq!(records[1]["identifier"], "Pop");
}

#[test]
fn test_diff_unified() {
    let dir = tempdir().unwrap();
    let a = write(&dir, "a.go", HEAP);
    let b = write(&dir, "b.go", &HEAP.replace("minimum", "maximum"));

    docsync()
        .args(["diff", "--unified", arg(&a), arg(&b)])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("--- a/Func Pop"))
        .stdout(predicate::str::contains("+Pop removes the maximum element."));
}

#[test]
fn test_diff_missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    let a = write(&dir, "a.go", HEAP);

    docsync()
        .args(["diff", arg(&a), arg(&dir.path().join("nope.go"))])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("nope.go"));
}

// ============================================================================
// merge / replace
// ============================================================================

#[test]
fn test_merge_renders_bilingual_source() {
    let dir = tempdir().unwrap();
    let target = write(&dir, "heap.go", HEAP);
    let source = write(&dir, "heap_zh.go", HEAP_ZH);
    let output = dir.path().join("doc_zh_CN.go");

    docsync()
        .args(["merge", arg(&source), arg(&target), "-o", arg(&output)])
        .assert()
        .success();

    let merged = fs::read_to_string(&output).unwrap();
    assert!(merged.contains("// Pop removes the minimum element.\n\n// Pop 移除最小元素。\nfunc Pop"));
    assert!(merged.starts_with("//go:build ignore\n"));
}

#[test]
fn test_merge_report_is_json() {
    let dir = tempdir().unwrap();
    let target = write(&dir, "heap.go", HEAP);
    let source = write(&dir, "heap_zh.go", HEAP_ZH);

    let out = docsync()
        .args(["merge", "--report", arg(&source), arg(&target)])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(report["edits"].as_array().unwrap().len(), 3);
    assert_eq!(report["style_mismatch"], false);
}

#[test]
fn test_merged_output_reports_full_progress() {
    let dir = tempdir().unwrap();
    let target = write(&dir, "heap.go", HEAP);
    let source = write(&dir, "heap_zh.go", HEAP_ZH);
    let output = dir.path().join("doc_zh_CN.go");

    docsync()
        .args(["merge", arg(&source), arg(&target), "-o", arg(&output)])
        .assert()
        .success();

    docsync()
        .args(["progress", arg(&output), arg(&target)])
        .assert()
        .success()
        .stdout(predicate::str::contains("100%"))
        .stdout(predicate::str::contains("  0%"));
}

#[test]
fn test_replace_without_bilingual_names_warns() {
    let dir = tempdir().unwrap();
    let target = write(&dir, "heap.go", HEAP);
    let source = write(&dir, "heap_zh.go", HEAP_ZH);

    docsync()
        .args(["replace", "--report", arg(&target), arg(&source)])
        .assert()
        .success()
        .stderr(predicate::str::contains("nothing replaced"))
        .stdout(predicate::str::contains("\"style_mismatch\": true"));
}

#[test]
fn test_replace_propagates_translation() {
    let dir = tempdir().unwrap();
    let english = write(&dir, "heap.go", HEAP);
    let chinese = write(&dir, "heap_zh.go", HEAP_ZH);
    let translated = dir.path().join("doc_zh_CN.go");
    docsync()
        .args(["merge", arg(&chinese), arg(&english), "-o", arg(&translated)])
        .assert()
        .success();

    let untranslated = write(&dir, "doc_zh_TW.go", HEAP);
    docsync()
        .args(["replace", arg(&untranslated), arg(&translated)])
        .assert()
        .success()
        .stdout(predicate::str::contains("// Pop 移除最小元素。"));
}

// ============================================================================
// wrap / godoc / inspect / config
// ============================================================================

#[test]
fn test_wrap_reads_stdin() {
    let out = stdout(
        docsync()
            .args(["wrap", "--width", "20"])
            .write_stdin("Pop removes the minimum element."),
    );
    assert_eq!(out, "// Pop removes the\n// minimum element.\n");
}

#[test]
fn test_wrap_uses_configured_width() {
    let dir = tempdir().unwrap();
    let config = write(&dir, "docsync.toml", "[render]\nsource_width = 20\n");
    let input = write(&dir, "text.txt", "Pop removes the minimum element.");

    let out = stdout(docsync().args(["--config", arg(&config), "wrap", arg(&input), "--prefix", "# "]));
    assert_eq!(out, "# Pop removes the\n# minimum element.\n");
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = tempdir().unwrap();
    write(&dir, "docsync.toml", "[render]\nwidth = 20\n");

    docsync()
        .current_dir(dir.path())
        .args(["wrap"])
        .write_stdin("text")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_godoc_output() {
    let dir = tempdir().unwrap();
    let file = write(&dir, "heap.go", HEAP);

    docsync()
        .args(["godoc", arg(&file)])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("PACKAGE DOCUMENTATION"))
        .stdout(predicate::str::contains("FUNCTIONS"));
}

#[test]
fn test_markdown_output() {
    let dir = tempdir().unwrap();
    let file = write(&dir, "heap.go", &HEAP.replace("package heap", "package heap // import \"container/heap\""));

    let out = stdout(docsync().args(["markdown", arg(&file)]));
    assert_eq!(
        out,
        "# heap\n\
         \n\
         ```go\n\
         package heap // import \"container/heap\"\n\
         ```\n\
         \n\
         Package heap provides heap operations.\n\
         \n\
         ## func\n\
         \n\
         ### Pop\n\
         \n\
         Pop removes the minimum element.\n\
         \n\
         ```go\n\
         func Pop(h Interface) any\n\
         ```\n\
         \n\
         ### Push\n\
         \n\
         Push pushes the element x onto the heap.\n\
         \n\
         ```go\n\
         func Push(h Interface, x any)\n\
         ```\n"
    );
}

#[test]
fn test_markdown_writes_output_file() {
    let dir = tempdir().unwrap();
    let file = write(&dir, "heap.go", HEAP);
    let output = dir.path().join("heap.md");

    let out = stdout(docsync().args(["markdown", arg(&file), "-o", arg(&output)]));
    assert_eq!(out, "");
    let page = fs::read_to_string(&output).unwrap();
    assert!(page.starts_with("# heap\n\nPackage heap provides heap operations.\n"));
}

#[test]
fn test_inspect_dumps_json_tree() {
    let dir = tempdir().unwrap();
    let file = write(&dir, "heap.go", HEAP);

    let out = docsync()
        .args(["inspect", arg(&file)])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let tree: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(tree["package"], "heap");
    assert_eq!(tree["decls"][0]["names"][0], "Pop");
    assert_eq!(tree["decls"][0]["kind"], "func");
}
