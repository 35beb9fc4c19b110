//! End-to-end tests for the hfold binary.
//!
//! Each test builds a scratch workspace with transpiled-looking bundles,
//! runs the binary against it, and checks the rewritten files plus the
//! reported output.

mod common;

use common::{stderr, stdout, Workspace};

const HELPER: &str = "function _classCallCheck(instance, Constructor) { if (!(instance instanceof Constructor)) { throw new TypeError(\"Cannot call a class as a function\"); } }\n";

/// A bundle preamble followed by `modules` compiled modules, each carrying
/// its own inlined copy of the helper.
fn bundle(modules: usize) -> String {
    let mut text = String::from("var define, module, exports;\n");
    for module in 0..modules {
        text.push_str(HELPER);
        text.push_str(&format!("var mod{module} = function () {{}};\n"));
    }
    text
}

#[test]
fn in_place_rewrite_consolidates_duplicates() {
    let ws = Workspace::new();
    ws.write("bundle.js", &bundle(3));

    let output = ws.run(&["bundle.js", "--helpers", "classCallCheck", "--index", "after"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let rewritten = ws.read("bundle.js");
    assert_eq!(rewritten.matches("_classCallCheck").count(), 1);
    assert!(rewritten.starts_with("var define, module, exports;\nfunction _classCallCheck"));
    for module in 0..3 {
        assert!(rewritten.contains(&format!("var mod{module} = function () {{}};\n")));
    }
    assert!(stdout(&output).contains("1 file(s) written"));
}

#[test]
fn explicit_destination_merges_multiple_sources() {
    let ws = Workspace::new();
    let a = bundle(1);
    let b = bundle(2);
    ws.write("a.js", &a);
    ws.write("b.js", &b);

    let output = ws.run(&[
        "a.js",
        "b.js",
        "--out",
        "bundle.js",
        "--helpers",
        "classCallCheck",
        "--verbose",
    ]);
    assert!(output.status.success(), "{}", stderr(&output));

    let merged = ws.read("bundle.js");
    assert_eq!(merged.matches("_classCallCheck").count(), 1);
    // Occurrences across every concatenated source are reported together.
    assert!(stderr(&output).contains("found 3 classCallCheck helper definition(s)"));
    // Sources are left alone when an explicit destination is given.
    assert_eq!(ws.read("a.js"), a);
    assert_eq!(ws.read("b.js"), b);
}

#[test]
fn multiple_sources_without_destination_fail() {
    let ws = Workspace::new();
    let original = bundle(2);
    ws.write("a.js", &original);
    ws.write("b.js", &original);

    let output = ws.run(&["a.js", "b.js", "--helpers", "classCallCheck"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("destination"));
    assert_eq!(ws.read("a.js"), original);
    assert_eq!(ws.read("b.js"), original);
}

#[test]
fn missing_sources_are_warned_and_skipped() {
    let ws = Workspace::new();
    ws.write("present.js", &bundle(2));

    let output = ws.run(&[
        "missing.js",
        "present.js",
        "--out",
        "out.js",
        "--helpers",
        "classCallCheck",
    ]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stderr(&output).contains("source file missing.js not found"));
    assert_eq!(ws.read("out.js").matches("_classCallCheck").count(), 1);
}

#[test]
fn no_matching_helpers_leaves_destination_untouched() {
    let ws = Workspace::new();
    let original = "var x = 1;\nvar y = 2;\n";
    ws.write("plain.js", original);

    let output = ws.run(&["plain.js", "--out", "out.js", "--helpers", "classCallCheck"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(!ws.path("out.js").exists());
    assert_eq!(ws.read("plain.js"), original);
    assert!(stdout(&output).contains("0 file(s) written"));
}

#[test]
fn empty_allow_list_aborts_before_touching_files() {
    let ws = Workspace::new();
    let original = bundle(2);
    ws.write("bundle.js", &original);
    ws.write(
        "task.json",
        r#"{ "helpers": [], "files": [{ "src": ["bundle.js"] }] }"#,
    );

    let output = ws.run(&["--config", "task.json"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("helper function name"));
    assert_eq!(ws.read("bundle.js"), original);
}

#[test]
fn config_file_drives_multiple_groups() {
    let ws = Workspace::new();
    ws.write("one/a.js", &bundle(1));
    ws.write("one/b.js", &bundle(1));
    ws.write("two.js", &bundle(2));
    ws.write(
        "task.json",
        r#"{
            "helpers": ["classCallCheck"],
            "index": "after",
            "files": [
                { "src": ["one/*.js"], "dest": "one/bundle.js" },
                { "src": ["two.js"] }
            ]
        }"#,
    );

    let output = ws.run(&["--config", "task.json"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let merged = ws.read("one/bundle.js");
    assert_eq!(merged.matches("_classCallCheck").count(), 1);
    let in_place = ws.read("two.js");
    assert_eq!(in_place.matches("_classCallCheck").count(), 1);
    assert!(stdout(&output).contains("2 file(s) written"));
}
