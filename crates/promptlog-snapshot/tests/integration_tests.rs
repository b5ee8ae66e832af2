// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Integration tests for promptlog-snapshot
//!
//! These tests build small project trees on disk and check the snapshot text
//! and the effect of ignore files on it.

use std::fs;
use std::path::{Path, PathBuf};

use proptest::prelude::*;
use promptlog_snapshot::{DEFAULT_IGNORE_FILE, IgnoreSet, build_ignore_set, build_snapshot};
use similar_asserts::assert_eq;

/// Create a project directory named `proj` with the given files
fn project(files: &[(&str, &str)]) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path().join("proj");
    fs::create_dir(&root).expect("mkdir");
    for (path, content) in files {
        write(&root, path, content.as_bytes());
    }
    (dir, root)
}

fn write(root: &Path, relative: &str, content: &[u8]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, content).expect("write");
}

fn snapshot_with_ignore_file(root: &Path) -> String {
    let ignore = build_ignore_set(root, &root.join(DEFAULT_IGNORE_FILE)).expect("ignore set");
    build_snapshot(root, &ignore).expect("snapshot")
}

#[test]
fn test_nested_tree_layout() {
    let (_dir, root) = project(&[
        ("README.md", "# Proj\n"),
        ("src/main.rs", "fn main() {}"),
        ("src/util/mod.rs", "pub fn f() {}"),
    ]);

    let expected = "\
proj/
    README.md

    ## README.md ##
# Proj


    src/
        main.rs

        ## src/main.rs ##
fn main() {}

        util/
            mod.rs

            ## src/util/mod.rs ##
pub fn f() {}

";
    assert_eq!(build_snapshot(&root, &IgnoreSet::new()).expect("snapshot"), expected);
}

#[test]
fn test_absent_ignore_file_includes_everything() {
    let (_dir, root) = project(&[
        ("a.txt", "a"),
        ("build/out.bin", "o"),
        ("docs/guide/intro.md", "intro"),
    ]);

    let snapshot = snapshot_with_ignore_file(&root);
    for relative in ["a.txt", "build/out.bin", "docs/guide/intro.md"] {
        assert!(
            snapshot.contains(&format!("## {relative} ##")),
            "missing {relative} in:\n{snapshot}"
        );
    }
}

#[test]
fn test_ignore_file_excludes_directory_transitively() {
    let (_dir, root) = project(&[
        (DEFAULT_IGNORE_FILE, "# generated\nbuild\n\nsecret.env\n"),
        ("keep.txt", "keep"),
        ("secret.env", "TOKEN=1"),
        ("build/out.bin", "o"),
        ("build/deep/er/still.txt", "hidden"),
    ]);

    let snapshot = snapshot_with_ignore_file(&root);
    assert!(snapshot.contains("## keep.txt ##"));
    assert!(snapshot.contains(&format!("## {DEFAULT_IGNORE_FILE} ##")));
    assert!(!snapshot.contains("    build/\n"));
    assert!(!snapshot.contains("## build/"));
    assert!(!snapshot.contains("## secret.env ##"));
    assert!(!snapshot.contains("TOKEN=1"));
    assert!(!snapshot.contains("hidden"));
}

#[test]
fn test_ignore_file_can_ignore_itself() {
    let (_dir, root) = project(&[(DEFAULT_IGNORE_FILE, ".assistantignore\n"), ("a.txt", "a")]);
    let snapshot = snapshot_with_ignore_file(&root);
    assert!(!snapshot.contains(DEFAULT_IGNORE_FILE));
    assert!(snapshot.contains("## a.txt ##"));
}

#[test]
fn test_glob_lines_in_ignore_file() {
    let (_dir, root) = project(&[
        (DEFAULT_IGNORE_FILE, "*.lock\nassets/*.png\n"),
        ("Cargo.lock", "lock"),
        ("assets/logo.png", "png"),
        ("assets/notes.txt", "notes"),
    ]);

    let snapshot = snapshot_with_ignore_file(&root);
    assert!(!snapshot.contains("Cargo.lock"));
    assert!(!snapshot.contains("logo.png"));
    assert!(snapshot.contains("## assets/notes.txt ##"));
}

#[test]
fn test_unreadable_file_gets_placeholder() {
    let (_dir, root) = project(&[("a.txt", "first"), ("c.txt", "third")]);
    write(&root, "b.bin", &[0xff, 0xfe, 0x00, 0x80]);

    let snapshot = build_snapshot(&root, &IgnoreSet::new()).expect("snapshot");
    assert!(snapshot.contains("## a.txt ##\nfirst\n"));
    assert!(snapshot.contains("## c.txt ##\nthird\n"));
    assert!(snapshot.contains("    b.bin\n"));
    assert!(snapshot.contains("## b.bin ##\nError reading file: "));
}

#[test]
fn test_default_patterns_hide_ledger_directory() {
    let (_dir, root) = project(&[
        ("a.txt", "a"),
        (".assistant/01_assistant.md", "old snapshot"),
        (".git/HEAD", "ref: refs/heads/main"),
    ]);

    let mut ignore = build_ignore_set(&root, &root.join(DEFAULT_IGNORE_FILE)).expect("ignore");
    ignore
        .extend_with_patterns(&root, [".git", ".assistant"])
        .expect("defaults");
    let snapshot = build_snapshot(&root, &ignore).expect("snapshot");
    assert!(snapshot.contains("## a.txt ##"));
    assert!(!snapshot.contains("old snapshot"));
    assert!(!snapshot.contains(".git"));
}

#[test]
fn test_relative_root_matches_absolute_ignore_paths() {
    let (_dir, root) = project(&[("skip/me.txt", "x"), ("a.txt", "a")]);
    let relative_root = root.join("skip").join("..");

    let mut ignore = IgnoreSet::new();
    ignore
        .extend_with_patterns(&relative_root, ["skip"])
        .expect("extend");
    let snapshot = build_snapshot(&relative_root, &ignore).expect("snapshot");
    assert!(snapshot.starts_with("proj/\n"));
    assert!(!snapshot.contains("me.txt"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_ignored_directory_hides_all_descendants(
        segments in prop::collection::vec("[a-z]{1,6}", 1..6),
        ignore_at in 0usize..5,
    ) {
        let (_dir, root) = project(&[("visible.txt", "visible")]);

        // A chain d0/d1/.../dn with a file at every level.
        let mut relative = PathBuf::new();
        let mut levels = Vec::new();
        for (i, segment) in segments.iter().enumerate() {
            relative.push(format!("d{i}{segment}"));
            let file = relative.join(format!("f{i}.txt"));
            write(&root, file.to_str().expect("utf8"), format!("level-{i}").as_bytes());
            levels.push(relative.clone());
        }

        let cut = ignore_at.min(levels.len() - 1);
        let pattern = levels[cut].to_str().expect("utf8").to_string();
        let mut ignore = IgnoreSet::new();
        ignore.extend_with_patterns(&root, [pattern]).expect("extend");

        let snapshot = build_snapshot(&root, &ignore).expect("snapshot");
        prop_assert!(snapshot.contains("## visible.txt ##"));
        for i in 0..levels.len() {
            let marker = format!("\nlevel-{i}\n");
            prop_assert_eq!(snapshot.contains(&marker), i < cut);
        }
    }
}
