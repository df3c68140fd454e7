#![allow(non_snake_case)]

use super::*;
use tempfile::TempDir;

#[test]
fn backend_list___all___joins_in_order() {
    assert_eq!(
        backend_list(&Backend::ALL),
        "cpp, python, javascript, java"
    );
}

#[test]
fn backend_list___empty___returns_empty() {
    assert_eq!(backend_list(&[]), "");
}

#[test]
fn summary___fresh_manifest___reports_zero_files() {
    let manifest = FileManifest::new("unused", false);

    let lines = summary(&manifest, 0);

    assert_eq!(
        lines,
        vec![
            "✓ Files: 0 (0 created, 0 overwritten, 0 skipped)".to_string(),
            "✓ Warnings: 0".to_string(),
        ]
    );
}

#[test]
fn summary___mixed_outcomes___counts_each() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("kept.py"), "old").unwrap();
    let mut manifest = FileManifest::new(temp.path(), true);
    manifest.write(Path::new("kept.py"), "new").unwrap();
    manifest.write(Path::new("fresh.py"), "new").unwrap();

    let lines = summary(&manifest, 1);

    assert_eq!(lines[0], "✓ Files: 2 (1 created, 0 overwritten, 1 skipped)");
    assert_eq!(lines[1], "✓ Warnings: 1");
}
