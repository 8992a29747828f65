//! Exploded archives on disk and packaged jars.

mod common;

use common::*;
use qxdiff_core::archive::{Archive, DescriptorLocator, DirectoryArchive, JarArchive};
use qxdiff_core::{DifferenceCode, ExErrorKind, ExtensionAnalyzer};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn exploded(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, content) in files {
        let path = dir.path().join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    dir
}

#[test]
fn test_directory_entries_are_relative_and_sorted() {
    let dir = exploded(&[
        ("org/acme/Ext.class", "cafebabe"),
        (DESCRIPTOR, BASE),
        ("META-INF/MANIFEST.MF", "Manifest-Version: 1.0"),
    ]);
    let names: Vec<_> = DirectoryArchive::new(dir.path())
        .entries()
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(
        names,
        vec!["META-INF/MANIFEST.MF", DESCRIPTOR, "org/acme/Ext.class"]
    );
}

#[test]
fn test_locator_finds_descriptor_on_disk() {
    let dir = exploded(&[(DESCRIPTOR, BASE), ("META-INF/other.yaml", "x: 1")]);
    let found = DescriptorLocator::quarkus_extension()
        .unwrap()
        .locate(&DirectoryArchive::new(dir.path()))
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].bytes, BASE.as_bytes());
}

#[test]
fn test_analyze_directories() {
    let old = exploded(&[(DESCRIPTOR, BASE)]);
    let new = exploded(&[(DESCRIPTOR, STATUS_CHANGE)]);
    let report = ExtensionAnalyzer::new()
        .unwrap()
        .analyze_archives(
            &DirectoryArchive::new(old.path()),
            &DirectoryArchive::new(new.path()),
        )
        .unwrap();
    assert_eq!(
        codes_and_paths(&report.differences),
        vec![(DifferenceCode::StatusChanged, "/metadata/status".to_string())]
    );
}

#[test]
fn test_descriptor_removed_from_archive() {
    let old = exploded(&[(DESCRIPTOR, BASE)]);
    let new = exploded(&[("META-INF/MANIFEST.MF", "Manifest-Version: 1.0")]);
    let report = ExtensionAnalyzer::new()
        .unwrap()
        .analyze_archives(
            &DirectoryArchive::new(old.path()),
            &DirectoryArchive::new(new.path()),
        )
        .unwrap();
    assert!(!report.is_empty());
    assert!(report
        .differences
        .iter()
        .all(|d| d.code == DifferenceCode::PropertyRemoved || d.code == DifferenceCode::StatusChanged));
    // status has no new value, so it surfaces as a status change to ""
    let status = report
        .differences
        .iter()
        .find(|d| d.path() == "/metadata/status")
        .unwrap();
    assert_eq!(status.code, DifferenceCode::StatusChanged);
    assert_eq!(status.attachment("newValue"), Some(""));
}

#[test]
fn test_non_utf8_descriptor_is_invalid_document() {
    let old = TempDir::new().unwrap();
    let meta = old.path().join("META-INF");
    fs::create_dir_all(&meta).unwrap();
    fs::write(meta.join("quarkus-extension.yaml"), [0xff, 0xfe, 0x00]).unwrap();
    let new = exploded(&[(DESCRIPTOR, BASE)]);

    let err = ExtensionAnalyzer::new()
        .unwrap()
        .analyze_archives(
            &DirectoryArchive::new(old.path()),
            &DirectoryArchive::new(new.path()),
        )
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidDocument);
    assert_eq!(err.op(), Some("decode_document"));
}

#[test]
fn test_missing_directory_is_io_error() {
    let new = exploded(&[(DESCRIPTOR, BASE)]);
    let err = ExtensionAnalyzer::new()
        .unwrap()
        .analyze_archives(
            &DirectoryArchive::new(Path::new("/nonexistent/qxdiff-old")),
            &DirectoryArchive::new(new.path()),
        )
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Io);
}

#[test]
fn test_analyze_jars() {
    let old = JarArchive::from_bytes("old.jar", extension_jar(BASE));
    let new = JarArchive::from_bytes("new.jar", extension_jar(ADDITIONS));
    let report = ExtensionAnalyzer::new()
        .unwrap()
        .analyze_archives(&old, &new)
        .unwrap();
    assert_eq!(
        codes_and_paths(&report.differences),
        vec![
            (DifferenceCode::PropertyAdded, "/metadata/keywords/0".to_string()),
            (DifferenceCode::PropertyAdded, "/metadata/guide".to_string()),
        ]
    );
    assert_eq!(report.descriptors[0].file, DESCRIPTOR);
}

#[test]
fn test_jar_on_disk_matches_exploded_directory() {
    let scratch = TempDir::new().unwrap();
    let jar_path = scratch.path().join("ext.jar");
    fs::write(&jar_path, extension_jar(WRONGLY_TYPED)).unwrap();
    let old = exploded(&[(DESCRIPTOR, BASE)]);
    let analyzer = ExtensionAnalyzer::new().unwrap();

    let from_jar = analyzer
        .analyze_archives(&DirectoryArchive::new(old.path()), &JarArchive::open(&jar_path).unwrap())
        .unwrap();
    let from_dir = analyze(BASE, WRONGLY_TYPED);
    assert_eq!(from_jar.differences, from_dir.differences);
    assert_eq!(from_jar.differences[0].code, DifferenceCode::InvalidNewPropertyType);
}

#[test]
fn test_corrupt_jar_is_invalid_input() {
    let mut bytes = extension_jar(BASE);
    bytes.truncate(bytes.len() / 2);
    let err = ExtensionAnalyzer::new()
        .unwrap()
        .analyze_archives(
            &JarArchive::from_bytes("broken.jar", bytes),
            &JarArchive::from_bytes("new.jar", extension_jar(BASE)),
        )
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(err.path(), Some("broken.jar"));
}
