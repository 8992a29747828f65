#![allow(dead_code)]

use qxdiff_core::archive::MemoryArchive;
use qxdiff_core::{AnalysisReport, Difference, DifferenceCode, ExtensionAnalyzer};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const DESCRIPTOR: &str = "META-INF/quarkus-extension.yaml";

pub const BASE: &str = "\
name: \"Test extension\"
metadata:
  keywords:
  - \"database-connection-pool\"
  - \"datasource\"
  - \"jdbc\"
  categories:
  - \"data\"
  status: \"stable\"";

pub const ADDITIONS: &str = "\
name: \"Test extension\"
metadata:
  keywords:
  - \"agroal\"
  - \"database-connection-pool\"
  - \"datasource\"
  - \"jdbc\"
  guide: \"https://quarkus.io/guides/datasource\"
  categories:
  - \"data\"
  status: \"stable\"";

pub const CHANGES: &str = "\
name: \"Test extension\"
metadata:
  keywords:
  - \"database-connection-pool\"
  - \"datasources\"
  - \"jdbc\"
  categories:
  - \"data\"
  status: \"stable\"";

pub const STATUS_CHANGE: &str = "\
name: \"Test extension\"
metadata:
  keywords:
  - \"database-connection-pool\"
  - \"datasource\"
  - \"jdbc\"
  categories:
  - \"data\"
  status: \"unstable\"";

pub const UNKNOWN_PROPERTY: &str = "\
name: \"Test extension\"
metadata:
  kachny: true
  keywords:
  - \"database-connection-pool\"
  - \"datasource\"
  - \"jdbc\"
  categories:
  - \"data\"
  status: \"stable\"";

pub const WRONGLY_TYPED: &str = "\
name: \"Test extension\"
metadata:
  keywords:
  - \"database-connection-pool\"
  - \"datasource\"
  - \"jdbc\"
  categories: true
  status: \"stable\"";

/// Archive holding a single descriptor at the standard location
pub fn extension_archive(name: &str, descriptor: &str) -> MemoryArchive {
    MemoryArchive::new(name).with_entry(DESCRIPTOR, descriptor)
}

/// Jar bytes holding a manifest plus the descriptor at the standard location
pub fn extension_jar(descriptor: &str) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    writer.add_directory("META-INF/", options).unwrap();
    writer.start_file("META-INF/MANIFEST.MF", options).unwrap();
    writer.write_all(b"Manifest-Version: 1.0\n").unwrap();
    writer.start_file(DESCRIPTOR, options).unwrap();
    writer.write_all(descriptor.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

/// Run the default analyzer over two single-descriptor archives
pub fn analyze(old: &str, new: &str) -> AnalysisReport {
    ExtensionAnalyzer::new()
        .unwrap()
        .analyze_archives(&extension_archive("old", old), &extension_archive("new", new))
        .unwrap()
}

/// (code, path) of every difference, in emission order
pub fn codes_and_paths(differences: &[Difference]) -> Vec<(DifferenceCode, String)> {
    differences
        .iter()
        .map(|d| (d.code, d.path().to_string()))
        .collect()
}
