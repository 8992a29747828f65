//! Diff command
//!
//! Usage: qxdiff diff <OLD> <NEW> [--format human|json] [--fail-on LEVEL] [--config FILE]

use super::{EXIT_OK, EXIT_THRESHOLD};
use anyhow::{bail, Context};
use clap::{Args, ValueEnum};
use qxdiff_core::archive::{is_zip, Archive, DirectoryArchive, JarArchive, MemoryArchive};
use qxdiff_core::config::{FailOn, OutputFormat};
use qxdiff_core::diff::render_human_summary;
use qxdiff_core::logging_facility;
use qxdiff_core::{AnalyzerConfig, ExtensionAnalyzer};
use std::path::{Path, PathBuf};

/// Entry name given to a descriptor passed as a plain file
const SINGLE_FILE_ENTRY: &str = "META-INF/quarkus-extension.yaml";

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Old artifact: a jar, an exploded archive directory or a descriptor file
    pub old: PathBuf,

    /// New artifact: a jar, an exploded archive directory or a descriptor file
    pub new: PathBuf,

    /// Output format (default: from config, else human)
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Lowest severity that makes the command exit with status 2
    #[arg(long, value_enum)]
    pub fail_on: Option<FailOnArg>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Human,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FailOnArg {
    None,
    PotentiallyBreaking,
    Breaking,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Human => OutputFormat::Human,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

impl From<FailOnArg> for FailOn {
    fn from(arg: FailOnArg) -> Self {
        match arg {
            FailOnArg::None => FailOn::None,
            FailOnArg::PotentiallyBreaking => FailOn::PotentiallyBreaking,
            FailOnArg::Breaking => FailOn::Breaking,
        }
    }
}

/// Execute diff command, returning the process exit code
pub fn execute(args: DiffArgs) -> anyhow::Result<i32> {
    let mut config = match &args.config {
        Some(path) => AnalyzerConfig::from_file(path)?,
        None => AnalyzerConfig::default(),
    };
    if let Some(format) = args.format {
        config.format = format.into();
    }
    if let Some(fail_on) = args.fail_on {
        config.fail_on = fail_on.into();
    }

    logging_facility::init(config.logging);

    let old = open_input(&args.old)?;
    let new = open_input(&args.new)?;

    let analyzer = ExtensionAnalyzer::new()?;
    let report = analyzer.analyze_archives(old.as_ref(), new.as_ref())?;

    match config.format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Human => print!("{}", render_human_summary(&report)),
    }

    let failed = config
        .fail_on
        .threshold()
        .is_some_and(|threshold| report.exceeds(threshold));
    Ok(if failed { EXIT_THRESHOLD } else { EXIT_OK })
}

/// Directories are exploded archives, jars and zips are packaged archives,
/// and any other file is a lone descriptor
fn open_input(path: &Path) -> anyhow::Result<Box<dyn Archive>> {
    if path.is_dir() {
        return Ok(Box::new(DirectoryArchive::new(path)));
    }
    if !path.is_file() {
        bail!("input {} is neither a directory nor a file", path.display());
    }
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let name = path.display().to_string();
    if has_archive_extension(path) || is_zip(&bytes) {
        return Ok(Box::new(JarArchive::from_bytes(name, bytes)));
    }
    Ok(Box::new(
        MemoryArchive::new(name).with_entry(SINGLE_FILE_ENTRY, bytes),
    ))
}

fn has_archive_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jar") || ext.eq_ignore_ascii_case("zip"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use qxdiff_core::Severity;

    #[test]
    fn test_fail_on_mapping() {
        assert_eq!(FailOn::from(FailOnArg::None).threshold(), None);
        assert_eq!(
            FailOn::from(FailOnArg::PotentiallyBreaking).threshold(),
            Some(Severity::PotentiallyBreaking)
        );
        assert_eq!(FailOn::from(FailOnArg::Breaking).threshold(), Some(Severity::Breaking));
    }

    #[test]
    fn test_archive_extensions() {
        assert!(has_archive_extension(Path::new("ext.jar")));
        assert!(has_archive_extension(Path::new("EXT.ZIP")));
        assert!(!has_archive_extension(Path::new("quarkus-extension.yaml")));
        assert!(!has_archive_extension(Path::new("jar")));
    }

    #[test]
    fn test_missing_input_is_rejected() {
        let err = open_input(Path::new("/nonexistent/qxdiff/input")).err().unwrap();
        assert!(err.to_string().contains("neither a directory nor a file"));
    }
}
