//! File-level orchestration: read an SRT file, filter junk entries, and
//! write the cleaned result next to the input.

use crate::config::PatternSet;
use crate::error::{Result, SrtCleanError};
use crate::subtitle::filter::{filter, JunkMatch};
use crate::subtitle::parser::{parse, ParseWarning};
use crate::subtitle::srt;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Options for one cleaning run.
#[derive(Debug, Clone, Default)]
pub struct CleanOptions {
    /// Destination path; defaults to `<stem>_cleaned.srt` next to the input.
    pub output: Option<PathBuf>,
    /// Report what would be removed without writing anything.
    pub dry_run: bool,
    /// Also write removed lines to `<stem>_removed.log`.
    pub write_log: bool,
}

/// What one cleaning run did.
#[derive(Debug)]
pub struct CleanReport {
    pub input: PathBuf,
    /// Where the cleaned file was written; `None` on a dry run.
    pub output: Option<PathBuf>,
    pub parsed_count: usize,
    pub kept_count: usize,
    pub removed_count: usize,
    pub warnings: Vec<ParseWarning>,
    pub matches: Vec<JunkMatch>,
    pub log_path: Option<PathBuf>,
}

/// Clean a single SRT file.
///
/// Fatal conditions (missing input, wrong extension, write failure) are
/// returned as errors; malformed blocks are collected as warnings on the
/// report and never abort the run.
pub fn clean_file(
    input: &Path,
    patterns: &PatternSet,
    opts: &CleanOptions,
) -> Result<CleanReport> {
    if !input.exists() {
        return Err(SrtCleanError::InputNotFound(input.to_path_buf()));
    }
    if !has_srt_extension(input) {
        return Err(SrtCleanError::NotAnSrtFile(input.to_path_buf()));
    }

    let raw = read_text(input)?;
    let (entries, warnings) = parse(&raw);
    let parsed_count = entries.len();
    debug!(
        "Parsed {} entries ({} warnings) from {}",
        parsed_count,
        warnings.len(),
        input.display()
    );

    let outcome = filter(entries, patterns);
    let cleaned = srt::serialize(&outcome.kept);

    let output = if opts.dry_run {
        None
    } else {
        let path = opts
            .output
            .clone()
            .unwrap_or_else(|| derive_output_path(input));
        write_atomic(&path, &cleaned)?;
        debug!("Wrote cleaned file to {}", path.display());
        Some(path)
    };

    let log_path = if opts.write_log && !opts.dry_run {
        Some(write_removed_log(input, &outcome.matches)?)
    } else {
        None
    };

    Ok(CleanReport {
        input: input.to_path_buf(),
        output,
        parsed_count,
        kept_count: outcome.kept.len(),
        removed_count: outcome.removed_count,
        warnings,
        matches: outcome.matches,
        log_path,
    })
}

/// Default destination: `<stem>_cleaned.srt` in the input's directory.
pub fn derive_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default();
    input.with_file_name(format!("{}_cleaned.srt", stem.to_string_lossy()))
}

fn derive_log_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default();
    input.with_file_name(format!("{}_removed.log", stem.to_string_lossy()))
}

fn has_srt_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("srt"))
}

/// Read a subtitle file as text. WhisperX output is UTF-8, but older subtitle
/// files in the wild are Latin-1; fall back to that rather than failing.
fn read_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => Ok(err.into_bytes().iter().map(|&b| b as char).collect()),
    }
}

/// Write the whole file through a temp file in the destination directory, so
/// a failed write never leaves a truncated destination behind.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let wrap = |source: std::io::Error| SrtCleanError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(wrap)?;
    tmp.write_all(contents.as_bytes()).map_err(wrap)?;
    tmp.persist(path).map_err(|e| wrap(e.error))?;
    Ok(())
}

/// Write the text of every removed entry to `<stem>_removed.log`, one line
/// per text line. An empty log still gets written: it records that the file
/// was processed and found clean.
fn write_removed_log(input: &Path, matches: &[JunkMatch]) -> Result<PathBuf> {
    let path = derive_log_path(input);
    let mut lines = Vec::new();
    for junk in matches {
        lines.extend(junk.entry.text.iter().cloned());
    }
    let mut contents = lines.join("\n");
    if !contents.is_empty() {
        contents.push('\n');
    }
    write_atomic(&path, &contents)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "1\n00:00:00,000 --> 00:00:05,000\nHello\n\n\
                          2\n00:00:05,000 --> 00:00:10,000\nSous-titrage par Amara.org\n\n\
                          3\n00:00:10,000 --> 00:00:15,000\nWorld\n";

    fn patterns() -> PatternSet {
        PatternSet::compile(&[r"amara\.org"]).unwrap()
    }

    fn write_input(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_clean_file_writes_cleaned_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), "episode.srt", SAMPLE);

        let report = clean_file(&input, &patterns(), &CleanOptions::default()).unwrap();

        assert_eq!(report.parsed_count, 3);
        assert_eq!(report.removed_count, 1);
        assert_eq!(report.kept_count, 2);

        let output = report.output.unwrap();
        assert_eq!(output, dir.path().join("episode_cleaned.srt"));
        let cleaned = std::fs::read_to_string(output).unwrap();
        assert_eq!(
            cleaned,
            "1\n00:00:00,000 --> 00:00:05,000\nHello\n\n\
             2\n00:00:10,000 --> 00:00:15,000\nWorld\n"
        );
    }

    #[test]
    fn test_clean_file_explicit_output_path() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), "episode.srt", SAMPLE);
        let dest = dir.path().join("out.srt");

        let opts = CleanOptions {
            output: Some(dest.clone()),
            ..Default::default()
        };
        let report = clean_file(&input, &patterns(), &opts).unwrap();

        assert_eq!(report.output.as_deref(), Some(dest.as_path()));
        assert!(dest.exists());
    }

    #[test]
    fn test_clean_file_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), "episode.srt", SAMPLE);

        let opts = CleanOptions {
            dry_run: true,
            write_log: true,
            ..Default::default()
        };
        let report = clean_file(&input, &patterns(), &opts).unwrap();

        assert_eq!(report.removed_count, 1);
        assert!(report.output.is_none());
        assert!(report.log_path.is_none());
        assert!(!dir.path().join("episode_cleaned.srt").exists());
    }

    #[test]
    fn test_clean_file_missing_input() {
        let result = clean_file(
            Path::new("/nonexistent/episode.srt"),
            &patterns(),
            &CleanOptions::default(),
        );
        assert!(matches!(result, Err(SrtCleanError::InputNotFound(_))));
    }

    #[test]
    fn test_clean_file_rejects_non_srt() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), "notes.txt", "not srt");

        let result = clean_file(&input, &patterns(), &CleanOptions::default());
        assert!(matches!(result, Err(SrtCleanError::NotAnSrtFile(_))));
    }

    #[test]
    fn test_clean_file_empty_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), "empty.srt", "");

        let report = clean_file(&input, &patterns(), &CleanOptions::default()).unwrap();

        assert_eq!(report.parsed_count, 0);
        assert_eq!(report.removed_count, 0);
        let cleaned = std::fs::read_to_string(report.output.unwrap()).unwrap();
        assert_eq!(cleaned, "");
    }

    #[test]
    fn test_clean_file_writes_removed_log() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), "episode.srt", SAMPLE);

        let opts = CleanOptions {
            write_log: true,
            ..Default::default()
        };
        let report = clean_file(&input, &patterns(), &opts).unwrap();

        let log = report.log_path.unwrap();
        assert_eq!(log, dir.path().join("episode_removed.log"));
        let contents = std::fs::read_to_string(log).unwrap();
        assert_eq!(contents, "Sous-titrage par Amara.org\n");
    }

    #[test]
    fn test_clean_file_empty_log_when_nothing_removed() {
        let dir = tempfile::tempdir().unwrap();
        let clean = "1\n00:00:00,000 --> 00:00:05,000\nJust dialogue\n";
        let input = write_input(dir.path(), "clean.srt", clean);

        let opts = CleanOptions {
            write_log: true,
            ..Default::default()
        };
        let report = clean_file(&input, &patterns(), &opts).unwrap();

        let contents = std::fs::read_to_string(report.log_path.unwrap()).unwrap();
        assert_eq!(contents, "");
    }

    #[test]
    fn test_read_text_latin1_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.srt");
        // "Café" in Latin-1: 0xE9 is not valid UTF-8.
        std::fs::write(&path, b"1\n00:00:00,000 --> 00:00:05,000\nCaf\xe9\n").unwrap();

        let report = clean_file(&path, &patterns(), &CleanOptions::default()).unwrap();
        assert_eq!(report.parsed_count, 1);
    }

    #[test]
    fn test_derive_output_path() {
        assert_eq!(
            derive_output_path(Path::new("/videos/episode.srt")),
            PathBuf::from("/videos/episode_cleaned.srt")
        );
    }
}
