use crate::error::{Result, SrtCleanError};
use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Patterns WhisperX tends to hallucinate during French silence. Users with
/// other languages override these via a pattern file.
const DEFAULT_PATTERNS: &[&str] = &[
    r#"sous.titrage.*st['"]?\s*\d+"#,
    r"sous.titrage.*par.*amara\.org",
    r"sous.titrage.*fr",
    r"^Sous-titrage Société Radio-Canada$",
    r"^Sous-titrage MFP\.$",
    r"^Abonnez-vous!$",
    r"^Merci d'avoir regardé cette vidéo !$",
    r"^Merci à tous$",
];

/// A single compiled junk rule. The original pattern string is kept for
/// reporting which rule matched.
#[derive(Debug, Clone)]
pub struct JunkPattern {
    pub source: String,
    pub regex: Regex,
}

/// An ordered set of compiled junk rules.
///
/// Compilation happens once, up front: a single bad pattern rejects the whole
/// set, so a typo can never silently let junk through at match time.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<JunkPattern>,
}

#[derive(Debug, Deserialize)]
struct PatternFile {
    patterns: Vec<String>,
}

impl PatternSet {
    /// Compile an ordered list of pattern strings, case-insensitively.
    pub fn compile<S: AsRef<str>>(sources: &[S]) -> Result<Self> {
        let mut patterns = Vec::with_capacity(sources.len());
        for source in sources {
            let source = source.as_ref();
            let regex = RegexBuilder::new(source)
                .case_insensitive(true)
                .build()
                .map_err(|e| SrtCleanError::InvalidPattern {
                    pattern: source.to_string(),
                    source: e,
                })?;
            patterns.push(JunkPattern {
                source: source.to_string(),
                regex,
            });
        }
        Ok(Self { patterns })
    }

    /// The built-in junk list.
    pub fn defaults() -> Self {
        Self::compile(DEFAULT_PATTERNS).expect("built-in patterns are valid")
    }

    /// Load patterns from a TOML file with a `patterns = [...]` array.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| SrtCleanError::PatternFile {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        let file: PatternFile =
            toml::from_str(&contents).map_err(|e| SrtCleanError::PatternFile {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        Self::compile(&file.patterns)
    }

    /// Resolve the pattern set for a run: an explicit file wins, then the
    /// user's config-dir file if present, then the built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Some(path) = Self::config_file_path() {
            if path.exists() {
                return Self::from_file(&path);
            }
        }
        Ok(Self::defaults())
    }

    pub fn iter(&self) -> impl Iterator<Item = &JunkPattern> {
        self.patterns.iter()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("srtclean").join("patterns.toml"))
    }
}
