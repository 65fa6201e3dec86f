// SRT parsing: raw text in, subtitle entries plus warnings out.
use super::SubtitleEntry;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Why a block was rejected during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    /// Fewer than three lines: index, timing, and at least one text line.
    TooFewLines,
    /// First line is not a positive integer.
    BadIndex(String),
    /// Second line does not match `HH:MM:SS,mmm --> HH:MM:SS,mmm`.
    BadTiming(String),
    /// Start timestamp is later than the end timestamp.
    StartAfterEnd { start: String, end: String },
}

/// A malformed block, identified by its 1-based position in the input.
///
/// Warnings are fail-soft: the offending block is skipped and parsing
/// continues with the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    pub block: usize,
    pub kind: WarningKind,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WarningKind::TooFewLines => {
                write!(f, "block {}: too few lines for an SRT block", self.block)
            }
            WarningKind::BadIndex(line) => {
                write!(f, "block {}: invalid index line '{}'", self.block, line)
            }
            WarningKind::BadTiming(line) => {
                write!(f, "block {}: invalid timing line '{}'", self.block, line)
            }
            WarningKind::StartAfterEnd { start, end } => {
                write!(f, "block {}: start {} is after end {}", self.block, start, end)
            }
        }
    }
}

fn timing_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{2}:\d{2}:\d{2},\d{3})\s*-->\s*(\d{2}:\d{2}:\d{2},\d{3})$")
            .expect("timing regex is valid")
    })
}

/// Parse raw SRT text into subtitle entries.
///
/// A UTF-8 BOM and mixed line endings are normalized before splitting. Blocks
/// are separated by one or more blank lines; each must hold an index line, a
/// timing line, and one or more text lines. Malformed blocks are skipped and
/// reported as warnings rather than aborting the whole file.
pub fn parse(raw: &str) -> (Vec<SubtitleEntry>, Vec<ParseWarning>) {
    let normalized = normalize(raw);

    let mut entries = Vec::new();
    let mut warnings = Vec::new();

    for (i, block) in split_blocks(&normalized).into_iter().enumerate() {
        match parse_block(i + 1, &block) {
            Ok(entry) => entries.push(entry),
            Err(warning) => warnings.push(warning),
        }
    }

    (entries, warnings)
}

/// Strip a leading BOM and normalize `\r\n` and lone `\r` to `\n`.
fn normalize(raw: &str) -> String {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    raw.replace("\r\n", "\n").replace('\r', "\n")
}

/// Split normalized text into blocks of non-blank lines.
///
/// Trailing whitespace is stripped per line; a line that trims to nothing
/// counts as a separator, so runs of blank lines collapse.
fn split_blocks(text: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

fn parse_block(block: usize, lines: &[&str]) -> Result<SubtitleEntry, ParseWarning> {
    if lines.len() < 3 {
        return Err(ParseWarning {
            block,
            kind: WarningKind::TooFewLines,
        });
    }

    let index_line = lines[0].trim();
    let index: usize = match index_line.parse() {
        Ok(n) if n > 0 => n,
        _ => {
            return Err(ParseWarning {
                block,
                kind: WarningKind::BadIndex(index_line.to_string()),
            })
        }
    };

    let timing_line = lines[1].trim();
    let caps = timing_regex()
        .captures(timing_line)
        .ok_or_else(|| ParseWarning {
            block,
            kind: WarningKind::BadTiming(timing_line.to_string()),
        })?;
    let start = caps[1].to_string();
    let end = caps[2].to_string();

    // Fixed-width fields: lexicographic order equals temporal order.
    if start > end {
        return Err(ParseWarning {
            block,
            kind: WarningKind::StartAfterEnd { start, end },
        });
    }

    let text: Vec<String> = lines[2..].iter().map(|l| l.to_string()).collect();

    Ok(SubtitleEntry {
        index,
        start,
        end,
        text,
    })
}
