// Junk classification: drop whole entries whose text matches a junk pattern.
use super::SubtitleEntry;
use crate::config::PatternSet;

/// A dropped entry together with the rule and line that condemned it.
#[derive(Debug, Clone)]
pub struct JunkMatch {
    pub entry: SubtitleEntry,
    pub pattern: String,
    pub line: String,
}

/// Result of one filtering pass.
#[derive(Debug, Clone, Default)]
pub struct FilterOutcome {
    pub kept: Vec<SubtitleEntry>,
    pub removed_count: usize,
    pub matches: Vec<JunkMatch>,
}

/// Partition entries into kept and junk.
///
/// Patterns are tried in order against each text line; the first match
/// classifies the entry as junk and stops evaluation for that entry. Matching
/// is a substring search, line by line: a single matching line drops the
/// entire entry, never just the line. Kept entries stay in input order with
/// their original indices untouched (renumbering happens at serialization).
pub fn filter(entries: Vec<SubtitleEntry>, patterns: &PatternSet) -> FilterOutcome {
    let mut outcome = FilterOutcome::default();

    for entry in entries {
        match find_junk_match(&entry, patterns) {
            Some((pattern, line)) => {
                outcome.removed_count += 1;
                outcome.matches.push(JunkMatch {
                    entry,
                    pattern,
                    line,
                });
            }
            None => outcome.kept.push(entry),
        }
    }

    outcome
}

fn find_junk_match(entry: &SubtitleEntry, patterns: &PatternSet) -> Option<(String, String)> {
    for pattern in patterns.iter() {
        for line in &entry.text {
            if pattern.regex.is_match(line) {
                return Some((pattern.source.clone(), line.clone()));
            }
        }
    }
    None
}
