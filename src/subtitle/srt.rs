// SRT serialization.
use super::SubtitleEntry;

/// Re-emit entries as SRT text with fresh 1-based consecutive indices.
///
/// Timestamps and text lines pass through byte-for-byte; only the index is
/// rewritten. Blocks are separated by exactly one blank line and the output
/// ends with a newline. Zero entries serialize to the empty string.
pub fn serialize(entries: &[SubtitleEntry]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            format!(
                "{}\n{} --> {}\n{}\n",
                i + 1,
                entry.start,
                entry.end,
                entry.text.join("\n")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
