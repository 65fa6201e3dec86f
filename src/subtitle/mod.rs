pub mod filter;
pub mod parser;
pub mod srt;

/// One subtitle block from an SRT file.
///
/// `start` and `end` keep the exact `HH:MM:SS,mmm` strings from the input so
/// that kept entries round-trip byte-for-byte. Fixed-width fields mean string
/// order equals temporal order, so no numeric parsing is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleEntry {
    pub index: usize,
    pub start: String,
    pub end: String,
    pub text: Vec<String>,
}

impl SubtitleEntry {
    /// The timing line as it appears in an SRT file.
    pub fn timing(&self) -> String {
        format!("{} --> {}", self.start, self.end)
    }
}
