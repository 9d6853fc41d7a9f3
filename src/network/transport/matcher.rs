//! Incremental keyword matching over a byte stream.

use serde::Deserialize;

/// What a matcher does with the byte that breaks a partial match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Reset and test the same byte against the keyword's first byte.
    #[default]
    Retest,
    /// Reset and drop the byte.
    ///
    /// A keyword whose start overlaps the tail of a failed partial match is
    /// missed, e.g. `"OOK"` never matches `"OK"`. Kept for firmware that
    /// depends on that behavior.
    Legacy,
}

/// A cursor over a keyword, fed one byte at a time.
#[derive(Debug, Clone)]
pub struct KeywordMatcher<'k> {
    keyword: &'k [u8],
    cursor: usize,
    mode: MatchMode,
}

impl<'k> KeywordMatcher<'k> {
    pub fn new(keyword: &'k [u8], mode: MatchMode) -> Self {
        Self {
            keyword,
            cursor: 0,
            mode,
        }
    }

    /// Feeds one byte. Returns `true` when it completes the keyword, after
    /// which the cursor starts over.
    ///
    /// An empty keyword never matches.
    pub fn feed(&mut self, byte: u8) -> bool {
        if self.keyword.is_empty() {
            return false;
        }
        if byte == self.keyword[self.cursor] {
            self.cursor += 1;
        } else {
            let retest = self.cursor > 0 && self.mode == MatchMode::Retest;
            self.cursor = 0;
            if retest && byte == self.keyword[0] {
                self.cursor = 1;
            }
        }
        if self.cursor == self.keyword.len() {
            self.cursor = 0;
            return true;
        }
        false
    }
}
