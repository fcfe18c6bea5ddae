//! Trigram type and extraction.
//!
//! A trigram is any 3-byte window of the input. Bytes are taken as-is:
//! no padding, no case folding, no UTF-8 awareness. A string of `n` bytes
//! has exactly `n - 2` windows (none when `n < 3`).

use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A 3-byte sequence packed into a `u32` as `b0 << 16 | b1 << 8 | b2`.
///
/// The top byte is always zero, so every value fits in 24 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trigram(u32);

impl Trigram {
    /// Packs three bytes into a trigram.
    ///
    /// # Example
    ///
    /// ```
    /// use tridex_core::Trigram;
    ///
    /// let t = Trigram::from_bytes(*b"abc");
    /// assert_eq!(t.as_u32(), 0x61_62_63);
    /// ```
    #[must_use]
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self((bytes[0] as u32) << 16 | (bytes[1] as u32) << 8 | bytes[2] as u32)
    }

    /// Unpacks the trigram into its three bytes.
    #[must_use]
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [(self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8]
    }

    /// Returns the packed integer value.
    #[must_use]
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl From<[u8; 3]> for Trigram {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl TryFrom<&[u8]> for Trigram {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; 3] = bytes
            .try_into()
            .map_err(|_| Error::InvalidTrigram(bytes.len()))?;
        Ok(Self::from_bytes(arr))
    }
}

impl fmt::Display for Trigram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.to_bytes() {
            write!(f, "{}", std::ascii::escape_default(b))?;
        }
        Ok(())
    }
}

/// Extracts the trigrams of `s` into `out`, clearing it first.
///
/// With `dedupe`, each distinct trigram appears once, in order of first
/// occurrence. Without it, every window is emitted.
///
/// Reusing `out` across calls avoids reallocating for every document.
pub fn extract_into(s: &[u8], dedupe: bool, out: &mut Vec<Trigram>) {
    out.clear();
    if s.len() < 3 {
        return;
    }
    out.reserve(s.len() - 2);

    let windows = s.windows(3).map(|w| Trigram::from_bytes([w[0], w[1], w[2]]));
    if dedupe {
        let mut seen = FxHashSet::default();
        out.extend(windows.filter(|t| seen.insert(*t)));
    } else {
        out.extend(windows);
    }
}

/// Extracts the trigrams of `s`.
///
/// See [`extract_into`] for the meaning of `dedupe`.
#[must_use]
pub fn extract(s: impl AsRef<[u8]>, dedupe: bool) -> Vec<Trigram> {
    let mut out = Vec::new();
    extract_into(s.as_ref(), dedupe, &mut out);
    out
}

/// Extracts the distinct trigrams of `s` in order of first occurrence.
///
/// # Example
///
/// ```
/// use tridex_core::index::trigram::extract_trigrams;
///
/// // "aaaa" has two windows, both "aaa"
/// assert_eq!(extract_trigrams("aaaa").len(), 1);
/// assert!(extract_trigrams("ab").is_empty());
/// ```
#[must_use]
pub fn extract_trigrams(s: impl AsRef<[u8]>) -> Vec<Trigram> {
    extract(s, true)
}

/// Extracts every trigram occurrence of `s`, repeats included.
#[must_use]
pub fn extract_all_trigrams(s: impl AsRef<[u8]>) -> Vec<Trigram> {
    extract(s, false)
}

/// Counts how often each trigram occurs in `s`.
#[must_use]
pub fn trigram_frequencies(s: impl AsRef<[u8]>) -> FxHashMap<Trigram, usize> {
    let mut counts = FxHashMap::default();
    for t in extract_all_trigrams(s) {
        *counts.entry(t).or_insert(0) += 1;
    }
    counts
}
