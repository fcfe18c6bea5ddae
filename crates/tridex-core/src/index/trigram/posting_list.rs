//! Postings lists and the three-way trigram lookup.

use serde::{Deserialize, Serialize};

/// Document identifier. Assigned in insertion order by
/// [`TrigramIndex::add`](super::TrigramIndex::add) unless supplied explicitly.
pub type DocId = u32;

/// Stored postings for one trigram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostingList {
    /// Emptied by pruning. The trigram is known but carries no filtering
    /// signal, and inserts no longer extend it.
    Pruned,
    /// Document IDs, ascending and duplicate-free once the index is sorted.
    Docs(Vec<DocId>),
}

impl PostingList {
    /// Number of document IDs held (zero when pruned).
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Pruned => 0,
            Self::Docs(docs) => docs.len(),
        }
    }

    /// Returns true if no document IDs are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if this list was pruned.
    #[must_use]
    pub fn is_pruned(&self) -> bool {
        matches!(self, Self::Pruned)
    }

    /// Appends `id` unless it equals the current tail.
    ///
    /// Keeps the list duplicate-free as long as IDs arrive in
    /// non-decreasing order. Pruned lists stay pruned.
    pub(crate) fn push_dedup(&mut self, id: DocId) {
        if let Self::Docs(docs) = self {
            if docs.last() != Some(&id) {
                docs.push(id);
            }
        }
    }

    /// Sorts the list if it is out of order, dropping duplicates the
    /// out-of-order inserts let through. Returns true if anything changed.
    pub(crate) fn normalize(&mut self) -> bool {
        match self {
            Self::Docs(docs) if !docs.is_sorted() => {
                docs.sort_unstable();
                docs.dedup();
                true
            }
            _ => false,
        }
    }
}

/// Result of looking a trigram up in the index.
///
/// `Unseen` and `Pruned` both mean "no postings", but they are not
/// interchangeable: an unseen trigram proves no indexed document contains
/// it, while a pruned one says nothing at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Postings<'a> {
    /// The trigram never occurred in any inserted document.
    Unseen,
    /// The trigram's list was pruned.
    Pruned,
    /// The trigram's document IDs.
    Present(&'a [DocId]),
}

impl<'a> Postings<'a> {
    /// Length used for query planning. Pruned and unseen both count as zero.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Present(docs) => docs.len(),
            Self::Unseen | Self::Pruned => 0,
        }
    }

    /// Returns true if there are no document IDs to intersect with.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the document IDs, if any are stored.
    #[must_use]
    pub fn docs(&self) -> Option<&'a [DocId]> {
        match *self {
            Self::Present(docs) => Some(docs),
            Self::Unseen | Self::Pruned => None,
        }
    }
}

impl<'a> From<Option<&'a PostingList>> for Postings<'a> {
    fn from(list: Option<&'a PostingList>) -> Self {
        match list {
            // An empty list proves no document has the trigram, same as a
            // missing key. Only deserialized indexes can hold one.
            Some(PostingList::Docs(docs)) if docs.is_empty() => Self::Unseen,
            None => Self::Unseen,
            Some(PostingList::Pruned) => Self::Pruned,
            Some(PostingList::Docs(docs)) => Self::Present(docs),
        }
    }
}

/// Intersects two ascending, duplicate-free slices.
///
/// Classic two-pointer merge. The output is ascending and duplicate-free,
/// and `intersect(a, b) == intersect(b, a)`.
///
/// # Example
///
/// ```
/// use tridex_core::index::trigram::intersect;
///
/// assert_eq!(intersect(&[1, 3, 5, 7], &[3, 4, 5]), vec![3, 5]);
/// ```
#[must_use]
pub fn intersect(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let mut result = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Equal => {
                result.push(a[i]);
                i += 1;
                j += 1;
            }
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
        }
    }

    result
}
