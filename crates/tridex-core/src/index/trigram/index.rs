//! Trigram index storage and mutation.
//!
//! Postings are plain sorted `Vec<DocId>`s keyed by packed trigram. The list
//! of every inserted document lives in its own field rather than under a
//! reserved key, so no trigram value can collide with it.

#![allow(clippy::cast_precision_loss)] // Threshold math on list lengths
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::extract::{extract_into, Trigram};
use super::posting_list::{DocId, PostingList, Postings};
use crate::config::IndexConfig;
use crate::error::{Error, Result};

/// Statistics for the trigram index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrigramStats {
    /// Number of inserts recorded in the universal list.
    pub doc_count: usize,
    /// Number of distinct trigram keys, pruned ones included.
    pub trigram_count: usize,
    /// Number of pruned trigram keys.
    pub pruned_count: usize,
    /// Total document IDs across all trigram postings lists.
    pub postings_entries: usize,
    /// Estimated memory usage in bytes.
    pub memory_bytes: usize,
}

/// Trigram-based inverted index over byte strings.
///
/// Not internally synchronized: wrap it in a lock to share it across
/// threads. Query methods return freshly allocated vectors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrigramIndex {
    /// Inverted index: trigram → postings.
    pub(super) postings: FxHashMap<Trigram, PostingList>,

    /// Every inserted document ID, in insertion order.
    pub(super) all_docs: Vec<DocId>,
}

impl TrigramIndex {
    /// Create a new empty trigram index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty index with room for `trigrams` distinct keys.
    #[must_use]
    pub fn with_capacity(trigrams: usize) -> Self {
        Self {
            postings: FxHashMap::with_capacity_and_hasher(trigrams, Default::default()),
            all_docs: Vec::new(),
        }
    }

    /// Builds an index over `docs`, using each document's position as its ID.
    ///
    /// IDs are appended in increasing order, so every postings list comes
    /// out sorted and duplicate-free without a sort pass.
    ///
    /// # Panics
    ///
    /// Panics if there are more than `u32::MAX` documents.
    #[must_use]
    pub fn build<I, S>(docs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut index = Self::new();
        index.extend(docs);
        index
    }

    /// Builds an index over `docs`, then applies the sort and prune passes
    /// requested by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config.prune_threshold` is outside `(0.0, 1.0]`.
    pub fn build_with_config<I, S>(docs: I, config: &IndexConfig) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut index = Self::with_capacity(config.initial_capacity);
        index.extend(docs);
        index.finish_build(config)?;
        Ok(index)
    }

    /// Builds an index over `(id, doc)` pairs with caller-chosen IDs.
    ///
    /// Pairs are inserted in the order given. IDs arriving out of order
    /// leave lists unsorted unless `config.sort_on_build` is set, in which
    /// case a sort pass runs before pruning.
    ///
    /// # Errors
    ///
    /// Returns an error if `config.prune_threshold` is outside `(0.0, 1.0]`.
    pub fn build_with_ids<I, S>(docs: I, config: &IndexConfig) -> Result<Self>
    where
        I: IntoIterator<Item = (DocId, S)>,
        S: AsRef<[u8]>,
    {
        let mut index = Self::with_capacity(config.initial_capacity);
        let mut buf = Vec::new();
        for (id, doc) in docs {
            extract_into(doc.as_ref(), true, &mut buf);
            index.insert_trigrams(&buf, id);
        }
        debug!(
            docs = index.all_docs.len(),
            trigrams = index.postings.len(),
            "Trigram index built from explicit ids"
        );
        index.finish_build(config)?;
        Ok(index)
    }

    fn finish_build(&mut self, config: &IndexConfig) -> Result<()> {
        if config.sort_on_build {
            self.sort();
        }
        if let Some(threshold) = config.prune_threshold {
            self.try_prune(threshold)?;
        }
        Ok(())
    }

    /// Appends every document of `docs` with [`add`](Self::add).
    pub(crate) fn extend<I, S>(&mut self, docs: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let start = self.all_docs.len();
        let mut buf = Vec::new();
        for doc in docs {
            let id = self.next_doc_id();
            extract_into(doc.as_ref(), true, &mut buf);
            self.insert_trigrams(&buf, id);
        }
        debug!(
            docs = self.all_docs.len() - start,
            trigrams = self.postings.len(),
            "Trigram index built"
        );
    }

    /// Returns true if nothing was ever inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.all_docs.is_empty()
    }

    /// Number of inserts recorded in the universal list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.all_docs.len()
    }

    /// Number of distinct trigram keys, pruned ones included.
    #[must_use]
    pub fn trigram_count(&self) -> usize {
        self.postings.len()
    }

    /// Number of pruned trigram keys.
    #[must_use]
    pub fn pruned_count(&self) -> usize {
        self.postings.values().filter(|l| l.is_pruned()).count()
    }

    /// The ID [`add`](Self::add) would assign next.
    ///
    /// # Panics
    ///
    /// Panics if the universal list already holds `u32::MAX` entries.
    #[must_use]
    pub fn next_doc_id(&self) -> DocId {
        DocId::try_from(self.all_docs.len())
            .unwrap_or_else(|_| panic!("TrigramIndex: more than u32::MAX documents inserted"))
    }

    /// Every inserted document ID, in insertion order.
    #[must_use]
    pub fn all_docs(&self) -> &[DocId] {
        &self.all_docs
    }

    /// Looks up the postings for one trigram.
    #[must_use]
    pub fn postings(&self, trigram: Trigram) -> Postings<'_> {
        self.postings.get(&trigram).into()
    }

    /// Adds a document under the next free ID and returns that ID.
    ///
    /// # Panics
    ///
    /// Panics if the universal list already holds `u32::MAX` entries.
    pub fn add(&mut self, s: impl AsRef<[u8]>) -> DocId {
        let id = self.next_doc_id();
        self.insert(s, id);
        id
    }

    /// Inserts a document under an explicit ID.
    ///
    /// IDs are expected in non-decreasing order across calls. Inserting a
    /// smaller ID is allowed, but queries may miss it until [`sort`]
    /// runs. Re-inserting an existing ID is not detected.
    ///
    /// [`sort`]: Self::sort
    pub fn insert(&mut self, s: impl AsRef<[u8]>, id: DocId) {
        let mut buf = Vec::new();
        extract_into(s.as_ref(), true, &mut buf);
        self.insert_trigrams(&buf, id);
    }

    /// Inserts pre-extracted trigrams under `id`.
    ///
    /// `trigrams` is used as given: deduplicate it first if needed. Only an
    /// ID equal to a list's tail is skipped.
    pub fn insert_trigrams(&mut self, trigrams: &[Trigram], id: DocId) {
        for &t in trigrams {
            self.postings
                .entry(t)
                .or_insert_with(|| PostingList::Docs(Vec::new()))
                .push_dedup(id);
        }
        self.all_docs.push(id);
        trace!(id, trigrams = trigrams.len(), "Document inserted");
    }

    /// Removes `id` from the postings of every trigram of `s`.
    ///
    /// A trigram whose list held only `id` is dropped from the index.
    /// Unknown trigrams, pruned lists and lists without `id` are left
    /// alone. The universal list is never touched: callers track deleted
    /// IDs themselves if they need to.
    pub fn delete(&mut self, s: impl AsRef<[u8]>, id: DocId) {
        let mut buf = Vec::new();
        extract_into(s.as_ref(), true, &mut buf);

        for t in buf {
            let Some(PostingList::Docs(docs)) = self.postings.get_mut(&t) else {
                continue;
            };
            if docs.as_slice() == [id] {
                self.postings.remove(&t);
            } else if let Ok(pos) = docs.binary_search(&id) {
                docs.remove(pos);
            }
        }
        trace!(id, "Document deleted");
    }

    /// Sorts every out-of-order list, the universal list included.
    ///
    /// Trigram lists are also deduplicated. The universal list is an insert
    /// log and keeps its repeats. A no-op on an already sorted index.
    pub fn sort(&mut self) {
        let mut resorted = 0usize;
        for list in self.postings.values_mut() {
            if list.normalize() {
                resorted += 1;
            }
        }
        if !self.all_docs.is_sorted() {
            self.all_docs.sort_unstable();
            resorted += 1;
        }
        debug!(resorted, "Trigram index sorted");
    }

    /// Prunes every trigram found in more than `fraction` of the inserts.
    ///
    /// The limit is `floor(fraction * len())`. Pruned keys stay in the
    /// index so queries can tell them apart from unseen trigrams. Returns
    /// the number of trigrams pruned by this call.
    pub fn prune(&mut self, fraction: f64) -> usize {
        let max_allowed = (fraction * self.all_docs.len() as f64).floor() as usize;

        let mut pruned = 0usize;
        for list in self.postings.values_mut() {
            if list.len() > max_allowed {
                *list = PostingList::Pruned;
                pruned += 1;
            }
        }
        debug!(fraction, max_allowed, pruned, "Trigram index pruned");
        pruned
    }

    /// Like [`prune`](Self::prune), but rejects fractions outside
    /// `(0.0, 1.0]`, NaN included.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidThreshold`] for an out-of-range fraction.
    pub fn try_prune(&mut self, fraction: f64) -> Result<usize> {
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(Error::InvalidThreshold(fraction));
        }
        Ok(self.prune(fraction))
    }

    /// Get index statistics.
    #[must_use]
    pub fn stats(&self) -> TrigramStats {
        let postings_entries: usize = self.postings.values().map(PostingList::len).sum();
        let id_size = std::mem::size_of::<DocId>();
        // key + Vec header per trigram, then the IDs themselves
        let map_size = self.postings.len()
            * (std::mem::size_of::<Trigram>() + std::mem::size_of::<PostingList>());

        TrigramStats {
            doc_count: self.all_docs.len(),
            trigram_count: self.postings.len(),
            pruned_count: self.pruned_count(),
            postings_entries,
            memory_bytes: map_size + (postings_entries + self.all_docs.len()) * id_size,
        }
    }
}
