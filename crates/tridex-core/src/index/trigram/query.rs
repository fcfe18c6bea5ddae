//! Query planning and execution.
//!
//! A query is decomposed into its distinct trigrams, which are ordered
//! rarest first so the intersection starts from the smallest list and each
//! step can only shrink the candidate set.

use super::extract::{extract_into, Trigram};
use super::index::TrigramIndex;
use super::posting_list::{intersect, DocId, Postings};
use crate::config::QueryConfig;

impl TrigramIndex {
    /// Returns the candidate documents for substring `s`.
    ///
    /// Every returned document contains all trigrams of `s`, but not
    /// necessarily `s` itself: callers verify candidates with a real
    /// matcher. Queries shorter than 3 bytes return every inserted ID.
    ///
    /// # Example
    ///
    /// ```
    /// use tridex_core::TrigramIndex;
    ///
    /// let index = TrigramIndex::build(["abcdef", "xbcdez", "qqqqqq"]);
    /// assert_eq!(index.query("bcd"), vec![0, 1]);
    /// assert!(index.query("zzz").is_empty());
    /// ```
    #[must_use]
    pub fn query(&self, s: impl AsRef<[u8]>) -> Vec<DocId> {
        let mut trigrams = Vec::new();
        extract_into(s.as_ref(), true, &mut trigrams);
        self.query_trigrams(&trigrams)
    }

    /// Runs [`query`](Self::query) and caps the result at
    /// `config.max_candidates`, keeping the lowest IDs.
    #[must_use]
    pub fn query_with_config(&self, s: impl AsRef<[u8]>, config: &QueryConfig) -> Vec<DocId> {
        let mut docs = self.query(s);
        if let Some(max) = config.max_candidates {
            docs.truncate(max);
        }
        docs
    }

    /// Returns the candidate documents containing all of `trigrams`.
    ///
    /// - no trigrams: a copy of the universal list;
    /// - any unseen trigram: nothing;
    /// - otherwise the intersection of all non-pruned lists, rarest first.
    ///   If every trigram was pruned there is no constraint left and the
    ///   universal list is returned.
    #[must_use]
    pub fn query_trigrams(&self, trigrams: &[Trigram]) -> Vec<DocId> {
        if trigrams.is_empty() {
            return self.all_docs.clone();
        }

        let mut plan: Vec<Postings<'_>> = Vec::with_capacity(trigrams.len());
        for &t in trigrams {
            match self.postings(t) {
                Postings::Unseen => return Vec::new(),
                p => plan.push(p),
            }
        }

        // Stable: ties keep extraction order.
        plan.sort_by_key(Postings::len);

        let Some(seed) = plan.iter().position(|p| !p.is_empty()) else {
            return self.all_docs.clone();
        };
        let docs = plan[seed].docs().unwrap_or_default().to_vec();

        Self::filter_postings(docs, &plan[seed + 1..])
    }

    /// Intersects `docs` with the postings of each trigram, in order.
    ///
    /// Callers choose the order; rarest first is cheapest. An unseen
    /// trigram empties the result, a pruned one is skipped.
    #[must_use]
    pub fn filter(&self, docs: &[DocId], trigrams: &[Trigram]) -> Vec<DocId> {
        let mut steps = Vec::with_capacity(trigrams.len());
        for &t in trigrams {
            match self.postings(t) {
                Postings::Unseen => return Vec::new(),
                p => steps.push(p),
            }
        }
        Self::filter_postings(docs.to_vec(), &steps)
    }

    fn filter_postings(mut docs: Vec<DocId>, steps: &[Postings<'_>]) -> Vec<DocId> {
        for step in steps {
            if docs.is_empty() {
                break;
            }
            match step {
                Postings::Unseen => return Vec::new(),
                Postings::Pruned => {}
                Postings::Present(list) => docs = intersect(&docs, list),
            }
        }
        docs
    }
}
