//! Trigram index for substring candidate search.
//!
//! This module implements a trigram-based inverted index over sorted
//! `Vec<DocId>` postings lists.
//!
//! # Architecture
//!
//! - Extract every 3-byte window of a document, deduplicated per document
//! - Store inverted index: trigram → ascending list of doc IDs
//! - Query: order the query's trigrams rarest first, then intersect
//! - Prune: empty the lists of trigrams too common to discriminate
//!
//! Results are candidates only. A document containing every trigram of a
//! query need not contain the query itself, so callers re-check matches.

mod extract;
mod index;
mod posting_list;
mod query;

pub use extract::{
    extract, extract_all_trigrams, extract_into, extract_trigrams, trigram_frequencies, Trigram,
};
pub use index::{TrigramIndex, TrigramStats};
pub use posting_list::{intersect, DocId, PostingList, Postings};
