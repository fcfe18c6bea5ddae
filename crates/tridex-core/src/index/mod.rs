//! Index implementations.

pub mod trigram;

pub use trigram::{DocId, PostingList, Postings, Trigram, TrigramIndex, TrigramStats};
