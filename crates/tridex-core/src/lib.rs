//! # `Tridex` Core
//!
//! Trigram inverted index for approximate substring search.
//!
//! `Tridex` indexes a growing corpus of byte strings by their 3-byte
//! windows and answers "which documents may contain this substring?" with
//! a list of candidate IDs. Candidates are a superset of the true matches:
//! callers confirm them with an exact matcher.
//!
//! ## Quick Start
//!
//! ```rust
//! use tridex_core::TrigramIndex;
//!
//! let mut index = TrigramIndex::build(["abcdef", "xbcdez", "qqqqqq"]);
//! assert_eq!(index.query("bcd"), vec![0, 1]);
//!
//! let id = index.add("bcd again");
//! assert_eq!(index.query("bcd"), vec![0, 1, id]);
//!
//! // Short queries cannot discriminate: every document is a candidate.
//! assert_eq!(index.query("b").len(), 4);
//! ```
//!
//! The index does no I/O and no locking. Loading documents, persisting the
//! index and sharing it between threads are left to the caller.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

pub mod config;
#[cfg(test)]
mod config_tests;
pub mod error;
pub mod index;

pub use config::{ConfigError, IndexConfig, LoggingConfig, QueryConfig, TridexConfig};
pub use error::{Error, Result};
pub use index::{DocId, PostingList, Postings, Trigram, TrigramIndex, TrigramStats};
