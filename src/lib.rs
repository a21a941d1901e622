#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Strategies mapping a string key to a bucket index.
pub mod bucket_hasher;

/// Arena-backed singly-linked chains used as per-bucket storage.
pub mod chain;

/// Construction parameters for the table.
pub mod config;

mod error;

/// A string-keyed hash table built on separate chaining.
///
/// This module provides [`ChainedHashTable`], which stores one optional
/// [`Chain`] per bucket and doubles its bucket array as it fills.
pub mod hash_table;

pub use bucket_hasher::BucketHasher;
pub use bucket_hasher::Digest;
#[cfg(feature = "foldhash")]
pub use bucket_hasher::FoldDigest;
pub use bucket_hasher::Polynomial31;
pub use chain::Chain;
pub use chain::Entry;
pub use config::TableConfig;
pub use error::TableError;
pub use hash_table::ChainedHashTable;
