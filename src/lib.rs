// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! A Nested Containment List (NCL) index over half-open integer intervals.
//!
//! ##### About
//!
//! Given a static set of intervals, each carrying a mapping to some target
//! entity, this crate builds an index that answers "which intervals overlap
//! query `[start, end)`" in `O(log N + k)`, where `k` is the number of hits.
//! The index decomposes the input by containment into a forest of nested
//! lists (the NCL algorithm of Aleksenko & Aleksyenko), which keeps search
//! cost proportional to containment depth rather than to `N`.
//!
//! The index can be searched directly in memory ([`search::search`]), or
//! serialized to a four-file on-disk bundle ([`serialize`]) and searched
//! out-of-core via [`file_db::FileBackedIndex`], which only ever holds one
//! block of records in memory per open search.
//!
//! ##### NOTE
//!
//! This crate only builds and searches the index. Parsing interval records
//! out of a text format, constructing file paths, and any higher-level
//! annotation model are the caller's responsibility.
//!
//! # Example usage
//!
//! ```
//! use ncl_index::{IntervalRecord, Config, build, search};
//!
//! let mut records = vec![
//!     IntervalRecord::new(0, 100, 1, 0, 100),
//!     IntervalRecord::new(10, 20, 2, 0, 10),
//! ];
//!
//! let index = build(&mut records, Config::default()).unwrap();
//!
//! let mut buf = vec![IntervalRecord::default(); 16];
//! let (n, resume) = search(&index, 15, 16, &mut buf, None).unwrap();
//! assert!(resume.is_none());
//! assert_eq!(2, n);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all, missing_docs, clippy::cargo)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::indexing_slicing)]
#![warn(clippy::pedantic, clippy::nursery)]
#![warn(clippy::expect_used)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]

mod binary_search;
mod block_index;
mod builder;
mod coding;
mod config;
mod error;
mod file_db;
mod iterator;
mod orientation;
mod record;
mod repack;
mod search;
mod serialize;
mod sublist_header;

pub use {
    builder::{build, Index},
    config::Config,
    error::{Error, Result},
    file_db::FileBackedIndex,
    iterator::SearchResume,
    record::IntervalRecord,
    search::search,
    serialize::serialize,
    sublist_header::SublistHeader,
};
