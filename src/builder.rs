// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Nested Containment List construction: sorts a flat interval array,
//! detects containment with an implicit stack, and repacks the array into
//! a top-level region followed by the concatenation of sublists.
//!
//! Grounded on `build_nested_list` in `pygr/intervaldb.c`.

use crate::{
    config::Config,
    orientation,
    record::{IntervalRecord, NO_SUBLIST},
    sublist_header::SublistHeader,
};

/// A built, in-memory NCL index: a record array partitioned into a
/// top-level list followed by sublists, plus the sublist header table.
#[derive(Clone, Debug)]
pub struct Index {
    pub(crate) records: Vec<IntervalRecord>,
    pub(crate) ntop: usize,
    pub(crate) headers: Vec<SublistHeader>,
    pub(crate) config: Config,
}

impl Index {
    /// Number of records in the index, including sublists.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the index holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records in the top-level list.
    #[must_use]
    pub fn ntop(&self) -> usize {
        self.ntop
    }

    /// Number of sublist headers.
    #[must_use]
    pub fn nlists(&self) -> usize {
        self.headers.len()
    }

    /// The configuration this index was built with.
    #[must_use]
    pub fn config(&self) -> Config {
        self.config
    }

    pub(crate) fn records(&self) -> &[IntervalRecord] {
        &self.records
    }

    pub(crate) fn headers(&self) -> &[SublistHeader] {
        &self.headers
    }

    // NOTE: ntop is always <= records.len(), set by build() alongside it
    #[allow(clippy::indexing_slicing)]
    pub(crate) fn top_list(&self) -> &[IntervalRecord] {
        &self.records[..self.ntop]
    }

    // NOTE: header_idx comes from a record's own `sublist` field, which
    // build() only ever sets to a valid index into this same header table
    #[allow(clippy::indexing_slicing)]
    pub(crate) fn sublist_records(&self, header_idx: usize) -> &[IntervalRecord] {
        let h = self.headers[header_idx];
        let start = h.start as usize;
        let len = h.len as usize;
        &self.records[start..start + len]
    }
}

/// Builds an NCL index out of a flat, arbitrarily-ordered array of
/// intervals.
///
/// Mutates `records` in place to its final NCL order (top list followed by
/// the concatenation of sublists) and returns an owned [`Index`] over a
/// copy of that order. On return, `records[0..index.ntop())` is the
/// top-level list in ascending positive `start`, and the remainder is the
/// concatenation of sublists, each internally sorted by positive `start`.
/// Every record's `sublist` field is either [`NO_SUBLIST`] or the index of
/// the sublist header listing its own contained children.
///
/// # Errors
///
/// Returns [`crate::Error::InputCountMismatch`] only via the external text
/// loader (out of scope here, spec.md §1); this function itself always
/// succeeds, but returns `Result` to match the external interface contract
/// of spec.md §6.
// NOTE: every index below is into an array sized `n` (or a scratch array
// sized `nsub`/`nlists`) built from a loop bound by the same `n`/`nsub`
#[allow(clippy::indexing_slicing)]
pub fn build(records: &mut [IntervalRecord], config: Config) -> crate::Result<Index> {
    log::debug!("building NCL index over {} records", records.len());

    if config.merge_orientations {
        for rec in records.iter_mut() {
            orientation::normalize(rec);
        }
    }

    // Sort by (positive_start asc, positive_end desc): ties put a
    // container before the intervals it contains.
    records.sort_by(|a, b| {
        a.positive_start()
            .cmp(&b.positive_start())
            .then_with(|| b.positive_end().cmp(&a.positive_end()))
    });

    let n = records.len();

    // Single linear pass threading an implicit stack of "currently open
    // containers" through a scratch array, per spec.md §4.2 step 2 /
    // `build_nested_list`'s recursive loop.
    let mut parent_of = vec![NO_SUBLIST; n];
    let mut nsub = 0usize;
    let mut i = 0usize;
    while i < n {
        let mut parent = i as i32;
        i += 1;
        while i < n && parent >= 0 {
            if records[i].positive_end() <= records[parent as usize].positive_end() {
                parent_of[i] = parent;
                nsub += 1;
                parent = i as i32;
                i += 1;
            } else {
                parent = parent_of[parent as usize];
            }
        }
    }

    if nsub == 0 {
        for rec in records.iter_mut() {
            rec.sublist = NO_SUBLIST;
        }
        return Ok(Index {
            records: records.to_vec(),
            ntop: n,
            headers: Vec::new(),
            config,
        });
    }

    // Assign each distinct parent the next sequential header id, in order
    // of its first child's ascending index. `header_of[idx]` doubles as
    // "does idx have contained children" (spec.md §9: the `sublist` field
    // carries this meaning in the original; kept here as a separate
    // scratch array for clarity, an alternative spec.md §9 explicitly
    // allows).
    let mut header_of = vec![NO_SUBLIST; n];
    let mut nlists = 0i32;
    let mut imsub: Vec<(usize, i32)> = Vec::with_capacity(nsub);
    for idx in 0..n {
        let parent = parent_of[idx];
        if parent >= 0 {
            let parent = parent as usize;
            if header_of[parent] < 0 {
                header_of[parent] = nlists;
                nlists += 1;
            }
            imsub.push((idx, header_of[parent]));
        }
    }

    // Stable sort by header id groups each sublist together while
    // preserving the original (positive_start-ascending) relative order
    // within each group — equivalent to spec.md §4.2 step 5's
    // `(header_id asc, start asc)` key.
    imsub.sort_by_key(|&(_, header_id)| header_id);

    // The final meaning of `sublist`: the header id of a record's own
    // children, or NO_SUBLIST.
    for idx in 0..n {
        records[idx].sublist = header_of[idx];
    }

    let mut headers = vec![SublistHeader::default(); nlists as usize];
    let mut sub_records = Vec::with_capacity(nsub);
    let mut is_top_level = vec![true; n];
    for &(orig_idx, header_id) in &imsub {
        let slot = sub_records.len();
        let header_id = header_id as usize;
        if headers[header_id].len == 0 {
            headers[header_id].start = slot as i32;
        }
        headers[header_id].len += 1;
        sub_records.push(records[orig_idx]);
        is_top_level[orig_idx] = false;
    }

    let mut compacted = Vec::with_capacity(n - nsub);
    for idx in 0..n {
        if is_top_level[idx] {
            compacted.push(records[idx]);
        }
    }
    let ntop = compacted.len();
    for header in &mut headers {
        header.start += ntop as i32;
    }
    compacted.extend(sub_records);

    records.copy_from_slice(&compacted);

    log::debug!(
        "built NCL index: ntop={ntop} nlists={nlists} total={}",
        compacted.len()
    );

    Ok(Index {
        records: compacted,
        ntop,
        headers,
        config,
    })
}
