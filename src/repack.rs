// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Reorders sublist headers so "big" sublists (`len > div`) precede
//! "small" ones, rewriting every record's `sublist` field through the
//! resulting permutation.
//!
//! This lets the on-disk sparse index be a flat concatenation of "top
//! list, then big sublists in header-table order" (spec.md §4.4 step 1,
//! §4.6). Pure in-memory rearrangement of the header table; it does not
//! move any record data, since each header's `start`/`len` still points
//! at that sublist's unmoved physical location in the record array.
//!
//! Grounded on `repack_subheaders` in `pygr/intervaldb.c`.

use crate::{record::IntervalRecord, sublist_header::SublistHeader};

/// Applies the big-sublists-first repacking in place: reorders `headers`
/// and rewrites `records[i].sublist` for every record whose sublist is
/// set.
// NOTE: perm is sized nlists == headers.len(), and rec.sublist is always
// either NO_SUBLIST or a valid index into the same header table
#[allow(clippy::indexing_slicing)]
pub fn repack_subheaders(records: &mut [IntervalRecord], headers: &mut [SublistHeader], div: u32) {
    let nlists = headers.len();
    if nlists == 0 {
        return;
    }

    let mut perm = vec![0i32; nlists];
    let mut packed = Vec::with_capacity(nlists);

    for (old_id, header) in headers.iter().enumerate() {
        if header.len as u32 > div {
            perm[old_id] = packed.len() as i32;
            packed.push(*header);
        }
    }
    for (old_id, header) in headers.iter().enumerate() {
        if header.len as u32 <= div {
            perm[old_id] = packed.len() as i32;
            packed.push(*header);
        }
    }

    for rec in records.iter_mut() {
        if rec.sublist >= 0 {
            rec.sublist = perm[rec.sublist as usize];
        }
    }

    headers.copy_from_slice(&packed);
}

/// Number of headers at the front of an already-repacked table with
/// `len > div` (the ones carrying a sparse index entry group).
#[must_use]
pub fn count_big(headers: &[SublistHeader], div: u32) -> usize {
    headers.iter().filter(|h| h.len as u32 > div).count()
}
