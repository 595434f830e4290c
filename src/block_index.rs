// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! The sparse block index: one `(lo, hi)` pair per `div`-sized block of a
//! top-level list or big sublist, bounding the positive-orientation
//! `start`/`end` of the records in that block (spec.md §3 "Block index
//! entry", §4.4 step 4).
//!
//! Grounded on `IntervalIndex`/`write_binary_index`/`find_index_start` in
//! `pygr/intervaldb.c`.

use crate::{
    binary_search::partition_point,
    coding::{Decode, DecodeError, Encode, EncodeError},
    record::IntervalRecord,
};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// Byte width of one serialized index entry.
pub const ENTRY_WIDTH: usize = 2 * 4;

/// One sparse-index entry: bounds of a single `div`-sized block, always in
/// positive orientation regardless of orientation merging.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IndexEntry {
    /// Positive-orientation start of the first record in the block
    pub lo: i32,
    /// Positive-orientation end of the last record in the block
    pub hi: i32,
}

impl Encode for IndexEntry {
    fn encode_into<W: Write>(&self, writer: &mut W) -> Result<(), EncodeError> {
        writer.write_i32::<LittleEndian>(self.lo)?;
        writer.write_i32::<LittleEndian>(self.hi)?;
        Ok(())
    }
}

impl Decode for IndexEntry {
    fn decode_from<R: Read>(reader: &mut R) -> Result<Self, DecodeError>
    where
        Self: Sized,
    {
        Ok(Self {
            lo: reader.read_i32::<LittleEndian>()?,
            hi: reader.read_i32::<LittleEndian>()?,
        })
    }
}

/// Number of `div`-sized blocks (the last possibly partial) covering `len`
/// records.
#[must_use]
pub fn block_count(len: usize, div: u32) -> usize {
    let div = div as usize;
    len.div_ceil(div)
}

/// Builds the sparse index for one region (the top list, or one big
/// sublist), per spec.md §3 invariant 6: entry `k` bounds
/// `region[k*div ..= min((k+1)*div-1, len-1)]`.
#[must_use]
pub fn build_index(region: &[IntervalRecord], div: u32) -> Vec<IndexEntry> {
    let div = div as usize;
    if region.is_empty() {
        return Vec::new();
    }
    region
        .chunks(div)
        .map(|block| IndexEntry {
            lo: block
                .first()
                .map(IntervalRecord::positive_start)
                .unwrap_or_default(),
            hi: block
                .last()
                .map(IntervalRecord::positive_end)
                .unwrap_or_default(),
        })
        .collect()
}

/// Finds the first block in `entries` that could contain an overlap with
/// `[start, end)`: the lower bound by "first block whose `hi` > `start`".
///
/// Unlike [`crate::binary_search::find_overlap_start`], this does not
/// itself verify overlap on the result — it only locates the block to
/// load; the actual record-level overlap check happens once the block's
/// records are in hand. Mirrors `find_index_start` in the original, kept
/// distinct from record-level search per spec.md SPEC_FULL §F.
#[must_use]
pub fn find_block_start(entries: &[IndexEntry], start: i32) -> usize {
    partition_point(entries, |e| e.hi <= start)
}
