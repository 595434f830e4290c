// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::coding::{Decode, DecodeError, Encode, EncodeError};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// Sentinel value of [`IntervalRecord::sublist`] meaning "no contained
/// children".
pub const NO_SUBLIST: i32 = -1;

/// A single interval mapped to a target range.
///
/// Fixed width, six `i32` fields serialized little-endian verbatim (24
/// bytes on disk). `start`/`end` are in query-space; `target_start`/
/// `target_end` are in target-space and keep their sign to record mapping
/// orientation even when the query-space coordinates have been normalized
/// to positive orientation (see [`crate::orientation`]).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntervalRecord {
    /// Start coordinate (query space)
    pub start: i32,
    /// End coordinate (query space), exclusive in positive orientation
    pub end: i32,
    /// Opaque id of the mapped-to target entity
    pub target_id: i32,
    /// Start coordinate in target space
    pub target_start: i32,
    /// End coordinate in target space
    pub target_end: i32,
    /// Index into the sublist header table, or [`NO_SUBLIST`]
    pub sublist: i32,
}

impl IntervalRecord {
    /// Builds a record with no sublist assigned yet.
    #[must_use]
    pub fn new(start: i32, end: i32, target_id: i32, target_start: i32, target_end: i32) -> Self {
        Self {
            start,
            end,
            target_id,
            target_start,
            target_end,
            sublist: NO_SUBLIST,
        }
    }

    /// The positive-orientation start: `start` if `start >= 0`, else `-end`.
    #[must_use]
    pub fn positive_start(&self) -> i32 {
        if self.start >= 0 {
            self.start
        } else {
            -self.end
        }
    }

    /// The positive-orientation end: `end` if `start >= 0`, else `-start`.
    #[must_use]
    pub fn positive_end(&self) -> i32 {
        if self.start >= 0 {
            self.end
        } else {
            -self.start
        }
    }

    /// Whether this record, read in positive orientation, overlaps the
    /// half-open query range `[start, end)`.
    #[must_use]
    pub fn overlaps_positive(&self, query_start: i32, query_end: i32) -> bool {
        self.positive_end() > query_start && self.positive_start() < query_end
    }
}

/// Byte width of one serialized [`IntervalRecord`].
pub const RECORD_WIDTH: usize = 6 * 4;

impl Encode for IntervalRecord {
    fn encode_into<W: Write>(&self, writer: &mut W) -> Result<(), EncodeError> {
        writer.write_i32::<LittleEndian>(self.start)?;
        writer.write_i32::<LittleEndian>(self.end)?;
        writer.write_i32::<LittleEndian>(self.target_id)?;
        writer.write_i32::<LittleEndian>(self.target_start)?;
        writer.write_i32::<LittleEndian>(self.target_end)?;
        writer.write_i32::<LittleEndian>(self.sublist)?;
        Ok(())
    }
}

impl Decode for IntervalRecord {
    fn decode_from<R: Read>(reader: &mut R) -> Result<Self, DecodeError>
    where
        Self: Sized,
    {
        Ok(Self {
            start: reader.read_i32::<LittleEndian>()?,
            end: reader.read_i32::<LittleEndian>()?,
            target_id: reader.read_i32::<LittleEndian>()?,
            target_start: reader.read_i32::<LittleEndian>()?,
            target_end: reader.read_i32::<LittleEndian>()?,
            sublist: reader.read_i32::<LittleEndian>()?,
        })
    }
}
