// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::coding::{Decode, DecodeError, Encode, EncodeError};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// Byte width of one serialized [`SublistHeader`].
pub const HEADER_WIDTH: usize = 2 * 4;

/// Points at a contiguous run of records that are all contained in a common
/// parent.
///
/// `start` is an offset into the in-memory record array during building and
/// searching, and a record offset within `.idb` once persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SublistHeader {
    /// Offset of the first record of this sublist
    pub start: i32,
    /// Number of records in this sublist (unpadded, logical length)
    pub len: i32,
}

impl Encode for SublistHeader {
    fn encode_into<W: Write>(&self, writer: &mut W) -> Result<(), EncodeError> {
        writer.write_i32::<LittleEndian>(self.start)?;
        writer.write_i32::<LittleEndian>(self.len)?;
        Ok(())
    }
}

impl Decode for SublistHeader {
    fn decode_from<R: Read>(reader: &mut R) -> Result<Self, DecodeError>
    where
        Self: Sized,
    {
        Ok(Self {
            start: reader.read_i32::<LittleEndian>()?,
            len: reader.read_i32::<LittleEndian>()?,
        })
    }
}
