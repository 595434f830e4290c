// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! The file-backed searcher (spec.md §4.5): a handle over an on-disk
//! bundle that reads only the blocks a query actually touches.
//!
//! Grounded on `find_file_start`/`find_suboverlap_start`/
//! `find_file_intervals` in `pygr/intervaldb.c`.

use crate::{
    binary_search, block_index,
    coding::Decode,
    iterator::{Frame, SearchResume},
    orientation,
    record::{IntervalRecord, RECORD_WIDTH},
    serialize::bundle_path,
    sublist_header::SublistHeader,
};
use std::{
    fs::File,
    io::{Cursor, Read, Seek, SeekFrom},
    path::Path,
};

fn transform_query(merge_orientations: bool, start: i32, end: i32) -> (i32, i32, i32) {
    if merge_orientations && start < 0 {
        (-end, -start, -1)
    } else {
        (start, end, 1)
    }
}

fn read_all<T: Decode>(path: &Path) -> crate::Result<Vec<T>> {
    let bytes = std::fs::read(path)?;
    let mut cursor = Cursor::new(bytes);
    let len = cursor.get_ref().len() as u64;
    let mut out = Vec::new();
    while cursor.position() < len {
        out.push(T::decode_from(&mut cursor)?);
    }
    Ok(out)
}

/// Reads one on-disk block: `min(div, region_len - i_div*div)` records
/// starting at `region_offset + i_div*div` records into `.idb`.
fn load_block(
    idb: &mut File,
    region_offset: u64,
    i_div: usize,
    div: u32,
    region_len: usize,
) -> crate::Result<Vec<IntervalRecord>> {
    let div = div as usize;
    let block_start = i_div * div;
    let count = region_len.saturating_sub(block_start).min(div);

    idb.seek(SeekFrom::Start(
        (region_offset + block_start as u64) * RECORD_WIDTH as u64,
    ))?;
    let mut bytes = vec![0u8; count * RECORD_WIDTH];
    idb.read_exact(&mut bytes)?;

    let mut cursor = Cursor::new(bytes);
    (0..count)
        .map(|_| IntervalRecord::decode_from(&mut cursor).map_err(Into::into))
        .collect()
}

/// Loads the first block of a region that could overlap `[start, end)` and
/// positions a cursor within it, or returns `None` if the region has no
/// overlap at all. `entries` is the region's own slice of the sparse index,
/// or `None` for a region small enough to have been written unindexed.
fn start_region_frame(
    idb: &mut File,
    region_offset: u64,
    region_len: usize,
    div: u32,
    entries: Option<&[block_index::IndexEntry]>,
    start: i32,
    end: i32,
) -> crate::Result<Option<Frame>> {
    if region_len == 0 {
        return Ok(None);
    }
    let nii = block_index::block_count(region_len, div);
    let i_div = entries.map_or(0, |entries| block_index::find_block_start(entries, start));
    if i_div >= nii {
        return Ok(None);
    }

    let block = load_block(idb, region_offset, i_div, div, region_len)?;
    Ok(
        binary_search::find_overlap_start(&block, start, end).map(|cursor| Frame::Block {
            region_offset,
            region_len,
            div,
            i_div,
            nii,
            block,
            cursor,
        }),
    )
}

/// A handle onto an on-disk NCL bundle (`stem.{idb,subhead,index,size}`),
/// reading only the blocks a query touches instead of loading the whole
/// index into memory.
///
/// Not `Clone`: each handle owns one open `.idb` file descriptor and a
/// reusable decode buffer. Open one handle per concurrent searcher; this
/// index format has no internal concurrency (spec.md §7 "Concurrency
/// model").
pub struct FileBackedIndex {
    idb: File,
    div: u32,
    n: usize,
    ntop: usize,
    merge_orientations: bool,
    top_block_count: usize,
    index_entries: Vec<block_index::IndexEntry>,
    headers: Vec<SublistHeader>,
    header_entries: Vec<Option<(usize, usize)>>,
}

impl FileBackedIndex {
    /// Opens the bundle at `stem.{idb,subhead,index,size}`.
    ///
    /// `merge_orientations` must match the [`crate::Config`] the bundle was
    /// built with; the bundle format has no field to carry the toggle
    /// itself (spec.md §9).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] if any of the four files cannot be
    /// opened or read, and [`crate::Error::InvalidBundle`] if their
    /// contents are inconsistent with each other.
    pub fn open(stem: impl AsRef<Path>, merge_orientations: bool) -> crate::Result<Self> {
        let stem = stem.as_ref();

        let size_contents = std::fs::read_to_string(bundle_path(stem, "size"))?;
        let mut fields = size_contents.split_whitespace();
        let mut next_usize = |name: &'static str| -> crate::Result<usize> {
            fields
                .next()
                .ok_or_else(|| crate::Error::InvalidBundle(format!("size file missing {name}")))?
                .parse()
                .map_err(|_| crate::Error::InvalidBundle(format!("size file has non-numeric {name}")))
        };

        let n = next_usize("n")?;
        let ntop = next_usize("ntop")?;
        let div = next_usize("div")? as u32;
        let nlists = next_usize("nlists")?;
        let nii = next_usize("nii")?;

        let headers: Vec<SublistHeader> = read_all(&bundle_path(stem, "subhead"))?;
        if headers.len() != nlists {
            return Err(crate::Error::InvalidBundle(format!(
                "subhead has {} headers, size declares {nlists}",
                headers.len()
            )));
        }

        let index_entries: Vec<block_index::IndexEntry> = read_all(&bundle_path(stem, "index"))?;
        if index_entries.len() != nii {
            return Err(crate::Error::InvalidBundle(format!(
                "index has {} entries, size declares {nii}",
                index_entries.len()
            )));
        }

        let top_block_count = block_index::block_count(ntop, div);
        if top_block_count > index_entries.len() {
            return Err(crate::Error::InvalidBundle(
                "index shorter than top list's own block count".into(),
            ));
        }

        let mut cursor = top_block_count;
        let mut header_entries = Vec::with_capacity(headers.len());
        for header in &headers {
            if header.len as u32 > div {
                let nblk = block_index::block_count(header.len as usize, div);
                header_entries.push(Some((cursor, cursor + nblk)));
                cursor += nblk;
            } else {
                header_entries.push(None);
            }
        }
        if cursor != index_entries.len() {
            return Err(crate::Error::InvalidBundle(
                "index length disagrees with subhead block counts".into(),
            ));
        }

        let idb = File::open(bundle_path(stem, "idb"))?;

        Ok(Self {
            idb,
            div,
            n,
            ntop,
            merge_orientations,
            top_block_count,
            index_entries,
            headers,
            header_entries,
        })
    }

    /// Total number of records in the index, including sublists.
    #[must_use]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Whether the index holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Enumerates every record overlapping `[q_start, q_end)`, reading only
    /// the on-disk blocks the traversal actually visits.
    ///
    /// Same resumable-buffer contract as [`crate::search::search`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] on a read failure against the `.idb`
    /// file.
    // NOTE: every index below is bounded by an invariant established just
    // above it (cursor checked against block.len(), filled checked against
    // buf.len(), top_idx derived from a non-empty frame stack)
    #[allow(clippy::indexing_slicing)]
    pub fn search(
        &mut self,
        q_start: i32,
        q_end: i32,
        buf: &mut [IntervalRecord],
        resume: Option<SearchResume>,
    ) -> crate::Result<(usize, Option<SearchResume>)> {
        let (start, end, fresh_sign) = transform_query(self.merge_orientations, q_start, q_end);
        let ori_sign = resume.as_ref().map_or(fresh_sign, |r| r.ori_sign);

        let mut resume = match resume {
            Some(r) => r,
            None => {
                let mut r = SearchResume::new(ori_sign);
                let top_entries = &self.index_entries[..self.top_block_count];
                if let Some(frame) = start_region_frame(
                    &mut self.idb,
                    0,
                    self.ntop,
                    self.div,
                    Some(top_entries),
                    start,
                    end,
                )? {
                    r.push(frame);
                }
                r
            }
        };

        let cap = buf.len();
        let mut filled = 0usize;

        while let Some(top_idx) = resume.frames.len().checked_sub(1) {
            let needs_next_block = match &resume.frames[top_idx] {
                Frame::Block { cursor, block, .. } => *cursor >= block.len(),
                Frame::Slice { .. } => unreachable!("file-backed search only pushes Block frames"),
            };

            if needs_next_block {
                let (region_offset, div, region_len, next_i_div, has_more) =
                    if let Frame::Block { region_offset, div, region_len, i_div, nii, .. } =
                        &resume.frames[top_idx]
                    {
                        (*region_offset, *div, *region_len, *i_div + 1, *i_div + 1 < *nii)
                    } else {
                        unreachable!()
                    };

                if !has_more {
                    resume.frames.pop();
                    continue;
                }

                let new_block = load_block(&mut self.idb, region_offset, next_i_div, div, region_len)?;
                if let Frame::Block { i_div, block, cursor, .. } = &mut resume.frames[top_idx] {
                    *i_div = next_i_div;
                    *block = new_block;
                    *cursor = 0;
                }
                continue;
            }

            let rec = if let Frame::Block { block, cursor, .. } = &resume.frames[top_idx] {
                *block
                    .get(*cursor)
                    .expect("needs_next_block above guarantees cursor < block.len()")
            } else {
                unreachable!()
            };

            if !rec.overlaps_positive(start, end) {
                resume.frames.pop();
                continue;
            }

            buf[filled] = rec;
            filled += 1;
            let sub = rec.sublist;

            if let Frame::Block { cursor, .. } = &mut resume.frames[top_idx] {
                *cursor += 1;
            }

            if sub >= 0 {
                let header = *self
                    .headers
                    .get(sub as usize)
                    .expect("sublist id was assigned by the builder for this same header table");
                let entries_slice = self.header_entries[sub as usize]
                    .map(|(lo, hi)| &self.index_entries[lo..hi]);
                if let Some(frame) = start_region_frame(
                    &mut self.idb,
                    header.start as u64,
                    header.len as usize,
                    self.div,
                    entries_slice,
                    start,
                    end,
                )? {
                    resume.push(frame);
                }
            }

            if filled >= cap {
                break;
            }
        }

        orientation::restore(&mut buf[..filled], ori_sign);

        if resume.is_empty() {
            Ok((filled, None))
        } else {
            Ok((filled, Some(resume)))
        }
    }
}
