// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! The iterator stack shared between the in-memory and file-backed
//! searchers (spec.md §4.3/§4.5/§4.7).
//!
//! Recursion depth into nested containers can reach the size of the input
//! in pathological data, so both searchers thread an explicit heap-backed
//! stack of frames rather than recursing natively. A frame is either a
//! direct view into the in-memory record array, or a loaded on-disk block
//! plus the metadata needed to fetch the next one — the same stack type
//! serves both searchers (spec.md §2's "Iterator lifecycle" row).

use crate::record::IntervalRecord;

/// One level of containment currently being scanned.
#[derive(Debug)]
pub(crate) enum Frame {
    /// A contiguous run of the fully in-memory record array.
    Slice {
        /// First index past the end of this region
        region_end: usize,
        /// Next index to examine
        cursor: usize,
    },

    /// A region of an on-disk list, read one block of `div` records at a
    /// time.
    Block {
        /// Record offset of this region's first record within `.idb`
        region_offset: u64,
        /// Unpadded record count of this region
        region_len: usize,
        /// Block size this region was written with
        div: u32,
        /// Index of the currently loaded block within the region's slab
        i_div: usize,
        /// Number of blocks covering this region (sparse-index entries),
        /// or `1` for a small sublist read whole
        nii: usize,
        /// Currently loaded block (or the whole small sublist)
        block: Vec<IntervalRecord>,
        /// Next index to examine within `block`
        cursor: usize,
    },
}

/// A resumable search continuation: a stack of [`Frame`]s.
///
/// Returned by `search` when the caller's buffer fills before the
/// traversal completes. Passing it back into the next `search` call
/// resumes the depth-first walk exactly where it left off. Dropping it
/// instead of resuming cancels the search and releases its frames (and
/// any per-frame on-disk block buffers) without affecting the underlying
/// index or open file.
#[derive(Debug, Default)]
pub struct SearchResume {
    pub(crate) frames: Vec<Frame>,
    /// Orientation sign of the originating query (`-1` if negative-start,
    /// else `1`); threaded through so `restore` is applied consistently
    /// across resumed calls.
    pub(crate) ori_sign: i32,
}

impl SearchResume {
    pub(crate) fn new(ori_sign: i32) -> Self {
        Self {
            frames: Vec::new(),
            ori_sign,
        }
    }

    pub(crate) fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub(crate) fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    pub(crate) fn top_mut(&mut self) -> Option<&mut Frame> {
        self.frames.last_mut()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Unwinds to an empty stack, discarding all frames. Mirrors
    /// `reset_interval_iterator` in the original: after reset, the next
    /// `search` call starts the traversal over from the top list.
    pub fn reset(&mut self) {
        self.frames.clear();
    }
}
