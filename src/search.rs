// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Recursive overlap enumeration over a fully in-memory [`Index`], driven
//! by an explicit [`SearchResume`] stack instead of native recursion.
//!
//! Grounded on `find_intervals` in `pygr/intervaldb.c`.

use crate::{
    binary_search,
    builder::Index,
    iterator::{Frame, SearchResume},
    orientation,
    record::IntervalRecord,
};

/// Transforms a caller-facing query into positive-orientation coordinates
/// plus the sign needed to restore results on the way out.
fn transform_query(merge_orientations: bool, start: i32, end: i32) -> (i32, i32, i32) {
    if merge_orientations && start < 0 {
        (-end, -start, -1)
    } else {
        (start, end, 1)
    }
}

/// Enumerates every record in `index` overlapping `[q_start, q_end)`,
/// filling `buf` in depth-first preorder of the containment forest.
///
/// Returns the number of records filled and, if `buf` filled before the
/// traversal finished, a [`SearchResume`] to pass back in to continue.
/// Passing `None` for `resume` starts a fresh traversal.
///
/// # Errors
///
/// Currently infallible; returns `Result` to match the external interface
/// contract of spec.md §6, which treats "no hit" as a zero-fill success,
/// not an error.
// NOTE: every index below is bounded by an invariant established just
// above it (cursor checked against region_end, filled checked against
// buf.len(), top_idx derived from a non-empty frame stack)
#[allow(clippy::indexing_slicing)]
pub fn search(
    index: &Index,
    q_start: i32,
    q_end: i32,
    buf: &mut [IntervalRecord],
    resume: Option<SearchResume>,
) -> crate::Result<(usize, Option<SearchResume>)> {
    let (start, end, fresh_sign) = transform_query(index.config().merge_orientations, q_start, q_end);
    // The orientation sign is fixed for the life of a resume handle, since
    // it depends only on the originating query's sign.
    let ori_sign = resume.as_ref().map_or(fresh_sign, |r| r.ori_sign);

    let mut resume = match resume {
        Some(r) => r,
        None => {
            let mut r = SearchResume::new(ori_sign);
            if let Some(cursor) = binary_search::find_overlap_start(index.top_list(), start, end) {
                r.push(Frame::Slice {
                    region_end: index.ntop(),
                    cursor,
                });
            }
            r
        }
    };

    let cap = buf.len();
    let mut filled = 0usize;

    while let Some(top_idx) = resume.frames.len().checked_sub(1) {
        let (region_end, cursor) = match &resume.frames[top_idx] {
            Frame::Slice { region_end, cursor } => (*region_end, *cursor),
            Frame::Block { .. } => unreachable!("in-memory search only pushes Slice frames"),
        };

        if cursor >= region_end {
            resume.frames.pop();
            continue;
        }

        let rec = *index
            .records()
            .get(cursor)
            .expect("cursor is checked against region_end above");
        if !rec.overlaps_positive(start, end) {
            resume.frames.pop();
            continue;
        }

        buf[filled] = rec;
        filled += 1;
        let sub = rec.sublist;

        if let Frame::Slice { cursor, .. } = &mut resume.frames[top_idx] {
            *cursor += 1;
        }

        if sub >= 0 {
            let sub_records = index.sublist_records(sub as usize);
            if let Some(sub_cursor) = binary_search::find_overlap_start(sub_records, start, end) {
                let header = *index
                    .headers()
                    .get(sub as usize)
                    .expect("sublist id was assigned by the builder for this same header table");
                let base = header.start as usize;
                resume.push(Frame::Slice {
                    region_end: base + sub_records.len(),
                    cursor: base + sub_cursor,
                });
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
