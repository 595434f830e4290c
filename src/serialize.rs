// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Writes the four-file on-disk bundle for an [`Index`] (spec.md §3
//! "Database file bundle", §4.4 "Block Serializer").
//!
//! Grounded on `write_binary_files`/`write_padded_binary`/
//! `write_binary_index` in `pygr/intervaldb.c`.

use crate::{block_index, builder::Index, coding::Encode, record::IntervalRecord, repack};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

pub(crate) fn bundle_path(stem: &Path, suffix: &str) -> std::path::PathBuf {
    let mut path = stem.as_os_str().to_owned();
    path.push(".");
    path.push(suffix);
    std::path::PathBuf::from(path)
}

/// Writes one region (records already positive-oriented) to `w`, padded to
/// a multiple of `div` by repeating the region's own first record. Returns
/// the number of records actually written (including padding).
fn write_padded(
    w: &mut impl Write,
    region: &[IntervalRecord],
    div: u32,
) -> crate::Result<usize> {
    for rec in region {
        rec.encode_into(w)?;
    }
    let div = div as usize;
    let rem = region.len() % div;
    let pad = if rem == 0 { 0 } else { div - rem };
    if pad > 0 {
        let filler = region
            .first()
            .copied()
            .unwrap_or_default();
        for _ in 0..pad {
            filler.encode_into(w)?;
        }
    }
    Ok(region.len() + pad)
}

/// Writes `index` as a four-file bundle at `stem.{idb,subhead,index,size}`.
///
/// # Errors
///
/// Returns [`crate::Error::Io`] if any of the four files cannot be
/// created or written.
// NOTE: ntop and each header's start/len are set by build()/repack_subheaders
// to always bound valid slices of `records`
#[allow(clippy::indexing_slicing)]
pub fn serialize(index: &Index, stem: impl AsRef<Path>) -> crate::Result<()> {
    let stem = stem.as_ref();
    log::debug!("serializing NCL index to {}.*", stem.display());

    let div = index.config().div;
    let mut records = index.records().to_vec();
    let mut headers = index.headers().to_vec();
    repack::repack_subheaders(&mut records, &mut headers, div);

    let ntop = index.ntop();
    let top_list = &records[..ntop];

    let idb_path = bundle_path(stem, "idb");
    let subhead_path = bundle_path(stem, "subhead");
    let index_path = bundle_path(stem, "index");
    let size_path = bundle_path(stem, "size");

    let mut idb = BufWriter::new(File::create(&idb_path)?);
    let mut subhead = BufWriter::new(File::create(&subhead_path)?);

    let mut file_offset = write_padded(&mut idb, top_list, div)?;

    let mut index_entries = block_index::build_index(top_list, div);

    for header in &headers {
        let region = &records[header.start as usize..header.start as usize + header.len as usize];

        let persisted_header = crate::sublist_header::SublistHeader {
            start: file_offset as i32,
            len: header.len,
        };
        persisted_header.encode_into(&mut subhead)?;

        if region.len() as u32 > div {
            index_entries.extend(block_index::build_index(region, div));
            file_offset += write_padded(&mut idb, region, div)?;
        } else {
            for rec in region {
                rec.encode_into(&mut idb)?;
            }
            file_offset += region.len();
        }
    }

    idb.flush()?;
    subhead.flush()?;

    let mut index_file = BufWriter::new(File::create(&index_path)?);
    for entry in &index_entries {
        entry.encode_into(&mut index_file)?;
    }
    index_file.flush()?;

    let nii = index_entries.len();
    let size_line = format!(
        "{} {} {} {} {}\n",
        index.len(),
        ntop,
        div,
        headers.len(),
        nii
    );
    std::fs::write(&size_path, size_line)?;

    log::debug!(
        "serialized NCL index: n={} ntop={ntop} div={div} nlists={} nii={nii}",
        index.len(),
        headers.len()
    );

    Ok(())
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::{builder::build, config::Config};

    fn rec(start: i32, end: i32, id: i32) -> IntervalRecord {
        IntervalRecord::new(start, end, id, 0, 0)
    }

    #[test]
    fn writes_four_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let stem = dir.path().join("bundle");

        let mut records = vec![rec(0, 100, 1), rec(10, 20, 2), rec(30, 40, 3)];
        let index = build(&mut records, Config::default()).expect("build");
        serialize(&index, &stem).expect("serialize");

        for suffix in ["idb", "subhead", "index", "size"] {
            assert!(bundle_path(&stem, suffix).exists());
        }

        let size_contents = std::fs::read_to_string(bundle_path(&stem, "size")).expect("read");
        let parts: Vec<usize> = size_contents
            .split_whitespace()
            .map(|s| s.parse().expect("int"))
            .collect();
        assert_eq!(5, parts.len());
        assert_eq!(index.len(), parts[0]);
        assert_eq!(index.ntop(), parts[1]);
    }

    #[test]
    fn s5_block_boundary_index_entry_count() {
        let dir = tempfile::tempdir().expect("tempdir");
        let stem = dir.path().join("bundle");

        let mut records: Vec<_> = (0..1000).map(|i| rec(i, i + 1, i)).collect();
        let config = Config::default().div(64);
        let index = build(&mut records, config).expect("build");
        serialize(&index, &stem).expect("serialize");

        let idb_len = std::fs::metadata(bundle_path(&stem, "idb"))
            .expect("meta")
            .len();
        assert_eq!(0, idb_len % (64 * crate::record::RECORD_WIDTH as u64));

        let index_len = std::fs::metadata(bundle_path(&stem, "index"))
            .expect("meta")
            .len() as usize;
        let nii = index_len / block_index::ENTRY_WIDTH;
        assert_eq!(16, nii); // ceil(1000/64)
    }
}
