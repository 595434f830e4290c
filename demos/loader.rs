// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Minimal end-to-end driver: reads a declared-count list of interval
//! records from stdin, builds and serializes an index, then runs one
//! query against the file-backed searcher and prints the hits.
//!
//! Not part of the library's public surface; exists only to exercise the
//! crate end-to-end outside of unit/integration tests. Text format: first
//! line is the record count, followed by that many lines of
//! `start end target_id target_start target_end`.

use ncl_index::{Config, Error, FileBackedIndex, IntervalRecord};
use std::io::BufRead;

fn read_records(reader: impl BufRead) -> ncl_index::Result<Vec<IntervalRecord>> {
    let mut lines = reader.lines();

    let declared: usize = lines
        .next()
        .ok_or_else(|| Error::InvalidBundle("empty input, expected a record count".into()))??
        .trim()
        .parse()
        .map_err(|_| Error::InvalidBundle("first line must be the record count".into()))?;

    let mut records = Vec::with_capacity(declared);
    for line in lines {
        let line = line?;
        let fields: Vec<i32> = line
            .split_whitespace()
            .map(|f| {
                f.parse()
                    .map_err(|_| Error::InvalidBundle(format!("not an integer: {f}")))
            })
            .collect::<ncl_index::Result<_>>()?;

        if fields.len() != 5 {
            return Err(Error::InvalidBundle(format!(
                "expected 5 fields per record, got {}",
                fields.len()
            )));
        }
        records.push(IntervalRecord::new(
            fields[0], fields[1], fields[2], fields[3], fields[4],
        ));
    }

    if records.len() != declared {
        return Err(Error::InputCountMismatch {
            expected: declared,
            actual: records.len(),
        });
    }

    Ok(records)
}

fn main() -> ncl_index::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let [_, stem, q_start, q_end] = args.as_slice() else {
        eprintln!("usage: loader <bundle-stem> <query-start> <query-end> < records.txt");
        std::process::exit(2);
    };
    let q_start: i32 = q_start.parse().expect("query-start must be an integer");
    let q_end: i32 = q_end.parse().expect("query-end must be an integer");

    let stdin = std::io::stdin();
    let mut records = read_records(stdin.lock())?;

    let index = ncl_index::build(&mut records, Config::default())?;
    ncl_index::serialize(&index, stem)?;

    let mut file_index = FileBackedIndex::open(stem, false)?;
    let mut buf = vec![IntervalRecord::default(); file_index.len().max(1)];
    let (n, resume) = file_index.search(q_start, q_end, &mut buf, None)?;
    assert!(resume.is_none(), "buffer sized to the whole index never resumes");

    for rec in &buf[..n] {
        println!(
            "{} {} {} {} {}",
            rec.start, rec.end, rec.target_id, rec.target_start, rec.target_end
        );
    }

    Ok(())
}
