use ncl_index::{build, search, Config, IntervalRecord};
use std::collections::HashMap;

fn by_id(records: &[IntervalRecord]) -> HashMap<i32, IntervalRecord> {
    records.iter().map(|r| (r.target_id, *r)).collect()
}

#[test_log::test]
fn s4_orientation_merge() -> ncl_index::Result<()> {
    let mut records = vec![
        IntervalRecord::new(-20, -10, 1, -20, -10),
        IntervalRecord::new(5, 15, 2, 5, 15),
    ];
    let config = Config::default().merge_orientations(true);
    let index = build(&mut records, config)?;

    // Positive projection of (-15,-12) is [12,15), which overlaps both A's
    // projection [10,20) and B's own [5,15) — both are hits, restored to
    // their original signs.
    let mut buf = vec![IntervalRecord::default(); 4];
    let (n, resume) = search(&index, -15, -12, &mut buf, None)?;
    assert!(resume.is_none());
    assert_eq!(2, n);
    let hits = by_id(&buf[..n]);
    assert_eq!((-20, -10), (hits[&1].start, hits[&1].end));
    assert_eq!((-15, -5), (hits[&2].start, hits[&2].end));

    // Query (8,12) is already positive; overlaps A's projection [10,20)
    // and B's [5,15) alike, so no sign restoration and both are hits again.
    let mut buf2 = vec![IntervalRecord::default(); 4];
    let (n2, resume2) = search(&index, 8, 12, &mut buf2, None)?;
    assert!(resume2.is_none());
    assert_eq!(2, n2);
    let hits2 = by_id(&buf2[..n2]);
    assert_eq!((10, 20), (hits2[&1].start, hits2[&1].end));
    assert_eq!((5, 15), (hits2[&2].start, hits2[&2].end));

    Ok(())
}
