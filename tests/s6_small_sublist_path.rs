use ncl_index::{build, serialize, Config, FileBackedIndex, IntervalRecord};

#[test_log::test]
fn s6_small_sublist_path() -> ncl_index::Result<()> {
    let dir = tempfile::tempdir().expect("tempdir");
    let stem = dir.path().join("bundle");

    let mut records = vec![
        IntervalRecord::new(0, 1000, 1, 0, 1000),
        IntervalRecord::new(100, 110, 2, 100, 110),
        IntervalRecord::new(200, 210, 3, 200, 210),
        IntervalRecord::new(300, 310, 4, 300, 310),
        IntervalRecord::new(400, 410, 5, 400, 410),
        IntervalRecord::new(500, 510, 6, 500, 510),
    ];
    let config = Config::default().div(64);
    let index = build(&mut records, config)?;
    assert_eq!(1, index.nlists()); // five children, one sublist, len=5 <= div

    serialize(&index, &stem)?;

    let mut file_index = FileBackedIndex::open(&stem, false)?;
    let mut buf = vec![IntervalRecord::default(); 8];
    let (n, resume) = file_index.search(305, 306, &mut buf, None)?;

    assert!(resume.is_none());
    let mut ids: Vec<i32> = buf[..n].iter().map(|r| r.target_id).collect();
    ids.sort_unstable();
    assert_eq!(vec![1, 4], ids);
    Ok(())
}
