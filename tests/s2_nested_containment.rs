use ncl_index::{build, search, Config, IntervalRecord};

#[test_log::test]
fn s2_nested_containment() -> ncl_index::Result<()> {
    let mut records = vec![
        IntervalRecord::new(0, 100, 1, 0, 100),
        IntervalRecord::new(10, 20, 2, 0, 10),
        IntervalRecord::new(30, 40, 3, 0, 10),
        IntervalRecord::new(15, 18, 4, 0, 3),
    ];
    let index = build(&mut records, Config::default())?;

    assert_eq!(1, index.ntop());
    assert!(index.nlists() >= 2);

    let mut buf = vec![IntervalRecord::default(); 8];
    let (n, resume) = search(&index, 16, 17, &mut buf, None)?;

    assert!(resume.is_none());
    let mut ids: Vec<i32> = buf[..n].iter().map(|r| r.target_id).collect();
    ids.sort_unstable();
    assert_eq!(vec![1, 2, 4], ids);
    Ok(())
}
