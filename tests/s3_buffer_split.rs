use ncl_index::{build, search, Config, IntervalRecord};

#[test_log::test]
fn s3_buffer_split() -> ncl_index::Result<()> {
    let mut records = vec![
        IntervalRecord::new(0, 100, 1, 0, 100),
        IntervalRecord::new(10, 20, 2, 0, 10),
        IntervalRecord::new(30, 40, 3, 0, 10),
        IntervalRecord::new(15, 18, 4, 0, 3),
    ];
    let index = build(&mut records, Config::default())?;

    let mut buf = vec![IntervalRecord::default(); 2];
    let (n1, resume) = search(&index, 16, 17, &mut buf, None)?;
    assert_eq!(2, n1);
    let resume = resume.expect("three hits, cap two: must resume");

    let mut ids: Vec<i32> = buf[..n1].iter().map(|r| r.target_id).collect();

    let mut buf2 = vec![IntervalRecord::default(); 2];
    let (n2, resume2) = search(&index, 16, 17, &mut buf2, Some(resume))?;
    assert_eq!(1, n2);
    assert!(resume2.is_none());

    ids.extend(buf2[..n2].iter().map(|r| r.target_id));
    ids.sort_unstable();
    assert_eq!(vec![1, 2, 4], ids);
    Ok(())
}
