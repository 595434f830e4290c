use ncl_index::{build, search, serialize, Config, FileBackedIndex, IntervalRecord};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

fn random_records(rng: &mut StdRng, n: usize, coord_max: i32) -> Vec<IntervalRecord> {
    (0..n)
        .map(|i| {
            let a = rng.random_range(0..coord_max);
            let b = rng.random_range(0..coord_max);
            let (start, end) = if a == b { (a, a + 1) } else { (a.min(b), a.max(b)) };
            IntervalRecord::new(start, end, i as i32, start, end)
        })
        .collect()
}

fn brute_force_overlap(records: &[IntervalRecord], q_start: i32, q_end: i32) -> Vec<i32> {
    let mut ids: Vec<i32> = records
        .iter()
        .filter(|r| r.overlaps_positive(q_start, q_end))
        .map(|r| r.target_id)
        .collect();
    ids.sort_unstable();
    ids
}

#[test_log::test]
fn soundness_and_completeness_over_random_datasets() -> ncl_index::Result<()> {
    let mut rng = StdRng::seed_from_u64(7);

    for trial in 0..20 {
        let original = random_records(&mut rng, 60, 200);
        let mut records = original.clone();
        let index = build(&mut records, Config::default())?;

        let q_start = rng.random_range(0..200);
        let q_len = rng.random_range(1..30);

        let mut buf = vec![IntervalRecord::default(); original.len()];
        let (n, resume) = search(&index, q_start, q_start + q_len, &mut buf, None)?;
        assert!(resume.is_none(), "trial {trial}: buffer large enough to never resume");

        for rec in &buf[..n] {
            assert!(
                rec.overlaps_positive(q_start, q_start + q_len),
                "trial {trial}: unsound hit {rec:?}"
            );
        }

        let mut got: Vec<i32> = buf[..n].iter().map(|r| r.target_id).collect();
        got.sort_unstable();
        let expected = brute_force_overlap(&original, q_start, q_start + q_len);
        assert_eq!(expected, got, "trial {trial}: incomplete or unsound result set");
    }
    Ok(())
}

#[test_log::test]
fn build_order_invariance_over_random_datasets() -> ncl_index::Result<()> {
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..10 {
        let original = random_records(&mut rng, 40, 100);

        let mut a = original.clone();
        let mut b = original.clone();
        b.reverse();

        let ia = build(&mut a, Config::default())?;
        let ib = build(&mut b, Config::default())?;

        assert_eq!(ia.ntop(), ib.ntop());
        assert_eq!(ia.nlists(), ib.nlists());
    }
    Ok(())
}

#[test_log::test]
fn buffer_splitting_matches_unlimited_cap() -> ncl_index::Result<()> {
    let mut rng = StdRng::seed_from_u64(13);
    let mut records = random_records(&mut rng, 80, 150);
    let index = build(&mut records, Config::default())?;

    let q_start = 40;
    let q_end = 70;

    let mut full_buf = vec![IntervalRecord::default(); records.len()];
    let (full_n, _) = search(&index, q_start, q_end, &mut full_buf, None)?;
    let mut full_ids: Vec<i32> = full_buf[..full_n].iter().map(|r| r.target_id).collect();
    full_ids.sort_unstable();

    for cap in 1..=5 {
        let mut split_ids = Vec::new();
        let mut resume = None;
        loop {
            let mut buf = vec![IntervalRecord::default(); cap];
            let (n, r) = search(&index, q_start, q_end, &mut buf, resume)?;
            split_ids.extend(buf[..n].iter().map(|rec| rec.target_id));
            resume = r;
            if resume.is_none() {
                break;
            }
        }
        split_ids.sort_unstable();
        assert_eq!(full_ids, split_ids, "cap={cap}");
    }
    Ok(())
}

#[test_log::test]
fn block_size_invariance_between_memory_and_file_backed_search() -> ncl_index::Result<()> {
    let mut rng = StdRng::seed_from_u64(17);
    let original = random_records(&mut rng, 300, 1000);

    for div in [4u32, 16, 64, 256] {
        let mut records = original.clone();
        let config = Config::default().div(div);
        let index = build(&mut records, config)?;

        let dir = tempfile::tempdir().expect("tempdir");
        let stem = dir.path().join("bundle");
        serialize(&index, &stem)?;
        let mut file_index = FileBackedIndex::open(&stem, false)?;

        for q in [(0, 50), (400, 450), (990, 1005)] {
            let mut mem_buf = vec![IntervalRecord::default(); original.len()];
            let (mem_n, _) = search(&index, q.0, q.1, &mut mem_buf, None)?;
            let mut mem_ids: Vec<i32> = mem_buf[..mem_n].iter().map(|r| r.target_id).collect();
            mem_ids.sort_unstable();

            let mut file_buf = vec![IntervalRecord::default(); original.len()];
            let (file_n, resume) = file_index.search(q.0, q.1, &mut file_buf, None)?;
            assert!(resume.is_none());
            let mut file_ids: Vec<i32> = file_buf[..file_n].iter().map(|r| r.target_id).collect();
            file_ids.sort_unstable();

            assert_eq!(mem_ids, file_ids, "div={div} q={q:?}");
        }
    }
    Ok(())
}
