//! End-to-end runs over the pair-file fixtures in `tests/fixtures/`.

use std::path::PathBuf;

use rolemine_core::dataset::load_one2one;
use rolemine_core::{
    basic_rmp, fast_miner_report, init_roles, MinerConfig, MinerError, PermissionVector,
    RoleLabeler, RoleMiner, ScanMode, UpaMatrix,
};

fn fixture(name: &str) -> UpaMatrix {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    load_one2one(&path).unwrap()
}

fn pairs(result: &[(String, Vec<String>)]) -> Vec<(&str, Vec<&str>)> {
    result
        .iter()
        .map(|(k, vs)| (k.as_str(), vs.iter().map(String::as_str).collect()))
        .collect()
}

#[test]
fn simple_dataset_loads_as_expected_matrix() {
    let upa = fixture("simple_dataset.txt");
    let expected = UpaMatrix::from_rows(&[
        vec![1, 1, 0, 1],
        vec![0, 1, 1, 0],
        vec![1, 1, 0, 1],
        vec![1, 1, 0, 1],
        vec![0, 1, 1, 1],
        vec![0, 1, 1, 1],
        vec![0, 1, 1, 0],
        vec![0, 1, 1, 0],
        vec![0, 0, 0, 1],
        vec![0, 0, 0, 1],
        vec![1, 1, 0, 1],
        vec![1, 1, 0, 1],
        vec![0, 1, 1, 1],
    ])
    .unwrap();
    assert_eq!(upa, expected);
}

#[test]
fn simple_dataset_fast_miner_counts() {
    let upa = fixture("simple_dataset.txt");
    let init = init_roles(&upa).unwrap();
    let counts: Vec<(Vec<u8>, usize)> = init.counts().map(|(r, c)| (r.to_cells(), c)).collect();
    assert_eq!(
        counts,
        vec![
            (vec![1, 1, 0, 1], 5),
            (vec![0, 1, 1, 0], 3),
            (vec![0, 1, 1, 1], 3),
            (vec![0, 0, 0, 1], 2),
        ]
    );

    let mut labeler = RoleLabeler::new();
    let report = fast_miner_report(&upa, &mut labeler).unwrap();
    let p2 = report
        .get(&PermissionVector::from_cells(&[0, 1, 0, 0]))
        .unwrap();
    assert_eq!((p2.label.as_str(), p2.original_count, p2.total_count), ("P2", 0, 11));
    assert_eq!(report.candidates.len(), 6);
}

#[test]
fn simple_dataset_basic_rmp() {
    let upa = fixture("simple_dataset.txt");
    let result = basic_rmp(&upa, 0).unwrap();
    assert_eq!(
        pairs(&result.pa_labels()),
        vec![
            ("R1", vec!["P2", "P4"]),
            ("R2", vec!["P2", "P3"]),
            ("R3", vec!["P1", "P2", "P4"]),
            ("R4", vec!["P4"]),
        ]
    );
    assert_eq!(
        pairs(&result.ua_labels()),
        vec![
            ("U1", vec!["R1", "R3"]),
            ("U2", vec!["R2"]),
            ("U3", vec!["R1", "R3"]),
            ("U4", vec!["R1", "R3"]),
            ("U5", vec!["R1", "R2"]),
            ("U6", vec!["R1", "R2"]),
            ("U7", vec!["R2"]),
            ("U8", vec!["R2"]),
            ("U9", vec!["R4"]),
            ("U10", vec!["R4"]),
            ("U11", vec!["R1", "R3"]),
            ("U12", vec!["R1", "R3"]),
            ("U13", vec!["R1", "R2"]),
        ]
    );
}

#[test]
fn identity_fixture_all_delta_factors() {
    let upa = fixture("identity_matrix.txt");
    assert_eq!((upa.users(), upa.permissions()), (5, 5));
    for delta_factor in 0..5 {
        let config = MinerConfig {
            delta_factor,
            scan: ScanMode::Parallel,
        };
        let result = RoleMiner::new(config).mine(&upa).unwrap();
        assert_eq!(result.pa.len(), 5 - delta_factor);
        assert_eq!(result.ua.len(), 5 - delta_factor);
    }
}

#[test]
fn empty_fixture_is_invalid_input() {
    let upa = fixture("empty_dataset.txt");
    assert!(matches!(
        basic_rmp(&upa, 0),
        Err(MinerError::InvalidInput {
            users: 0,
            permissions: 0
        })
    ));
}
