use std::fs;
use std::path::PathBuf;

use policy_surface::data::{BoundStats, DataError, PolicySpace};

fn unique_dir(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "policy_surface_inputs_{}_{}",
        name,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    fs::create_dir_all(&path).unwrap();
    path
}

#[test]
fn policies_csv_loads_from_named_file() {
    let dir = unique_dir("csv");
    fs::write(
        PolicySpace::csv_path(&dir, "batch2"),
        "3.6,6.0,5.6\n4.8,4.8,4.8\n8.0,3.6,4.8\n",
    )
    .unwrap();

    let space = PolicySpace::load_csv(&PolicySpace::csv_path(&dir, "batch2")).unwrap();
    assert_eq!(space.len(), 3);
    assert_eq!(space.with_cc3(4.8).len(), 2);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_policies_file_is_an_io_error() {
    let dir = unique_dir("missing");
    let err = PolicySpace::load_csv(&PolicySpace::csv_path(&dir, "nope")).unwrap_err();
    assert!(matches!(err, DataError::Io { .. }));
    assert!(err.to_string().contains("policies_nope.csv"));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn bound_statistics_load_from_json_file() {
    let dir = unique_dir("json");
    let path = dir.join("4_bounds.json");
    fs::write(
        &path,
        "[[[3.6, 4.0, 4.8], [5.2, 6.0, 5.2]], [1.0, 2.0], [0.5, 1.0], [0.75, 1.5]]",
    )
    .unwrap();

    let stats = BoundStats::load_json(&path).unwrap();
    assert_eq!(stats.len(), 2);
    let share = stats.uncertainty_share();
    assert_eq!(share, vec![0.25 / 0.15625, 0.5 / 0.15625]);

    let _ = fs::remove_dir_all(&dir);
}
