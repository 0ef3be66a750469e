use std::io::Write;
use std::path::Path;

use ising_report::error::Error;
use ising_report::table::{
    ResultSet, ResultTable, ANALYTIC_FILE, COL_BETA, COL_CAPACITY, COL_CAPACITY_ERR, COL_ENERGY,
    COL_ENERGY_ERR, COL_MAGNETIZATION, COL_MAGNETIZATION_ERR, GIBBS_FILE, METROPOLIS_FILE,
    RESULT_DIR,
};

fn write_file(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut f = std::fs::File::create(path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
}

fn sampler_csv() -> String {
    format!(
        "{COL_BETA},{COL_ENERGY},{COL_ENERGY_ERR},{COL_CAPACITY},{COL_CAPACITY_ERR},{COL_MAGNETIZATION},{COL_MAGNETIZATION_ERR}\n\
         0.1,-1.0,0.05,0.3,0.01,0.2,0.02\n\
         0.5,-1.8,0.07,0.5,0.02,0.8,0.03\n"
    )
}

fn analytic_csv() -> String {
    format!(
        "{COL_BETA},{COL_ENERGY},{COL_CAPACITY},{COL_MAGNETIZATION},転移温度\n\
         0.1,-1.02,0.31,0.0,0.4406\n\
         0.5,-1.79,0.52,0.91,0.4406\n"
    )
}

fn write_result_set(base: &Path) {
    let dir = base.join(RESULT_DIR);
    write_file(&dir.join(METROPOLIS_FILE), &sampler_csv());
    write_file(&dir.join(GIBBS_FILE), &sampler_csv());
    write_file(&dir.join(ANALYTIC_FILE), &analytic_csv());
}

#[test]
fn table_parses_columns_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("metropolis.csv");
    write_file(&path, &sampler_csv());

    let table = ResultTable::from_path(&path).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.column(COL_BETA).unwrap(), &[0.1, 0.5][..]);
    assert_eq!(table.column(COL_ENERGY).unwrap(), &[-1.0, -1.8][..]);
    assert_eq!(table.column(COL_ENERGY_ERR).unwrap(), &[0.05, 0.07][..]);
}

#[test]
fn extra_columns_are_kept_but_optional() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("analitic.csv");
    write_file(&path, &analytic_csv());

    let table = ResultTable::from_path(&path).unwrap();
    // The critical-temperature column is parsed like any other.
    assert_eq!(table.column("転移温度").unwrap(), &[0.4406, 0.4406][..]);
}

#[test]
fn missing_file_is_file_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = ResultTable::from_path(&dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, Error::FileNotFound(_)), "got {err:?}");
}

#[test]
fn unknown_column_is_malformed_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("metropolis.csv");
    write_file(&path, &sampler_csv());

    let table = ResultTable::from_path(&path).unwrap();
    let err = table.column("no_such_column").unwrap_err();
    assert!(matches!(err, Error::MalformedTable { .. }), "got {err:?}");
}

#[test]
fn non_numeric_cell_is_malformed_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("metropolis.csv");
    write_file(
        &path,
        &format!("{COL_BETA},{COL_ENERGY}\n0.1,not-a-number\n"),
    );

    let err = ResultTable::from_path(&path).unwrap_err();
    assert!(matches!(err, Error::MalformedTable { .. }), "got {err:?}");
}

#[test]
fn result_set_loads_and_checks_alignment() {
    let dir = tempfile::tempdir().unwrap();
    write_result_set(dir.path());

    let set = ResultSet::load(dir.path()).unwrap();
    assert_eq!(set.metropolis.len(), 2);
    assert_eq!(set.gibbs.len(), 2);
    assert_eq!(set.analytic.len(), 2);
}

#[test]
fn result_set_missing_sampler_column_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_result_set(dir.path());
    // Rewrite gibbs without the error columns.
    write_file(
        &dir.path().join(RESULT_DIR).join(GIBBS_FILE),
        &format!("{COL_BETA},{COL_ENERGY}\n0.1,-1.0\n0.5,-1.8\n"),
    );

    let err = ResultSet::load(dir.path()).unwrap_err();
    assert!(matches!(err, Error::MalformedTable { .. }), "got {err:?}");
}

#[test]
fn result_set_beta_mismatch_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_result_set(dir.path());
    // Same shape, different beta grid.
    write_file(
        &dir.path().join(RESULT_DIR).join(ANALYTIC_FILE),
        &format!(
            "{COL_BETA},{COL_ENERGY},{COL_CAPACITY},{COL_MAGNETIZATION}\n\
             0.2,-1.02,0.31,0.0\n\
             0.5,-1.79,0.52,0.91\n"
        ),
    );

    let err = ResultSet::load(dir.path()).unwrap_err();
    assert!(matches!(err, Error::MisalignedTables { .. }), "got {err:?}");
}

#[test]
fn result_set_row_count_mismatch_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_result_set(dir.path());
    write_file(
        &dir.path().join(RESULT_DIR).join(ANALYTIC_FILE),
        &format!("{COL_BETA},{COL_ENERGY},{COL_CAPACITY},{COL_MAGNETIZATION}\n0.1,-1.02,0.31,0.0\n"),
    );

    let err = ResultSet::load(dir.path()).unwrap_err();
    assert!(matches!(err, Error::MisalignedTables { .. }), "got {err:?}");
}
