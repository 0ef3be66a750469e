// table.rs - CSV result tables written by the samplers and the analytical solver

use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use log::info;

use crate::error::Error;

// Column headers exactly as the upstream generators write them.
pub const COL_BETA: &str = "逆温度";
pub const COL_ENERGY: &str = "内部エネルギー";
pub const COL_ENERGY_ERR: &str = "内部エネルギー標準誤差";
pub const COL_CAPACITY: &str = "比熱";
pub const COL_CAPACITY_ERR: &str = "比熱標準誤差";
pub const COL_MAGNETIZATION: &str = "自発磁化";
pub const COL_MAGNETIZATION_ERR: &str = "磁化標準誤差";

pub const METROPOLIS_FILE: &str = "metropolis.csv";
pub const GIBBS_FILE: &str = "gibbs.csv";
/// Upstream filename spelling, kept so existing result directories load.
pub const ANALYTIC_FILE: &str = "analitic.csv";

/// Subdirectory of the base path holding the three input files.
pub const RESULT_DIR: &str = "result";

/// Columns a sampling-method table must provide (value + standard error
/// per quantity).
const SAMPLER_COLUMNS: &[&str] = &[
    COL_BETA,
    COL_ENERGY,
    COL_ENERGY_ERR,
    COL_CAPACITY,
    COL_CAPACITY_ERR,
    COL_MAGNETIZATION,
    COL_MAGNETIZATION_ERR,
];

/// Columns the analytical table must provide (point values only).
const ANALYTIC_COLUMNS: &[&str] = &[COL_BETA, COL_ENERGY, COL_CAPACITY, COL_MAGNETIZATION];

/// One parsed result table, column-major.
///
/// Extra columns beyond the required set (the analytical table also carries
/// a critical-temperature column) are parsed and kept but never read.
#[derive(Debug, Clone)]
pub struct ResultTable {
    path: PathBuf,
    headers: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl ResultTable {
    /// Parse a CSV file into a numeric table. Every data cell must parse
    /// as f64; the header row names the columns.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(|e| malformed(path, e.to_string()))?;

        let headers: Vec<String> = rdr
            .headers()
            .map_err(|e| malformed(path, e.to_string()))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut columns: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];
        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| malformed(path, e.to_string()))?;
            if record.len() != headers.len() {
                return Err(malformed(
                    path,
                    format!(
                        "row {} has {} fields, header has {}",
                        row + 1,
                        record.len(),
                        headers.len()
                    ),
                ));
            }
            for (col, cell) in record.iter().enumerate() {
                let value: f64 = cell.trim().parse().map_err(|_| {
                    malformed(
                        path,
                        format!("cell '{}' in column '{}' row {} is not numeric", cell, headers[col], row + 1),
                    )
                })?;
                columns[col].push(value);
            }
        }

        info!("loaded {} ({} rows)", path.display(), columns.first().map_or(0, Vec::len));
        Ok(Self {
            path: path.to_path_buf(),
            headers,
            columns,
        })
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a column by header name.
    pub fn column(&self, name: &str) -> Result<&[f64], Error> {
        self.headers
            .iter()
            .position(|h| h == name)
            .map(|i| self.columns[i].as_slice())
            .ok_or_else(|| malformed(&self.path, format!("missing column '{name}'")))
    }

    fn require_columns(&self, names: &[&str]) -> Result<(), Error> {
        for name in names {
            self.column(name)?;
        }
        Ok(())
    }
}

fn malformed(path: &Path, detail: String) -> Error {
    Error::MalformedTable {
        path: path.to_path_buf(),
        detail,
    }
}

/// The three input tables of one report run.
#[derive(Debug, Clone)]
pub struct ResultSet {
    pub metropolis: ResultTable,
    pub gibbs: ResultTable,
    pub analytic: ResultTable,
}

impl ResultSet {
    /// Load `<base>/result/{metropolis,gibbs,analitic}.csv`, validate the
    /// required columns per method, and check beta alignment.
    pub fn load(base: &Path) -> Result<Self, Error> {
        let dir = base.join(RESULT_DIR);

        let metropolis = ResultTable::from_path(&dir.join(METROPOLIS_FILE))?;
        let gibbs = ResultTable::from_path(&dir.join(GIBBS_FILE))?;
        let analytic = ResultTable::from_path(&dir.join(ANALYTIC_FILE))?;

        metropolis.require_columns(SAMPLER_COLUMNS)?;
        gibbs.require_columns(SAMPLER_COLUMNS)?;
        analytic.require_columns(ANALYTIC_COLUMNS)?;

        let set = Self {
            metropolis,
            gibbs,
            analytic,
        };
        set.check_beta_alignment()?;
        Ok(set)
    }

    /// The comparison charts only make sense if the three tables sample
    /// the same beta grid in the same row order. The upstream generators
    /// share one hard-coded beta list, so exact equality is expected.
    pub fn check_beta_alignment(&self) -> Result<(), Error> {
        let met = self.metropolis.column(COL_BETA)?;
        let gib = self.gibbs.column(COL_BETA)?;
        let ana = self.analytic.column(COL_BETA)?;

        if met.len() != gib.len() || met.len() != ana.len() {
            return Err(Error::MisalignedTables {
                detail: format!(
                    "row counts differ: metropolis {}, gibbs {}, analytic {}",
                    met.len(),
                    gib.len(),
                    ana.len()
                ),
            });
        }
        for (row, ((m, g), a)) in met.iter().zip(gib).zip(ana).enumerate() {
            if m != g || m != a {
                return Err(Error::MisalignedTables {
                    detail: format!(
                        "beta differs at row {}: metropolis {}, gibbs {}, analytic {}",
                        row + 1,
                        m,
                        g,
                        a
                    ),
                });
            }
        }
        Ok(())
    }
}
