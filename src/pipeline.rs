// pipeline.rs - Orchestrates the nine comparison charts

use std::path::{Path, PathBuf};

use crate::chart::Figure;
use crate::error::Error;
use crate::table::{
    ResultSet, COL_BETA, COL_CAPACITY, COL_CAPACITY_ERR, COL_ENERGY, COL_ENERGY_ERR,
    COL_MAGNETIZATION, COL_MAGNETIZATION_ERR,
};

/// Subdirectory of the base path receiving the rendered images.
pub const GRAPH_DIR: &str = "graph";

pub const LABEL_METROPOLIS: &str = "metropolis";
pub const LABEL_GIBBS: &str = "gibbs";
/// Upstream legend spelling, kept for output parity.
pub const LABEL_ANALYTIC: &str = "analitical solution";

/// One physical quantity and its three output files, in render order
/// (metropolis, gibbs, analytic). The mixed extensions are historical and
/// kept as-is.
struct Quantity {
    y_label: &'static str,
    value_col: &'static str,
    err_col: &'static str,
    files: [&'static str; 3],
}

const QUANTITIES: &[Quantity] = &[
    Quantity {
        y_label: "energy",
        value_col: COL_ENERGY,
        err_col: COL_ENERGY_ERR,
        files: ["met_ene.png", "gib_ene.jpg", "ana_ene.jpg"],
    },
    Quantity {
        y_label: "magnetization",
        value_col: COL_MAGNETIZATION,
        err_col: COL_MAGNETIZATION_ERR,
        files: ["met_mag.jpg", "gib_mag.jpg", "ana_mag.jpg"],
    },
    Quantity {
        y_label: "Capacity",
        value_col: COL_CAPACITY,
        err_col: COL_CAPACITY_ERR,
        files: ["met_cap.png", "gib_cap.jpg", "ana_cap.jpg"],
    },
];

/// The nine output paths in render order, for a given base directory.
pub fn output_paths(base: &Path) -> Vec<PathBuf> {
    let dir = base.join(GRAPH_DIR);
    QUANTITIES
        .iter()
        .flat_map(|q| q.files.iter().map(|f| dir.join(f)))
        .collect()
}

/// Load the three result tables once and render all nine charts.
///
/// Per quantity, one figure accumulates the three series across three
/// saves, so each later image overlays the earlier methods. The run aborts
/// on the first failure; images written before that point stay on disk.
pub fn run_report(base: &Path) -> Result<Vec<PathBuf>, Error> {
    let set = ResultSet::load(base)?;
    let graph = base.join(GRAPH_DIR);
    let x = set.metropolis.column(COL_BETA)?;

    let mut written = Vec::with_capacity(9);
    for q in QUANTITIES {
        let mut fig = Figure::new(x, "beta", q.y_label);

        fig.push_errorbar(
            LABEL_METROPOLIS,
            set.metropolis.column(q.value_col)?,
            set.metropolis.column(q.err_col)?,
        )?;
        let path = graph.join(q.files[0]);
        fig.save(&path)?;
        written.push(path);

        fig.push_errorbar(
            LABEL_GIBBS,
            set.gibbs.column(q.value_col)?,
            set.gibbs.column(q.err_col)?,
        )?;
        let path = graph.join(q.files[1]);
        fig.save(&path)?;
        written.push(path);

        fig.push_line(LABEL_ANALYTIC, set.analytic.column(q.value_col)?)?;
        let path = graph.join(q.files[2]);
        fig.save(&path)?;
        written.push(path);
    }
    Ok(written)
}
