// chart.rs - Figure accumulator rendered through the plotters bitmap backend

use std::path::Path;

use log::info;
use plotters::prelude::*;

use crate::error::Error;

/// Raster resolution of every chart.
pub const DPI: u32 = 144;

// matplotlib's default 6.4 x 4.8 inch figure geometry at 144 dpi, which is
// what the report images have always been rendered at.
const WIDTH_PX: u32 = 64 * DPI / 10;
const HEIGHT_PX: u32 = 48 * DPI / 10;

const MARKER_SIZE: i32 = 3;

#[derive(Debug, Clone)]
struct Series {
    label: String,
    y: Vec<f64>,
    err: Option<Vec<f64>>,
}

/// One chart in progress.
///
/// Series are pushed one at a time and the figure can be saved repeatedly;
/// each save renders every series pushed so far. The report deliberately
/// exploits this: within one quantity the three method images are three
/// saves of the same figure, so the later images overlay the earlier
/// series.
#[derive(Debug, Clone)]
pub struct Figure {
    x: Vec<f64>,
    x_label: String,
    y_label: String,
    series: Vec<Series>,
}

impl Figure {
    pub fn new(x: &[f64], x_label: &str, y_label: &str) -> Self {
        Self {
            x: x.to_vec(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            series: Vec::new(),
        }
    }

    /// Add a marker-and-line series with vertical error whiskers.
    pub fn push_errorbar(&mut self, label: &str, y: &[f64], err: &[f64]) -> Result<(), Error> {
        self.check_len(label, y.len())?;
        self.check_len(label, err.len())?;
        self.series.push(Series {
            label: label.to_string(),
            y: y.to_vec(),
            err: Some(err.to_vec()),
        });
        Ok(())
    }

    /// Add a plain marker-and-line series.
    pub fn push_line(&mut self, label: &str, y: &[f64]) -> Result<(), Error> {
        self.check_len(label, y.len())?;
        self.series.push(Series {
            label: label.to_string(),
            y: y.to_vec(),
            err: None,
        });
        Ok(())
    }

    /// Labels of the series pushed so far, in push order.
    pub fn labels(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.label.as_str()).collect()
    }

    fn check_len(&self, label: &str, found: usize) -> Result<(), Error> {
        if found != self.x.len() {
            return Err(Error::ShapeMismatch {
                label: label.to_string(),
                expected: self.x.len(),
                found,
            });
        }
        Ok(())
    }

    /// Render every series pushed so far to `path`. The raster format is
    /// implied by the file extension (.png / .jpg).
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(Error::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("output directory {} does not exist", parent.display()),
                )));
            }
        }

        let (x_min, x_max) = padded_range(self.x.iter().copied());
        let (y_min, y_max) = padded_range(self.series.iter().flat_map(|s| {
            s.y.iter().enumerate().flat_map(move |(i, &y)| {
                let e = s.err.as_ref().map_or(0.0, |e| e[i]);
                [y - e, y + e]
            })
        }));

        let root = BitMapBackend::new(path, (WIDTH_PX, HEIGHT_PX)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .x_desc(self.x_label.as_str())
            .y_desc(self.y_label.as_str())
            .draw()
            .map_err(render_err)?;

        // Caps of the error whiskers, in data units.
        let cap = 0.01 * (x_max - x_min);

        for (idx, series) in self.series.iter().enumerate() {
            let color = Palette99::pick(idx).mix(1.0);

            if let Some(err) = &series.err {
                for ((&x, &y), &e) in self.x.iter().zip(&series.y).zip(err) {
                    let (y0, y1) = (y - e, y + e);
                    chart
                        .draw_series([
                            PathElement::new(vec![(x, y0), (x, y1)], color),
                            PathElement::new(vec![(x - cap, y0), (x + cap, y0)], color),
                            PathElement::new(vec![(x - cap, y1), (x + cap, y1)], color),
                        ])
                        .map_err(render_err)?;
                }
            }

            let points: Vec<(f64, f64)> =
                self.x.iter().copied().zip(series.y.iter().copied()).collect();
            chart
                .draw_series(LineSeries::new(points, &color))
                .map_err(render_err)?
                .label(series.label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
            chart
                .draw_series(
                    self.x
                        .iter()
                        .zip(&series.y)
                        .map(|(&x, &y)| Circle::new((x, y), MARKER_SIZE, color.filled())),
                )
                .map_err(render_err)?;
        }

        if !self.series.is_empty() {
            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(render_err)?;
        }

        root.present().map_err(render_err)?;
        info!("wrote {}", path.display());
        Ok(())
    }
}

fn render_err<E: std::fmt::Display>(err: E) -> Error {
    Error::Render(err.to_string())
}

/// Axis bounds with 10% padding; degenerate ranges get a fixed margin so
/// single-row inputs still render.
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if (max - min).abs() < 1e-12 {
        return (min - 0.5, max + 0.5);
    }
    let pad = 0.1 * (max - min);
    (min - pad, max + pad)
}
