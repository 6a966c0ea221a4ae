//! Concentration-vs-time plots of a simulation run, written as SVG files.
//!
//! One file per initial concentration: `<dir>/reaction_dynamics_<c0>.svg` with `c0` printed
//! with two decimals. Every species gets one line labelled `<species> (Initial: c0)`, where
//! `c0` is the initial concentration of the run.
use crate::ReactionDynamics::simulation::TimeSeries;
use log::info;
use plotters::prelude::*;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("failed to create plot directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("drawing error: {0}")]
    Drawing(String),
    #[error("nothing to plot")]
    EmptySeries,
}

fn drawing_error<E: std::fmt::Display>(e: E) -> PlotError {
    PlotError::Drawing(e.to_string())
}

pub fn plot_file_name(initial_concentration: f64) -> String {
    format!("reaction_dynamics_{:.2}.svg", initial_concentration)
}

pub fn plot_title(initial_concentration: f64) -> String {
    format!(
        "Reaction Dynamics (Initial Concentration: {:.2})",
        initial_concentration
    )
}

pub fn series_label(species: &str, initial: f64) -> String {
    format!("{} (Initial: {:.2})", species, initial)
}

/// smallest and largest finite value, widened when flat so the chart has a nonzero height
pub(crate) fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    let span = max - min;
    if span <= f64::EPSILON {
        let pad = if min.abs() > 0.0 { 0.1 * min.abs() } else { 1.0 };
        return (min - pad)..(max + pad);
    }
    (min - 0.05 * span)..(max + 0.05 * span)
}

fn draw_dynamics(
    series: &TimeSeries,
    initial_concentration: f64,
    path: &Path,
) -> Result<(), PlotError> {
    let root = SVGBackend::new(path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(drawing_error)?;

    let x_range = padded_range(series.t.iter().copied());
    let y_range = padded_range(series.y.iter().copied());
    let mut chart = ChartBuilder::on(&root)
        .caption(plot_title(initial_concentration), ("sans-serif", 22))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)
        .map_err(drawing_error)?;

    chart
        .configure_mesh()
        .x_desc("Time")
        .y_desc("Concentration")
        .draw()
        .map_err(drawing_error)?;

    for (col, species) in series.species.iter().enumerate() {
        let color = Palette99::pick(col).to_rgba();
        chart
            .draw_series(LineSeries::new(
                series
                    .t
                    .iter()
                    .zip(series.y.column(col).iter())
                    .map(|(t, y)| (*t, *y)),
                color.stroke_width(2),
            ))
            .map_err(drawing_error)?
            .label(series_label(species, initial_concentration))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()
        .map_err(drawing_error)?;
    root.present().map_err(drawing_error)?;
    Ok(())
}

/// draws every species profile of `series` and returns the written path
pub fn plot_dynamics(
    series: &TimeSeries,
    initial_concentration: f64,
    dir: &Path,
) -> Result<PathBuf, PlotError> {
    if series.n_samples() == 0 || series.species.is_empty() {
        return Err(PlotError::EmptySeries);
    }
    fs::create_dir_all(dir)?;
    let path = dir.join(plot_file_name(initial_concentration));
    draw_dynamics(series, initial_concentration, &path)?;
    info!("plot saved to {}", path.display());
    Ok(path)
}
