//! Figure rendering for the 50L analyses.
//!
//! Every public function renders to either an SVG or a bitmap PNG backend
//! depending on the requested [`SaveType`], mirroring the `savetype` flag of
//! the command line tools.

use std::path::Path;
use std::str::FromStr;

use ndarray::ArrayView2;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};

use super::channel_map::Plane;
use super::error::{KeywordError, PlotError};
use super::reductions::Bins;

const FIGURE_SIZE: (u32, u32) = (900, 600);
const PLANE_FIGURE_SIZE: (u32, u32) = (1350, 600);
const CAPTION_FONT: (&str, u32) = ("sans-serif", 20);
const AXIS_FONT: (&str, u32) = ("sans-serif", 16);

/// Image format to save figures as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveType {
    #[default]
    Svg,
    Png,
}

impl SaveType {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

impl FromStr for SaveType {
    type Err = KeywordError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            _ => Err(KeywordError::BadSaveType(s.to_string())),
        }
    }
}

/// Title and axis labels of a figure.
#[derive(Debug, Clone)]
pub struct FigureLabels {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

impl FigureLabels {
    pub fn new(
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeriesMode {
    #[default]
    Line,
    Scatter,
}

/// Rendering options for [`series_plot`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesOptions {
    pub mode: SeriesMode,
    /// Use a logarithmic y axis (magnitude spectra)
    pub log_y: bool,
    /// Fixed y range; the data range otherwise
    pub y_range: Option<(f64, f64)>,
}

/// Options for [`heatmap`] and [`plane_heatmap`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HeatmapOptions {
    /// Fixed color range; the data range otherwise
    pub clamp: Option<(f64, f64)>,
    /// Limit the number of time ticks shown
    pub max_ticks: Option<usize>,
}

fn backend_err<E: std::fmt::Display>(error: E) -> PlotError {
    PlotError::BackendError(error.to_string())
}

/// Plot one series as a line or scatter chart
pub fn series_plot(
    path: &Path,
    savetype: SaveType,
    points: &[(f64, f64)],
    labels: &FigureLabels,
    options: &SeriesOptions,
) -> Result<(), PlotError> {
    match savetype {
        SaveType::Svg => {
            let root = SVGBackend::new(path, FIGURE_SIZE).into_drawing_area();
            draw_series_chart(&root, points, labels, options)
        }
        SaveType::Png => {
            let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
            draw_series_chart(&root, points, labels, options)
        }
    }
}

/// Plot a fixed-width-bin histogram of the given values
pub fn histogram(
    path: &Path,
    savetype: SaveType,
    values: &[f64],
    bins: &Bins,
    labels: &FigureLabels,
    y_max: Option<f64>,
) -> Result<(), PlotError> {
    match savetype {
        SaveType::Svg => {
            let root = SVGBackend::new(path, FIGURE_SIZE).into_drawing_area();
            draw_histogram(&root, values, bins, labels, y_max)
        }
        SaveType::Png => {
            let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
            draw_histogram(&root, values, bins, labels, y_max)
        }
    }
}

/// Plot an ADC matrix as the traditional 50L heatmap (channel vs time tick)
pub fn heatmap(
    path: &Path,
    savetype: SaveType,
    adcs: ArrayView2<'_, f64>,
    labels: &FigureLabels,
    options: &HeatmapOptions,
) -> Result<(), PlotError> {
    match savetype {
        SaveType::Svg => {
            let root = SVGBackend::new(path, FIGURE_SIZE).into_drawing_area();
            draw_heatmap(&root, adcs, labels, options)
        }
        SaveType::Png => {
            let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
            draw_heatmap(&root, adcs, labels, options)
        }
    }
}

/// Plot an ADC matrix as three per-plane heatmap panes sharing the time axis
pub fn plane_heatmap(
    path: &Path,
    savetype: SaveType,
    adcs: ArrayView2<'_, f64>,
    labels: &FigureLabels,
    options: &HeatmapOptions,
) -> Result<(), PlotError> {
    match savetype {
        SaveType::Svg => {
            let root = SVGBackend::new(path, PLANE_FIGURE_SIZE).into_drawing_area();
            draw_plane_heatmap(&root, adcs, labels, options)
        }
        SaveType::Png => {
            let root = BitMapBackend::new(path, PLANE_FIGURE_SIZE).into_drawing_area();
            draw_plane_heatmap(&root, adcs, labels, options)
        }
    }
}

/// Plot a running sum with an inset pane showing the raw waveform
pub fn running_sum_plot(
    path: &Path,
    savetype: SaveType,
    run_sum: &[(f64, f64)],
    waveform: &[(f64, f64)],
    labels: &FigureLabels,
) -> Result<(), PlotError> {
    match savetype {
        SaveType::Svg => {
            let root = SVGBackend::new(path, FIGURE_SIZE).into_drawing_area();
            draw_running_sum(&root, run_sum, waveform, labels)
        }
        SaveType::Png => {
            let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
            draw_running_sum(&root, run_sum, waveform, labels)
        }
    }
}

fn minmax(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for value in values {
        min = min.min(value);
        max = max.max(value);
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if min == max {
        // Degenerate range; pad so the chart can still be built
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    }
}

fn draw_series_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    points: &[(f64, f64)],
    labels: &FigureLabels,
    options: &SeriesOptions,
) -> Result<(), PlotError> {
    if points.is_empty() {
        return Err(PlotError::EmptySeries);
    }
    root.fill(&WHITE).map_err(backend_err)?;

    let (xmin, xmax) = minmax(points.iter().map(|(x, _)| *x));
    let (ymin, ymax) = match options.y_range {
        Some(range) => range,
        None => minmax(points.iter().map(|(_, y)| *y)),
    };

    if options.log_y {
        let ymin = ymin.max(1.0);
        let ymax = ymax.max(ymin * 10.0);
        let mut chart = ChartBuilder::on(root)
            .caption(&labels.title, CAPTION_FONT.into_font())
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(xmin..xmax, (ymin..ymax).log_scale())
            .map_err(backend_err)?;
        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(&labels.x_label)
            .axis_desc_style(AXIS_FONT.into_font())
            .y_desc(&labels.y_label)
            .draw()
            .map_err(backend_err)?;
        match options.mode {
            SeriesMode::Line => {
                chart
                    .draw_series(LineSeries::new(points.iter().copied(), &BLACK))
                    .map_err(backend_err)?;
            }
            SeriesMode::Scatter => {
                chart
                    .draw_series(
                        points
                            .iter()
                            .map(|(x, y)| Circle::new((*x, *y), 2, BLACK.filled())),
                    )
                    .map_err(backend_err)?;
            }
        }
    } else {
        let mut chart = ChartBuilder::on(root)
            .caption(&labels.title, CAPTION_FONT.into_font())
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(xmin..xmax, ymin..ymax)
            .map_err(backend_err)?;
        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(&labels.x_label)
            .axis_desc_style(AXIS_FONT.into_font())
            .y_desc(&labels.y_label)
            .draw()
            .map_err(backend_err)?;
        match options.mode {
            SeriesMode::Line => {
                chart
                    .draw_series(LineSeries::new(points.iter().copied(), &BLACK))
                    .map_err(backend_err)?;
            }
            SeriesMode::Scatter => {
                chart
                    .draw_series(
                        points
                            .iter()
                            .map(|(x, y)| Circle::new((*x, *y), 2, BLACK.filled())),
                    )
                    .map_err(backend_err)?;
            }
        }
    }

    root.present().map_err(backend_err)?;
    Ok(())
}

fn draw_histogram<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    values: &[f64],
    bins: &Bins,
    labels: &FigureLabels,
    y_max: Option<f64>,
) -> Result<(), PlotError> {
    if bins.is_empty() {
        return Err(PlotError::EmptySeries);
    }
    root.fill(&WHITE).map_err(backend_err)?;

    let counts = bins.count(values.iter().copied());
    let top = match y_max {
        Some(top) => top,
        None => counts.iter().max().copied().unwrap_or(0).max(1) as f64 * 1.1,
    };

    let mut chart = ChartBuilder::on(root)
        .caption(&labels.title, CAPTION_FONT.into_font())
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(bins.start..bins.end, 0.0..top)
        .map_err(backend_err)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(&labels.x_label)
        .axis_desc_style(AXIS_FONT.into_font())
        .y_desc(&labels.y_label)
        .draw()
        .map_err(backend_err)?;

    chart
        .draw_series(counts.iter().enumerate().map(|(idx, count)| {
            Rectangle::new(
                [
                    (bins.edge(idx), 0.0),
                    (bins.edge(idx) + bins.width, *count as f64),
                ],
                BLACK.filled(),
            )
        }))
        .map_err(backend_err)?;

    root.present().map_err(backend_err)?;
    Ok(())
}

/// Map a normalized value to a blue-to-red hue sweep
fn heat_color(normalized: f64) -> HSLColor {
    let t = normalized.clamp(0.0, 1.0);
    HSLColor(240.0 / 360.0 * (1.0 - t), 1.0, 0.5)
}

fn color_range(adcs: &ArrayView2<'_, f64>, options: &HeatmapOptions) -> (f64, f64) {
    match options.clamp {
        Some(range) => range,
        None => minmax(adcs.iter().copied()),
    }
}

fn draw_heatmap_cells<DB: DrawingBackend>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    adcs: &ArrayView2<'_, f64>,
    channels: std::ops::Range<usize>,
    ticks: usize,
    lo: f64,
    hi: f64,
) -> Result<(), PlotError> {
    let span = if hi > lo { hi - lo } else { 1.0 };
    chart
        .draw_series(channels.flat_map(|channel| {
            let adcs = &adcs;
            (0..ticks).map(move |tick| {
                let normalized = (adcs[[tick, channel]] - lo) / span;
                Rectangle::new(
                    [
                        (channel as f64, tick as f64),
                        (channel as f64 + 1.0, tick as f64 + 1.0),
                    ],
                    heat_color(normalized).filled(),
                )
            })
        }))
        .map_err(backend_err)?;
    Ok(())
}

fn draw_heatmap<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    adcs: ArrayView2<'_, f64>,
    labels: &FigureLabels,
    options: &HeatmapOptions,
) -> Result<(), PlotError> {
    if adcs.is_empty() {
        return Err(PlotError::EmptySeries);
    }
    root.fill(&WHITE).map_err(backend_err)?;

    let ticks = adcs.nrows().min(options.max_ticks.unwrap_or(usize::MAX));
    let (lo, hi) = color_range(&adcs, options);

    let mut chart = ChartBuilder::on(root)
        .caption(&labels.title, CAPTION_FONT.into_font())
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..adcs.ncols() as f64, 0.0..ticks as f64)
        .map_err(backend_err)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(&labels.x_label)
        .axis_desc_style(AXIS_FONT.into_font())
        .y_desc(&labels.y_label)
        .draw()
        .map_err(backend_err)?;

    draw_heatmap_cells(&mut chart, &adcs, 0..adcs.ncols(), ticks, lo, hi)?;

    root.present().map_err(backend_err)?;
    Ok(())
}

fn draw_plane_heatmap<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    adcs: ArrayView2<'_, f64>,
    labels: &FigureLabels,
    options: &HeatmapOptions,
) -> Result<(), PlotError> {
    if adcs.is_empty() {
        return Err(PlotError::EmptySeries);
    }
    root.fill(&WHITE).map_err(backend_err)?;

    let titled = root
        .titled(&labels.title, CAPTION_FONT.into_font())
        .map_err(backend_err)?;
    let panes = titled.split_evenly((1, 3));
    let ticks = adcs.nrows().min(options.max_ticks.unwrap_or(usize::MAX));

    for (pane, plane) in panes.iter().zip(Plane::all()) {
        let channels = plane.channels();
        // Each pane normalizes its own color range, like a per-pane colorbar
        let view = adcs.slice(ndarray::s![.., channels.start..channels.end]);
        let (lo, hi) = color_range(&view, options);

        let mut chart = ChartBuilder::on(pane)
            .caption(plane.label(), AXIS_FONT.into_font())
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(
                channels.start as f64..channels.end as f64,
                0.0..ticks as f64,
            )
            .map_err(backend_err)?;
        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(&labels.x_label)
            .axis_desc_style(AXIS_FONT.into_font())
            .y_desc(&labels.y_label)
            .draw()
            .map_err(backend_err)?;

        draw_heatmap_cells(&mut chart, &adcs, channels, ticks, lo, hi)?;
    }

    root.present().map_err(backend_err)?;
    Ok(())
}

fn draw_running_sum<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    run_sum: &[(f64, f64)],
    waveform: &[(f64, f64)],
    labels: &FigureLabels,
) -> Result<(), PlotError> {
    if run_sum.is_empty() || waveform.is_empty() {
        return Err(PlotError::EmptySeries);
    }
    root.fill(&WHITE).map_err(backend_err)?;

    let (xmin, xmax) = minmax(run_sum.iter().map(|(x, _)| *x));
    let (ymin, ymax) = minmax(run_sum.iter().map(|(_, y)| *y));
    let mut chart = ChartBuilder::on(root)
        .caption(&labels.title, CAPTION_FONT.into_font())
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(xmin..xmax, ymin..ymax)
        .map_err(backend_err)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(&labels.x_label)
        .axis_desc_style(AXIS_FONT.into_font())
        .y_desc(&labels.y_label)
        .draw()
        .map_err(backend_err)?;
    chart
        .draw_series(LineSeries::new(run_sum.iter().copied(), &BLACK))
        .map_err(backend_err)?;

    // Inset pane with the raw waveform
    let inset = root.clone().shrink((430, 140), (400, 260));
    inset.fill(&WHITE).map_err(backend_err)?;
    let (wxmin, wxmax) = minmax(waveform.iter().map(|(x, _)| *x));
    let (wymin, wymax) = minmax(waveform.iter().map(|(_, y)| *y));
    let mut inset_chart = ChartBuilder::on(&inset)
        .caption("Waveform", AXIS_FONT.into_font())
        .margin(5)
        .x_label_area_size(20)
        .y_label_area_size(40)
        .build_cartesian_2d(wxmin..wxmax, wymin..wymax)
        .map_err(backend_err)?;
    inset_chart
        .configure_mesh()
        .disable_mesh()
        .draw()
        .map_err(backend_err)?;
    inset_chart
        .draw_series(LineSeries::new(waveform.iter().copied(), &BLACK))
        .map_err(backend_err)?;

    root.present().map_err(backend_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn labels() -> FigureLabels {
        FigureLabels::new("test", "x", "y")
    }

    #[test]
    fn test_savetype_keywords() {
        assert!(matches!(SaveType::from_str("svg"), Ok(SaveType::Svg)));
        assert!(matches!(SaveType::from_str("png"), Ok(SaveType::Png)));
        assert!(SaveType::from_str("pdf").is_err());
        assert_eq!(SaveType::Png.extension(), "png");
    }

    #[test]
    fn test_series_plot_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.svg");
        let points: Vec<(f64, f64)> = (0..32).map(|i| (i as f64, (i * i) as f64)).collect();
        series_plot(
            &path,
            SaveType::Svg,
            &points,
            &labels(),
            &SeriesOptions::default(),
        )
        .unwrap();
        assert!(path.metadata().unwrap().len() > 0);
    }

    #[test]
    fn test_empty_series_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.svg");
        assert!(matches!(
            series_plot(
                &path,
                SaveType::Svg,
                &[],
                &labels(),
                &SeriesOptions::default()
            ),
            Err(PlotError::EmptySeries)
        ));
    }

    #[test]
    fn test_histogram_and_heatmaps_write() {
        let dir = tempfile::tempdir().unwrap();

        let hist_path = dir.path().join("hist.svg");
        let bins = Bins::new(0.0, 10.0, 1.0);
        histogram(
            &hist_path,
            SaveType::Svg,
            &[0.5, 1.5, 1.7, 9.0],
            &bins,
            &labels(),
            None,
        )
        .unwrap();
        assert!(hist_path.metadata().unwrap().len() > 0);

        let adcs = Array2::<f64>::from_shape_fn((16, 128), |(t, c)| (t * c) as f64);
        let heat_path = dir.path().join("heat.svg");
        heatmap(
            &heat_path,
            SaveType::Svg,
            adcs.view(),
            &labels(),
            &HeatmapOptions::default(),
        )
        .unwrap();
        assert!(heat_path.metadata().unwrap().len() > 0);

        let plane_path = dir.path().join("planes.svg");
        plane_heatmap(
            &plane_path,
            SaveType::Svg,
            adcs.view(),
            &labels(),
            &HeatmapOptions::default(),
        )
        .unwrap();
        assert!(plane_path.metadata().unwrap().len() > 0);
    }

    #[test]
    fn test_running_sum_inset_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runsum.svg");
        let sum: Vec<(f64, f64)> = (0..64).map(|i| (i as f64, i as f64 * 2.0)).collect();
        let wf: Vec<(f64, f64)> = (0..64).map(|i| (i as f64, (i % 7) as f64)).collect();
        running_sum_plot(&path, SaveType::Svg, &sum, &wf, &labels()).unwrap();
        assert!(path.metadata().unwrap().len() > 0);
    }
}
