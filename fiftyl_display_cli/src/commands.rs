//! One handler per analysis subcommand.
//!
//! Each handler opens the raw file through a [`Session`], runs its reduction
//! over one record or the whole file, and writes figures and npy arrays into
//! the configured output directories. Shape-mismatched records are counted
//! and skipped wherever records are iterated.

use std::path::{Path, PathBuf};

use clap::ArgMatches;
use indicatif::{MultiProgress, ProgressBar};
use ndarray::{s, Array1, Array2};

use libfiftyl_display::channel_map::ChannelMap;
use libfiftyl_display::charge::{integrate_peaks, ChargeTally, PeakAreas};
use libfiftyl_display::config::{read_config_file, write_config_file, Config};
use libfiftyl_display::constants::{FRAMES_PER_RECORD, TICK_SECONDS, TOTAL_CHANNELS};
use libfiftyl_display::error::{AnalysisError, PlotError, RawFileError};
use libfiftyl_display::output::{write_array, OutputPaths};
use libfiftyl_display::pedestal::{self, PedestalModel};
use libfiftyl_display::plot::{
    self, FigureLabels, HeatmapOptions, SaveType, SeriesMode, SeriesOptions,
};
use libfiftyl_display::raw_file::RawDataFile;
use libfiftyl_display::reductions::{self, Bins};
use libfiftyl_display::run_info::RunInfo;
use libfiftyl_display::spectrum::{self, SpectrumAverager};
use libfiftyl_display::{cosmic, kdist};

/// Channel the single-channel analyses look at when none is given, the
/// traditional 50L viewing channel.
const DEFAULT_CHANNEL: usize = 24;

/// Everything the handlers share: the open raw file, the configuration, and
/// the resolved output locations.
pub struct Session {
    raw: RawDataFile,
    config: Config,
    savetype: SaveType,
    output: OutputPaths,
}

impl Session {
    /// Resolve the common arguments and open the raw data file
    pub fn open(matches: &ArgMatches) -> Result<Self, AnalysisError> {
        let config = match matches.get_one::<String>("config") {
            Some(path) => read_config_file(Path::new(path))?,
            None => Config::default(),
        };
        let savetype = match matches.get_one::<String>("savetype") {
            Some(keyword) => keyword.parse::<SaveType>()?,
            None => config.savetype,
        };

        let map = ChannelMap::new(matches.get_one::<String>("map").map(|s| Path::new(s)))?;
        let filename = matches
            .get_one::<String>("filename")
            .map(PathBuf::from)
            .unwrap_or_default();
        let raw = RawDataFile::open(&filename, map)?;

        let output = OutputPaths::new(&config.figure_dir, &config.array_dir);
        output.ensure()?;

        Ok(Self {
            raw,
            config,
            savetype,
            output,
        })
    }

    fn info(&self) -> &RunInfo {
        self.raw.info()
    }

    /// `RRRR.FFFF` tag for whole-file outputs
    fn file_tag(&self) -> String {
        let info = self.info();
        format!("{:04}.{:04}", info.run_id, info.file_index)
    }

    /// `RRRR.FFFF-NNNN` tag for per-record outputs
    fn record_tag(&self, record: usize) -> String {
        format!("{}-{:04}", self.file_tag(), record)
    }

    /// Figure title carrying the run identity and creation timestamp
    fn title(&self, detail: &str) -> Result<String, AnalysisError> {
        let info = self.info();
        let stamp = info.timestamp_tag().map_err(PlotError::from)?;
        Ok(format!(
            "{} | Run {:04}.{:04} {}",
            detail, info.run_id, info.file_index, stamp
        ))
    }

    /// Read and pedestal subtract one record
    fn subtracted(&self, record: usize, model: PedestalModel) -> Result<Array2<i32>, AnalysisError> {
        let adcs = self.raw.read_record(record)?;
        Ok(pedestal::subtract(&adcs, model))
    }

    /// Run a closure over every record, skipping and counting the shape
    /// mismatched ones. Returns the mismatch count.
    fn for_each_record<F>(&self, bar: Option<&ProgressBar>, mut body: F) -> Result<u64, AnalysisError>
    where
        F: FnMut(usize, Array2<i32>) -> Result<(), AnalysisError>,
    {
        let mut mismatches = 0u64;
        for record in 0..self.raw.record_count() {
            match self.raw.read_record(record) {
                Ok(adcs) => body(record, adcs)?,
                Err(RawFileError::ShapeMismatch { .. }) => mismatches += 1,
                Err(e) => return Err(e.into()),
            }
            if let Some(pb) = bar {
                pb.inc(1);
            }
        }
        if let Some(pb) = bar {
            pb.finish();
        }
        if mismatches > 0 {
            log::warn!("Skipped {mismatches} shape-mismatched records");
        }
        Ok(mismatches)
    }

    fn record_bar(&self, progress: &MultiProgress, matches: &ArgMatches) -> Option<ProgressBar> {
        if matches.get_flag("progress") {
            Some(progress.add(ProgressBar::new(self.raw.record_count() as u64)))
        } else {
            None
        }
    }
}

fn as_points(values: impl IntoIterator<Item = f64>) -> Vec<(f64, f64)> {
    values
        .into_iter()
        .enumerate()
        .map(|(idx, value)| (idx as f64, value))
        .collect()
}

fn ped_model(matches: &ArgMatches, config: &Config) -> Result<PedestalModel, AnalysisError> {
    match matches.get_one::<String>("ped-est") {
        Some(keyword) => Ok(keyword.parse::<PedestalModel>()?),
        None => Ok(config.ped_model),
    }
}

/// `wf` -- plot one pedestal-subtracted waveform and save it as npy
pub fn waveform(matches: &ArgMatches) -> Result<(), AnalysisError> {
    let session = Session::open(matches)?;
    let record = *matches.get_one::<usize>("record").unwrap_or(&0);
    let channel = *matches.get_one::<usize>("channel").unwrap_or(&DEFAULT_CHANNEL);

    let subtracted = session.subtracted(record, session.config.ped_model)?;
    if channel >= TOTAL_CHANNELS {
        return Err(RawFileError::BadChannel(channel).into());
    }
    let wf = subtracted.column(channel).to_owned();

    let tag = format!("wf-{}_{}", channel, session.record_tag(record));
    let labels = FigureLabels::new(
        session.title(&format!("Waveform channel {channel} record {record}"))?,
        "Time tick (512 ns)",
        "ADC counts",
    );
    plot::series_plot(
        &session
            .output
            .figure(format!("{tag}.{}", session.savetype.extension())),
        session.savetype,
        &as_points(wf.iter().map(|&v| v as f64)),
        &labels,
        &SeriesOptions::default(),
    )?;
    write_array(&session.output.array(format!("{tag}.npy")), &wf)?;
    Ok(())
}

/// `display` -- event-display heatmap of one record or every record
pub fn display(matches: &ArgMatches, progress: &MultiProgress) -> Result<(), AnalysisError> {
    let session = Session::open(matches)?;
    let subplots = matches.get_flag("subplots");
    let options = HeatmapOptions {
        clamp: None,
        max_ticks: matches.get_one::<usize>("ticks").copied(),
    };

    let draw = |record: usize, adcs: &Array2<i32>| -> Result<(), AnalysisError> {
        let heat = pedestal::subtract(adcs, session.config.ped_model).mapv(|v| v as f64);
        let labels = FigureLabels::new(
            session.title(&format!("Event display record {record}"))?,
            "Channel",
            "Time tick (512 ns)",
        );
        let name = if subplots {
            format!("display-planes_{}", session.record_tag(record))
        } else {
            format!("display_{}", session.record_tag(record))
        };
        let path = session
            .output
            .figure(format!("{name}.{}", session.savetype.extension()));
        if subplots {
            plot::plane_heatmap(&path, session.savetype, heat.view(), &labels, &options)?;
        } else {
            plot::heatmap(&path, session.savetype, heat.view(), &labels, &options)?;
        }
        Ok(())
    };

    if matches.get_flag("save-all") {
        let bar = session.record_bar(progress, matches);
        session.for_each_record(bar.as_ref(), |record, adcs| draw(record, &adcs))?;
    } else {
        let record = *matches.get_one::<usize>("record").unwrap_or(&0);
        let adcs = session.raw.read_record(record)?;
        draw(record, &adcs)?;
    }
    Ok(())
}

/// `cosmic` -- find and display cosmic-tagged records
pub fn cosmic_display(matches: &ArgMatches, progress: &MultiProgress) -> Result<(), AnalysisError> {
    let session = Session::open(matches)?;
    let nth = *matches.get_one::<usize>("nth").unwrap_or(&1);
    let save_all = matches.get_flag("save-all");
    let options = HeatmapOptions {
        clamp: Some((-150.0, 150.0)),
        max_ticks: None,
    };

    let mut found = 0usize;
    let mut done = false;
    let bar = session.record_bar(progress, matches);
    session.for_each_record(bar.as_ref(), |record, adcs| {
        if done || !cosmic::is_cosmic(&adcs, &session.config.cosmic) {
            return Ok(());
        }
        found += 1;
        if !save_all && found != nth {
            return Ok(());
        }

        let heat = pedestal::subtract(&adcs, session.config.ped_model).mapv(|v| v as f64);
        let labels = FigureLabels::new(
            session.title(&format!("Cosmic {found} record {record}"))?,
            "Channel",
            "Time tick (512 ns)",
        );
        let path = session.output.figure(format!(
            "cosmic-{}_{}.{}",
            found,
            session.record_tag(record),
            session.savetype.extension()
        ));
        plot::heatmap(&path, session.savetype, heat.view(), &labels, &options)?;
        log::info!("Cosmic {found} is record {record}");
        if !save_all {
            done = true;
        }
        Ok(())
    })?;

    if save_all {
        log::info!("Found {found} cosmic records");
        Ok(())
    } else if done {
        Ok(())
    } else {
        Err(AnalysisError::CosmicNotFound(nth))
    }
}

/// `rms` -- per-channel RMS of one record or averaged over the file
pub fn rms(matches: &ArgMatches, progress: &MultiProgress) -> Result<(), AnalysisError> {
    let session = Session::open(matches)?;

    let (values, tag, detail) = if let Some(&record) = matches.get_one::<usize>("record") {
        let subtracted = session.subtracted(record, session.config.ped_model)?;
        (
            reductions::channel_rms(&subtracted),
            format!("rms_{}", session.record_tag(record)),
            format!("Channel RMS record {record}"),
        )
    } else {
        let mut sum = Array1::<f64>::zeros(TOTAL_CHANNELS);
        let mut used = 0u64;
        let bar = session.record_bar(progress, matches);
        session.for_each_record(bar.as_ref(), |_, adcs| {
            let subtracted = pedestal::subtract(&adcs, session.config.ped_model);
            sum += &reductions::channel_rms(&subtracted);
            used += 1;
            Ok(())
        })?;
        if used > 0 {
            sum /= used as f64;
        }
        (
            sum,
            format!("rms-avg_{}", session.file_tag()),
            format!("Channel RMS averaged over {used} records"),
        )
    };

    let labels = FigureLabels::new(session.title(&detail)?, "Channel", "RMS (ADC counts)");
    plot::series_plot(
        &session
            .output
            .figure(format!("{tag}.{}", session.savetype.extension())),
        session.savetype,
        &as_points(values.iter().copied()),
        &labels,
        &SeriesOptions {
            mode: SeriesMode::Scatter,
            ..SeriesOptions::default()
        },
    )?;
    write_array(&session.output.array(format!("{tag}.npy")), &values)?;
    Ok(())
}

/// `fft` -- FFT magnitude averaged over records and a channel range
pub fn fft(matches: &ArgMatches, progress: &MultiProgress) -> Result<(), AnalysisError> {
    let session = Session::open(matches)?;
    let window = session.config.fft_window.min(FRAMES_PER_RECORD);
    let low = session.config.fft_low_channel;
    let high = session.config.fft_high_channel.min(TOTAL_CHANNELS);

    let mut averager = SpectrumAverager::new();
    let mut spectra = 0u64;
    let bar = session.record_bar(progress, matches);
    session.for_each_record(bar.as_ref(), |_, adcs| {
        let subtracted = pedestal::subtract(&adcs, session.config.ped_model);
        for channel in low..high {
            let wf = subtracted.slice(s![..window, channel]);
            averager.add(&spectrum::rfft_magnitude(wf));
            spectra += 1;
        }
        Ok(())
    })?;
    if averager.is_empty() {
        return Err(PlotError::EmptySeries.into());
    }

    let magnitude = averager.scaled(spectra as f64);
    let freqs = spectrum::rfft_freqs(window, TICK_SECONDS);
    let points = spectrum_points(&freqs, &magnitude);

    let info = session.info();
    let tag = format!("fft_{:06}.{:04}", info.run_id, info.file_index);
    let labels = FigureLabels::new(
        session.title(&format!("FFT magnitude channels {low}..{high}"))?,
        "Frequency (Hz)",
        "Average magnitude",
    );
    plot::series_plot(
        &session
            .output
            .figure(format!("{tag}.{}", session.savetype.extension())),
        session.savetype,
        &points,
        &labels,
        &SeriesOptions {
            log_y: true,
            ..SeriesOptions::default()
        },
    )?;
    write_array(
        &session.output.array(format!("{tag}.npy")),
        &Array1::from_vec(magnitude),
    )?;
    Ok(())
}

/// Pair frequencies with magnitudes for plotting, dropping the DC bin
fn spectrum_points(freqs: &[f64], magnitude: &[f64]) -> Vec<(f64, f64)> {
    freqs
        .iter()
        .zip(magnitude.iter())
        .skip(1)
        .map(|(&freq, &mag)| (freq, mag))
        .collect()
}

/// `running-sum` -- cumulative sum of one waveform with an inset of the raw
/// waveform
pub fn running_sum(matches: &ArgMatches) -> Result<(), AnalysisError> {
    let session = Session::open(matches)?;
    let record = *matches.get_one::<usize>("record").unwrap_or(&0);
    let channel = *matches.get_one::<usize>("channel").unwrap_or(&DEFAULT_CHANNEL);
    if channel >= TOTAL_CHANNELS {
        return Err(RawFileError::BadChannel(channel).into());
    }

    let subtracted = session.subtracted(record, session.config.ped_model)?;
    let window = session.config.analysis_window.min(FRAMES_PER_RECORD);
    let wf = subtracted.slice(s![..window, channel]);
    let sum = reductions::running_sum(wf.view());

    let tag = format!("runsum-{}_{}", channel, session.record_tag(record));
    let labels = FigureLabels::new(
        session.title(&format!("Running sum channel {channel} record {record}"))?,
        "Time tick (512 ns)",
        "Cumulative ADC counts",
    );
    plot::running_sum_plot(
        &session
            .output
            .figure(format!("{tag}.{}", session.savetype.extension())),
        session.savetype,
        &as_points(sum.iter().map(|&v| v as f64)),
        &as_points(wf.iter().map(|&v| v as f64)),
        &labels,
    )?;
    write_array(&session.output.array(format!("{tag}.npy")), &sum)?;
    Ok(())
}

fn accumulate_records(
    session: &Session,
    matches: &ArgMatches,
    progress: &MultiProgress,
    filter: Option<(i32, i32)>,
) -> Result<Array2<i64>, AnalysisError> {
    let model = ped_model(matches, &session.config)?;
    let use_abs = matches.get_flag("abs");
    let mut sum = Array2::<i64>::zeros((FRAMES_PER_RECORD, TOTAL_CHANNELS));
    let bar = session.record_bar(progress, matches);
    session.for_each_record(bar.as_ref(), |_, adcs| {
        let mut subtracted = pedestal::subtract(&adcs, model);
        if let Some((low, high)) = filter {
            reductions::zero_outside(&mut subtracted, low, high);
        }
        reductions::accumulate(&mut sum, &subtracted, use_abs);
        Ok(())
    })?;
    Ok(sum)
}

/// `sum` -- accumulate every record into one heatmap
pub fn sum(matches: &ArgMatches, progress: &MultiProgress) -> Result<(), AnalysisError> {
    let session = Session::open(matches)?;
    let total = accumulate_records(&session, matches, progress, None)?;

    let tag = format!("sum_{}", session.file_tag());
    let labels = FigureLabels::new(
        session.title("Record sum")?,
        "Channel",
        "Time tick (512 ns)",
    );
    plot::heatmap(
        &session
            .output
            .figure(format!("{tag}.{}", session.savetype.extension())),
        session.savetype,
        total.mapv(|v| v as f64).view(),
        &labels,
        &HeatmapOptions::default(),
    )?;
    write_array(&session.output.array(format!("{tag}.npy")), &total)?;
    Ok(())
}

/// `sum-filtered` -- like `sum` but zeroing samples outside the threshold
/// band first
pub fn sum_filtered(matches: &ArgMatches, progress: &MultiProgress) -> Result<(), AnalysisError> {
    let session = Session::open(matches)?;
    let band = (
        session.config.sum_low_threshold,
        session.config.sum_high_threshold,
    );
    let total = accumulate_records(&session, matches, progress, Some(band))?;

    let tag = format!("sum-filtered_{}", session.file_tag());
    let labels = FigureLabels::new(
        session.title(&format!("Filtered record sum ({}, {})", band.0, band.1))?,
        "Channel",
        "Time tick (512 ns)",
    );
    let heat = total.mapv(|v| v as f64);
    let path = session
        .output
        .figure(format!("{tag}.{}", session.savetype.extension()));
    if matches.get_flag("subplots") {
        plot::plane_heatmap(
            &path,
            session.savetype,
            heat.view(),
            &labels,
            &HeatmapOptions::default(),
        )?;
    } else {
        plot::heatmap(
            &path,
            session.savetype,
            heat.view(),
            &labels,
            &HeatmapOptions::default(),
        )?;
    }
    write_array(&session.output.array(format!("{tag}.npy")), &total)?;
    Ok(())
}

/// `extrema` -- per-record max and windowed min histograms for one channel
pub fn extrema(matches: &ArgMatches, progress: &MultiProgress) -> Result<(), AnalysisError> {
    let session = Session::open(matches)?;
    let channel = *matches.get_one::<usize>("channel").unwrap_or(&DEFAULT_CHANNEL);
    if channel >= TOTAL_CHANNELS {
        return Err(RawFileError::BadChannel(channel).into());
    }
    let window = session.config.analysis_window.min(FRAMES_PER_RECORD);

    let mut maxima = Vec::new();
    let mut minima = Vec::new();
    let bar = session.record_bar(progress, matches);
    session.for_each_record(bar.as_ref(), |_, adcs| {
        let subtracted = pedestal::subtract(&adcs, session.config.ped_model);
        let wf = subtracted.slice(s![..window, channel]);
        if let Some(ext) = reductions::extrema(wf, session.config.extrema_window) {
            // Records that never rose above baseline carry no information
            if ext.max != 0 {
                maxima.push(ext.max as f64);
                minima.push(ext.windowed_min as f64);
            }
        }
        Ok(())
    })?;

    let width = session.config.extrema_bin_width;
    let panels = [
        ("max", Bins::new(0.0, 150.0, width), &maxima, "Waveform maximum"),
        ("min", Bins::new(-150.0, 0.0, width), &minima, "Windowed minimum"),
    ];
    for (kind, bins, values, detail) in panels {
        let tag = format!("extrema-{}-{}_{}", kind, channel, session.file_tag());
        let labels = FigureLabels::new(
            session.title(&format!("{detail} channel {channel}"))?,
            "ADC counts",
            "Records",
        );
        plot::histogram(
            &session
                .output
                .figure(format!("{tag}.{}", session.savetype.extension())),
            session.savetype,
            values,
            &bins,
            &labels,
            None,
        )?;
        write_array(
            &session.output.array(format!("{tag}.npy")),
            &Array1::from_vec(values.clone()),
        )?;
    }
    Ok(())
}

/// `charge` -- peak-area integration histograms for one channel group
pub fn charge(matches: &ArgMatches, progress: &MultiProgress) -> Result<(), AnalysisError> {
    let session = Session::open(matches)?;
    let channel = *matches.get_one::<usize>("channel").unwrap_or(&DEFAULT_CHANNEL);
    if channel == 0 || channel + 1 >= TOTAL_CHANNELS {
        return Err(RawFileError::BadChannel(channel).into());
    }
    let use_induction = matches.get_flag("induction");
    let params = session.config.charge;

    let group = |adcs: &Array2<i32>, center: usize| -> Array2<i32> {
        adcs.slice(s![.., center - 1..=center + 1]).to_owned()
    };

    let mut areas = PeakAreas::default();
    let mut tally = ChargeTally::default();
    let bar = session.record_bar(progress, matches);
    tally.mismatches = session.for_each_record(bar.as_ref(), |_, adcs| {
        let subtracted = pedestal::subtract(&adcs, session.config.ped_model);
        let wfs = group(&subtracted, channel);
        if use_induction {
            let ind1 = group(&subtracted, params.induction1_center);
            let ind2 = group(&subtracted, params.induction2_center);
            integrate_peaks(&wfs, Some((&ind1, &ind2)), &params, &mut areas, &mut tally);
        } else {
            integrate_peaks(&wfs, None, &params, &mut areas, &mut tally);
        }
        Ok(())
    })?;

    log::info!(
        "Integrated {} peaks on channel {channel}: low {}, center {}, high {}, total {}",
        areas.len(),
        areas.low.iter().sum::<i64>(),
        areas.center.iter().sum::<i64>(),
        areas.high.iter().sum::<i64>(),
        areas.total.iter().sum::<i64>()
    );
    log::info!(
        "Rejections: {} muon samples, {} induction skips, {} mismatched records",
        tally.muons,
        tally.induction_skips,
        tally.mismatches
    );

    let tag = format!("charge-{}_{}", channel, session.file_tag());
    let totals: Vec<f64> = areas.total.iter().map(|&v| v as f64).collect();
    let labels = FigureLabels::new(
        session.title(&format!("Peak areas channel {channel}"))?,
        "Integrated area (ADC counts)",
        "Peaks",
    );
    plot::histogram(
        &session
            .output
            .figure(format!("{tag}.{}", session.savetype.extension())),
        session.savetype,
        &totals,
        &session.config.area_bins,
        &labels,
        None,
    )?;

    let rows = [&areas.low, &areas.center, &areas.high, &areas.total];
    let table = Array2::from_shape_fn((rows.len(), areas.len()), |(row, idx)| rows[row][idx]);
    write_array(&session.output.array(format!("{tag}.npy")), &table)?;
    Ok(())
}

/// `kdist` -- k-distance scatter and histogram for one record
pub fn kdist_analysis(matches: &ArgMatches) -> Result<(), AnalysisError> {
    let session = Session::open(matches)?;
    let record = *matches.get_one::<usize>("record").unwrap_or(&0);
    let k = *matches.get_one::<usize>("k").unwrap_or(&4);

    let subtracted = session.subtracted(record, session.config.ped_model)?;
    let hits = kdist::find_hits(&subtracted, session.config.kdist_threshold);
    let distances = kdist::k_distances(&hits, k);
    log::info!(
        "Record {record}: {} hits above {}, {} k-distances",
        hits.len(),
        session.config.kdist_threshold,
        distances.len()
    );

    let tag = format!("kdist-{}_{}", k, session.record_tag(record));
    let points = as_points(distances.iter().map(|&d| d as f64));
    let labels = FigureLabels::new(
        session.title(&format!("{k}-distance record {record}"))?,
        "Hit (sorted)",
        "Manhattan distance",
    );
    plot::series_plot(
        &session
            .output
            .figure(format!("{tag}.{}", session.savetype.extension())),
        session.savetype,
        &points,
        &labels,
        &SeriesOptions {
            mode: SeriesMode::Scatter,
            ..SeriesOptions::default()
        },
    )?;

    let hist_tag = format!("kdist-hist-{}_{}", k, session.record_tag(record));
    let hist_labels = FigureLabels::new(
        session.title(&format!("{k}-distance distribution record {record}"))?,
        "Manhattan distance",
        "Hits",
    );
    plot::histogram(
        &session
            .output
            .figure(format!("{hist_tag}.{}", session.savetype.extension())),
        session.savetype,
        &distances.iter().map(|&d| d as f64).collect::<Vec<f64>>(),
        &session.config.kdist_bins,
        &hist_labels,
        None,
    )?;

    let array = Array1::from_vec(distances);
    write_array(&session.output.array(format!("{tag}.npy")), &array)?;
    Ok(())
}

/// `new` -- write a template configuration file
pub fn new_config(matches: &ArgMatches) -> Result<(), AnalysisError> {
    let path = matches
        .get_one::<String>("path")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.yml"));
    log::info!("Making a template config at {}...", path.display());
    write_config_file(&path, &Config::default())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spectrum_points_drop_dc_bin() {
        let freqs = [0.0, 100.0, 200.0];
        let magnitude = [9000.0, 5.0, 2.0];
        assert_eq!(
            spectrum_points(&freqs, &magnitude),
            vec![(100.0, 5.0), (200.0, 2.0)]
        );
    }
}
