//! # fiftyl_display
//!
//! fiftyl_display is a set of display and analysis tools for the CERN 50L
//! time projection chamber prototype, written in Rust. It reads the raw HDF5
//! files written by the 50L data acquisition, unpacks the ADC waveforms of
//! each trigger record, and produces the standard diagnostic figures (event
//! displays, noise spectra, charge histograms) along with npy arrays of the
//! reduced data.
//!
//! ## Installation
//!
//! Currently the only method of install is from source, which is laid out
//! below.
//!
//! ### Rust
//!
//! If you have not used Rust before, you will most likely need to install the
//! Rust tool chain. See the [Rust docs](https://www.rust-lang.org/tools/install)
//! for installation instructions.
//!
//! ### HDF5
//!
//! Before building and running fiftyl_display, HDF5 must be installed.
//! Typically this will be installed using a package manager (homebrew, apt,
//! etc), and the Rust libraries will auto detect the location of the HDF
//! install. However, this is not always possible. Sometimes a newer version
//! will need to be installed to a custom location. If this is the case, write
//! the following snippet into the file `.cargo/config.toml` in the
//! fiftyl_display repository:
//!
//! ```toml
//! [env]
//! HDF5_DIR="/path/to/my/hdf5/install/"
//!
//! [build]
//! rustflags="-C link-args=-Wl,-rpath,/path/to/my/hdf5/install/lib"
//! ```
//!
//! Replace `/path/to/my/hdf5/install/` with the path to your HDF5
//! installation.
//!
//! ### Building & Install
//!
//! To build and install the CLI use `cargo install --path ./fiftyl_display_cli`
//! from the top level fiftyl_display repository. The binary will be installed
//! to your cargo install location (typically something like `~/.cargo/bin/`)
//! and can be uninstalled by running `cargo uninstall fiftyl_display_cli`.
//!
//! ## Configuration
//!
//! Analysis parameters live in a YAML configuration file; every field has a
//! default matching the traditional 50L analysis values, so a partial file
//! (or none at all) is fine. A fresh default file can be generated with the
//! `new` subcommand of the CLI. The full format is:
//!
//! ```yml
//! figure_dir: ./figures
//! array_dir: ./saved_arrays
//! savetype: svg
//! ped_model: median
//! cosmic:
//!   hit_threshold: 50
//!   channel_threshold: 20
//! charge:
//!   adc_threshold: 100
//!   prefix: 5
//!   suffix: 5
//!   induction_threshold: 40
//!   induction_window: 15
//!   induction1_center: 68
//!   induction2_center: 108
//! kdist_threshold: 200
//! sum_low_threshold: 63
//! sum_high_threshold: 77
//! extrema_window: 50
//! analysis_window: 800
//! fft_window: 2240
//! fft_low_channel: 10
//! fft_high_channel: 50
//! area_bins:
//!   start: 0.0
//!   end: 5001.0
//!   width: 50.0
//! kdist_bins:
//!   start: 0.0
//!   end: 651.0
//!   width: 5.0
//! extrema_bin_width: 5.0
//! ```
//!
//! ### Channel Map Format
//!
//! The mapping of WIB link/channel hardware positions to detector channels
//! can change from experiment to experiment, so it is read from a CSV file
//! with *no* whitespaces. The columns are as follows:
//!
//! ```csv
//! link,channel,detector
//! ```
//!
//! A default map matching the current 50L cabling is bundled with the
//! library and used whenever no map file is given. Detector channels 0-47
//! are the collection plane, 48-87 Induction 1, and 88-127 Induction 2.
//!
//! ## Raw Data Format
//!
//! The raw files follow the 50L naming pattern
//! `<label>_run<number>_<file index>_<timestamp>.hdf5` and lay out each
//! trigger record as one HDF5 group holding one dataset of ADC samples per
//! WIB link:
//!
//! ```text
//! 50l_run001234_0000_20231019T143000.hdf5
//! |---- TriggerRecord00001
//! |    |---- link00(dset) - 2240 frames x 64 channels
//! |    |---- link01(dset) - 2240 frames x 64 channels
//! |---- TriggerRecord00002
//! |    |---- ...
//! ```
//!
//! Records with fewer frames than expected are reported as mismatched and
//! skipped by the analyses.
pub mod channel_map;
pub mod charge;
pub mod config;
pub mod constants;
pub mod cosmic;
pub mod error;
pub mod kdist;
pub mod output;
pub mod pedestal;
pub mod plot;
pub mod raw_file;
pub mod reductions;
pub mod run_info;
pub mod spectrum;
