//! Analysis configuration, stored as a YAML file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::charge::ChargeParams;
use super::constants::FRAMES_PER_RECORD;
use super::cosmic::CosmicCuts;
use super::error::ConfigError;
use super::pedestal::PedestalModel;
use super::plot::SaveType;
use super::reductions::Bins;

/// Everything the analyses need that is not given on the command line.
///
/// All fields carry defaults matching the traditional 50L analysis values,
/// so a partial configuration file is fine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where figures are written
    pub figure_dir: PathBuf,
    /// Where npy arrays are written
    pub array_dir: PathBuf,
    /// Figure format
    pub savetype: SaveType,
    /// Baseline estimator used for pedestal subtraction
    pub ped_model: PedestalModel,
    /// Cosmic-event tagging thresholds
    pub cosmic: CosmicCuts,
    /// Peak-integration thresholds and window geometry
    pub charge: ChargeParams,
    /// ADC threshold for k-distance hit finding
    pub kdist_threshold: i32,
    /// Lower cut for the filtered accumulated sum
    pub sum_low_threshold: i32,
    /// Upper cut for the filtered accumulated sum
    pub sum_high_threshold: i32,
    /// Look-ahead window (ticks) for the extrema minimum
    pub extrema_window: usize,
    /// Number of leading ticks the windowed analyses consider
    pub analysis_window: usize,
    /// Number of ticks fed to the FFT
    pub fft_window: usize,
    /// First channel included in the averaged spectrum
    pub fft_low_channel: usize,
    /// One past the last channel included in the averaged spectrum
    pub fft_high_channel: usize,
    /// Histogram binning for integrated peak areas
    pub area_bins: Bins,
    /// Histogram binning for k-distances
    pub kdist_bins: Bins,
    /// Bin width for the extrema histograms
    pub extrema_bin_width: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            figure_dir: PathBuf::from("./figures"),
            array_dir: PathBuf::from("./saved_arrays"),
            savetype: SaveType::default(),
            ped_model: PedestalModel::default(),
            cosmic: CosmicCuts::default(),
            charge: ChargeParams::default(),
            kdist_threshold: 200,
            sum_low_threshold: 63,
            sum_high_threshold: 77,
            extrema_window: 50,
            analysis_window: 800,
            fft_window: FRAMES_PER_RECORD,
            fft_low_channel: 10,
            fft_high_channel: 50,
            area_bins: Bins::new(0.0, 5001.0, 50.0),
            kdist_bins: Bins::new(0.0, 651.0, 5.0),
            extrema_bin_width: 5.0,
        }
    }
}

/// Read and deserialize a YAML config file
pub fn read_config_file(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::BadFilePath(path.to_path_buf()));
    }
    let yaml = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str::<Config>(&yaml)?)
}

/// Serialize a config to a YAML file, creating or truncating it
pub fn write_config_file(path: &Path, config: &Config) -> Result<(), ConfigError> {
    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        let mut config = Config::default();
        config.kdist_threshold = 150;
        config.savetype = SaveType::Png;
        write_config_file(&path, &config).unwrap();

        let read = read_config_file(&path).unwrap();
        assert_eq!(read.kdist_threshold, 150);
        assert_eq!(read.savetype, SaveType::Png);
        assert_eq!(read.sum_low_threshold, config.sum_low_threshold);
        assert_eq!(read.area_bins, config.area_bins);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(&path, "kdist_threshold: 99\n").unwrap();
        let config = read_config_file(&path).unwrap();
        assert_eq!(config.kdist_threshold, 99);
        assert_eq!(config.analysis_window, 800);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            read_config_file(Path::new("/nonexistent/config.yml")),
            Err(ConfigError::BadFilePath(_))
        ));
    }
}
