use std::path::PathBuf;
use thiserror::Error;

use super::constants::*;

#[derive(Debug, Error)]
pub enum RunInfoError {
    #[error("File name {0:?} does not follow the 50L run naming pattern")]
    BadFileName(PathBuf),
    #[error("Failed to parse a run number from the file name: {0}")]
    ParsingError(#[from] std::num::ParseIntError),
    #[error("Failed to parse the creation timestamp from the file name: {0}")]
    BadTimestamp(#[from] time::error::Parse),
}

#[derive(Debug, Error)]
pub enum ChannelMapError {
    #[error("ChannelMap failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("ChannelMap failed to parse an integer: {0}")]
    ParsingError(#[from] std::num::ParseIntError),
    #[error("ChannelMap was given a file with the incorrect format; most likely the number of columns is incorrect")]
    BadFileFormat,
    #[error("ChannelMap found an invalid hardware position -- link: {0}, channel: {1}")]
    BadHardwarePosition(usize, usize),
    #[error("ChannelMap found an invalid detector channel {0}; expected less than {max}", max = TOTAL_CHANNELS)]
    BadDetectorChannel(usize),
    #[error("ChannelMap is incomplete; expected {exp} detector channels, found {0}", exp = TOTAL_CHANNELS)]
    IncompleteMap(usize),
}

#[derive(Debug, Error)]
pub enum RawFileError {
    #[error("Could not open raw file because {0:?} does not exist")]
    BadFilePath(PathBuf),
    #[error("Raw file {0:?} is not an HDF5 data file")]
    NotHdf5(PathBuf),
    #[error("RawFile failed due to HDF5 error: {0}")]
    Hdf5Error(#[from] hdf5::Error),
    #[error("RawFile failed to parse run info: {0}")]
    RunInfoError(#[from] RunInfoError),
    #[error("Record index {0} is out of range; the file contains {1} records")]
    BadRecordIndex(usize, usize),
    #[error("Record {record} has a link dataset of shape ({rows}, {cols}); expected ({exp_rows}, {exp_cols})", exp_rows = FRAMES_PER_RECORD, exp_cols = CHANNELS_PER_LINK)]
    ShapeMismatch {
        record: usize,
        rows: usize,
        cols: usize,
    },
    #[error("Channel {0} is out of range; expected less than {max}", max = TOTAL_CHANNELS)]
    BadChannel(usize),
    #[error("RawFile failed due to ChannelMap error: {0}")]
    MapError(#[from] ChannelMapError),
}

#[derive(Debug, Error)]
pub enum KeywordError {
    #[error("Found invalid pedestal keyword: {0}")]
    BadPedestal(String),
    #[error("Found invalid save type keyword: {0}")]
    BadSaveType(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration as file {0:?} does not exist")]
    BadFilePath(PathBuf),
    #[error("Config failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Config failed to parse YAML: {0}")]
    ParsingError(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("Plot backend failed: {0}")]
    BackendError(String),
    #[error("Plot failed to format a timestamp: {0}")]
    FormatError(#[from] time::error::Format),
    #[error("Plot was given an empty series")]
    EmptySeries,
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Output failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Output failed to write a npy array: {0}")]
    NpyError(#[from] ndarray_npy::WriteNpyError),
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Analysis failed due to RawFile error: {0}")]
    RawFileError(#[from] RawFileError),
    #[error("Analysis failed due to ChannelMap error: {0}")]
    MapError(#[from] ChannelMapError),
    #[error("Analysis failed due to Config error: {0}")]
    ConfigError(#[from] ConfigError),
    #[error("Analysis failed due to Plot error: {0}")]
    PlotError(#[from] PlotError),
    #[error("Analysis failed due to Output error: {0}")]
    OutputError(#[from] OutputError),
    #[error("Analysis failed due to keyword error: {0}")]
    KeywordError(#[from] KeywordError),
    #[error("Analysis failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Reached the end of the records without finding cosmic number {0}")]
    CosmicNotFound(usize),
}
