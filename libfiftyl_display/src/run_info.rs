use std::path::Path;

use time::format_description::FormatItem;
use time::macros::format_description;
use time::PrimitiveDateTime;

use super::error::RunInfoError;

/// Datetime format used in the 50L file names (`YYYYmmddTHHMMSS`).
pub const DT_FORMAT: &[FormatItem<'static>] =
    format_description!("[year][month][day]T[hour][minute][second]");

/// Run identity parsed from a raw data file name.
///
/// 50L capture files are named `<label>_runNNNNNN_NNNN_YYYYmmddTHHMMSS.hdf5`;
/// the run number, file index, and creation timestamp are carried in the name
/// rather than in file attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunInfo {
    pub run_id: u32,
    pub file_index: u32,
    pub timestamp: PrimitiveDateTime,
}

impl RunInfo {
    /// Parse the run identity from a raw data file path
    pub fn from_file_name(path: &Path) -> Result<Self, RunInfoError> {
        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| RunInfoError::BadFileName(path.to_path_buf()))?;

        let fields: Vec<&str> = stem.split('_').collect();
        if fields.len() < 4 {
            return Err(RunInfoError::BadFileName(path.to_path_buf()));
        }

        let run_field = fields[1];
        if !run_field.starts_with("run") {
            return Err(RunInfoError::BadFileName(path.to_path_buf()));
        }
        let run_id = run_field[3..].parse()?;
        let file_index = fields[2].parse()?;
        let timestamp = PrimitiveDateTime::parse(fields[fields.len() - 1], DT_FORMAT)?;

        Ok(Self {
            run_id,
            file_index,
            timestamp,
        })
    }

    /// Format the creation timestamp back into the file-name form, for use in
    /// figure and array save names
    pub fn timestamp_tag(&self) -> Result<String, time::error::Format> {
        self.timestamp.format(DT_FORMAT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use time::macros::datetime;

    #[test]
    fn test_parse_file_name() {
        let path = PathBuf::from("/data/50l_run001234_0002_20231019T143000.hdf5");
        let info = RunInfo::from_file_name(&path).expect("should parse");
        assert_eq!(info.run_id, 1234);
        assert_eq!(info.file_index, 2);
        assert_eq!(info.timestamp, datetime!(2023-10-19 14:30:00));
        assert_eq!(info.timestamp_tag().unwrap(), "20231019T143000");
    }

    #[test]
    fn test_reject_bad_name() {
        let path = PathBuf::from("/data/notarun.hdf5");
        assert!(RunInfo::from_file_name(&path).is_err());
    }
}
