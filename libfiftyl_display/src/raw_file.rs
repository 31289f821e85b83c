use std::path::Path;

use hdf5::File;
use ndarray::{Array1, Array2};

use super::channel_map::ChannelMap;
use super::constants::{CHANNELS_PER_LINK, FRAMES_PER_RECORD, LINKS_PER_RECORD, TOTAL_CHANNELS};
use super::error::RawFileError;
use super::run_info::RunInfo;

const RECORD_PREFIX: &str = "TriggerRecord";
const LINK_NAMES: [&str; LINKS_PER_RECORD] = ["link00", "link01"];

/// Reader for 50L raw data files.
///
/// A capture file holds one group per trigger record, each containing one
/// dataset per WIB link of shape (frames, channels-per-link). The reader
/// assembles records into a single (frames, detector channels) matrix using
/// the channel map, so downstream reductions never see the hardware ordering.
#[derive(Debug)]
pub struct RawDataFile {
    file: File,
    map: ChannelMap,
    records: Vec<String>,
    info: RunInfo,
}

impl RawDataFile {
    /// Open a raw data file with the given channel map.
    ///
    /// The file name must carry the `.hdf5` extension and follow the 50L run
    /// naming pattern, which encodes the run number, file index, and creation
    /// timestamp.
    pub fn open(path: &Path, map: ChannelMap) -> Result<Self, RawFileError> {
        if !path.exists() {
            return Err(RawFileError::BadFilePath(path.to_path_buf()));
        }
        match path.extension() {
            Some(ext) if ext == "hdf5" => (),
            _ => return Err(RawFileError::NotHdf5(path.to_path_buf())),
        }

        let info = RunInfo::from_file_name(path)?;
        let file = File::open(path)?;
        let mut records: Vec<String> = file
            .member_names()?
            .into_iter()
            .filter(|name| name.starts_with(RECORD_PREFIX))
            .collect();
        records.sort();

        if let Ok(meta) = std::fs::metadata(path) {
            log::info!(
                "Opened run {}.{} ({}) with {} trigger records",
                info.run_id,
                info.file_index,
                human_bytes::human_bytes(meta.len() as f64),
                records.len()
            );
        }

        Ok(Self {
            file,
            map,
            records,
            info,
        })
    }

    /// Number of trigger records in the file
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Run identity parsed from the file name
    pub fn info(&self) -> &RunInfo {
        &self.info
    }

    /// Read a full trigger record as a (frames, channels) ADC matrix in
    /// detector channel order.
    ///
    /// Link datasets with fewer than the nominal number of frames or the
    /// wrong channel count produce a [`RawFileError::ShapeMismatch`];
    /// whole-file analyses count these as mismatches and skip them.
    pub fn read_record(&self, record: usize) -> Result<Array2<i32>, RawFileError> {
        let group = self.record_group(record)?;
        let mut adcs = Array2::<i32>::zeros((FRAMES_PER_RECORD, TOTAL_CHANNELS));

        for (link, name) in LINK_NAMES.iter().enumerate() {
            let data: Array2<u16> = group.dataset(name)?.read_2d()?;
            if data.nrows() < FRAMES_PER_RECORD || data.ncols() != CHANNELS_PER_LINK {
                return Err(RawFileError::ShapeMismatch {
                    record,
                    rows: data.nrows(),
                    cols: data.ncols(),
                });
            }
            for channel in 0..CHANNELS_PER_LINK {
                let detector = match self.map.detector_channel(link, channel) {
                    Some(det) => det,
                    None => continue,
                };
                for frame in 0..FRAMES_PER_RECORD {
                    adcs[[frame, detector]] = data[[frame, channel]] as i32;
                }
            }
        }

        Ok(adcs)
    }

    /// Extract the waveform of a single detector channel from a record
    pub fn extract_channel(&self, record: usize, channel: usize) -> Result<Array1<i32>, RawFileError> {
        if channel >= TOTAL_CHANNELS {
            return Err(RawFileError::BadChannel(channel));
        }
        let adcs = self.read_record(record)?;
        Ok(adcs.column(channel).to_owned())
    }

    /// Extract the waveforms of a channel subset, in the order given
    pub fn extract_channels(
        &self,
        record: usize,
        channels: &[usize],
    ) -> Result<Array2<i32>, RawFileError> {
        for channel in channels {
            if *channel >= TOTAL_CHANNELS {
                return Err(RawFileError::BadChannel(*channel));
            }
        }
        let adcs = self.read_record(record)?;
        let mut subset = Array2::<i32>::zeros((adcs.nrows(), channels.len()));
        for (idx, channel) in channels.iter().enumerate() {
            subset.column_mut(idx).assign(&adcs.column(*channel));
        }
        Ok(subset)
    }

    fn record_group(&self, record: usize) -> Result<hdf5::Group, RawFileError> {
        let name = self
            .records
            .get(record)
            .ok_or(RawFileError::BadRecordIndex(record, self.records.len()))?;
        Ok(self.file.group(name)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    /// Write a small capture file where every sample carries its hardware
    /// index, so the detector ordering after mapping is checkable.
    fn write_test_file(path: &Path, n_records: usize, frames: usize, channels: usize) {
        let file = File::create(path).expect("could not create test file");
        for record in 0..n_records {
            let group = file
                .create_group(&format!("{}{:05}", RECORD_PREFIX, record))
                .unwrap();
            for (link, name) in LINK_NAMES.iter().enumerate() {
                let data = Array2::<u16>::from_shape_fn((frames, channels), |(_, ch)| {
                    (link * CHANNELS_PER_LINK + ch) as u16
                });
                group
                    .new_dataset_builder()
                    .with_data(&data)
                    .create(*name)
                    .unwrap();
            }
        }
    }

    #[test]
    fn test_read_record_detector_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("50l_run000042_0000_20231019T143000.hdf5");
        write_test_file(&path, 2, FRAMES_PER_RECORD, CHANNELS_PER_LINK);

        let map = ChannelMap::new(None).unwrap();
        let raw = RawDataFile::open(&path, map).unwrap();
        assert_eq!(raw.record_count(), 2);
        assert_eq!(raw.info().run_id, 42);

        let adcs = raw.read_record(0).unwrap();
        assert_eq!(adcs.dim(), (FRAMES_PER_RECORD, TOTAL_CHANNELS));
        // Detector channel 0 is hardware index 112, channel 64 is hardware 24
        assert_eq!(adcs[[0, 0]], 112);
        assert_eq!(adcs[[0, 64]], 24);
        assert_eq!(adcs[[FRAMES_PER_RECORD - 1, 36]], 0);

        let wf = raw.extract_channel(0, 64).unwrap();
        assert_eq!(wf.len(), FRAMES_PER_RECORD);
        assert!(wf.iter().all(|&v| v == 24));

        let subset = raw.extract_channels(1, &[63, 64, 65]).unwrap();
        assert_eq!(subset.dim(), (FRAMES_PER_RECORD, 3));
        assert_eq!(subset[[0, 1]], 24);
    }

    #[test]
    fn test_short_record_is_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("50l_run000042_0001_20231019T143000.hdf5");
        write_test_file(&path, 1, FRAMES_PER_RECORD / 2, CHANNELS_PER_LINK);

        let raw = RawDataFile::open(&path, ChannelMap::new(None).unwrap()).unwrap();
        match raw.read_record(0) {
            Err(RawFileError::ShapeMismatch { rows, .. }) => {
                assert_eq!(rows, FRAMES_PER_RECORD / 2)
            }
            other => panic!("expected a shape mismatch error, got {other:?}"),
        }
    }

    #[test]
    fn test_narrow_record_is_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("50l_run000042_0002_20231019T143000.hdf5");
        write_test_file(&path, 1, FRAMES_PER_RECORD, CHANNELS_PER_LINK / 2);

        let raw = RawDataFile::open(&path, ChannelMap::new(None).unwrap()).unwrap();
        match raw.read_record(0) {
            Err(RawFileError::ShapeMismatch { cols, .. }) => {
                assert_eq!(cols, CHANNELS_PER_LINK / 2)
            }
            other => panic!("expected a shape mismatch error, got {other:?}"),
        }
    }

    #[test]
    fn test_open_rejects_bad_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not_a_data_file.txt");
        std::fs::write(&path, "nothing").unwrap();
        assert!(matches!(
            RawDataFile::open(&path, ChannelMap::new(None).unwrap()),
            Err(RawFileError::NotHdf5(_))
        ));

        let missing = dir.path().join("50l_run000001_0000_20231019T143000.hdf5");
        assert!(matches!(
            RawDataFile::open(&missing, ChannelMap::new(None).unwrap()),
            Err(RawFileError::BadFilePath(_))
        ));
    }
}
