use std::fs::File;
use std::io::Read;
use std::ops::Range;
use std::path::Path;

use fxhash::FxHashMap;

use super::constants::{
    CHANNELS_PER_LINK, INDUCTION1_START, INDUCTION2_START, LINKS_PER_RECORD, TOTAL_CHANNELS,
};
use super::error::ChannelMapError;

const ENTRIES_PER_LINE: usize = 3; //link, wib channel, detector channel

/// Load the default map for windows
#[cfg(target_family = "windows")]
fn load_default_map() -> String {
    String::from(include_str!("data\\default_channel_map.csv"))
}

/// Load the default map for macos and linux
#[cfg(target_family = "unix")]
fn load_default_map() -> String {
    String::from(include_str!("data/default_channel_map.csv"))
}

/// The three physical planes of the 50L detector.
///
/// The collection plane and the two induction planes have different signal
/// polarity characteristics, which the coincidence cuts rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plane {
    Collection,
    Induction1,
    Induction2,
}

impl Plane {
    /// Identify the plane a detector channel belongs to
    pub fn of_channel(channel: usize) -> Self {
        if channel < INDUCTION1_START {
            Self::Collection
        } else if channel < INDUCTION2_START {
            Self::Induction1
        } else {
            Self::Induction2
        }
    }

    /// The detector channel range covered by this plane
    pub fn channels(&self) -> Range<usize> {
        match self {
            Self::Collection => 0..INDUCTION1_START,
            Self::Induction1 => INDUCTION1_START..INDUCTION2_START,
            Self::Induction2 => INDUCTION2_START..TOTAL_CHANNELS,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Collection => "Collection",
            Self::Induction1 => "Induction 1",
            Self::Induction2 => "Induction 2",
        }
    }

    pub fn all() -> [Self; 3] {
        [Self::Collection, Self::Induction1, Self::Induction2]
    }
}

/// ChannelMap contains the mapping of a hardware position (WIB link and link
/// channel) to the 50L detector channel number.
///
/// This can change from experiment to experiment, so ChannelMap reads a CSV
/// file where each row contains 3 elements: the link, the channel within the
/// link, and the detector channel. A default map is bundled with the library.
#[derive(Debug, Clone, Default)]
pub struct ChannelMap {
    map: FxHashMap<usize, usize>,
}

impl ChannelMap {
    /// Create a new ChannelMap
    /// If the path is None, we load the default that is bundled with the library
    pub fn new(path: Option<&Path>) -> Result<Self, ChannelMapError> {
        let mut contents = String::new();
        if let Some(p) = path {
            let mut file = File::open(p)?;
            file.read_to_string(&mut contents)?;
        } else {
            contents = load_default_map();
        }

        let mut cm = ChannelMap::default();

        let mut lines = contents.lines();
        lines.next(); // Skip the header
        for line in lines {
            let entries: Vec<&str> = line.split_terminator(',').collect();
            if entries.len() != ENTRIES_PER_LINE {
                return Err(ChannelMapError::BadFileFormat);
            }

            let link: usize = entries[0].parse()?;
            let channel: usize = entries[1].parse()?;
            let detector: usize = entries[2].parse()?;

            if link >= LINKS_PER_RECORD || channel >= CHANNELS_PER_LINK {
                return Err(ChannelMapError::BadHardwarePosition(link, channel));
            }
            if detector >= TOTAL_CHANNELS {
                return Err(ChannelMapError::BadDetectorChannel(detector));
            }

            cm.map.insert(hardware_position(link, channel), detector);
        }

        if cm.map.len() != TOTAL_CHANNELS {
            return Err(ChannelMapError::IncompleteMap(cm.map.len()));
        }

        Ok(cm)
    }

    /// Get the detector channel for a given hardware position.
    ///
    /// If this returns None the position given does not exist in the map
    pub fn detector_channel(&self, link: usize, channel: usize) -> Option<usize> {
        self.map.get(&hardware_position(link, channel)).copied()
    }
}

/// Flatten a link/channel pair into a single hardware index
fn hardware_position(link: usize, channel: usize) -> usize {
    link * CHANNELS_PER_LINK + channel
}

//Unit tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_map() {
        let map = match ChannelMap::new(None) {
            Ok(m) => m,
            Err(_) => {
                panic!();
            }
        };
        // Detector channel 0 sits on link 1 channel 48 in the 50L map, while
        // the traditional viewing channel 24 of link 0 lands on detector 64.
        assert_eq!(map.detector_channel(1, 48), Some(0));
        assert_eq!(map.detector_channel(0, 24), Some(64));
        assert_eq!(map.detector_channel(0, 0), Some(36));
        assert_eq!(map.detector_channel(1, 63), Some(11));
    }

    #[test]
    fn test_planes() {
        assert_eq!(Plane::of_channel(0), Plane::Collection);
        assert_eq!(Plane::of_channel(47), Plane::Collection);
        assert_eq!(Plane::of_channel(48), Plane::Induction1);
        assert_eq!(Plane::of_channel(87), Plane::Induction1);
        assert_eq!(Plane::of_channel(88), Plane::Induction2);
        assert_eq!(Plane::of_channel(127), Plane::Induction2);

        let total: usize = Plane::all().iter().map(|p| p.channels().len()).sum();
        assert_eq!(total, TOTAL_CHANNELS);
    }
}
