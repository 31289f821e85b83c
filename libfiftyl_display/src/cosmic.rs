use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::pedestal;

/// Thresholds for tagging a trigger record as a cosmic-ray event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CosmicCuts {
    /// A channel counts as hit when its maximum rises this far above its
    /// median baseline
    pub hit_threshold: i32,
    /// A record is cosmic when more than this many channels are hit
    pub channel_threshold: usize,
}

impl Default for CosmicCuts {
    fn default() -> Self {
        Self {
            hit_threshold: 50,
            channel_threshold: 20,
        }
    }
}

/// Check whether a raw (not pedestal subtracted) record is a cosmic event
pub fn is_cosmic(adcs: &Array2<i32>, cuts: &CosmicCuts) -> bool {
    let mut hits = 0usize;
    for channel in adcs.columns() {
        let baseline = pedestal::median(channel.view());
        let max = match channel.iter().max() {
            Some(max) => *max as f64,
            None => continue,
        };
        if max - baseline > cuts.hit_threshold as f64 {
            hits += 1;
            if hits > cuts.channel_threshold {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn quiet_record() -> Array2<i32> {
        Array2::<i32>::from_elem((100, 30), 1000)
    }

    #[test]
    fn test_quiet_record_is_not_cosmic() {
        let cuts = CosmicCuts {
            hit_threshold: 50,
            channel_threshold: 20,
        };
        assert!(!is_cosmic(&quiet_record(), &cuts));
    }

    #[test]
    fn test_wide_track_is_cosmic() {
        let cuts = CosmicCuts {
            hit_threshold: 50,
            channel_threshold: 20,
        };
        let mut adcs = quiet_record();
        // A track spanning 25 channels well above threshold
        for channel in 0..25 {
            adcs[[50, channel]] = 1200;
        }
        assert!(is_cosmic(&adcs, &cuts));
    }

    #[test]
    fn test_narrow_track_is_not_cosmic() {
        let cuts = CosmicCuts {
            hit_threshold: 50,
            channel_threshold: 20,
        };
        let mut adcs = quiet_record();
        for channel in 0..10 {
            adcs[[50, channel]] = 1200;
        }
        assert!(!is_cosmic(&adcs, &cuts));
    }
}
