use std::str::FromStr;

use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use super::error::KeywordError;

/// Statistical center used to estimate the per-channel pedestal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PedestalModel {
    #[default]
    Median,
    Mean,
    Mode,
}

impl FromStr for PedestalModel {
    type Err = KeywordError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "median" => Ok(Self::Median),
            "mean" => Ok(Self::Mean),
            "mode" => Ok(Self::Mode),
            _ => Err(KeywordError::BadPedestal(s.to_string())),
        }
    }
}

/// Pedestal subtract an ADC matrix.
///
/// The pedestal of each channel is the chosen statistical center of that
/// channel over the time axis, floored to an integer before subtraction.
pub fn subtract(adcs: &Array2<i32>, model: PedestalModel) -> Array2<i32> {
    let mut subtracted = adcs.clone();
    for mut channel in subtracted.columns_mut() {
        let pedestal = match model {
            PedestalModel::Median => median(channel.view()).floor() as i32,
            PedestalModel::Mean => mean(channel.view()).floor() as i32,
            PedestalModel::Mode => mode(channel.view()),
        };
        channel.mapv_inplace(|sample| sample - pedestal);
    }
    subtracted
}

/// Median of a waveform; the mean of the two central values for even lengths
pub fn median(waveform: ArrayView1<'_, i32>) -> f64 {
    if waveform.is_empty() {
        return 0.0;
    }
    let mut sorted: Vec<i32> = waveform.iter().copied().collect();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
    } else {
        sorted[mid] as f64
    }
}

fn mean(waveform: ArrayView1<'_, i32>) -> f64 {
    if waveform.is_empty() {
        return 0.0;
    }
    waveform.iter().map(|&v| v as f64).sum::<f64>() / waveform.len() as f64
}

/// Most common sample value; ties resolve to the smallest value
fn mode(waveform: ArrayView1<'_, i32>) -> i32 {
    let mut counts = fxhash::FxHashMap::<i32, usize>::default();
    for sample in waveform.iter() {
        *counts.entry(*sample).or_insert(0) += 1;
    }
    let mut best = (0, 0usize);
    for (value, count) in counts {
        if count > best.1 || (count == best.1 && value < best.0) {
            best = (value, count);
        }
    }
    best.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    #[test]
    fn test_median_subtraction() {
        let adcs = arr2(&[[10, 100], [12, 104], [14, 102], [16, 103]]);
        // Channel medians are 13 and 102.5, floored to 13 and 102
        let subtracted = subtract(&adcs, PedestalModel::Median);
        assert_eq!(subtracted.column(0).to_vec(), vec![-3, -1, 1, 3]);
        assert_eq!(subtracted.column(1).to_vec(), vec![-2, 2, 0, 1]);
    }

    #[test]
    fn test_mean_subtraction() {
        let adcs = arr2(&[[1, 7], [2, 7], [3, 7]]);
        let subtracted = subtract(&adcs, PedestalModel::Mean);
        assert_eq!(subtracted.column(0).to_vec(), vec![-1, 0, 1]);
        assert_eq!(subtracted.column(1).to_vec(), vec![0, 0, 0]);
    }

    #[test]
    fn test_mode_subtraction() {
        let adcs = arr2(&[[5], [5], [9], [2]]);
        let subtracted = subtract(&adcs, PedestalModel::Mode);
        assert_eq!(subtracted.column(0).to_vec(), vec![0, 0, 4, -3]);
    }

    #[test]
    fn test_mode_tie_takes_smallest() {
        let wf = arr1(&[4, 4, 1, 1, 9]);
        assert_eq!(mode(wf.view()), 1);
    }

    #[test]
    fn test_keywords() {
        assert!(matches!(
            PedestalModel::from_str("median"),
            Ok(PedestalModel::Median)
        ));
        assert!(matches!(
            PedestalModel::from_str("mode"),
            Ok(PedestalModel::Mode)
        ));
        assert!(PedestalModel::from_str("average").is_err());
    }
}
