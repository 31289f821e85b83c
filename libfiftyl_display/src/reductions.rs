//! Per-record numeric reductions shared by the analyses.

use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

/// Population standard deviation of each channel over the time axis
pub fn channel_rms(adcs: &Array2<i32>) -> Array1<f64> {
    let mut rms = Array1::<f64>::zeros(adcs.ncols());
    for (channel, column) in adcs.columns().into_iter().enumerate() {
        let n = column.len() as f64;
        if n == 0.0 {
            continue;
        }
        let mean = column.iter().map(|&v| v as f64).sum::<f64>() / n;
        let variance = column
            .iter()
            .map(|&v| {
                let dev = v as f64 - mean;
                dev * dev
            })
            .sum::<f64>()
            / n;
        rms[channel] = variance.sqrt();
    }
    rms
}

/// Cumulative sum of a waveform
pub fn running_sum(waveform: ArrayView1<'_, i32>) -> Array1<i64> {
    let mut sum = Array1::<i64>::zeros(waveform.len());
    let mut acc = 0i64;
    for (idx, sample) in waveform.iter().enumerate() {
        acc += *sample as i64;
        sum[idx] = acc;
    }
    sum
}

/// Waveform extrema: the first maximum and the minimum in a fixed window
/// after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extrema {
    pub max: i32,
    pub max_index: usize,
    pub windowed_min: i32,
}

/// Find the waveform maximum and the minimum within `window` samples after
/// the first occurrence of the maximum. Returns None for an empty waveform.
pub fn extrema(waveform: ArrayView1<'_, i32>, window: usize) -> Option<Extrema> {
    let max = *waveform.iter().max()?;
    let max_index = waveform.iter().position(|&v| v == max)?;
    let end = (max_index + window).min(waveform.len());
    let windowed_min = *waveform
        .iter()
        .skip(max_index)
        .take(end - max_index)
        .min()?;
    Some(Extrema {
        max,
        max_index,
        windowed_min,
    })
}

/// Accumulate a record into a running sum, optionally by absolute value
pub fn accumulate(sum: &mut Array2<i64>, adcs: &Array2<i32>, use_abs: bool) {
    let rows = sum.nrows().min(adcs.nrows());
    let cols = sum.ncols().min(adcs.ncols());
    for row in 0..rows {
        for col in 0..cols {
            let sample = adcs[[row, col]] as i64;
            sum[[row, col]] += if use_abs { sample.abs() } else { sample };
        }
    }
}

/// Zero every sample outside the open interval (low, high), boundaries
/// included
pub fn zero_outside(adcs: &mut Array2<i32>, low: i32, high: i32) {
    adcs.mapv_inplace(|sample| {
        if sample <= low || sample >= high {
            0
        } else {
            sample
        }
    });
}

/// Fixed-width histogram binning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bins {
    pub start: f64,
    pub end: f64,
    pub width: f64,
}

impl Bins {
    pub fn new(start: f64, end: f64, width: f64) -> Self {
        Self { start, end, width }
    }

    /// Number of bins covering [start, end)
    pub fn len(&self) -> usize {
        if self.width <= 0.0 || self.end <= self.start {
            return 0;
        }
        ((self.end - self.start) / self.width).ceil() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Left edge of bin `idx`
    pub fn edge(&self, idx: usize) -> f64 {
        self.start + idx as f64 * self.width
    }

    /// Count values into the bins; out-of-range values are dropped
    pub fn count<I>(&self, values: I) -> Vec<usize>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut counts = vec![0usize; self.len()];
        for value in values {
            if value < self.start || value >= self.end {
                continue;
            }
            let idx = ((value - self.start) / self.width) as usize;
            if idx < counts.len() {
                counts[idx] += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2, Array2};

    #[test]
    fn test_channel_rms() {
        let adcs = arr2(&[[1, 5], [3, 5], [1, 5], [3, 5]]);
        let rms = channel_rms(&adcs);
        assert!((rms[0] - 1.0).abs() < 1e-12);
        assert!(rms[1].abs() < 1e-12);
    }

    #[test]
    fn test_running_sum() {
        let wf = arr1(&[1, -2, 3, 4]);
        assert_eq!(running_sum(wf.view()).to_vec(), vec![1, -1, 2, 6]);
    }

    #[test]
    fn test_extrema_window() {
        let wf = arr1(&[0, 8, 2, -5, -9, 0]);
        let ext = extrema(wf.view(), 3).expect("non-empty");
        assert_eq!(ext.max, 8);
        assert_eq!(ext.max_index, 1);
        // Window covers indices 1..4, so the deep minimum at 4 is excluded
        assert_eq!(ext.windowed_min, -5);

        let full = extrema(wf.view(), 50).expect("non-empty");
        assert_eq!(full.windowed_min, -9);
    }

    #[test]
    fn test_accumulate_abs() {
        let mut sum = Array2::<i64>::zeros((2, 2));
        let adcs = arr2(&[[1, -1], [-2, 2]]);
        accumulate(&mut sum, &adcs, false);
        accumulate(&mut sum, &adcs, true);
        assert_eq!(sum[[0, 0]], 2);
        assert_eq!(sum[[0, 1]], 0);
        assert_eq!(sum[[1, 0]], 0);
        assert_eq!(sum[[1, 1]], 4);
    }

    #[test]
    fn test_zero_outside() {
        let mut adcs = arr2(&[[50, 63], [70, 77], [80, 64]]);
        zero_outside(&mut adcs, 63, 77);
        assert_eq!(adcs, arr2(&[[0, 0], [70, 0], [0, 64]]));
    }

    #[test]
    fn test_bins() {
        let bins = Bins::new(0.0, 15.0, 5.0);
        assert_eq!(bins.len(), 3);
        let counts = bins.count(vec![0.0, 4.9, 5.0, 14.9, 15.0, -1.0]);
        assert_eq!(counts, vec![2, 1, 1]);
    }
}
