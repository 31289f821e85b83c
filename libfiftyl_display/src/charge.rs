//! Peak-area integration for charge-collection studies.
//!
//! Works on a three-channel group (the channel of interest and its two
//! neighbors): a window opens when the center channel crosses the ADC
//! threshold, picks up a few samples of prefix before the crossing, extends
//! while the center stays above threshold, and closes with a few samples of
//! suffix. Time samples where all three channels are over threshold are
//! counted as muons and vetoed. Closing windows can additionally be gated on
//! a coincidence in the two induction planes, which see the drifting charge
//! with opposite polarities.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Thresholds and window geometry for peak integration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChargeParams {
    /// Center-channel samples above this open/extend a window
    pub adc_threshold: i32,
    /// Samples integrated before the window opening
    pub prefix: usize,
    /// Samples integrated after the window close
    pub suffix: usize,
    /// Coincidence threshold on the induction-plane groups
    pub induction_threshold: i32,
    /// Look-back window (in ticks) for the induction coincidence
    pub induction_window: usize,
    /// Center channel of the Induction 1 group
    pub induction1_center: usize,
    /// Center channel of the Induction 2 group
    pub induction2_center: usize,
}

impl Default for ChargeParams {
    fn default() -> Self {
        Self {
            adc_threshold: 100,
            prefix: 5,
            suffix: 5,
            induction_threshold: 40,
            induction_window: 15,
            induction1_center: 68,
            induction2_center: 108,
        }
    }
}

/// Integrated areas per closed window, one list per channel of the group
/// plus the three-channel total.
#[derive(Debug, Clone, Default)]
pub struct PeakAreas {
    pub low: Vec<i64>,
    pub center: Vec<i64>,
    pub high: Vec<i64>,
    pub total: Vec<i64>,
}

impl PeakAreas {
    pub fn len(&self) -> usize {
        self.center.len()
    }

    pub fn is_empty(&self) -> bool {
        self.center.is_empty()
    }
}

/// Rejection counters accumulated while integrating.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChargeTally {
    pub muons: u64,
    pub induction_skips: u64,
    pub mismatches: u64,
}

/// Integrate the peak areas of one record's three-channel group.
///
/// `wfs` must be pedestal subtracted with shape (frames, 3), column order
/// low/center/high. When `induction` carries the two induction-plane groups
/// (same shape), a closing window is kept only on coincidence.
pub fn integrate_peaks(
    wfs: &Array2<i32>,
    induction: Option<(&Array2<i32>, &Array2<i32>)>,
    params: &ChargeParams,
    areas: &mut PeakAreas,
    tally: &mut ChargeTally,
) {
    let frames = wfs.nrows();
    let mut open = false;
    let mut low_sum = 0i64;
    let mut center_sum = 0i64;
    let mut high_sum = 0i64;
    let mut total_sum = 0i64;

    for time in 0..frames {
        if wfs.row(time).iter().all(|&v| v > params.adc_threshold) {
            // All three channels active at once reads as a muon
            tally.muons += 1;
            continue;
        }
        if wfs[[time, 1]] > params.adc_threshold {
            if !open {
                open = true;
                let prefix = params.prefix.min(time);
                for sample in (time - prefix)..=time {
                    low_sum += wfs[[sample, 0]] as i64;
                    center_sum += wfs[[sample, 1]] as i64;
                    high_sum += wfs[[sample, 2]] as i64;
                    total_sum += wfs.row(sample).iter().map(|&v| v as i64).sum::<i64>();
                }
            } else {
                low_sum += wfs[[time, 0]] as i64;
                center_sum += wfs[[time, 1]] as i64;
                high_sum += wfs[[time, 2]] as i64;
                total_sum += wfs.row(time).iter().map(|&v| v as i64).sum::<i64>();
            }
        } else if open {
            let keep = match induction {
                Some((ind1, ind2)) => check_induction(ind1, ind2, time, params),
                None => true,
            };
            if keep {
                let suffix = params.suffix.min(frames - time);
                for sample in time..(time + suffix) {
                    low_sum += wfs[[sample, 0]] as i64;
                    center_sum += wfs[[sample, 1]] as i64;
                    high_sum += wfs[[sample, 2]] as i64;
                    total_sum += wfs.row(sample).iter().map(|&v| v as i64).sum::<i64>();
                }
                areas.low.push(low_sum);
                areas.center.push(center_sum);
                areas.high.push(high_sum);
                areas.total.push(total_sum);
            } else {
                tally.induction_skips += 1;
            }

            open = false;
            low_sum = 0;
            center_sum = 0;
            high_sum = 0;
            total_sum = 0;
        }
    }
}

/// Check the induction-plane coincidence for a window closing at `time`.
///
/// The induction signal leads the collection signal, so the check looks back
/// over a short window: Induction 1 must rise above the threshold and
/// Induction 2 must dip below its negative.
fn check_induction(
    ind1: &Array2<i32>,
    ind2: &Array2<i32>,
    time: usize,
    params: &ChargeParams,
) -> bool {
    let early = time.saturating_sub(params.induction_window);
    let end = (time + 1).min(ind1.nrows()).min(ind2.nrows());
    if early >= end {
        return false;
    }

    let ind1_max = ind1
        .slice(ndarray::s![early..end, ..])
        .iter()
        .copied()
        .max()
        .unwrap_or(i32::MIN);
    let ind2_min = ind2
        .slice(ndarray::s![early..end, ..])
        .iter()
        .copied()
        .min()
        .unwrap_or(i32::MAX);

    ind1_max > params.induction_threshold && -ind2_min > params.induction_threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn params() -> ChargeParams {
        ChargeParams {
            adc_threshold: 100,
            prefix: 2,
            suffix: 2,
            induction_threshold: 40,
            induction_window: 5,
            ..ChargeParams::default()
        }
    }

    /// A group with one clean center-channel peak at ticks 10..13
    fn single_peak() -> Array2<i32> {
        let mut wfs = Array2::<i32>::zeros((30, 3));
        for time in 10..13 {
            wfs[[time, 1]] = 200;
            wfs[[time, 0]] = 10;
            wfs[[time, 2]] = 20;
        }
        wfs
    }

    #[test]
    fn test_single_peak_area() {
        let wfs = single_peak();
        let mut areas = PeakAreas::default();
        let mut tally = ChargeTally::default();
        integrate_peaks(&wfs, None, &params(), &mut areas, &mut tally);

        assert_eq!(areas.len(), 1);
        // Three active samples plus zero-valued prefix and suffix
        assert_eq!(areas.center[0], 600);
        assert_eq!(areas.low[0], 30);
        assert_eq!(areas.high[0], 60);
        assert_eq!(areas.total[0], 690);
        assert_eq!(tally.muons, 0);
        assert_eq!(tally.induction_skips, 0);
    }

    #[test]
    fn test_muon_samples_are_vetoed() {
        let mut wfs = single_peak();
        // An extra sample where all three channels fire
        wfs[[20, 0]] = 150;
        wfs[[20, 1]] = 150;
        wfs[[20, 2]] = 150;

        let mut areas = PeakAreas::default();
        let mut tally = ChargeTally::default();
        integrate_peaks(&wfs, None, &params(), &mut areas, &mut tally);

        assert_eq!(tally.muons, 1);
        assert_eq!(areas.len(), 1);
    }

    #[test]
    fn test_induction_coincidence_gates_windows() {
        let wfs = single_peak();
        let quiet = Array2::<i32>::zeros((30, 3));

        // No induction activity: the window is skipped
        let mut areas = PeakAreas::default();
        let mut tally = ChargeTally::default();
        integrate_peaks(
            &wfs,
            Some((&quiet, &quiet)),
            &params(),
            &mut areas,
            &mut tally,
        );
        assert!(areas.is_empty());
        assert_eq!(tally.induction_skips, 1);

        // Bipolar induction activity inside the look-back window keeps it
        let mut ind1 = Array2::<i32>::zeros((30, 3));
        let mut ind2 = Array2::<i32>::zeros((30, 3));
        ind1[[11, 1]] = 60;
        ind2[[11, 1]] = -60;
        let mut areas = PeakAreas::default();
        let mut tally = ChargeTally::default();
        integrate_peaks(
            &wfs,
            Some((&ind1, &ind2)),
            &params(),
            &mut areas,
            &mut tally,
        );
        assert_eq!(areas.len(), 1);
        assert_eq!(tally.induction_skips, 0);
    }

    #[test]
    fn test_window_clamped_at_record_end() {
        let mut wfs = Array2::<i32>::zeros((10, 3));
        for time in 8..10 {
            wfs[[time, 1]] = 200;
        }
        let mut areas = PeakAreas::default();
        let mut tally = ChargeTally::default();
        integrate_peaks(&wfs, None, &params(), &mut areas, &mut tally);
        // The window never closes before the record ends, so no area is kept
        assert!(areas.is_empty());

        let mut wfs = Array2::<i32>::zeros((10, 3));
        wfs[[0, 1]] = 200;
        let mut areas = PeakAreas::default();
        integrate_peaks(&wfs, None, &params(), &mut areas, &mut tally);
        // Prefix clamped at the record start
        assert_eq!(areas.len(), 1);
        assert_eq!(areas.center[0], 200);
    }
}
