use ndarray::ArrayView1;
use num_complex::Complex;
use rustfft::FftPlanner;

/// Magnitude of the real part of the forward FFT of a waveform, keeping the
/// first n/2 + 1 bins.
pub fn rfft_magnitude(waveform: ArrayView1<'_, i32>) -> Vec<f64> {
    let n = waveform.len();
    if n == 0 {
        return Vec::new();
    }
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);
    let mut buffer: Vec<Complex<f64>> = waveform
        .iter()
        .map(|&sample| Complex::new(sample as f64, 0.0))
        .collect();
    fft.process(&mut buffer);
    buffer[..n / 2 + 1].iter().map(|c| c.re.abs()).collect()
}

/// Frequency axis for [`rfft_magnitude`] with sampling period `dt` seconds
pub fn rfft_freqs(n: usize, dt: f64) -> Vec<f64> {
    (0..n / 2 + 1).map(|k| k as f64 / (n as f64 * dt)).collect()
}

/// Elementwise accumulator for averaging FFT magnitudes over records and
/// channels.
#[derive(Debug, Default)]
pub struct SpectrumAverager {
    sum: Vec<f64>,
}

impl SpectrumAverager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one magnitude spectrum to the accumulator
    pub fn add(&mut self, magnitude: &[f64]) {
        if self.sum.is_empty() {
            self.sum = magnitude.to_vec();
            return;
        }
        for (acc, mag) in self.sum.iter_mut().zip(magnitude.iter()) {
            *acc += mag;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sum.is_empty()
    }

    /// Consume the accumulator, dividing by the given denominator
    pub fn scaled(self, denominator: f64) -> Vec<f64> {
        self.sum.into_iter().map(|v| v / denominator).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;
    use std::f64::consts::TAU;

    #[test]
    fn test_constant_waveform_is_dc_only() {
        let wf = Array1::<i32>::from_elem(64, 7);
        let mag = rfft_magnitude(wf.view());
        assert_eq!(mag.len(), 33);
        assert!((mag[0] - 7.0 * 64.0).abs() < 1e-6);
        for bin in &mag[1..] {
            assert!(bin.abs() < 1e-6);
        }
    }

    #[test]
    fn test_cosine_peaks_at_its_bin() {
        let n = 128;
        let k = 5;
        let wf: Array1<i32> = Array1::from_iter(
            (0..n).map(|i| (1000.0 * f64::cos(TAU * k as f64 * i as f64 / n as f64)).round() as i32),
        );
        let mag = rfft_magnitude(wf.view());
        let peak = mag
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(idx, _)| idx)
            .unwrap();
        assert_eq!(peak, k);
    }

    #[test]
    fn test_freqs() {
        let freqs = rfft_freqs(100, 512.0e-9);
        assert_eq!(freqs.len(), 51);
        assert_eq!(freqs[0], 0.0);
        // One cycle per 100 ticks of 512 ns
        assert!((freqs[1] - 1.0 / (100.0 * 512.0e-9)).abs() < 1e-3);
    }

    #[test]
    fn test_averager() {
        let mut avg = SpectrumAverager::new();
        assert!(avg.is_empty());
        avg.add(&[2.0, 4.0]);
        avg.add(&[4.0, 8.0]);
        assert_eq!(avg.scaled(2.0), vec![3.0, 6.0]);
    }
}
