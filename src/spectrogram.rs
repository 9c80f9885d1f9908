//! Short-time spectral analysis.
//!
//! The sample sequence is cut into overlapping segments; each segment has its
//! mean removed, is tapered, transformed with a real-input FFT and reduced to
//! a one-sided power spectral density. The defaults (256-sample segments,
//! one-eighth overlap, Tukey(0.25) taper, density scaling) follow the usual
//! scientific-computing conventions for a "default" spectrogram.

use crate::audio::AudioBuffer;
use crate::error::ViewerError;
use crate::window::WindowKind;
use realfft::RealFftPlanner;

/// Default number of samples per analysis segment.
pub const DEFAULT_SEGMENT_LEN: usize = 256;

/// Default overlap is this fraction (as a divisor) of the segment length.
const DEFAULT_OVERLAP_DIVISOR: usize = 8;

/// Parameters of the short-time analysis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpectrogramParams {
    /// Samples per segment and FFT length. Must be even and at least 2.
    pub segment_len: usize,
    /// Samples shared by consecutive segments; `None` means `segment_len / 8`.
    pub overlap: Option<usize>,
    pub window: WindowKind,
}

impl Default for SpectrogramParams {
    fn default() -> Self {
        Self {
            segment_len: DEFAULT_SEGMENT_LEN,
            overlap: None,
            window: WindowKind::default(),
        }
    }
}

impl SpectrogramParams {
    pub(crate) fn validate(&self) -> Result<(), ViewerError> {
        if self.segment_len < 2 || self.segment_len % 2 != 0 {
            return Err(ViewerError::InvalidParameter(
                "segment length must be an even number of at least 2",
            ));
        }
        if self.overlap.is_some_and(|o| o >= self.segment_len) {
            return Err(ViewerError::InvalidParameter(
                "overlap must be smaller than the segment length",
            ));
        }
        Ok(())
    }

    fn overlap_for(&self, segment_len: usize) -> usize {
        match self.overlap {
            Some(o) => o.min(segment_len.saturating_sub(1)),
            None => segment_len / DEFAULT_OVERLAP_DIVISOR,
        }
    }
}

/// How zero magnitudes are treated when taking the logarithm.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum LogScale {
    /// A zero magnitude is an error.
    #[default]
    Strict,
    /// Magnitudes below the floor are raised to it first.
    Floor(f64),
}

impl LogScale {
    /// A floor must be a positive finite number, otherwise its logarithm is
    /// not a usable colour value.
    pub(crate) fn validate(&self) -> Result<(), ViewerError> {
        match *self {
            LogScale::Floor(floor) if floor.is_nan() || floor <= 0.0 || floor.is_infinite() => {
                Err(ViewerError::InvalidParameter(
                    "log floor must be a positive finite number",
                ))
            }
            _ => Ok(()),
        }
    }
}

/// Power spectral density over a grid of frequency bins and segment times.
#[derive(Clone, Debug, PartialEq)]
pub struct SpectrogramResult {
    frequency_bins: Vec<f64>,
    time_bins: Vec<f64>,
    magnitude: Vec<Vec<f64>>,
}

impl SpectrogramResult {
    /// Bin centre frequencies in Hz, from 0 to the Nyquist frequency.
    pub fn frequency_bins(&self) -> &[f64] {
        &self.frequency_bins
    }

    /// Segment centre times in seconds.
    pub fn time_bins(&self) -> &[f64] {
        &self.time_bins
    }

    /// Magnitudes indexed `[frequency_bin][time_bin]`.
    pub fn magnitude(&self) -> &[Vec<f64>] {
        &self.magnitude
    }

    pub fn is_empty(&self) -> bool {
        self.time_bins.is_empty()
    }

    /// Natural logarithm of every magnitude, in the same layout.
    ///
    /// With [`LogScale::Strict`] the first zero found (scanning frequency
    /// bins in order) is reported as [`ViewerError::Math`].
    pub fn log_magnitude(&self, scale: LogScale) -> Result<Vec<Vec<f64>>, ViewerError> {
        scale.validate()?;
        let mut out = Vec::with_capacity(self.magnitude.len());
        for (frequency_bin, row) in self.magnitude.iter().enumerate() {
            let mut logs = Vec::with_capacity(row.len());
            for (time_bin, &m) in row.iter().enumerate() {
                let v = match scale {
                    LogScale::Strict if m == 0.0 => {
                        return Err(ViewerError::Math {
                            frequency_bin,
                            time_bin,
                        })
                    }
                    LogScale::Strict => m,
                    LogScale::Floor(floor) => m.max(floor),
                };
                logs.push(v.ln());
            }
            out.push(logs);
        }
        Ok(out)
    }
}

/// Spectrogram of `buffer` with default parameters.
pub fn transform(buffer: &AudioBuffer) -> Result<SpectrogramResult, ViewerError> {
    transform_with(buffer, &SpectrogramParams::default())
}

/// Spectrogram of `buffer` with explicit parameters.
///
/// A buffer shorter than the segment length is analysed as one segment
/// zero-padded to the FFT length, so the frequency axis never changes. An
/// empty buffer yields the frequency axis and no time bins.
pub fn transform_with(
    buffer: &AudioBuffer,
    params: &SpectrogramParams,
) -> Result<SpectrogramResult, ViewerError> {
    params.validate()?;
    let fs = buffer.sample_rate() as f64;
    let nfft = params.segment_len;
    let bins = nfft / 2 + 1;
    let frequency_bins: Vec<f64> = (0..bins).map(|i| i as f64 * fs / nfft as f64).collect();

    let samples = buffer.samples();
    if samples.is_empty() {
        return Ok(SpectrogramResult {
            frequency_bins,
            time_bins: Vec::new(),
            magnitude: vec![Vec::new(); bins],
        });
    }

    let segment_len = nfft.min(samples.len());
    let overlap = params.overlap_for(segment_len);
    let hop = segment_len - overlap;
    let segments = (samples.len() - overlap) / hop;

    let window = params.window.coefficients(segment_len);
    let window_power: f64 = window.iter().map(|w| w * w).sum();
    if window_power <= 0.0 {
        return Err(ViewerError::InvalidParameter("window has no energy"));
    }
    let scale = 1.0 / (fs * window_power);

    let mut planner = RealFftPlanner::<f64>::new();
    let r2c = planner.plan_fft_forward(nfft);
    let mut input = r2c.make_input_vec();
    let mut spectrum = r2c.make_output_vec();
    let mut scratch = r2c.make_scratch_vec();

    let mut magnitude = vec![Vec::with_capacity(segments); bins];
    let mut time_bins = Vec::with_capacity(segments);
    for k in 0..segments {
        let start = k * hop;
        let segment = &samples[start..start + segment_len];
        let mean = segment.iter().map(|&s| s as f64).sum::<f64>() / segment_len as f64;
        for (i, slot) in input.iter_mut().enumerate() {
            *slot = match segment.get(i) {
                Some(&s) => (s as f64 - mean) * window[i],
                None => 0.0,
            };
        }
        r2c.process_with_scratch(&mut input, &mut spectrum, &mut scratch)?;
        for (bin, c) in spectrum.iter().enumerate() {
            let mut p = c.norm_sqr() * scale;
            // One-sided spectrum: fold negative frequencies into all bins
            // except DC and Nyquist.
            if bin != 0 && bin != bins - 1 {
                p *= 2.0;
            }
            magnitude[bin].push(p);
        }
        time_bins.push((segment_len as f64 / 2.0 + start as f64) / fs);
    }

    log::debug!(
        "spectrogram: {} frequency bins x {} segments (segment={}, overlap={}, nfft={})",
        bins,
        segments,
        segment_len,
        overlap,
        nfft
    );
    Ok(SpectrogramResult {
        frequency_bins,
        time_bins,
        magnitude,
    })
}
