//! Window functions for short-time spectral analysis.
//!
//! All windows here are *periodic* (DFT-even): a window of length `len` is the
//! first `len` points of the symmetric window of length `len + 1`. This is the
//! convention used when windows feed an FFT.

use std::f64::consts::PI;

/// Taper applied to each analysis segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WindowKind {
    /// Tapered cosine window; `alpha` is the fraction of the window inside
    /// the cosine tapers. `0.0` is rectangular, `1.0` is Hann.
    Tukey(f64),
    /// Raised cosine window.
    Hann,
    /// No taper.
    Rectangular,
}

impl Default for WindowKind {
    fn default() -> Self {
        WindowKind::Tukey(0.25)
    }
}

impl WindowKind {
    /// Generate `len` window coefficients.
    pub fn coefficients(&self, len: usize) -> Vec<f64> {
        match *self {
            WindowKind::Tukey(alpha) => tukey(len, alpha),
            WindowKind::Hann => hann(len),
            WindowKind::Rectangular => vec![1.0; len],
        }
    }
}

/// Generate a periodic Hann window of length `len`.
pub fn hann(len: usize) -> Vec<f64> {
    match len {
        0 => Vec::new(),
        1 => vec![1.0],
        n => (0..n)
            .map(|i| 0.5 - 0.5 * (2.0 * PI * i as f64 / n as f64).cos())
            .collect(),
    }
}

/// Generate a periodic Tukey window of length `len` with taper fraction `alpha`.
///
/// Returns an empty vector when `len` is zero and a single unity sample when
/// `len` equals one.
pub fn tukey(len: usize, alpha: f64) -> Vec<f64> {
    if len == 0 {
        return Vec::new();
    }
    if len == 1 {
        return vec![1.0];
    }
    if alpha <= 0.0 {
        return vec![1.0; len];
    }
    if alpha >= 1.0 {
        return hann(len);
    }
    let mut w = tukey_symmetric(len + 1, alpha);
    w.truncate(len);
    w
}

fn tukey_symmetric(m: usize, alpha: f64) -> Vec<f64> {
    let span = (m - 1) as f64;
    // Last index of the rising taper; the falling taper mirrors it.
    let width = (alpha * span / 2.0).floor() as usize;
    (0..m)
        .map(|n| {
            let x = n as f64;
            if n <= width {
                0.5 * (1.0 + (PI * (-1.0 + 2.0 * x / alpha / span)).cos())
            } else if n < m - width - 1 {
                1.0
            } else {
                0.5 * (1.0 + (PI * (-2.0 / alpha + 1.0 + 2.0 * x / alpha / span)).cos())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn tukey_edges() {
        assert!(tukey(0, 0.25).is_empty());
        assert_eq!(tukey(1, 0.25), vec![1.0]);
        assert_eq!(tukey(8, 0.0), vec![1.0; 8]);
    }

    #[test]
    fn tukey_starts_at_zero_and_has_flat_top() {
        let w = tukey(256, 0.25);
        assert_eq!(w.len(), 256);
        assert!(w[0].abs() < EPSILON);
        assert!((w[128] - 1.0).abs() < EPSILON);
        assert!(w.iter().all(|&v| (0.0..=1.0 + EPSILON).contains(&v)));
    }

    #[test]
    fn periodic_tukey_is_symmetric_about_the_centre() {
        let w = tukey(16, 0.5);
        for i in 1..8 {
            assert!((w[i] - w[16 - i]).abs() < EPSILON, "index {i}");
        }
    }

    #[test]
    fn full_taper_tukey_is_hann() {
        let t = tukey(32, 1.0);
        let h = hann(32);
        for (a, b) in t.iter().zip(h.iter()) {
            assert!((a - b).abs() < EPSILON);
        }
    }

    #[test]
    fn hann_peaks_at_centre() {
        let w = hann(64);
        assert!(w[0].abs() < EPSILON);
        assert!((w[32] - 1.0).abs() < EPSILON);
    }

    #[test]
    fn default_window_is_quarter_tukey() {
        assert_eq!(WindowKind::default(), WindowKind::Tukey(0.25));
        assert_eq!(WindowKind::Rectangular.coefficients(3), vec![1.0; 3]);
    }
}
