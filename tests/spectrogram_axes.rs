//! Test intent: verifies the spectrogram grid axes for arbitrary buffers.

use proptest::prelude::*;
use wavescope::spectrogram::{transform_with, SpectrogramParams};
use wavescope::{transform, AudioBuffer};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Frequency bins rise strictly from 0 Hz to exactly the Nyquist frequency.
    #[test]
    fn frequency_bins_span_zero_to_nyquist(
        samples in proptest::collection::vec(any::<i16>(), 0..3000),
        rate in 1u32..192_000,
    ) {
        let buf = AudioBuffer::new(samples, rate).unwrap();
        let spec = transform(&buf).unwrap();
        let f = spec.frequency_bins();
        prop_assert_eq!(f[0], 0.0);
        prop_assert_eq!(*f.last().unwrap(), rate as f64 / 2.0);
        prop_assert!(f.windows(2).all(|w| w[0] < w[1]));
    }

    /// Time bins stay inside the recording and the grid is rectangular.
    #[test]
    fn time_bins_lie_within_duration(
        samples in proptest::collection::vec(any::<i16>(), 1..3000),
        rate in 1u32..48_000,
        half_segment in 1usize..256,
    ) {
        let buf = AudioBuffer::new(samples, rate).unwrap();
        let params = SpectrogramParams {
            segment_len: half_segment * 2,
            ..Default::default()
        };
        let spec = transform_with(&buf, &params).unwrap();
        let t = spec.time_bins();
        prop_assert!(!t.is_empty());
        prop_assert!(t.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(t.iter().all(|&x| x > 0.0 && x <= buf.duration()));
        prop_assert_eq!(spec.magnitude().len(), spec.frequency_bins().len());
        prop_assert!(spec.magnitude().iter().all(|row| row.len() == t.len()));
        prop_assert!(spec.magnitude().iter().flatten().all(|&m| m >= 0.0));
    }
}

/// Explicit overlap changes the hop between segments.
#[test]
fn explicit_overlap_sets_hop() {
    let buf = AudioBuffer::new(vec![1; 1024], 1000).unwrap();
    let params = SpectrogramParams {
        segment_len: 128,
        overlap: Some(64),
        ..Default::default()
    };
    let spec = transform_with(&buf, &params).unwrap();
    // (1024 - 64) / 64 segments, 64 samples apart
    assert_eq!(spec.time_bins().len(), 15);
    let dt = spec.time_bins()[1] - spec.time_bins()[0];
    assert!((dt - 0.064).abs() < 1e-12);
}
