//! Single-channel PCM decoding.
//!
//! The decoder accepts RIFF/WAVE files carrying one channel of 16-bit signed
//! integer samples. Everything else is rejected with
//! [`ViewerError::Format`] rather than being reinterpreted, so a stereo or
//! 24-bit file never produces a silently garbled trace.

use crate::error::ViewerError;
use hound::{SampleFormat, WavReader};
use std::io::Read;
use std::path::Path;

/// Only mono files are supported.
pub const SUPPORTED_CHANNELS: u16 = 1;

/// Only 16-bit integer samples are supported.
pub const SUPPORTED_BITS_PER_SAMPLE: u16 = 16;

/// Decoded audio held by a viewing session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AudioBuffer {
    samples: Vec<i16>,
    sample_rate: u32,
    frame_count: usize,
}

impl AudioBuffer {
    /// Wrap decoded samples. The frame count is taken from `samples`, so the
    /// buffer always satisfies `samples().len() == frame_count()`.
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Result<Self, ViewerError> {
        if sample_rate == 0 {
            return Err(ViewerError::InvalidParameter("sample rate must be non-zero"));
        }
        let frame_count = samples.len();
        Ok(Self {
            samples,
            sample_rate,
            frame_count,
        })
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Sampling rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn is_empty(&self) -> bool {
        self.frame_count == 0
    }

    /// Length of the recording in seconds.
    pub fn duration(&self) -> f64 {
        self.frame_count as f64 / self.sample_rate as f64
    }

    /// Nyquist frequency in Hz.
    pub fn nyquist(&self) -> f64 {
        self.sample_rate as f64 / 2.0
    }
}

/// Decode the WAV file at `path`.
///
/// Fails with [`ViewerError::Io`] when the file cannot be opened and with
/// [`ViewerError::Format`] when it is not a supported PCM container.
pub fn decode<P: AsRef<Path>>(path: P) -> Result<AudioBuffer, ViewerError> {
    let path = path.as_ref();
    log::debug!("decoding {}", path.display());
    let reader = WavReader::open(path)?;
    read_frames(reader)
}

/// Decode a WAV stream that is already open, e.g. an in-memory cursor.
pub fn decode_reader<R: Read>(reader: R) -> Result<AudioBuffer, ViewerError> {
    read_frames(WavReader::new(reader)?)
}

fn read_frames<R: Read>(mut reader: WavReader<R>) -> Result<AudioBuffer, ViewerError> {
    let spec = reader.spec();
    let frame_count = reader.duration() as usize;
    log::debug!(
        "wav header: channels={} bits={} format={:?} rate={} frames={}",
        spec.channels,
        spec.bits_per_sample,
        spec.sample_format,
        spec.sample_rate,
        frame_count
    );
    if spec.channels != SUPPORTED_CHANNELS {
        return Err(ViewerError::Format(format!(
            "expected {SUPPORTED_CHANNELS} channel, found {}",
            spec.channels
        )));
    }
    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != SUPPORTED_BITS_PER_SAMPLE
    {
        return Err(ViewerError::Format(format!(
            "expected {SUPPORTED_BITS_PER_SAMPLE}-bit integer samples, found {}-bit {:?}",
            spec.bits_per_sample, spec.sample_format
        )));
    }
    if spec.sample_rate == 0 {
        return Err(ViewerError::Format("sample rate is zero".to_string()));
    }

    let mut samples = Vec::with_capacity(frame_count);
    for sample in reader.samples::<i16>().take(frame_count) {
        samples.push(sample?);
    }
    if samples.len() != frame_count {
        return Err(ViewerError::Format(format!(
            "header declares {frame_count} frames but only {} are present",
            samples.len()
        )));
    }
    AudioBuffer::new(samples, spec.sample_rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};
    use std::io::Cursor;

    fn wav_bytes(spec: WavSpec, samples: &[i16]) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
            for &s in samples {
                writer.write_sample(s).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    fn mono16(rate: u32) -> WavSpec {
        WavSpec {
            channels: 1,
            sample_rate: rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        }
    }

    #[test]
    fn decodes_samples_in_file_order() {
        let bytes = wav_bytes(mono16(8000), &[0, 1, -1, i16::MAX, i16::MIN]);
        let buf = decode_reader(Cursor::new(bytes)).unwrap();
        assert_eq!(buf.samples(), &[0, 1, -1, i16::MAX, i16::MIN]);
        assert_eq!(buf.frame_count(), 5);
        assert_eq!(buf.sample_rate(), 8000);
    }

    #[test]
    fn rejects_stereo() {
        let spec = WavSpec {
            channels: 2,
            ..mono16(8000)
        };
        let bytes = wav_bytes(spec, &[0, 0, 0, 0]);
        assert!(matches!(
            decode_reader(Cursor::new(bytes)),
            Err(ViewerError::Format(_))
        ));
    }

    #[test]
    fn rejects_non_riff_bytes() {
        let err = decode_reader(Cursor::new(b"definitely not audio".to_vec())).unwrap_err();
        assert!(matches!(err, ViewerError::Format(_)));
    }

    #[test]
    fn truncated_data_is_a_format_error() {
        let mut bytes = wav_bytes(mono16(8000), &[1, 2, 3, 4]);
        bytes.truncate(bytes.len() - 3);
        assert!(matches!(
            decode_reader(Cursor::new(bytes)),
            Err(ViewerError::Format(_))
        ));
    }

    #[test]
    fn buffer_rejects_zero_rate() {
        assert!(matches!(
            AudioBuffer::new(vec![0; 4], 0),
            Err(ViewerError::InvalidParameter(_))
        ));
    }

    #[test]
    fn duration_and_nyquist() {
        let buf = AudioBuffer::new(vec![0; 4000], 8000).unwrap();
        assert!((buf.duration() - 0.5).abs() < 1e-12);
        assert_eq!(buf.nyquist(), 4000.0);
    }
}
