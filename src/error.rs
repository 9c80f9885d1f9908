use std::{error::Error, fmt, io};

/// Errors raised while decoding, transforming or rendering audio.
#[derive(Debug)]
pub enum ViewerError {
    /// The input file could not be opened or read.
    Io(io::Error),
    /// The container header is malformed, the data is truncated, or the
    /// encoding is not single-channel 16-bit integer PCM.
    Format(String),
    /// A magnitude bin was exactly zero when taking its logarithm.
    Math {
        frequency_bin: usize,
        time_bin: usize,
    },
    /// A transform or canvas parameter was out of range.
    InvalidParameter(&'static str),
    /// The FFT backend rejected its buffers.
    Transform(realfft::FftError),
    /// Encoding the canvas failed.
    Image(image::ImageError),
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerError::Io(e) => write!(f, "io error: {e}"),
            ViewerError::Format(msg) => write!(f, "format error: {msg}"),
            ViewerError::Math {
                frequency_bin,
                time_bin,
            } => write!(
                f,
                "math error: logarithm of zero magnitude at frequency bin {frequency_bin}, time bin {time_bin}"
            ),
            ViewerError::InvalidParameter(what) => write!(f, "invalid parameter: {what}"),
            ViewerError::Transform(e) => write!(f, "fft error: {e}"),
            ViewerError::Image(e) => write!(f, "image error: {e}"),
        }
    }
}

impl Error for ViewerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ViewerError::Io(e) => Some(e),
            ViewerError::Transform(e) => Some(e),
            ViewerError::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ViewerError {
    fn from(e: io::Error) -> Self {
        ViewerError::Io(e)
    }
}

impl From<realfft::FftError> for ViewerError {
    fn from(e: realfft::FftError) -> Self {
        ViewerError::Transform(e)
    }
}

impl From<image::ImageError> for ViewerError {
    fn from(e: image::ImageError) -> Self {
        ViewerError::Image(e)
    }
}

/// Truncated sample data surfaces from `hound` as an unexpected EOF; that is
/// a malformed container rather than an unreadable file.
impl From<hound::Error> for ViewerError {
    fn from(e: hound::Error) -> Self {
        match e {
            hound::Error::IoError(io) if io.kind() == io::ErrorKind::UnexpectedEof => {
                ViewerError::Format("unexpected end of file".to_string())
            }
            hound::Error::IoError(io) => ViewerError::Io(io),
            other => ViewerError::Format(other.to_string()),
        }
    }
}
