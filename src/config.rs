use crate::error::ViewerError;
use crate::spectrogram::{LogScale, SpectrogramParams};

/// Default canvas width, matching the viewer's initial window.
pub const DEFAULT_WIDTH: u32 = 640;
/// Default canvas height.
pub const DEFAULT_HEIGHT: u32 = 480;

/// Everything that shapes a render besides the view selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    pub spectrogram: SpectrogramParams,
    pub log_scale: LogScale,
    /// RGB colour of the time-domain trace.
    pub trace: [u8; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            spectrogram: SpectrogramParams::default(),
            log_scale: LogScale::Strict,
            trace: [0, 0, 0],
        }
    }
}

impl RenderConfig {
    /// Check the analysis parameters and log floor before anything is drawn.
    pub fn validate(&self) -> Result<(), ViewerError> {
        self.spectrogram.validate()?;
        self.log_scale.validate()
    }
}
