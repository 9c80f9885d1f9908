//! Viewer state and the operations the menus trigger.
//!
//! A [`Session`] owns the loaded [`AudioBuffer`], the current [`ViewState`],
//! the render configuration and the canvas. Every operation redraws
//! synchronously; nothing is cached between renders.

use crate::audio::{decode, AudioBuffer};
use crate::config::RenderConfig;
use crate::error::ViewerError;
use crate::visual::{render, Canvas, Colormap};
use std::fmt;
use std::path::Path;

/// Which plot the canvas shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
    #[default]
    TimeDomain,
    Spectrogram,
}

impl ViewMode {
    pub const ALL: [ViewMode; 2] = [ViewMode::TimeDomain, ViewMode::Spectrogram];

    /// Menu label.
    pub fn name(&self) -> &'static str {
        match self {
            ViewMode::TimeDomain => "Time Domain",
            ViewMode::Spectrogram => "Spectrogram",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Single-select view choices: one mode and one colour map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    pub mode: ViewMode,
    pub colormap: Colormap,
}

impl ViewState {
    pub fn is_mode(&self, mode: ViewMode) -> bool {
        self.mode == mode
    }

    pub fn is_selected(&self, colormap: Colormap) -> bool {
        self.colormap == colormap
    }
}

/// One viewing session: at most one file in memory at a time.
#[derive(Debug)]
pub struct Session {
    buffer: Option<AudioBuffer>,
    view: ViewState,
    config: RenderConfig,
    canvas: Canvas,
}

impl Session {
    /// Empty session with a blank canvas sized by `config`.
    pub fn new(config: RenderConfig) -> Result<Self, ViewerError> {
        config.validate()?;
        let canvas = Canvas::new(config.width, config.height)?;
        Ok(Self {
            buffer: None,
            view: ViewState::default(),
            config,
            canvas,
        })
    }

    pub fn buffer(&self) -> Option<&AudioBuffer> {
        self.buffer.as_ref()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Decode `path`, replace the current buffer and redraw.
    ///
    /// On failure the previous buffer and drawing stay as they were.
    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ViewerError> {
        let path = path.as_ref();
        let buffer = decode(path)?;
        log::info!(
            "opened {}: {} frames at {} Hz ({:.3} s)",
            path.display(),
            buffer.frame_count(),
            buffer.sample_rate(),
            buffer.duration()
        );
        self.load(buffer)
    }

    /// Replace the current buffer with already decoded audio and redraw.
    ///
    /// The buffer is only committed once it has been drawn; if the render
    /// fails the previous buffer and canvas stay in place.
    pub fn load(&mut self, buffer: AudioBuffer) -> Result<(), ViewerError> {
        // A failed render returns before the canvas is cleared.
        render(&mut self.canvas, &self.view, &buffer, &self.config)?;
        self.buffer = Some(buffer);
        Ok(())
    }

    /// Switch between the time-domain and spectrogram plots and redraw.
    pub fn set_mode(&mut self, mode: ViewMode) -> Result<(), ViewerError> {
        log::info!("view: {mode}");
        self.view.mode = mode;
        self.redraw()
    }

    /// Select the spectrogram palette and redraw.
    pub fn select_colormap(&mut self, colormap: Colormap) -> Result<(), ViewerError> {
        log::info!("colour map: {colormap}");
        self.view.colormap = colormap;
        self.redraw()
    }

    /// Render the current buffer with the current view. Does nothing before
    /// a file has been opened.
    pub fn redraw(&mut self) -> Result<(), ViewerError> {
        match &self.buffer {
            Some(buffer) => render(&mut self.canvas, &self.view, buffer, &self.config),
            None => Ok(()),
        }
    }

    /// Saving is not supported; the request is logged and nothing is written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ViewerError> {
        log::warn!("save is not implemented, ignoring {}", path.as_ref().display());
        Ok(())
    }
}
