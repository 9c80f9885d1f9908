//! # wavescope - mono WAV waveform and spectrogram viewer
//!
//! Loads a single-channel 16-bit PCM WAV file and renders it either as a
//! time-domain amplitude trace or as a log-magnitude spectrogram onto an RGB
//! canvas, with a selectable colour map.
//!
//! ## Pipeline
//!
//! ```text
//! path -> audio::decode -> AudioBuffer -+-> visual::render (time domain)
//!                                       |
//!                                       +-> spectrogram::transform -> log scale -> visual::render
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use wavescope::config::RenderConfig;
//! use wavescope::session::{Session, ViewMode};
//! use wavescope::visual::Colormap;
//!
//! let mut session = Session::new(RenderConfig::default())?;
//! session.open("speech.wav")?;
//! session.set_mode(ViewMode::Spectrogram)?;
//! session.select_colormap(Colormap::Viridis)?;
//! session.canvas().save_png("speech.png")?;
//! # Ok::<(), wavescope::ViewerError>(())
//! ```
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or https://www.apache.org/licenses/LICENSE-2.0)
//! - MIT license ([LICENSE-MIT](LICENSE-MIT) or https://opensource.org/licenses/MIT)
//!
//! at your option.

/// Error type shared by every stage of the pipeline.
pub mod error;

/// Sample decoding
///
/// Reads the RIFF/WAVE header and 16-bit PCM frames into an [`audio::AudioBuffer`].
pub mod audio;

/// Window functions for short-time spectral analysis.
pub mod window;

/// Short-time Fourier analysis producing power spectral density grids.
pub mod spectrogram;

/// Canvas, colour maps and plot rendering.
pub mod visual;

/// Rendering configuration with defaults matching the viewer window.
pub mod config;

/// Explicit viewer state: loaded buffer, view selection and canvas.
pub mod session;

pub use audio::{decode, AudioBuffer};
pub use error::ViewerError;
pub use spectrogram::{transform, SpectrogramResult};
