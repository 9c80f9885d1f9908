use anyhow::{Context, Result};
use std::f64::consts::PI;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Sample rate of every generated fixture.
pub const FIXTURE_RATE: u32 = 8000;

/// Get the workspace root directory
pub fn workspace_root() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let mut path = PathBuf::from(manifest_dir);
    path.pop(); // Go up from xtask to workspace root
    path
}

fn cargo() -> Command {
    let mut cmd = Command::new(std::env::var("CARGO").unwrap_or_else(|_| "cargo".into()));
    cmd.current_dir(workspace_root());
    cmd
}

pub fn build_command() -> Command {
    let mut cmd = cargo();
    cmd.args(["build", "--workspace"]);
    cmd
}

pub fn test_command() -> Command {
    let mut cmd = cargo();
    cmd.args(["test", "--workspace"]);
    cmd
}

pub fn clippy_command() -> Command {
    let mut cmd = cargo();
    cmd.args(["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"]);
    cmd
}

pub fn fmt_command() -> Command {
    let mut cmd = cargo();
    cmd.args(["fmt", "--all"]);
    cmd
}

pub fn bench_command() -> Command {
    let mut cmd = cargo();
    cmd.args(["bench", "--bench", "bench_render"]);
    cmd
}

/// One-shot render through the release viewer binary.
pub fn render_command(input: &Path, output: &Path, spectrogram: bool) -> Command {
    let mut cmd = cargo();
    cmd.args(["run", "-r", "-p", "wavescope-viewer", "--"]);
    cmd.arg(input).arg("-o").arg(output);
    if spectrogram {
        cmd.args(["--view", "spectrogram"]);
    }
    cmd
}

/// A WAV file the fixture generator knows how to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixture {
    /// One second of a 440 Hz tone.
    Tone,
    /// One second of digital silence.
    Silence,
    /// Linear sweep from 100 Hz to 3.9 kHz over two seconds.
    Chirp,
    /// Valid header, no frames.
    Empty,
    /// Two channels; the viewer rejects it.
    Stereo,
    /// 8-bit samples; the viewer rejects it.
    EightBit,
}

impl Fixture {
    pub const ALL: [Fixture; 6] = [
        Fixture::Tone,
        Fixture::Silence,
        Fixture::Chirp,
        Fixture::Empty,
        Fixture::Stereo,
        Fixture::EightBit,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            Fixture::Tone => "tone_440.wav",
            Fixture::Silence => "silence.wav",
            Fixture::Chirp => "chirp.wav",
            Fixture::Empty => "empty.wav",
            Fixture::Stereo => "stereo.wav",
            Fixture::EightBit => "eight_bit.wav",
        }
    }

    fn spec(&self) -> hound::WavSpec {
        let (channels, bits_per_sample) = match self {
            Fixture::Stereo => (2, 16),
            Fixture::EightBit => (1, 8),
            _ => (1, 16),
        };
        hound::WavSpec {
            channels,
            sample_rate: FIXTURE_RATE,
            bits_per_sample,
            sample_format: hound::SampleFormat::Int,
        }
    }

    /// Normalised samples in `[-1, 1]`, one per frame.
    fn signal(&self) -> Vec<f64> {
        let rate = FIXTURE_RATE as f64;
        let tone = |freq: f64, frames: usize| -> Vec<f64> {
            (0..frames)
                .map(|n| (2.0 * PI * freq * n as f64 / rate).sin() * 0.5)
                .collect()
        };
        match self {
            Fixture::Tone | Fixture::Stereo | Fixture::EightBit => tone(440.0, FIXTURE_RATE as usize),
            Fixture::Silence => vec![0.0; FIXTURE_RATE as usize],
            Fixture::Empty => Vec::new(),
            Fixture::Chirp => {
                let (f0, f1, secs) = (100.0, 3900.0, 2.0);
                let k = (f1 - f0) / secs;
                (0..(rate * secs) as usize)
                    .map(|n| {
                        let t = n as f64 / rate;
                        (2.0 * PI * (f0 * t + 0.5 * k * t * t)).sin() * 0.5
                    })
                    .collect()
            }
        }
    }

    pub fn write(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(self.file_name());
        let spec = self.spec();
        let mut writer = hound::WavWriter::create(&path, spec)
            .with_context(|| format!("creating {}", path.display()))?;
        for s in self.signal() {
            for _ in 0..spec.channels {
                if spec.bits_per_sample == 8 {
                    writer.write_sample((s * i8::MAX as f64) as i8)?;
                } else {
                    writer.write_sample((s * i16::MAX as f64) as i16)?;
                }
            }
        }
        writer.finalize()?;
        Ok(path)
    }
}

/// Write every fixture into `dir`, creating it if needed.
pub fn fixtures_command(dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    Fixture::ALL.iter().map(|f| f.write(dir)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(cmd: &Command) -> Vec<String> {
        cmd.get_args()
            .map(|a| a.to_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn cargo_commands_cover_the_workspace() {
        assert!(args(&build_command()).contains(&"--workspace".to_string()));
        assert!(args(&test_command()).contains(&"test".to_string()));
        let clippy = args(&clippy_command());
        assert!(clippy.contains(&"clippy".to_string()));
        assert!(clippy.contains(&"warnings".to_string()));
        assert!(args(&fmt_command()).contains(&"fmt".to_string()));
        assert!(args(&bench_command()).contains(&"bench_render".to_string()));
        assert_eq!(build_command().get_current_dir(), Some(workspace_root().as_path()));
    }

    #[test]
    fn render_command_forwards_paths() {
        let cmd = render_command(Path::new("in.wav"), Path::new("out.png"), true);
        let a = args(&cmd);
        assert!(a.contains(&"wavescope-viewer".to_string()));
        assert!(a.contains(&"in.wav".to_string()));
        assert!(a.contains(&"out.png".to_string()));
        assert!(a.contains(&"spectrogram".to_string()));
        let plain = args(&render_command(Path::new("in.wav"), Path::new("out.png"), false));
        assert!(!plain.contains(&"--view".to_string()));
    }

    #[test]
    fn fixtures_have_expected_layout() {
        let dir = tempfile::tempdir().unwrap();
        let written = fixtures_command(&dir.path().join("nested")).unwrap();
        assert_eq!(written.len(), Fixture::ALL.len());

        let tone = hound::WavReader::open(&written[0]).unwrap();
        assert_eq!(tone.spec().channels, 1);
        assert_eq!(tone.spec().bits_per_sample, 16);
        assert_eq!(tone.duration(), FIXTURE_RATE);

        let chirp = hound::WavReader::open(dir.path().join("nested/chirp.wav")).unwrap();
        assert_eq!(chirp.duration(), 2 * FIXTURE_RATE);

        let empty = hound::WavReader::open(dir.path().join("nested/empty.wav")).unwrap();
        assert_eq!(empty.duration(), 0);

        let stereo = hound::WavReader::open(dir.path().join("nested/stereo.wav")).unwrap();
        assert_eq!(stereo.spec().channels, 2);
        assert_eq!(stereo.duration(), FIXTURE_RATE);

        let eight = hound::WavReader::open(dir.path().join("nested/eight_bit.wav")).unwrap();
        assert_eq!(eight.spec().bits_per_sample, 8);
    }

    #[test]
    fn silence_is_all_zero() {
        assert!(Fixture::Silence.signal().iter().all(|&s| s == 0.0));
        assert!(Fixture::Tone.signal().iter().any(|&s| s != 0.0));
    }
}
