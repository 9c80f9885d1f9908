//! Test intent: verifies the wavescope binary end to end, in one-shot and
//! interactive modes, including how it reports failures.

use assert_cmd::Command;
use std::f64::consts::PI;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_tone(dir: &Path, name: &str, freq: f64, frames: usize) -> PathBuf {
    let path = dir.join(name);
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 8000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, spec).unwrap();
    for n in 0..frames {
        let s = (2.0 * PI * freq * n as f64 / 8000.0).sin() * 12000.0;
        writer.write_sample(s as i16).unwrap();
    }
    writer.finalize().unwrap();
    path
}

fn viewer() -> Command {
    Command::cargo_bin("wavescope").unwrap()
}

#[test]
fn one_shot_writes_time_domain_png() {
    let dir = TempDir::new().unwrap();
    let wav = write_tone(dir.path(), "tone.wav", 440.0, 8000);
    let png = dir.path().join("tone.png");
    let mut cmd = viewer();
    cmd.arg(&wav).arg("-o").arg(&png);
    cmd.assert().success();
    let img = image::open(&png).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (640, 480));
}

#[test]
fn one_shot_spectrogram_with_options() {
    let dir = TempDir::new().unwrap();
    let wav = write_tone(dir.path(), "tone.wav", 1000.0, 8000);
    let png = dir.path().join("spec.png");
    let mut cmd = viewer();
    cmd.arg(&wav)
        .args(["--view", "spectrogram", "--colormap", "viridis"])
        .args(["--width", "320", "--height", "240"])
        .args(["--segment-len", "128", "--overlap", "64"])
        .arg("--output")
        .arg(&png);
    let out = cmd.assert().success().get_output().stdout.clone();
    assert!(String::from_utf8(out).unwrap().contains("spec.png"));
    let img = image::open(&png).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (320, 240));
}

#[test]
fn silent_spectrogram_needs_a_log_floor() {
    let dir = TempDir::new().unwrap();
    let wav = write_tone(dir.path(), "silence.wav", 0.0, 4000);
    let png = dir.path().join("silence.png");

    let mut strict = viewer();
    strict
        .arg(&wav)
        .args(["--view", "spectrogram", "-o"])
        .arg(&png);
    strict.assert().failure();
    assert!(!png.exists());

    let mut floored = viewer();
    floored
        .arg(&wav)
        .args(["--view", "spectrogram", "--log-floor", "1e-12", "-o"])
        .arg(&png);
    floored.assert().success();
    assert!(png.exists());
}

#[test]
fn degenerate_log_floor_fails_before_rendering() {
    let dir = TempDir::new().unwrap();
    let wav = write_tone(dir.path(), "tone.wav", 440.0, 4000);
    let png = dir.path().join("floor.png");
    for floor in ["--log-floor=0", "--log-floor=-1", "--log-floor=NaN"] {
        let mut cmd = viewer();
        cmd.arg(&wav)
            .args(["--view", "spectrogram", floor, "-o"])
            .arg(&png);
        let out = cmd.assert().failure().get_output().stderr.clone();
        assert!(String::from_utf8_lossy(&out).contains("log floor"), "{floor}");
        assert!(!png.exists());
    }
}

#[test]
fn window_option_changes_the_spectrogram() {
    let dir = TempDir::new().unwrap();
    let wav = write_tone(dir.path(), "tone.wav", 1000.0, 8000);
    let mut images = Vec::new();
    for window in ["tukey", "hann", "rectangular"] {
        let png = dir.path().join(format!("{window}.png"));
        let mut cmd = viewer();
        cmd.arg(&wav)
            .args(["--view", "spectrogram", "--window", window, "-o"])
            .arg(&png);
        cmd.assert().success();
        images.push(image::open(&png).unwrap().to_rgb8());
    }
    assert_ne!(images[0], images[1]);
    assert_ne!(images[1], images[2]);
}

#[test]
fn non_audio_input_fails() {
    let dir = TempDir::new().unwrap();
    let bogus = dir.path().join("notes.txt");
    std::fs::write(&bogus, "definitely not a wave file").unwrap();
    let png = dir.path().join("out.png");
    let mut cmd = viewer();
    cmd.arg(&bogus).arg("-o").arg(&png);
    let out = cmd.assert().failure().get_output().stderr.clone();
    assert!(!String::from_utf8_lossy(&out).is_empty());
    assert!(!png.exists());
}

#[test]
fn missing_input_without_interactive_fails() {
    viewer().assert().failure();
}

#[test]
fn unknown_colormap_is_rejected_by_the_parser() {
    let mut cmd = viewer();
    cmd.args(["x.wav", "--colormap", "hot"]);
    cmd.assert().failure();
}

#[test]
fn interactive_session_survives_errors() {
    let dir = TempDir::new().unwrap();
    let wav = write_tone(dir.path(), "tone.wav", 440.0, 8000);
    let png = dir.path().join("live.png");
    let script = format!(
        "open {missing}\nfrobnicate\nhelp\nopen {wav}\nview spectrogram\ncmap magma\nmenu\nsave\nexit\nview time\n",
        missing = dir.path().join("missing.wav").display(),
        wav = wav.display(),
    );
    let mut cmd = viewer();
    cmd.arg("--interactive").arg("-o").arg(&png).write_stdin(script);
    let assert = cmd.assert().success();
    let output = assert.get_output();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown command `frobnicate`"));
    assert!(stdout.contains("[x] Spectrogram"));
    assert!(stdout.contains("[x] magma"));
    assert!(png.exists());
}
