use clap::Parser;
use log::LevelFilter;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use wavescope::config::{RenderConfig, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use wavescope::session::Session;
use wavescope::spectrogram::{LogScale, SpectrogramParams, DEFAULT_SEGMENT_LEN};
use wavescope_viewer::{Action, ColormapArg, Flow, Shell, ViewArg, WindowArg};

/// View a mono 16-bit WAV file as a waveform or spectrogram rendered to PNG.
#[derive(Parser)]
#[command(name = "wavescope", version)]
struct Args {
    /// WAV file to open on start-up
    input: Option<PathBuf>,

    /// Where the rendered canvas is written
    #[arg(short, long, default_value = "wavescope.png")]
    output: PathBuf,

    /// Initial view
    #[arg(long, value_enum, default_value_t = ViewArg::TimeDomain)]
    view: ViewArg,

    /// Spectrogram colour map
    #[arg(long, value_enum, default_value_t = ColormapArg::Jet)]
    colormap: ColormapArg,

    /// Canvas width in pixels
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: u32,

    /// Samples per spectrogram segment
    #[arg(long, default_value_t = DEFAULT_SEGMENT_LEN)]
    segment_len: usize,

    /// Samples shared by consecutive segments (default: segment length / 8)
    #[arg(long)]
    overlap: Option<usize>,

    /// Taper applied to each spectrogram segment
    #[arg(long, value_enum, default_value_t = WindowArg::Tukey)]
    window: WindowArg,

    /// Clamp spectrogram power to this positive floor before taking the logarithm
    #[arg(long)]
    log_floor: Option<f64>,

    /// Read menu commands from stdin instead of rendering once
    #[arg(short, long)]
    interactive: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn render_config(&self) -> RenderConfig {
        RenderConfig {
            width: self.width,
            height: self.height,
            spectrogram: SpectrogramParams {
                segment_len: self.segment_len,
                overlap: self.overlap,
                window: self.window.into(),
            },
            log_scale: self.log_floor.map_or(LogScale::Strict, LogScale::Floor),
            ..Default::default()
        }
    }

    fn level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.level())
        .format_timestamp(None)
        .init();

    let session = Session::new(args.render_config())?;
    let mut shell = Shell::new(session, args.output.clone());
    let mut stdout = io::stdout();

    // No buffer is loaded yet, so these only record the selection.
    shell.dispatch(Action::View(args.view.into()), &mut stdout)?;
    shell.dispatch(Action::SelectColormap(args.colormap.into()), &mut stdout)?;

    if !args.interactive {
        let input = args
            .input
            .ok_or("an input file is required unless --interactive is given")?;
        shell.dispatch(Action::Open(input), &mut stdout)?;
        println!("{}", shell.output().display());
        return Ok(());
    }

    if let Some(input) = args.input {
        if let Err(e) = shell.dispatch(Action::Open(input), &mut stdout) {
            report(&e);
        }
    }
    run_interactive(&mut shell, io::stdin().lock(), &mut stdout)?;
    Ok(())
}

/// Read one command per line until `exit` or end of input. Failures are
/// reported and the loop keeps going.
fn run_interactive<R: BufRead, W: Write>(
    shell: &mut Shell,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let action = match line.parse::<Action>() {
            Ok(action) => action,
            Err(e) => {
                report(&e);
                continue;
            }
        };
        match shell.dispatch(action, out) {
            Ok(Flow::Exit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => report(&e),
        }
        out.flush()?;
    }
    Ok(())
}

fn report(e: &dyn Error) {
    log::error!("{e}");
    eprintln!("error: {e}");
}
