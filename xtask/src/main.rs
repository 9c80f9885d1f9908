use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitStatus;
use xtask::*;

#[derive(Parser)]
#[command(author, version, about = "Development tasks for wavescope")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Build,
    Test,
    Clippy,
    Fmt,
    /// fmt followed by clippy
    Analyze,
    Bench,
    /// Write the WAV fixtures used for manual checks
    Fixtures {
        #[arg(default_value = "target/fixtures")]
        dir: PathBuf,
    },
    /// Render a WAV file to PNG with the release viewer
    Render {
        input: PathBuf,
        output: PathBuf,
        #[arg(long)]
        spectrogram: bool,
    },
}

fn run(command: Commands) -> anyhow::Result<ExitStatus> {
    let status = match command {
        Commands::Build => build_command().status()?,
        Commands::Test => test_command().status()?,
        Commands::Clippy => clippy_command().status()?,
        Commands::Fmt => fmt_command().status()?,
        Commands::Analyze => {
            let fmt = fmt_command().status()?;
            if !fmt.success() {
                fmt
            } else {
                clippy_command().status()?
            }
        }
        Commands::Bench => bench_command().status()?,
        Commands::Fixtures { dir } => {
            let dir = if dir.is_absolute() {
                dir
            } else {
                workspace_root().join(dir)
            };
            for path in fixtures_command(&dir)? {
                println!("{}", path.display());
            }
            return Ok(ExitStatus::default());
        }
        Commands::Render {
            input,
            output,
            spectrogram,
        } => render_command(&input, &output, spectrogram).status()?,
    };
    Ok(status)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let status = run(cli.command)?;
    std::process::exit(status.code().unwrap_or(1));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_fixtures_default_dir() {
        let cli = Cli::parse_from(["xtask", "fixtures"]);
        match cli.command {
            Commands::Fixtures { dir } => assert_eq!(dir, PathBuf::from("target/fixtures")),
            _ => panic!("parsed wrong command"),
        }
    }

    #[test]
    fn parse_render_flags() {
        let cli = Cli::parse_from(["xtask", "render", "a.wav", "a.png", "--spectrogram"]);
        match cli.command {
            Commands::Render {
                input,
                output,
                spectrogram,
            } => {
                assert_eq!(input, PathBuf::from("a.wav"));
                assert_eq!(output, PathBuf::from("a.png"));
                assert!(spectrogram);
            }
            _ => panic!("parsed wrong command"),
        }
    }
}
