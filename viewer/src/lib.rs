use clap::ValueEnum;
use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use wavescope::session::{Session, ViewMode};
use wavescope::visual::Colormap;
use wavescope::window::WindowKind;
use wavescope::ViewerError;

/// View selection as spelled on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewArg {
    TimeDomain,
    Spectrogram,
}

impl From<ViewArg> for ViewMode {
    fn from(v: ViewArg) -> Self {
        match v {
            ViewArg::TimeDomain => ViewMode::TimeDomain,
            ViewArg::Spectrogram => ViewMode::Spectrogram,
        }
    }
}

/// Colour map as spelled on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColormapArg {
    Jet,
    Viridis,
    Plasma,
    Inferno,
    Magma,
    Greys,
}

impl From<ColormapArg> for Colormap {
    fn from(c: ColormapArg) -> Self {
        match c {
            ColormapArg::Jet => Colormap::Jet,
            ColormapArg::Viridis => Colormap::Viridis,
            ColormapArg::Plasma => Colormap::Plasma,
            ColormapArg::Inferno => Colormap::Inferno,
            ColormapArg::Magma => Colormap::Magma,
            ColormapArg::Greys => Colormap::Greys,
        }
    }
}

/// Segment taper as spelled on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowArg {
    /// Tukey with a quarter of the segment in the tapers
    Tukey,
    Hann,
    Rectangular,
}

impl From<WindowArg> for WindowKind {
    fn from(w: WindowArg) -> Self {
        match w {
            WindowArg::Tukey => WindowKind::default(),
            WindowArg::Hann => WindowKind::Hann,
            WindowArg::Rectangular => WindowKind::Rectangular,
        }
    }
}

/// A menu action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// File → Open File... (Ctrl+O)
    Open(PathBuf),
    /// File → Save. Accepted but writes nothing.
    Save(Option<PathBuf>),
    /// File → Exit (Ctrl+Q)
    Exit,
    /// View → Time Domain / Spectrogram
    View(ViewMode),
    /// Tools → Select Colour Map
    SelectColormap(Colormap),
    /// Print the menu with the current selections.
    Help,
}

/// Why a command line could not be turned into an [`Action`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseActionError {
    Empty,
    UnknownCommand(String),
    MissingArgument(&'static str),
    UnknownView(String),
    UnknownColormap(String),
}

impl fmt::Display for ParseActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseActionError::Empty => write!(f, "empty command"),
            ParseActionError::UnknownCommand(c) => {
                write!(f, "unknown command `{c}` (try `help`)")
            }
            ParseActionError::MissingArgument(what) => write!(f, "missing {what}"),
            ParseActionError::UnknownView(v) => {
                write!(f, "unknown view `{v}` (expected `time` or `spectrogram`)")
            }
            ParseActionError::UnknownColormap(c) => {
                let names: Vec<_> = Colormap::ALL.iter().map(|c| c.name()).collect();
                write!(f, "unknown colour map `{c}` (expected one of {})", names.join(", "))
            }
        }
    }
}

impl Error for ParseActionError {}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };
        let arg = (!rest.is_empty()).then_some(rest);
        match command.to_ascii_lowercase().as_str() {
            "" => Err(ParseActionError::Empty),
            "open" | "ctrl+o" | "^o" => arg
                .map(|p| Action::Open(PathBuf::from(p)))
                .ok_or(ParseActionError::MissingArgument("file path")),
            "save" => Ok(Action::Save(arg.map(PathBuf::from))),
            "exit" | "quit" | "ctrl+q" | "^q" => Ok(Action::Exit),
            "view" => match arg.map(str::to_ascii_lowercase).as_deref() {
                Some("time" | "time-domain" | "time domain") => {
                    Ok(Action::View(ViewMode::TimeDomain))
                }
                Some("spectrogram") => Ok(Action::View(ViewMode::Spectrogram)),
                Some(other) => Err(ParseActionError::UnknownView(other.to_string())),
                None => Err(ParseActionError::MissingArgument("view name")),
            },
            "colormap" | "cmap" => {
                let name = arg.ok_or(ParseActionError::MissingArgument("colour map name"))?;
                name.parse::<Colormap>()
                    .map(Action::SelectColormap)
                    .map_err(|_| ParseActionError::UnknownColormap(name.to_string()))
            }
            "help" | "menu" | "?" => Ok(Action::Help),
            other => Err(ParseActionError::UnknownCommand(other.to_string())),
        }
    }
}

/// Whether the shell keeps reading commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Text rendering of the menu bar, with check marks on the active view and
/// colour map.
pub fn menu_text(session: &Session) -> String {
    let view = session.view();
    let check = |on: bool| if on { "[x]" } else { "[ ]" };
    let mut out = String::new();
    out.push_str("File\n  Open File...    open <path>   (Ctrl+O)\n");
    out.push_str("  Save            save [path]   (not implemented)\n");
    out.push_str("  Exit            exit          (Ctrl+Q)\n");
    out.push_str("Edit\n");
    out.push_str("View\n");
    for mode in ViewMode::ALL {
        let cmd = match mode {
            ViewMode::TimeDomain => "view time",
            ViewMode::Spectrogram => "view spectrogram",
        };
        out.push_str(&format!("  {} {:<12} {cmd}\n", check(view.is_mode(mode)), mode.name()));
    }
    out.push_str("Tools\n  Select Colour Map\n");
    for c in Colormap::ALL {
        out.push_str(&format!(
            "    {} {:<10} colormap {}\n",
            check(view.is_selected(c)),
            c.name(),
            c.name()
        ));
    }
    out.push_str("Help\n");
    out
}

/// Dispatches actions to a [`Session`] and publishes the canvas to `output`
/// after every redraw.
pub struct Shell {
    session: Session,
    output: PathBuf,
}

impl Shell {
    pub fn new(session: Session, output: PathBuf) -> Self {
        Self { session, output }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Run one action. Menu text for [`Action::Help`] is written to `out`.
    pub fn dispatch<W: std::io::Write>(
        &mut self,
        action: Action,
        out: &mut W,
    ) -> Result<Flow, ViewerError> {
        log::debug!("dispatch {action:?}");
        match action {
            Action::Open(path) => {
                self.session.open(&path)?;
                self.publish()?;
            }
            Action::Save(path) => {
                let path = path.unwrap_or_else(|| self.output.with_extension("wav"));
                self.session.save(path)?;
            }
            Action::Exit => return Ok(Flow::Exit),
            Action::View(mode) => {
                self.session.set_mode(mode)?;
                self.publish()?;
            }
            Action::SelectColormap(c) => {
                self.session.select_colormap(c)?;
                self.publish()?;
            }
            Action::Help => {
                out.write_all(menu_text(&self.session).as_bytes())?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Write the canvas to the output path once something has been drawn.
    fn publish(&self) -> Result<(), ViewerError> {
        if self.session.canvas().axes().is_some() {
            self.session.canvas().save_png(&self.output)?;
            log::info!("canvas written to {}", self.output.display());
        }
        Ok(())
    }
}
