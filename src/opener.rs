use std::fmt::{Display, Formatter};
use std::io;
use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, Stdio};

use spdlog::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    /// Linux, the BSDs and anything else with a freedesktop opener
    Unix,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Unix
        }
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Windows => write!(f, "windows"),
            Platform::MacOs => write!(f, "macos"),
            Platform::Unix => write!(f, "unix"),
        }
    }
}

/// Launches the default application for a file.
///
/// Implementations only report whether the launch itself worked, they never
/// wait for the application to exit.
pub trait FileOpener {
    fn open(&self, path: &Path) -> io::Result<()>;

    /// Short name of the mechanism, used in logs.
    fn describe(&self) -> String;
}

/// Windows file association through ShellExecute.
pub struct ShellOpener;

impl FileOpener for ShellOpener {
    fn open(&self, path: &Path) -> io::Result<()> {
        debug!("Opening {} with the shell association", path.display());
        open::that_detached(path)
    }

    fn describe(&self) -> String {
        "shell association".to_string()
    }
}

/// External opener command, such as `open` or `xdg-open`.
pub struct CommandOpener {
    program: String,
    args: Vec<String>,
}

impl CommandOpener {
    pub fn new(program: &str) -> Self {
        CommandOpener {
            program: program.to_string(),
            args: vec![],
        }
    }

    /// Builds an opener from a whitespace separated command line, e.g. `code -n`.
    pub fn from_command_line(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace();
        let program = parts.next()?;
        Some(CommandOpener {
            program: program.to_string(),
            args: parts.map(|s| s.to_string()).collect(),
        })
    }
}

impl FileOpener for CommandOpener {
    fn open(&self, path: &Path) -> io::Result<()> {
        debug!("Opening {} with {}", path.display(), self.describe());
        if self.args.is_empty() {
            return open::with_detached(path, self.program.as_str());
        }

        // open::with_detached takes a bare program, extra arguments need a plain spawn
        Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .spawn()?;
        Ok(())
    }

    fn describe(&self) -> String {
        let mut command = self.program.clone();
        for arg in &self.args {
            command.push(' ');
            command.push_str(arg);
        }
        command
    }
}

pub fn opener_for(platform: Platform) -> Box<dyn FileOpener> {
    match platform {
        Platform::Windows => Box::new(ShellOpener),
        Platform::MacOs => Box::new(CommandOpener::new("open")),
        Platform::Unix => Box::new(CommandOpener::new("xdg-open")),
    }
}

/// Platform opener, unless a custom command line is configured.
pub fn select_opener(platform: Platform, custom: Option<&str>) -> Box<dyn FileOpener> {
    let opener: Box<dyn FileOpener> = match custom.and_then(CommandOpener::from_command_line) {
        Some(opener) => Box::new(opener),
        None => opener_for(platform),
    };
    debug!("Using opener '{}' on {}", opener.describe(), platform);
    opener
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened,
    /// The opener executable itself is missing
    OpenerNotFound,
    Failed(String),
}

pub fn try_open(opener: &dyn FileOpener, path: &Path) -> OpenOutcome {
    match opener.open(path) {
        Ok(()) => OpenOutcome::Opened,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("Opener not found for {}: {}", path.display(), e);
            OpenOutcome::OpenerNotFound
        }
        Err(e) => {
            debug!("Error opening {}: {}", path.display(), e);
            OpenOutcome::Failed(e.to_string())
        }
    }
}
