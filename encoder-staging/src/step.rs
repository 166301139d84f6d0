use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use serde::Serialize;

/// A single pre- or post-build action handed over to the build host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildStep {
    Announce {
        message: String,
    },
    Delete {
        pattern: PathBuf,
        force: bool,
        quiet: bool,
        recursive: bool,
    },
    Copy {
        source: PathBuf,
        destination: PathBuf,
        recursive: bool,
        overwrite: bool,
        override_read_only: bool,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StepKind {
    Announce,
    Delete,
    Copy,
}

impl BuildStep {
    pub fn announce(message: impl Into<String>) -> Self {
        Self::Announce {
            message: message.into(),
        }
    }

    /// Forced, quiet and recursive removal of every file matching the pattern.
    pub fn delete_files(pattern: impl Into<PathBuf>) -> Self {
        Self::Delete {
            pattern: pattern.into(),
            force: true,
            quiet: true,
            recursive: true,
        }
    }

    /// Recursive copy that overwrites existing and read-only files.
    pub fn copy_files(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self::Copy {
            source: source.into(),
            destination: destination.into(),
            recursive: true,
            overwrite: true,
            override_read_only: true,
        }
    }

    pub fn kind(&self) -> StepKind {
        match self {
            BuildStep::Announce { .. } => StepKind::Announce,
            BuildStep::Delete { .. } => StepKind::Delete,
            BuildStep::Copy { .. } => StepKind::Copy,
        }
    }

    /// Paths this step reads from or writes to
    pub fn paths(&self) -> Vec<&Path> {
        match self {
            BuildStep::Announce { .. } => vec![],
            BuildStep::Delete { pattern, .. } => vec![pattern.as_path()],
            BuildStep::Copy {
                source,
                destination,
                ..
            } => vec![source.as_path(), destination.as_path()],
        }
    }
}

/// Renders the step as the equivalent Windows command line.
impl Display for BuildStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildStep::Announce { message } => write!(f, "echo {}", message),
            BuildStep::Delete {
                pattern,
                force,
                quiet,
                recursive,
            } => {
                write!(f, "del")?;
                if *force {
                    write!(f, " /f")?;
                }
                if *quiet {
                    write!(f, " /q")?;
                }
                if *recursive {
                    write!(f, " /s")?;
                }
                write!(f, " \"{}\"", pattern.display())
            }
            BuildStep::Copy {
                source,
                destination,
                recursive,
                overwrite,
                override_read_only,
            } => {
                write!(
                    f,
                    "xcopy \"{}\" \"{}\"",
                    source.display(),
                    destination.display()
                )?;
                if *override_read_only {
                    write!(f, " /R")?;
                }
                if *overwrite {
                    write!(f, " /Y")?;
                }
                if *recursive {
                    write!(f, " /S")?;
                }
                Ok(())
            }
        }
    }
}
