use std::path::PathBuf;
use thiserror::Error;

use crate::BuildStep;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Could not determine the project directory of {0:?}")]
    ProjectDirectory(PathBuf),
    #[error("Failed to discover plugins in {directory:?}: {reason}")]
    Discovery { directory: PathBuf, reason: String },
    #[error("Failed to read plugin manifest {path:?}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Unknown platform {0}")]
    UnknownPlatform(String),
    #[error("Failed to load staging layout from {path:?}")]
    Layout {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Failed to execute `{step}`")]
    Execution {
        step: Box<BuildStep>,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    pub(crate) fn execution(
        step: &BuildStep,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Execution {
            step: Box::new(step.clone()),
            source: source.into(),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
