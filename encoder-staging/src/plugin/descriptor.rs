use std::path::{Path, PathBuf};

use serde::Serialize;

/// An installed plugin as reported by the host's plugin registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginDescriptor {
    identifier: String,
    descriptor_path: PathBuf,
}

impl PluginDescriptor {
    pub fn new(identifier: impl Into<String>, descriptor_path: impl Into<PathBuf>) -> Self {
        Self {
            identifier: identifier.into(),
            descriptor_path: descriptor_path.into(),
        }
    }

    /// Identifies the plugin by the full path of its manifest file
    pub fn from_manifest_path(descriptor_path: impl Into<PathBuf>) -> Self {
        let descriptor_path = descriptor_path.into();
        Self {
            identifier: descriptor_path.display().to_string(),
            descriptor_path,
        }
    }

    pub fn identifier(&self) -> &str {
        self.identifier.as_str()
    }

    pub fn descriptor_path(&self) -> &Path {
        self.descriptor_path.as_path()
    }

    pub fn directory(&self) -> Option<&Path> {
        self.descriptor_path.parent()
    }
}
