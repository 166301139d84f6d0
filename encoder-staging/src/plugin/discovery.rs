use std::fs;
use std::path::{Path, PathBuf};

use file_matcher::FilesNamed;

use crate::{project_directory, Error, PluginDescriptor, Result};

pub const PLUGINS_FOLDER: &str = "Plugins";
pub const PLUGIN_MANIFEST_EXTENSION: &str = "uplugin";

/// Enumerates `.uplugin` manifests below a set of plugin root directories.
///
/// A directory holding a manifest is a plugin; its sub-directories are not
/// searched any further. Directories are visited in name order, so the
/// enumeration order is stable between runs.
#[derive(Debug, Clone, Default)]
pub struct PluginDiscovery {
    roots: Vec<PathBuf>,
}

impl PluginDiscovery {
    pub fn new(roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            roots: roots.into_iter().map(|root| root.into()).collect(),
        }
    }

    /// Discovers the plugins installed in the `Plugins` folder next to the project file
    pub fn for_project(project_file: impl AsRef<Path>) -> Result<Self> {
        let project_path = project_directory(project_file.as_ref())?;
        Ok(Self::new([project_path.join(PLUGINS_FOLDER)]))
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    pub fn roots(&self) -> &[PathBuf] {
        self.roots.as_slice()
    }

    pub fn descriptors(&self) -> Result<Vec<PluginDescriptor>> {
        let mut descriptors = vec![];
        for root in &self.roots {
            if !root.is_dir() {
                debug!("Skipping missing plugin root {}", root.display());
                continue;
            }
            Self::scan_directory(root, &mut descriptors)?;
        }
        Ok(descriptors)
    }

    fn scan_directory(directory: &Path, descriptors: &mut Vec<PluginDescriptor>) -> Result<()> {
        let mut manifests = FilesNamed::wildmatch(format!("*.{}", PLUGIN_MANIFEST_EXTENSION))
            .within(directory)
            .find()
            .map_err(|error| Error::Discovery {
                directory: directory.to_path_buf(),
                reason: error.to_string(),
            })?;

        if !manifests.is_empty() {
            manifests.sort();
            descriptors.extend(manifests.into_iter().map(PluginDescriptor::from_manifest_path));
            return Ok(());
        }

        let mut children = fs::read_dir(directory)
            .and_then(|entries| {
                entries
                    .map(|entry| entry.map(|entry| entry.path()))
                    .collect::<std::io::Result<Vec<PathBuf>>>()
            })
            .map_err(|error| Error::Discovery {
                directory: directory.to_path_buf(),
                reason: error.to_string(),
            })?;
        children.retain(|child| child.is_dir());
        children.sort();

        for child in children {
            Self::scan_directory(&child, descriptors)?;
        }
        Ok(())
    }
}
