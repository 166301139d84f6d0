use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::{Error, Result, StagingLayout};

/// Destination folders inside the consumer plugin.
/// They only exist as a pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsumerPaths {
    pub lib_folder: PathBuf,
    pub include_folder: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPaths {
    pub project_path: PathBuf,
    pub binary_folder: PathBuf,
    pub source_include_folder: PathBuf,
    pub consumer: Option<ConsumerPaths>,
}

impl ResolvedPaths {
    pub fn resolve(
        layout: &StagingLayout,
        consumer_plugin_directory: Option<&Path>,
        project_file: &Path,
        binary_subpath: &str,
    ) -> Result<Self> {
        let project_path = project_directory(project_file)?;

        let binary_folder = project_path
            .join(&layout.binaries_folder)
            .join(binary_subpath)
            .join(&layout.target_name);

        let source_include_folder = project_path
            .join(&layout.source_folder)
            .join(&layout.target_name)
            .join(&layout.public_folder);

        let consumer = consumer_plugin_directory.map(|directory| {
            let library = directory
                .join(&layout.source_folder)
                .join(&layout.third_party_folder)
                .join(&layout.third_party_library_name);

            ConsumerPaths {
                lib_folder: library
                    .join(&layout.lib_folder)
                    .join(&layout.library_platform)
                    .join(&layout.library_configuration),
                include_folder: library.join(&layout.include_folder),
            }
        });

        Ok(Self {
            project_path,
            binary_folder,
            source_include_folder,
            consumer,
        })
    }

    pub fn consumer_lib_folder(&self) -> Option<&Path> {
        self.consumer
            .as_ref()
            .map(|paths| paths.lib_folder.as_path())
    }

    pub fn consumer_include_folder(&self) -> Option<&Path> {
        self.consumer
            .as_ref()
            .map(|paths| paths.include_folder.as_path())
    }
}

/// A project file without a usable parent (`/`, an empty path or a bare file name)
/// can not anchor any of the staging folders.
pub fn project_directory(project_file: &Path) -> Result<PathBuf> {
    match project_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(parent.to_path_buf()),
        _ => Err(Error::ProjectDirectory(project_file.to_path_buf())),
    }
}
