use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use file_matcher::FilesNamed;

use crate::{BuildStep, Error, Result};

/// Runs build steps on behalf of the build host.
/// Steps are executed strictly in the given order; there is no retry.
pub trait StepExecutor {
    fn execute(&self, step: &BuildStep) -> Result<()>;

    fn execute_all(&self, steps: &[BuildStep]) -> Result<()> {
        for step in steps {
            self.execute(step)?;
        }
        Ok(())
    }
}

/// Executes steps directly on the filesystem, mirroring `echo`, `del /f /q`
/// and `xcopy /R /Y /S`.
///
/// Deleting is best-effort: files that can not be removed (for example
/// because they are still in use) are reported and skipped. Copy failures
/// are returned to the caller.
#[derive(Debug, Clone, Default)]
pub struct FileSystemExecutor;

impl FileSystemExecutor {
    pub fn new() -> Self {
        Self
    }

    fn delete(&self, pattern: &Path, force: bool, recursive: bool) {
        let (directory, wildcard) = split_pattern(pattern);

        if !directory.is_dir() {
            debug!("Nothing to delete in missing {}", directory.display());
            return;
        }

        match matching_files(&directory, &wildcard) {
            Ok(files) => {
                for file in files {
                    if force {
                        if let Err(error) = clear_read_only(&file) {
                            warn!("Could not make {} writable: {}", file.display(), error);
                        }
                    }
                    match fs::remove_file(&file) {
                        Ok(_) => debug!("Deleted {}", file.display()),
                        Err(error) => warn!("Could not delete {}: {}", file.display(), error),
                    }
                }
            }
            Err(error) => warn!("Could not list {}: {}", directory.display(), error),
        }

        if recursive {
            match sub_directories(&directory) {
                Ok(children) => {
                    for child in children {
                        self.delete(&child.join(&wildcard), force, recursive);
                    }
                }
                Err(error) => warn!("Could not list {}: {}", directory.display(), error),
            }
        }
    }

    fn copy(
        &self,
        step: &BuildStep,
        source: &Path,
        destination: &Path,
        options: &CopyFlags,
    ) -> Result<()> {
        let (directory, wildcard) = split_pattern(source);

        if !directory.is_dir() {
            return Err(Error::execution(
                step,
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("{} does not exist", directory.display()),
                ),
            ));
        }

        let files = match matching_files(&directory, &wildcard) {
            Ok(files) => files,
            Err(error) => return Err(Error::execution(step, error)),
        };

        if !files.is_empty() {
            fs::create_dir_all(destination).map_err(|error| Error::execution(step, error))?;
        }

        let mut copy_options = fs_extra::file::CopyOptions::new();
        copy_options.overwrite = true;

        for file in files {
            let file_name = match file.file_name() {
                Some(file_name) => file_name,
                None => continue,
            };
            let target = destination.join(file_name);

            if target.exists() {
                if !options.overwrite {
                    debug!("Keeping existing {}", target.display());
                    continue;
                }
                if options.override_read_only {
                    clear_read_only(&target).map_err(|error| Error::execution(step, error))?;
                }
            }

            fs_extra::file::copy(&file, &target, &copy_options)
                .map_err(|error| Error::execution(step, error))?;
            debug!("Copied {} to {}", file.display(), target.display());
        }

        if options.recursive {
            let children = match sub_directories(&directory) {
                Ok(children) => children,
                Err(error) => return Err(Error::execution(step, error)),
            };
            for child in children {
                if let Some(name) = child.file_name() {
                    self.copy(step, &child.join(&wildcard), &destination.join(name), options)?;
                }
            }
        }

        Ok(())
    }
}

struct CopyFlags {
    recursive: bool,
    overwrite: bool,
    override_read_only: bool,
}

impl StepExecutor for FileSystemExecutor {
    fn execute(&self, step: &BuildStep) -> Result<()> {
        match step {
            BuildStep::Announce { message } => {
                info!("{}", message);
            }
            BuildStep::Delete {
                pattern,
                force,
                quiet: _,
                recursive,
            } => {
                self.delete(pattern, *force, *recursive);
            }
            BuildStep::Copy {
                source,
                destination,
                recursive,
                overwrite,
                override_read_only,
            } => {
                let flags = CopyFlags {
                    recursive: *recursive,
                    overwrite: *overwrite,
                    override_read_only: *override_read_only,
                };
                self.copy(step, source, destination, &flags)?;
            }
        }
        Ok(())
    }
}

/// Splits `dir/*.*` into the directory and the file name wildcard.
/// A pattern that is an existing directory matches all of its files.
fn split_pattern(pattern: &Path) -> (PathBuf, String) {
    if pattern.is_dir() {
        return (pattern.to_path_buf(), "*".to_string());
    }

    let directory = pattern
        .parent()
        .map(|parent| parent.to_path_buf())
        .unwrap_or_default();
    let wildcard = pattern
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "*".to_string());

    (directory, wildcard)
}

fn matching_files(directory: &Path, wildcard: &str) -> core::result::Result<Vec<PathBuf>, String> {
    // like cmd, `*.*` also matches files without an extension
    let wildcard = if wildcard == "*.*" { "*" } else { wildcard };

    let mut files = FilesNamed::wildmatch(wildcard)
        .within(directory)
        .find()
        .map_err(|error| error.to_string())?;
    files.retain(|file| file.is_file());
    files.sort();
    Ok(files)
}

fn sub_directories(directory: &Path) -> io::Result<Vec<PathBuf>> {
    let mut children = vec![];
    for entry in fs::read_dir(directory)? {
        let path = entry?.path();
        if path.is_dir() {
            children.push(path);
        }
    }
    children.sort();
    Ok(children)
}

#[allow(clippy::permissions_set_readonly_false)]
fn clear_read_only(path: &Path) -> io::Result<()> {
    let mut permissions = fs::metadata(path)?.permissions();
    if permissions.readonly() {
        permissions.set_readonly(false);
        fs::set_permissions(path, permissions)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_wildcard_pattern() {
        let (directory, wildcard) = split_pattern(Path::new("/nonexistent/bin/*.*"));
        assert_eq!(directory, PathBuf::from("/nonexistent/bin"));
        assert_eq!(wildcard, "*.*");
    }

    #[test]
    fn split_specific_pattern() {
        let (directory, wildcard) = split_pattern(Path::new("/nonexistent/bin/*.dll"));
        assert_eq!(directory, PathBuf::from("/nonexistent/bin"));
        assert_eq!(wildcard, "*.dll");
    }

    #[test]
    fn delete_in_missing_directory_is_a_no_op() {
        let executor = FileSystemExecutor::new();
        executor
            .execute(&BuildStep::delete_files("/nonexistent/bin/*.*"))
            .unwrap();
    }

    #[test]
    fn copy_from_missing_directory_fails() {
        let executor = FileSystemExecutor::new();
        let result = executor.execute(&BuildStep::copy_files(
            "/nonexistent/bin/*.*",
            "/nonexistent/lib",
        ));
        assert!(matches!(result, Err(Error::Execution { .. })));
    }

    #[test]
    fn forced_delete_removes_read_only_files() {
        let directory = tempfile::tempdir().unwrap();
        let binary = directory.path().join("UnrealGeometryEncoder.dll");
        fs::write(&binary, "old").unwrap();
        let mut permissions = fs::metadata(&binary).unwrap().permissions();
        permissions.set_readonly(true);
        fs::set_permissions(&binary, permissions).unwrap();

        FileSystemExecutor::new()
            .execute(&BuildStep::delete_files(directory.path().join("*.*")))
            .unwrap();

        assert!(!binary.exists());
    }

    #[test]
    fn copy_without_overwrite_keeps_existing_files() {
        let source = tempfile::tempdir().unwrap();
        let destination = tempfile::tempdir().unwrap();
        fs::write(source.path().join("UnrealGeometryEncoder.dll"), "new").unwrap();
        fs::write(source.path().join("UnrealGeometryEncoder.lib"), "new").unwrap();
        fs::write(destination.path().join("UnrealGeometryEncoder.dll"), "old").unwrap();

        let step = BuildStep::Copy {
            source: source.path().join("*.*"),
            destination: destination.path().to_path_buf(),
            recursive: false,
            overwrite: false,
            override_read_only: false,
        };
        FileSystemExecutor::new().execute(&step).unwrap();

        assert_eq!(
            fs::read_to_string(destination.path().join("UnrealGeometryEncoder.dll")).unwrap(),
            "old"
        );
        assert_eq!(
            fs::read_to_string(destination.path().join("UnrealGeometryEncoder.lib")).unwrap(),
            "new"
        );
    }

    #[test]
    fn announce_always_succeeds() {
        FileSystemExecutor::new()
            .execute(&BuildStep::announce("hello"))
            .unwrap();
    }
}
