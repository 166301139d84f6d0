use std::path::Path;

use serde::Serialize;
use strum::Display;

use crate::{BuildStep, ResolvedPaths, Result, StagingLayout};

const ALL_FILES: &str = "*.*";

/// When the build host runs a group of steps relative to compilation
#[derive(Debug, Copy, Clone, PartialEq, Eq, Display)]
pub enum BuildPhase {
    #[strum(serialize = "pre-build")]
    PreBuild,
    #[strum(serialize = "post-build")]
    PostBuild,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StagingPlan {
    pub pre_build_steps: Vec<BuildStep>,
    pub post_build_steps: Vec<BuildStep>,
}

impl StagingPlan {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.pre_build_steps.is_empty() && self.post_build_steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pre_build_steps.len() + self.post_build_steps.len()
    }

    pub fn steps(&self, phase: BuildPhase) -> &[BuildStep] {
        match phase {
            BuildPhase::PreBuild => self.pre_build_steps.as_slice(),
            BuildPhase::PostBuild => self.post_build_steps.as_slice(),
        }
    }
}

/// Turns resolved project and consumer folders into the ordered
/// pre-build (cleanup) and post-build (copy) steps.
#[derive(Debug, Clone, Default)]
pub struct Stager {
    layout: StagingLayout,
}

impl Stager {
    pub fn new(layout: StagingLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &StagingLayout {
        &self.layout
    }

    pub fn resolve(
        &self,
        consumer_plugin_directory: Option<&Path>,
        project_file: &Path,
        binary_subpath: &str,
    ) -> Result<ResolvedPaths> {
        ResolvedPaths::resolve(
            &self.layout,
            consumer_plugin_directory,
            project_file,
            binary_subpath,
        )
    }

    pub fn stage(
        &self,
        consumer_plugin_directory: Option<&Path>,
        project_file: &Path,
        binary_subpath: &str,
    ) -> Result<StagingPlan> {
        let paths = self.resolve(consumer_plugin_directory, project_file, binary_subpath)?;
        debug!("Resolved staging paths: {:?}", &paths);
        Ok(Self::plan(&paths))
    }

    pub fn plan(paths: &ResolvedPaths) -> StagingPlan {
        let all_binary_folder_files = paths.binary_folder.join(ALL_FILES);

        // old builds may have been produced with different build settings
        let pre_build_steps = vec![
            BuildStep::announce(format!(
                "deleting old encoder libraries \"{}\"",
                all_binary_folder_files.display()
            )),
            BuildStep::delete_files(&all_binary_folder_files),
        ];

        let mut post_build_steps = vec![];
        if let Some(consumer) = &paths.consumer {
            let all_include_files = paths.source_include_folder.join(ALL_FILES);

            for (source, destination) in [
                (&all_binary_folder_files, &consumer.lib_folder),
                (&all_include_files, &consumer.include_folder),
            ] {
                post_build_steps.push(BuildStep::announce(format!(
                    "Copying \"{}\" to \"{}\"",
                    source.display(),
                    destination.display()
                )));
                post_build_steps.push(BuildStep::copy_files(source, destination));
            }
        }

        StagingPlan {
            pre_build_steps,
            post_build_steps,
        }
    }
}

/// Plans staging with the default layout.
pub fn stage(
    consumer_plugin_directory: Option<&Path>,
    project_file: &Path,
    binary_subpath: &str,
) -> Result<StagingPlan> {
    Stager::default().stage(consumer_plugin_directory, project_file, binary_subpath)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, StepKind};
    use std::path::PathBuf;

    #[test]
    fn without_consumer_only_cleans() {
        let plan = stage(None, Path::new("/proj/Game.uproject"), "Win64").unwrap();
        assert_eq!(plan.pre_build_steps.len(), 2);
        assert_eq!(plan.post_build_steps.len(), 0);
        assert_eq!(plan.len(), 2);
        assert!(plan.steps(BuildPhase::PostBuild).is_empty());
        assert_eq!(BuildPhase::PreBuild.to_string(), "pre-build");

        assert_eq!(
            plan.pre_build_steps[0],
            BuildStep::announce(format!(
                "deleting old encoder libraries \"{}\"",
                Path::new("/proj/Binaries/Win64/UnrealGeometryEncoder/*.*").display()
            ))
        );
        assert_eq!(
            plan.pre_build_steps[1],
            BuildStep::Delete {
                pattern: PathBuf::from("/proj/Binaries/Win64/UnrealGeometryEncoder/*.*"),
                force: true,
                quiet: true,
                recursive: true,
            }
        );
    }

    #[test]
    fn with_consumer_copies_binaries_then_headers() {
        let plan = stage(
            Some(Path::new("/B")),
            Path::new("/proj/Game.uproject"),
            "Win64",
        )
        .unwrap();
        assert_eq!(plan.pre_build_steps.len(), 2);

        let kinds: Vec<StepKind> = plan.post_build_steps.iter().map(|step| step.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                StepKind::Announce,
                StepKind::Copy,
                StepKind::Announce,
                StepKind::Copy
            ]
        );

        assert_eq!(
            plan.post_build_steps[1],
            BuildStep::Copy {
                source: PathBuf::from("/proj/Binaries/Win64/UnrealGeometryEncoder/*.*"),
                destination: PathBuf::from(
                    "/B/Source/ThirdParty/UnrealGeometryEncoderLib/lib/Win64/Release"
                ),
                recursive: true,
                overwrite: true,
                override_read_only: true,
            }
        );
        assert_eq!(
            plan.post_build_steps[3],
            BuildStep::copy_files(
                "/proj/Source/UnrealGeometryEncoder/Public/*.*",
                "/B/Source/ThirdParty/UnrealGeometryEncoderLib/include"
            )
        );
    }

    #[test]
    fn announce_names_source_and_destination() {
        let plan = stage(
            Some(Path::new("/B")),
            Path::new("/proj/Game.uproject"),
            "Win64",
        )
        .unwrap();
        match &plan.post_build_steps[2] {
            BuildStep::Announce { message } => {
                assert!(message.starts_with("Copying \""));
                assert!(message.contains("Public"));
                assert!(message.contains("include"));
            }
            other => panic!("Expected an announce step, got {:?}", other),
        }
    }

    #[test]
    fn consumer_folders_are_never_cleared() {
        let plan = stage(
            Some(Path::new("/B")),
            Path::new("/proj/Game.uproject"),
            "Win64",
        )
        .unwrap();
        let deletes: Vec<&BuildStep> = plan
            .pre_build_steps
            .iter()
            .chain(plan.post_build_steps.iter())
            .filter(|step| step.kind() == StepKind::Delete)
            .collect();
        assert_eq!(deletes.len(), 1);
        assert!(!deletes[0].paths()[0].starts_with("/B"));
    }

    #[test]
    fn malformed_project_produces_no_plan() {
        let result = stage(Some(Path::new("/B")), Path::new("Game.uproject"), "Win64");
        assert!(matches!(result, Err(Error::ProjectDirectory(_))));
    }

    #[test]
    fn planning_is_idempotent() {
        let first = stage(Some(Path::new("/B")), Path::new("/proj/Game.uproject"), "Win64");
        let second = stage(Some(Path::new("/B")), Path::new("/proj/Game.uproject"), "Win64");
        assert_eq!(first.unwrap(), second.unwrap());
    }

    #[test]
    fn custom_layout() {
        let layout = StagingLayout {
            library_configuration: "Debug".to_string(),
            ..Default::default()
        };
        let plan = Stager::new(layout)
            .stage(Some(Path::new("/B")), Path::new("/proj/Game.uproject"), "Win64")
            .unwrap();
        assert_eq!(
            plan.post_build_steps[1].paths()[1],
            Path::new("/B/Source/ThirdParty/UnrealGeometryEncoderLib/lib/Win64/Debug")
        );
    }
}
