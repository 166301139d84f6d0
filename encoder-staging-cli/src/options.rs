use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use encoder_staging::{BuildPhase, PluginDiscovery, StagingLayout, TargetPlatform};

#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub struct AppOptions {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Command {
    /// List the plugins installed for a project
    Plugins(ProjectOptions),
    /// Print the pre- and post-build steps without executing them
    Plan {
        #[command(flatten)]
        target: TargetOptions,
        /// How to print the plan
        #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Execute the steps of one build phase
    Run {
        /// The build phase to execute
        #[clap(value_enum)]
        phase: Phase,
        #[command(flatten)]
        target: TargetOptions,
    },
}

#[derive(Args, Clone, Debug)]
pub struct ProjectOptions {
    /// A path to the .uproject file
    #[clap(long)]
    project: PathBuf,
    /// Additional directories to search for installed plugins, for example the engine plugins
    #[clap(long = "plugins-dir", value_name = "DIRECTORY")]
    plugins_directories: Vec<PathBuf>,
}

impl ProjectOptions {
    pub fn canonicalize(&mut self) -> Result<()> {
        if !self.project.exists() {
            bail!("Project file {} does not exist", self.project.display());
        }
        self.project = to_absolute::canonicalize(&self.project)?;
        Ok(())
    }

    pub fn project(&self) -> &Path {
        self.project.as_path()
    }

    pub fn discovery(&self) -> Result<PluginDiscovery> {
        let discovery = self
            .plugins_directories
            .iter()
            .fold(PluginDiscovery::for_project(&self.project)?, |discovery, directory| {
                discovery.with_root(directory)
            });
        Ok(discovery)
    }
}

#[derive(Args, Clone, Debug)]
pub struct TargetOptions {
    #[command(flatten)]
    pub project: ProjectOptions,
    #[clap(long, default_value_t = TargetPlatform::Win64, help = platform_help())]
    platform: TargetPlatform,
    /// A json file overriding the default staging layout
    #[clap(long)]
    layout: Option<PathBuf>,
}

fn platform_help() -> String {
    format!(
        "The platform the encoder is being built for, one of: {}",
        TargetPlatform::names().join(", ")
    )
}

impl TargetOptions {
    pub fn platform(&self) -> TargetPlatform {
        self.platform
    }

    pub fn layout(&self) -> Result<StagingLayout> {
        let layout = match &self.layout {
            Some(path) => StagingLayout::from_json_file(path)?,
            None => StagingLayout::default(),
        };
        Ok(layout)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One command line per step
    Text,
    /// The plan as pretty printed json
    Json,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Phase {
    /// Steps to run before compiling the encoder
    PreBuild,
    /// Steps to run after the encoder was compiled
    PostBuild,
}

impl From<Phase> for BuildPhase {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::PreBuild => BuildPhase::PreBuild,
            Phase::PostBuild => BuildPhase::PostBuild,
        }
    }
}
