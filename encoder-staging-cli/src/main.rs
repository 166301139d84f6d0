#[macro_use]
extern crate log;

mod options;

use anyhow::Result;
use clap::Parser;
use encoder_staging::{
    BuildPhase, EncoderTarget, FileSystemExecutor, PluginManifest, StagingPlan, StepExecutor,
};
use user_error::{UserFacingError, UFE};

use crate::options::{AppOptions, Command, OutputFormat, ProjectOptions, TargetOptions};

fn list_plugins(mut options: ProjectOptions) -> Result<()> {
    options.canonicalize()?;

    for descriptor in options.discovery()?.descriptors()? {
        let name = match PluginManifest::load(descriptor.descriptor_path()) {
            Ok(manifest) => manifest.display_name(),
            Err(error) => {
                warn!("{}", error);
                None
            }
        };
        println!(
            "{}\t{}",
            name.unwrap_or_else(|| "-".to_string()),
            descriptor.descriptor_path().display()
        );
    }
    Ok(())
}

fn configure(mut options: TargetOptions) -> Result<StagingPlan> {
    let target = EncoderTarget::new(options.layout()?);
    let platform = options.platform();
    if !target.stages_artifacts_for(platform) {
        info!(
            "{} artifacts are only staged on {}",
            target.name(),
            target.activated_platform()
        );
        return Ok(StagingPlan::empty());
    }

    options.project.canonicalize()?;
    let plugins = options.project.discovery()?.descriptors()?;
    let plan = target.configure(platform, options.project.project(), plugins)?;
    if plan.post_build_steps.is_empty() {
        info!(
            "No plugin matching {} is installed, nothing will be staged",
            target.layout().consumer_fragment
        );
    }
    Ok(plan)
}

fn print_plan(plan: &StagingPlan, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(plan)?),
        OutputFormat::Text => {
            println!("# pre-build");
            for step in &plan.pre_build_steps {
                println!("{}", step);
            }
            println!("# post-build");
            for step in &plan.post_build_steps {
                println!("{}", step);
            }
        }
    }
    Ok(())
}

fn run() -> Result<()> {
    let options: AppOptions = AppOptions::parse();

    match options.command {
        Command::Plugins(project) => list_plugins(project),
        Command::Plan { target, format } => print_plan(&configure(target)?, format),
        Command::Run { phase, target } => {
            let plan = configure(target)?;
            let phase: BuildPhase = phase.into();
            let steps = plan.steps(phase);
            debug!("Executing {} {} steps", steps.len(), phase);
            FileSystemExecutor::new().execute_all(steps)?;
            Ok(())
        }
    }
}

fn main() {
    env_logger::init();

    if let Err(error) = run() {
        let std_error: Box<dyn std::error::Error> = error.into();
        let user_facing_error: UserFacingError = std_error.into();
        user_facing_error.print_and_exit();
    }
}
