use std::path::Path;

use crate::{locate, PluginDescriptor, Result, Stager, StagingLayout, StagingPlan, TargetPlatform};

/// Build target rules of the geometry encoder.
///
/// The encoder is compiled as a monolithic console program exported as a DLL;
/// those settings live with the build host. What remains here is the staging
/// of its artifacts, which only happens on the activated platform.
#[derive(Debug, Clone)]
pub struct EncoderTarget {
    activated_platform: TargetPlatform,
    stager: Stager,
}

impl Default for EncoderTarget {
    fn default() -> Self {
        Self::new(StagingLayout::default())
    }
}

impl EncoderTarget {
    pub fn new(layout: StagingLayout) -> Self {
        Self {
            activated_platform: TargetPlatform::Win64,
            stager: Stager::new(layout),
        }
    }

    pub fn with_activated_platform(mut self, platform: TargetPlatform) -> Self {
        self.activated_platform = platform;
        self
    }

    pub fn name(&self) -> &str {
        self.layout().target_name.as_str()
    }

    pub fn activated_platform(&self) -> TargetPlatform {
        self.activated_platform
    }

    pub fn layout(&self) -> &StagingLayout {
        self.stager.layout()
    }

    pub fn stages_artifacts_for(&self, platform: TargetPlatform) -> bool {
        platform == self.activated_platform
    }

    /// Builds the pre- and post-build steps for the given platform.
    /// Other platforms than the activated one get an empty plan and the
    /// plugin registry is left untouched.
    pub fn configure<I>(
        &self,
        platform: TargetPlatform,
        project_file: &Path,
        plugins: I,
    ) -> Result<StagingPlan>
    where
        I: IntoIterator,
        I::Item: std::borrow::Borrow<PluginDescriptor>,
    {
        if !self.stages_artifacts_for(platform) {
            debug!(
                "{} stages nothing on {} (only on {})",
                self.name(),
                platform,
                self.activated_platform
            );
            return Ok(StagingPlan::empty());
        }

        let consumer = locate(plugins, &self.layout().consumer_fragment);
        self.stager
            .stage(consumer.as_deref(), project_file, &platform.binary_subpath())
    }
}
