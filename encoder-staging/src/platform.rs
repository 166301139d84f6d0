use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::{Error, Result};

/// Platform identifiers as understood by the build host.
/// The displayed name doubles as the sub-folder of `Binaries/`.
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum TargetPlatform {
    #[default]
    Win64,
    Win32,
    Mac,
    Linux,
    LinuxArm64,
    Android,
    #[allow(clippy::upper_case_acronyms)]
    IOS,
}

impl TargetPlatform {
    pub fn parse(name: impl AsRef<str>) -> Result<Self> {
        let name = name.as_ref();
        Self::from_str(name).map_err(|_| Error::UnknownPlatform(name.to_string()))
    }

    pub fn binary_subpath(&self) -> String {
        self.to_string()
    }

    pub fn names() -> Vec<String> {
        Self::iter().map(|platform| platform.to_string()).collect()
    }
}
