use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const TARGET_NAME: &str = "UnrealGeometryEncoder";
pub const THIRD_PARTY_LIBRARY_NAME: &str = "UnrealGeometryEncoderLib";
pub const CONSUMER_FRAGMENT: &str = "Vitruvio";

/// Folder names that shape every path the stager computes.
/// Missing fields in a layout file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct StagingLayout {
    pub target_name: String,
    pub third_party_library_name: String,
    pub consumer_fragment: String,
    /// The consumer expects its libraries under this platform folder
    /// independently of the platform the encoder was built for.
    pub library_platform: String,
    pub library_configuration: String,
    pub binaries_folder: String,
    pub source_folder: String,
    pub public_folder: String,
    pub third_party_folder: String,
    pub lib_folder: String,
    pub include_folder: String,
}

impl Default for StagingLayout {
    fn default() -> Self {
        Self {
            target_name: TARGET_NAME.to_string(),
            third_party_library_name: THIRD_PARTY_LIBRARY_NAME.to_string(),
            consumer_fragment: CONSUMER_FRAGMENT.to_string(),
            library_platform: "Win64".to_string(),
            library_configuration: "Release".to_string(),
            binaries_folder: "Binaries".to_string(),
            source_folder: "Source".to_string(),
            public_folder: "Public".to_string(),
            third_party_folder: "ThirdParty".to_string(),
            lib_folder: "lib".to_string(),
            include_folder: "include".to_string(),
        }
    }
}

impl StagingLayout {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|error| Error::Layout {
            path: path.to_path_buf(),
            source: error.into(),
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|error| Error::Layout {
            path: path.to_path_buf(),
            source: error.into(),
        })
    }

    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_layout_keeps_defaults() {
        let json = r#"{ "consumer_fragment": "Other" }"#;
        let layout = StagingLayout::from_json_str(json).unwrap();
        assert_eq!(layout.consumer_fragment, "Other");
        assert_eq!(layout.target_name, TARGET_NAME);
        assert_eq!(layout.library_configuration, "Release");
    }

    #[test]
    fn empty_layout_is_default() {
        let layout = StagingLayout::from_json_str("{}").unwrap();
        assert_eq!(layout, StagingLayout::default());
    }

    #[test]
    fn missing_layout_file() {
        let error = StagingLayout::from_json_file("/nonexistent/layout.json").unwrap_err();
        assert!(matches!(error, Error::Layout { .. }));
    }
}
