use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::{Error, Result};

/// The subset of a `.uplugin` file shown to users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PluginManifest {
    pub friendly_name: Option<String>,
    pub version: Option<u64>,
    pub version_name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub created_by: Option<String>,
}

impl PluginManifest {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|error| Error::Manifest {
            path: path.to_path_buf(),
            source: error.into(),
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|error| Error::Manifest {
            path: path.to_path_buf(),
            source: error.into(),
        })
    }

    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn display_name(&self) -> Option<String> {
        self.friendly_name.as_ref().map(|name| match &self.version_name {
            Some(version) => format!("{} {}", name, version),
            None => name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_uplugin() {
        let manifest = PluginManifest::from_json_str(
            r#"{
                "FileVersion": 3,
                "Version": 12,
                "VersionName": "1.7",
                "FriendlyName": "Vitruvio",
                "Description": "Procedural buildings",
                "Category": "Other",
                "CreatedBy": "Esri R&D Center Zurich",
                "Modules": [ { "Name": "Vitruvio", "Type": "Runtime" } ]
            }"#,
        )
        .unwrap();

        assert_eq!(manifest.friendly_name.as_deref(), Some("Vitruvio"));
        assert_eq!(manifest.version, Some(12));
        assert_eq!(manifest.display_name().as_deref(), Some("Vitruvio 1.7"));
    }

    #[test]
    fn missing_fields_are_tolerated() {
        let manifest = PluginManifest::from_json_str("{}").unwrap();
        assert_eq!(manifest, PluginManifest::default());
        assert_eq!(manifest.display_name(), None);
    }

    #[test]
    fn invalid_manifest_file() {
        let error = PluginManifest::load("/nonexistent/Plugin.uplugin").unwrap_err();
        assert!(matches!(error, Error::Manifest { .. }));
    }
}
