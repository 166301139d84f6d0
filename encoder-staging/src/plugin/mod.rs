mod descriptor;
mod discovery;
mod locator;
mod manifest;

pub use descriptor::PluginDescriptor;
pub use discovery::{PluginDiscovery, PLUGINS_FOLDER, PLUGIN_MANIFEST_EXTENSION};
pub use locator::locate;
pub use manifest::PluginManifest;
