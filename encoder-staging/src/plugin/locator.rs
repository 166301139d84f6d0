use std::path::PathBuf;

use crate::PluginDescriptor;

/// Returns the directory of the last plugin whose identifier contains `name_fragment`.
/// Matching is case-sensitive; a later match always replaces an earlier one.
pub fn locate<I>(plugins: I, name_fragment: &str) -> Option<PathBuf>
where
    I: IntoIterator,
    I::Item: std::borrow::Borrow<PluginDescriptor>,
{
    use std::borrow::Borrow;

    let located = plugins.into_iter().fold(None, |located, plugin| {
        let plugin: &PluginDescriptor = plugin.borrow();
        if plugin.identifier().contains(name_fragment) {
            Some(
                plugin
                    .directory()
                    .filter(|directory| !directory.as_os_str().is_empty())
                    .map(|directory| directory.to_path_buf()),
            )
        } else {
            located
        }
    });

    // a last match without a usable parent directory resolves to nothing
    let directory = located.flatten();
    debug!(
        "Located plugin matching {:?}: {:?}",
        name_fragment, &directory
    );
    directory
}
