//! The discovery side of the directory.
//!
//! A backend knows how to find network objects (an address book, a scan, a
//! config file) and converges the directory toward what it found each time
//! it is asked to refresh. Backends must treat a refused insert as routine:
//! duplicates are the normal outcome of repeated refresh cycles.

use netdir_common::network::NetworkObject;

use crate::directory::NetworkObjectDirectory;

pub trait DirectoryBackend {
    /// Short name used in log output.
    fn name(&self) -> &str;

    /// Runs one refresh cycle against `directory`.
    ///
    /// Runs on the same task as every other directory access, so blocking
    /// I/O here stalls all consumers.
    fn refresh(&mut self, directory: &mut NetworkObjectDirectory) -> anyhow::Result<()>;
}

/// Converges the children of `parent` toward `desired`.
///
/// Children not in `desired` (by value) are removed first, one notification
/// pair each, then every missing object is appended in `desired` order.
/// Returns how many objects were inserted.
pub fn reconcile(
    directory: &mut NetworkObjectDirectory,
    parent: &NetworkObject,
    desired: &[NetworkObject],
) -> usize {
    directory.remove_objects(parent, |child: &NetworkObject| !desired.contains(child));

    desired
        .iter()
        .filter(|object| directory.insert_object((*object).clone(), parent))
        .count()
}
