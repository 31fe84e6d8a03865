//! # Netdir Core
//!
//! An in-memory directory of network objects (hosts, groups, locations)
//! arranged under a synthetic root.
//!
//! * **[`directory`]**: the tree, its queries and its mutations.
//! * **[`observer`]**: change notifications bracketing every mutation.
//! * **[`backend`]**: the capability a discovery source implements to keep the
//!   tree in sync with the network.
//! * **[`timer`]** and **[`refresh`]**: periodic scheduling of backend refreshes
//!   on a single task.

pub mod backend;
pub mod directory;
pub mod observer;
pub mod refresh;
pub mod timer;

pub use backend::DirectoryBackend;
pub use directory::NetworkObjectDirectory;
pub use observer::{DirectoryEvent, DirectoryListener, ListenerId};
