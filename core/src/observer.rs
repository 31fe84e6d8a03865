//! Change notifications.
//!
//! Every insert and every removal is reported as a pair of events: one before
//! the tree changes and one after. Each pair covers exactly one object, even
//! when a single `remove_objects` call drops several neighbours.
//!
//! Listeners get a shared view of the directory along with the event, so a
//! listener handling an "about to" event still sees the old tree and one
//! handling the completion event sees the committed tree.

use netdir_common::network::NetworkObject;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::directory::NetworkObjectDirectory;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryEvent {
    ObjectsAboutToBeInserted {
        parent: NetworkObject,
        start: usize,
        count: usize,
    },
    ObjectsInserted,
    ObjectsAboutToBeRemoved {
        parent: NetworkObject,
        start: usize,
        count: usize,
    },
    ObjectsRemoved,
}

/// Handle returned by [`NetworkObjectDirectory::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

pub trait DirectoryListener {
    fn on_event(&mut self, event: &DirectoryEvent, directory: &NetworkObjectDirectory);
}

impl<F> DirectoryListener for F
where
    F: FnMut(&DirectoryEvent, &NetworkObjectDirectory),
{
    fn on_event(&mut self, event: &DirectoryEvent, directory: &NetworkObjectDirectory) {
        self(event, directory)
    }
}

/// A listener that forwards every event into an unbounded channel.
///
/// Meant for async consumers living on the same runtime. The receiver only
/// gets the event, not the directory state at emission time.
pub fn event_channel() -> (impl DirectoryListener, UnboundedReceiver<DirectoryEvent>) {
    let (tx, rx) = mpsc::unbounded_channel::<DirectoryEvent>();

    let listener = move |event: &DirectoryEvent, _directory: &NetworkObjectDirectory| {
        // A dropped receiver only means nobody is interested anymore.
        let _ = tx.send(event.clone());
    };

    (listener, rx)
}
