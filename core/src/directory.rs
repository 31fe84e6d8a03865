//! # Network Object Directory
//!
//! The directory keeps one ordered child list ("bucket") per container,
//! keyed by the container's [`ModelId`]:
//!
//! * The root bucket exists from construction on and is never dropped.
//! * A group gets its own bucket the moment it is inserted and loses it when
//!   it is removed from its parent.
//! * Children keep insertion order. Positions are never reshuffled, so an
//!   index handed out to a view stays valid until the next removal before it.
//!
//! Queries never fail loudly: misses come back as the invalid object,
//! [`ModelId::NONE`] or `None`. Mutations report through return values and
//! the [`DirectoryEvent`] stream.

use std::collections::{BTreeMap, BTreeSet};

use netdir_common::config::CascadeMode;
use netdir_common::error::InsertError;
use netdir_common::network::{ModelId, NetworkObject, ObjectKind};
use netdir_common::{debug, error, warn};
use tokio::time::Instant;
use tracing::trace;

use crate::backend::DirectoryBackend;
use crate::observer::{DirectoryEvent, DirectoryListener, ListenerId};
use crate::timer::RefreshTimer;

pub struct NetworkObjectDirectory {
    objects: BTreeMap<ModelId, Vec<NetworkObject>>,
    root: NetworkObject,
    invalid: NetworkObject,
    cascade: CascadeMode,
    listeners: Vec<(ListenerId, Box<dyn DirectoryListener>)>,
    next_listener: u64,
    timer: RefreshTimer,
    backend: Option<Box<dyn DirectoryBackend>>,
}

impl Default for NetworkObjectDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkObjectDirectory {
    pub fn new() -> Self {
        let root: NetworkObject = NetworkObject::root();
        let mut objects: BTreeMap<ModelId, Vec<NetworkObject>> = BTreeMap::new();
        objects.insert(root.model_id, Vec::new());

        Self {
            objects,
            root,
            invalid: NetworkObject::invalid(),
            cascade: CascadeMode::default(),
            listeners: Vec::new(),
            next_listener: 0,
            timer: RefreshTimer::new(),
            backend: None,
        }
    }

    pub fn with_cascade(mut self, cascade: CascadeMode) -> Self {
        self.cascade = cascade;
        self
    }

    pub fn cascade(&self) -> CascadeMode {
        self.cascade
    }

    pub fn root(&self) -> &NetworkObject {
        &self.root
    }

    pub fn invalid(&self) -> &NetworkObject {
        &self.invalid
    }

    /// Children of `parent`, or an empty slice if `parent` is not a
    /// container or has no bucket.
    pub fn objects(&self, parent: &NetworkObject) -> &[NetworkObject] {
        if !parent.is_container() {
            return &[];
        }

        self.objects
            .get(&parent.model_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Looks up `object` among the children of `parent`. A `parent` of
    /// [`ModelId::NONE`] means the root.
    pub fn object(&self, parent: ModelId, object: ModelId) -> &NetworkObject {
        self.bucket(parent)
            .and_then(|children| children.iter().find(|child| child.model_id == object))
            .unwrap_or(&self.invalid)
    }

    /// Position of `child` inside `parent`'s bucket.
    pub fn index(&self, parent: ModelId, child: ModelId) -> Option<usize> {
        self.bucket(parent)?
            .iter()
            .position(|entry| entry.model_id == child)
    }

    pub fn child_count(&self, parent: ModelId) -> usize {
        self.bucket(parent).map_or(0, Vec::len)
    }

    /// Id of the child at `index`, or [`ModelId::NONE`] when out of range.
    pub fn child_id(&self, parent: ModelId, index: usize) -> ModelId {
        self.bucket(parent)
            .and_then(|children| children.get(index))
            .map_or(ModelId::NONE, |child| child.model_id)
    }

    /// Reverse lookup over every bucket. The root and unknown ids map to
    /// [`ModelId::NONE`].
    pub fn parent_id(&self, child: ModelId) -> ModelId {
        if child == self.root.model_id {
            return ModelId::NONE;
        }

        self.objects
            .iter()
            .find(|(_, children)| children.iter().any(|entry| entry.model_id == child))
            .map_or(ModelId::NONE, |(parent, _)| *parent)
    }

    pub fn contains_bucket(&self, id: ModelId) -> bool {
        self.objects.contains_key(&id)
    }

    /// Depth-first snapshot of everything reachable from the root, paired
    /// with its depth (direct children of the root are at depth 0).
    pub fn walk(&self) -> Vec<(usize, NetworkObject)> {
        let mut out: Vec<(usize, NetworkObject)> = Vec::new();
        let mut visited: BTreeSet<ModelId> = BTreeSet::new();
        self.walk_from(self.root.model_id, 0, &mut visited, &mut out);
        out
    }

    fn walk_from(
        &self,
        parent: ModelId,
        depth: usize,
        visited: &mut BTreeSet<ModelId>,
        out: &mut Vec<(usize, NetworkObject)>,
    ) {
        // Guards against a group that was inserted below itself.
        if !visited.insert(parent) {
            return;
        }

        let Some(children) = self.objects.get(&parent) else {
            return;
        };

        for child in children {
            out.push((depth, child.clone()));
            if child.kind == ObjectKind::Group {
                self.walk_from(child.model_id, depth + 1, visited, out);
            }
        }
    }

    /// Number of objects reachable from the root.
    pub fn object_count(&self) -> usize {
        self.walk().len()
    }

    /// Reachable objects whose name contains `name` (case-insensitive),
    /// optionally restricted to one kind.
    pub fn find_objects(&self, kind: Option<ObjectKind>, name: &str) -> Vec<NetworkObject> {
        let needle: String = name.to_lowercase();

        self.walk()
            .into_iter()
            .map(|(_, object)| object)
            .filter(|object| kind.is_none_or(|k| object.kind == k))
            .filter(|object| object.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Buckets that can no longer be reached from the root. Non-empty only
    /// after a shallow cascade removed a group that had nested groups.
    pub fn orphaned_buckets(&self) -> Vec<ModelId> {
        let mut reachable: BTreeSet<ModelId> = BTreeSet::from([self.root.model_id]);
        reachable.extend(
            self.walk()
                .into_iter()
                .filter(|(_, object)| object.kind == ObjectKind::Group)
                .map(|(_, object)| object.model_id),
        );

        self.objects
            .keys()
            .filter(|id| !reachable.contains(id))
            .copied()
            .collect()
    }

    fn bucket(&self, parent: ModelId) -> Option<&Vec<NetworkObject>> {
        let parent: ModelId = if parent.is_none() {
            self.root.model_id
        } else {
            parent
        };
        self.objects.get(&parent)
    }

    /// Appends `object` to the children of `parent`.
    ///
    /// Returns `false` if `parent` has no bucket (logged) or an equal object
    /// is already among its children (silent).
    pub fn insert_object(&mut self, object: NetworkObject, parent: &NetworkObject) -> bool {
        self.try_insert_object(object, parent).is_ok()
    }

    /// Same as [`insert_object`](Self::insert_object), but says why an
    /// insert was refused. On success returns the new child's index.
    pub fn try_insert_object(
        &mut self,
        object: NetworkObject,
        parent: &NetworkObject,
    ) -> Result<usize, InsertError> {
        let Some(children) = self.objects.get(&parent.model_id) else {
            warn!(
                object = %object.to_json(),
                parent = %parent.to_json(),
                "Refusing insert under a parent without child list"
            );
            return Err(InsertError::UnknownParent {
                parent: parent.model_id,
            });
        };

        if children.contains(&object) {
            trace!(id = %object.model_id, parent = %parent.model_id, "duplicate insert ignored");
            return Err(InsertError::Duplicate {
                parent: parent.model_id,
            });
        }

        if object.kind == ObjectKind::Group && object.model_id == self.root.model_id {
            warn!(object = %object.to_json(), "Refusing group carrying the root id");
            return Err(InsertError::ReservedId {
                id: object.model_id,
            });
        }

        let start: usize = children.len();
        self.emit(DirectoryEvent::ObjectsAboutToBeInserted {
            parent: parent.clone(),
            start,
            count: 1,
        });

        let group_id: Option<ModelId> =
            (object.kind == ObjectKind::Group).then_some(object.model_id);

        if let Some(children) = self.objects.get_mut(&parent.model_id) {
            children.push(object);
        }
        if let Some(id) = group_id {
            self.objects.insert(id, Vec::new());
        }

        self.emit(DirectoryEvent::ObjectsInserted);
        Ok(start)
    }

    /// Removes every child of `parent` matching `predicate`, one object at a
    /// time, each removal bracketed by its own notification pair.
    ///
    /// Buckets of removed groups are dropped after the scan, how deep depends
    /// on the configured [`CascadeMode`]. Unknown parents are ignored.
    pub fn remove_objects<P>(&mut self, parent: &NetworkObject, mut predicate: P)
    where
        P: FnMut(&NetworkObject) -> bool,
    {
        if !self.objects.contains_key(&parent.model_id) {
            return;
        }

        let mut index: usize = 0;
        let mut groups_to_remove: Vec<ModelId> = Vec::new();

        loop {
            let matched: bool = match self.objects.get(&parent.model_id) {
                Some(children) if index < children.len() => predicate(&children[index]),
                _ => break,
            };

            if !matched {
                index += 1;
                continue;
            }

            self.emit(DirectoryEvent::ObjectsAboutToBeRemoved {
                parent: parent.clone(),
                start: index,
                count: 1,
            });

            if let Some(children) = self.objects.get_mut(&parent.model_id) {
                let removed: NetworkObject = children.remove(index);
                if removed.kind == ObjectKind::Group {
                    groups_to_remove.push(removed.model_id);
                }
            }

            self.emit(DirectoryEvent::ObjectsRemoved);
        }

        for group in groups_to_remove {
            self.drop_bucket(group);
        }
    }

    fn drop_bucket(&mut self, group: ModelId) {
        let mut pending: Vec<ModelId> = vec![group];

        while let Some(id) = pending.pop() {
            if id == self.root.model_id {
                continue;
            }

            let Some(children) = self.objects.remove(&id) else {
                continue;
            };

            if self.cascade == CascadeMode::Recursive {
                pending.extend(
                    children
                        .iter()
                        .filter(|child| child.kind == ObjectKind::Group)
                        .map(|child| child.model_id),
                );
            }
        }
    }

    pub fn subscribe<L>(&mut self, listener: L) -> ListenerId
    where
        L: DirectoryListener + 'static,
    {
        let id: ListenerId = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before: usize = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn emit(&mut self, event: DirectoryEvent) {
        // Listeners are parked while they run so each can read the directory.
        let mut listeners = std::mem::take(&mut self.listeners);
        for (_, listener) in listeners.iter_mut() {
            listener.on_event(&event, self);
        }
        self.listeners = listeners;
    }

    pub fn set_backend(&mut self, backend: Box<dyn DirectoryBackend>) {
        self.backend = Some(backend);
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    /// Starts periodic refresh every `seconds`, or stops it when `seconds` is
    /// below the minimum interval.
    pub fn set_update_interval(&mut self, seconds: u64) {
        if self.timer.set_interval(seconds, Instant::now()) {
            debug!("Refreshing every {seconds}s");
        } else {
            debug!("Periodic refresh disabled (interval {seconds}s)");
        }
    }

    pub fn timer(&self) -> &RefreshTimer {
        &self.timer
    }

    pub fn next_refresh(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Runs one refresh cycle through the backend, if any. Backend errors are
    /// logged and do not stop later cycles.
    pub fn update(&mut self) {
        let Some(mut backend) = self.backend.take() else {
            return;
        };

        debug!(backend = backend.name(), "refresh cycle started");
        match backend.refresh(self) {
            Ok(()) => debug!(backend = backend.name(), "refresh cycle finished"),
            Err(e) => error!("Refresh through {} failed: {e:#}", backend.name()),
        }

        // The backend may have installed a replacement while it ran.
        if self.backend.is_none() {
            self.backend = Some(backend);
        }
    }

    /// Runs [`update`](Self::update) if the refresh timer is due at `now`.
    pub fn poll_refresh(&mut self, now: Instant) -> bool {
        if !self.timer.poll(now) {
            return false;
        }
        self.update();
        true
    }
}
