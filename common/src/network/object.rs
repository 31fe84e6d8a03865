//! # Network Object Model
//!
//! A [`NetworkObject`] is one entry of the directory: the synthetic root, a
//! group (container), a host or a location.
//!
//! Objects are plain values. The directory compares them field by field when
//! suppressing duplicates, so two objects with the same [`ModelId`] but a
//! different name are considered distinct.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model_id::ModelId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Doubles as the marker of an invalid lookup result.
    None,
    Root,
    Group,
    Host,
    Location,
}

impl ObjectKind {
    /// Root and Group may own a child list, everything else is a leaf.
    pub fn is_container(self) -> bool {
        matches!(self, ObjectKind::Root | ObjectKind::Group)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkObject {
    pub uid: Uuid,
    pub parent_uid: Option<Uuid>,
    pub kind: ObjectKind,
    pub name: String,
    pub host_address: Option<String>,
    pub mac_address: Option<String>,
    pub directory_address: Option<String>,
    pub model_id: ModelId,
}

impl NetworkObject {
    /// Creates an object of `kind` with a fresh uid and its derived model id.
    pub fn new(kind: ObjectKind, name: impl Into<String>) -> Self {
        let uid: Uuid = Uuid::new_v4();
        Self {
            uid,
            parent_uid: None,
            kind,
            name: name.into(),
            host_address: None,
            mac_address: None,
            directory_address: None,
            model_id: ModelId::from_uid(&uid),
        }
    }

    /// The synthetic root container every directory starts with.
    pub fn root() -> Self {
        Self::sentinel(ObjectKind::Root, ModelId::ROOT)
    }

    /// Returned by lookups that find nothing.
    pub fn invalid() -> Self {
        Self::sentinel(ObjectKind::None, ModelId::NONE)
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self::new(ObjectKind::Group, name)
    }

    pub fn location(name: impl Into<String>) -> Self {
        Self::new(ObjectKind::Location, name)
    }

    pub fn host(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self::new(ObjectKind::Host, name).with_host_address(address)
    }

    fn sentinel(kind: ObjectKind, model_id: ModelId) -> Self {
        Self {
            uid: Uuid::nil(),
            parent_uid: None,
            kind,
            name: String::new(),
            host_address: None,
            mac_address: None,
            directory_address: None,
            model_id,
        }
    }

    /// Replaces the uid and rederives the model id from it. Backends use this
    /// with name-based uids so an object keeps its identity across refreshes.
    pub fn with_uid(mut self, uid: Uuid) -> Self {
        self.uid = uid;
        self.model_id = ModelId::from_uid(&uid);
        self
    }

    /// Overrides the uid-derived id, e.g. for ids handed out by a backend.
    pub fn with_model_id(mut self, model_id: impl Into<ModelId>) -> Self {
        self.model_id = model_id.into();
        self
    }

    pub fn with_parent(mut self, parent: &NetworkObject) -> Self {
        self.parent_uid = Some(parent.uid);
        self
    }

    pub fn with_host_address(mut self, address: impl Into<String>) -> Self {
        self.host_address = Some(address.into());
        self
    }

    pub fn with_mac_address(mut self, mac: impl Into<String>) -> Self {
        self.mac_address = Some(mac.into());
        self
    }

    pub fn with_directory_address(mut self, address: impl Into<String>) -> Self {
        self.directory_address = Some(address.into());
        self
    }

    pub fn is_valid(&self) -> bool {
        self.kind != ObjectKind::None
    }

    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    /// Compact JSON rendering, used in diagnostics.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{:?}", self))
    }
}
