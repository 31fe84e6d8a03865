//! # Inventory Backend
//!
//! Populates the directory from a JSON inventory file:
//!
//! ```json
//! {
//!   "locations": [
//!     { "name": "Lab A", "hosts": [ { "name": "pc-01", "address": "10.0.0.11" } ] }
//!   ],
//!   "hosts": [ { "name": "printer", "address": "10.0.0.2", "mac": "aa:bb:cc:dd:ee:ff" } ]
//! }
//! ```
//!
//! Locations become groups below the root, their hosts go into the group.
//! Top-level hosts sit directly below the root. The file is read again on
//! every refresh and the tree reconciled against it.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use netdir_common::debug;
use netdir_common::network::{NetworkObject, ObjectKind};
use netdir_core::backend::{self, DirectoryBackend};
use netdir_core::NetworkObjectDirectory;

#[derive(Debug, Default, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub locations: Vec<LocationEntry>,
    #[serde(default)]
    pub hosts: Vec<HostEntry>,
}

#[derive(Debug, Deserialize)]
pub struct LocationEntry {
    pub name: String,
    #[serde(default)]
    pub hosts: Vec<HostEntry>,
}

#[derive(Debug, Deserialize)]
pub struct HostEntry {
    pub name: String,
    pub address: Option<String>,
    pub mac: Option<String>,
}

pub struct InventoryBackend {
    path: PathBuf,
}

impl InventoryBackend {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self) -> anyhow::Result<Inventory> {
        let text: String = fs::read_to_string(&self.path)
            .with_context(|| format!("reading inventory {}", self.path.display()))?;
        let inventory: Inventory = serde_json::from_str(&text)
            .with_context(|| format!("parsing inventory {}", self.path.display()))?;
        Ok(inventory)
    }
}

impl DirectoryBackend for InventoryBackend {
    fn name(&self) -> &str {
        "inventory"
    }

    fn refresh(&mut self, directory: &mut NetworkObjectDirectory) -> anyhow::Result<()> {
        let inventory: Inventory = self.load()?;
        let root: NetworkObject = directory.root().clone();

        // Entries sharing a name describe the same group, their hosts are merged.
        let mut locations: Vec<(NetworkObject, Vec<NetworkObject>)> = Vec::new();
        for location in &inventory.locations {
            let group: NetworkObject = location_object(location, &root);
            let hosts = location.hosts.iter().map(|host| host_object(host, &group));

            match locations.iter_mut().find(|(known, _)| *known == group) {
                Some((_, known_hosts)) => known_hosts.extend(hosts),
                None => {
                    let hosts: Vec<NetworkObject> = hosts.collect();
                    locations.push((group, hosts));
                }
            }
        }

        let mut top_level: Vec<NetworkObject> =
            locations.iter().map(|(group, _)| group.clone()).collect();
        top_level.extend(inventory.hosts.iter().map(|host| host_object(host, &root)));

        let mut inserted: usize = backend::reconcile(directory, &root, &top_level);
        for (group, hosts) in &locations {
            inserted += backend::reconcile(directory, group, hosts);
        }

        debug!("Inventory refresh inserted {inserted} objects");
        Ok(())
    }
}

fn stable_uid(key: &str) -> uuid::Uuid {
    uuid::Uuid::new_v5(&uuid::Uuid::NAMESPACE_OID, key.as_bytes())
}

fn location_object(location: &LocationEntry, root: &NetworkObject) -> NetworkObject {
    NetworkObject::new(ObjectKind::Group, location.name.as_str())
        .with_uid(stable_uid(&format!("location:{}", location.name)))
        .with_parent(root)
}

fn host_object(host: &HostEntry, parent: &NetworkObject) -> NetworkObject {
    let mut object: NetworkObject = NetworkObject::new(ObjectKind::Host, host.name.as_str())
        .with_uid(stable_uid(&format!("host:{}/{}", parent.name, host.name)))
        .with_parent(parent);

    if let Some(address) = &host.address {
        object = object.with_host_address(address.as_str());
    }
    if let Some(mac) = &host.mac {
        object = object.with_mac_address(mac.as_str());
    }
    object
}
