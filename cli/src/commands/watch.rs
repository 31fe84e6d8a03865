use std::path::Path;

use netdir_common::config::Config;
use netdir_common::network::NetworkObject;
use netdir_common::{info, success, warn};
use netdir_core::{DirectoryEvent, DirectoryListener, NetworkObjectDirectory, refresh};

use crate::inventory::InventoryBackend;
use crate::terminal::format;

pub async fn watch(path: &Path, cfg: &Config) -> anyhow::Result<()> {
    if let Err(e) = cfg.validate() {
        warn!("{e}, refresh stays disabled");
    }

    let mut directory: NetworkObjectDirectory =
        NetworkObjectDirectory::new().with_cascade(cfg.cascade);
    directory.subscribe(ChangeLogger::default());
    directory.set_backend(Box::new(InventoryBackend::new(path)));

    directory.update();
    success!("Loaded {} objects from {}", directory.object_count(), path.display());

    directory.set_update_interval(cfg.update_interval);
    if !directory.timer().is_active() {
        info!("Nothing to watch, exiting");
        return Ok(());
    }

    info!("Press Ctrl-C to stop");
    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    refresh::drive(&mut directory, shutdown).await;

    Ok(())
}

/// Logs each change with the name of the object involved.
///
/// Removed objects are looked up while handling the "about to" event, the
/// only moment they are still in the tree. Inserted objects are looked up
/// once the insert is committed.
#[derive(Default)]
struct ChangeLogger {
    pending_insert: Option<(NetworkObject, usize)>,
}

impl DirectoryListener for ChangeLogger {
    fn on_event(&mut self, event: &DirectoryEvent, directory: &NetworkObjectDirectory) {
        match event {
            DirectoryEvent::ObjectsAboutToBeInserted { parent, start, .. } => {
                self.pending_insert = Some((parent.clone(), *start));
            }
            DirectoryEvent::ObjectsInserted => {
                let Some((parent, start)) = self.pending_insert.take() else {
                    return;
                };
                if let Some(object) = directory.objects(&parent).get(start) {
                    info!("+ {}", format::object_label(object));
                }
            }
            DirectoryEvent::ObjectsAboutToBeRemoved { parent, start, .. } => {
                if let Some(object) = directory.objects(parent).get(*start) {
                    warn!("- {}", format::object_label(object));
                }
            }
            DirectoryEvent::ObjectsRemoved => {}
        }
    }
}
