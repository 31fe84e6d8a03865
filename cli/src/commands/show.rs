use std::path::Path;

use netdir_common::config::Config;
use netdir_core::{DirectoryBackend, NetworkObjectDirectory};

use crate::inventory::InventoryBackend;
use crate::terminal::print;

pub fn show(path: &Path, cfg: &Config) -> anyhow::Result<()> {
    let mut backend: InventoryBackend = InventoryBackend::new(path);
    let mut directory: NetworkObjectDirectory =
        NetworkObjectDirectory::new().with_cascade(cfg.cascade);

    // Run the backend directly so a broken inventory surfaces as an error.
    backend.refresh(&mut directory)?;

    if directory.object_count() == 0 {
        print::no_results();
        return Ok(());
    }

    print::directory_tree(&directory, cfg.quiet);
    print::summary(&directory, cfg.quiet);
    Ok(())
}
