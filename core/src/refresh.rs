//! Drives periodic refresh on the current task.
//!
//! There is no worker thread: [`drive`] sleeps until the directory's next
//! deadline, runs the backend inline and goes back to sleep. Everything else
//! touching the directory therefore has to happen from inside the backend or
//! from listeners.

use std::future::Future;

use netdir_common::info;
use tokio::time::{self, Instant};

use crate::directory::NetworkObjectDirectory;

/// Runs refresh cycles until `shutdown` resolves. Returns how many cycles
/// ran.
///
/// A refresh already in progress always completes before shutdown is
/// observed. With refresh disabled this only waits for `shutdown`.
pub async fn drive<F>(directory: &mut NetworkObjectDirectory, shutdown: F) -> usize
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut cycles: usize = 0;

    loop {
        let Some(deadline) = directory.next_refresh() else {
            (&mut shutdown).await;
            break;
        };

        tokio::select! {
            _ = &mut shutdown => break,
            _ = time::sleep_until(deadline) => {
                if directory.poll_refresh(Instant::now()) {
                    cycles += 1;
                }
            }
        }
    }

    info!("Refresh loop stopped after {cycles} cycles");
    cycles
}
