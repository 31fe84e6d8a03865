#![cfg(test)]
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use netdir_common::network::{ModelId, NetworkObject};
use netdir_core::backend::{self, DirectoryBackend};
use netdir_core::{NetworkObjectDirectory, refresh};
use tokio::time::{self, Instant};

/// Serves a scripted sequence of host lists, one per refresh, and records
/// when each refresh happened.
struct ScriptedBackend {
    rounds: Vec<Vec<NetworkObject>>,
    fired_at: Rc<RefCell<Vec<Instant>>>,
}

impl DirectoryBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    fn refresh(&mut self, directory: &mut NetworkObjectDirectory) -> anyhow::Result<()> {
        self.fired_at.borrow_mut().push(Instant::now());
        let round: usize = self.fired_at.borrow().len() - 1;
        let Some(hosts) = self.rounds.get(round) else {
            anyhow::bail!("no data for round {round}");
        };

        let root: NetworkObject = directory.root().clone();
        backend::reconcile(directory, &root, hosts);
        Ok(())
    }
}

fn host(id: u64) -> NetworkObject {
    NetworkObject::host(format!("pc-{id}"), format!("10.1.0.{id}")).with_model_id(id)
}

#[tokio::test(start_paused = true)]
async fn refresh_converges_the_tree_on_schedule() {
    let fired_at: Rc<RefCell<Vec<Instant>>> = Rc::new(RefCell::new(Vec::new()));
    let mut directory: NetworkObjectDirectory = NetworkObjectDirectory::new();
    directory.set_backend(Box::new(ScriptedBackend {
        rounds: vec![vec![host(1), host(2)], vec![host(2), host(3)], vec![]],
        fired_at: fired_at.clone(),
    }));

    let start: Instant = Instant::now();
    directory.set_update_interval(15);

    let cycles: usize = refresh::drive(&mut directory, time::sleep(Duration::from_secs(40))).await;

    assert_eq!(cycles, 2);
    let offsets: Vec<u64> = fired_at
        .borrow()
        .iter()
        .map(|at| at.duration_since(start).as_secs())
        .collect();
    assert_eq!(offsets, vec![15, 30]);

    assert_eq!(directory.child_count(ModelId::ROOT), 2);
    assert_eq!(directory.child_id(ModelId::ROOT, 0), ModelId(2));
    assert_eq!(directory.child_id(ModelId::ROOT, 1), ModelId(3));
}

#[tokio::test(start_paused = true)]
async fn backend_errors_do_not_stop_the_timer() {
    let fired_at: Rc<RefCell<Vec<Instant>>> = Rc::new(RefCell::new(Vec::new()));
    let mut directory: NetworkObjectDirectory = NetworkObjectDirectory::new();
    directory.set_backend(Box::new(ScriptedBackend {
        rounds: vec![vec![host(1)]],
        fired_at: fired_at.clone(),
    }));
    directory.set_update_interval(10);

    let cycles: usize = refresh::drive(&mut directory, time::sleep(Duration::from_secs(45))).await;

    assert_eq!(cycles, 4);
    assert_eq!(fired_at.borrow().len(), 4);
    assert_eq!(directory.child_count(ModelId::ROOT), 1);
}

/// Turns refresh off from inside its own refresh hook after two rounds.
struct SelfStopping {
    runs: Rc<RefCell<usize>>,
}

impl DirectoryBackend for SelfStopping {
    fn name(&self) -> &str {
        "self-stopping"
    }

    fn refresh(&mut self, directory: &mut NetworkObjectDirectory) -> anyhow::Result<()> {
        *self.runs.borrow_mut() += 1;
        if *self.runs.borrow() == 2 {
            directory.set_update_interval(0);
        }
        Ok(())
    }
}

#[tokio::test(start_paused = true)]
async fn interval_below_minimum_stops_further_cycles() {
    let runs: Rc<RefCell<usize>> = Rc::new(RefCell::new(0));
    let mut directory: NetworkObjectDirectory = NetworkObjectDirectory::new();
    directory.set_backend(Box::new(SelfStopping { runs: runs.clone() }));
    directory.set_update_interval(10);

    let cycles: usize = refresh::drive(&mut directory, time::sleep(Duration::from_secs(300))).await;

    assert_eq!(cycles, 2);
    assert_eq!(*runs.borrow(), 2);
    assert!(!directory.timer().is_active());
}

#[tokio::test(start_paused = true)]
async fn minimum_interval_is_accepted() {
    let runs: Rc<RefCell<usize>> = Rc::new(RefCell::new(0));
    let mut directory: NetworkObjectDirectory = NetworkObjectDirectory::new();
    directory.set_backend(Box::new(SelfStopping { runs: runs.clone() }));

    directory.set_update_interval(9);
    assert!(!directory.timer().is_active());

    directory.set_update_interval(10);
    assert_eq!(directory.timer().interval(), Some(Duration::from_secs(10)));

    time::advance(Duration::from_secs(10)).await;
    assert!(directory.poll_refresh(Instant::now()));
    assert_eq!(*runs.borrow(), 1);
}
