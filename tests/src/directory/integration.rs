#![cfg(test)]
use std::cell::RefCell;
use std::rc::Rc;

use netdir_common::config::CascadeMode;
use netdir_common::network::{ModelId, NetworkObject, ObjectKind};
use netdir_core::observer::event_channel;
use netdir_core::{DirectoryEvent, NetworkObjectDirectory};

fn group(id: u64, name: &str) -> NetworkObject {
    NetworkObject::group(name).with_model_id(id)
}

fn host(id: u64, name: &str) -> NetworkObject {
    NetworkObject::host(name, format!("192.168.0.{id}")).with_model_id(id)
}

/// Group G1 (10) under root, host H1 (20) under G1, duplicate insert,
/// then G1 removed from root.
#[test]
fn group_lifecycle_scenario() {
    let mut directory: NetworkObjectDirectory = NetworkObjectDirectory::new();
    let root: NetworkObject = directory.root().clone();
    let g1: NetworkObject = group(10, "G1");
    let h1: NetworkObject = host(20, "H1");

    assert!(directory.insert_object(g1.clone(), &root));
    assert_eq!(directory.child_count(root.model_id), 1);
    assert!(directory.objects(&g1).is_empty());

    assert!(directory.insert_object(h1.clone(), &g1));
    assert_eq!(directory.child_count(g1.model_id), 1);
    assert_eq!(directory.parent_id(ModelId(20)), ModelId(10));

    assert!(!directory.insert_object(h1.clone(), &g1));
    assert_eq!(directory.child_count(g1.model_id), 1);

    directory.remove_objects(&root, |object: &NetworkObject| object.model_id == ModelId(10));
    assert_eq!(directory.child_count(root.model_id), 0);
    assert!(directory.objects(&g1).is_empty());
    assert!(!directory.contains_bucket(g1.model_id));
    assert!(directory
        .walk()
        .iter()
        .all(|(_, object)| object.model_id != h1.model_id));
}

#[test]
fn index_and_child_id_agree_for_every_position() {
    let mut directory: NetworkObjectDirectory = NetworkObjectDirectory::new();
    let root: NetworkObject = directory.root().clone();
    let lab: NetworkObject = group(5, "lab");
    directory.insert_object(lab.clone(), &root);

    for id in (100..140).rev() {
        let object: NetworkObject = if id % 3 == 0 {
            NetworkObject::location(format!("desk-{id}")).with_model_id(id)
        } else {
            host(id, "pc")
        };
        assert!(directory.insert_object(object, &lab));
    }

    let count: usize = directory.child_count(lab.model_id);
    assert_eq!(count, 40);
    for i in 0..count {
        let child: ModelId = directory.child_id(lab.model_id, i);
        assert_eq!(directory.index(lab.model_id, child), Some(i));
        assert_eq!(directory.parent_id(child), lab.model_id);
        assert_eq!(directory.object(lab.model_id, child).model_id, child);
    }
}

#[test]
fn every_inserted_group_hosts_children() {
    let mut directory: NetworkObjectDirectory = NetworkObjectDirectory::new();
    let mut parent: NetworkObject = directory.root().clone();

    for id in 10..15 {
        let next: NetworkObject = group(id, "level");
        assert!(directory.insert_object(next.clone(), &parent));
        assert!(directory.objects(&next).is_empty());
        parent = next;
    }

    assert!(directory.insert_object(host(99, "deep"), &parent));
    assert_eq!(directory.parent_id(ModelId(99)), ModelId(14));

    let depths: Vec<usize> = directory.walk().iter().map(|(depth, _)| *depth).collect();
    assert_eq!(depths, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn listeners_see_state_on_both_sides_of_a_removal() {
    let mut directory: NetworkObjectDirectory = NetworkObjectDirectory::new();
    let root: NetworkObject = directory.root().clone();
    directory.insert_object(host(20, "H1"), &root);
    directory.insert_object(host(21, "H2"), &root);

    let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    directory.subscribe(move |event: &DirectoryEvent, dir: &NetworkObjectDirectory| {
        let line: String = match event {
            DirectoryEvent::ObjectsAboutToBeRemoved { parent, start, .. } => {
                let doomed: &NetworkObject = &dir.objects(parent)[*start];
                format!("removing {} of {}", doomed.name, dir.child_count(parent.model_id))
            }
            DirectoryEvent::ObjectsRemoved => {
                format!("left {}", dir.child_count(ModelId::ROOT))
            }
            _ => String::from("unexpected"),
        };
        sink.borrow_mut().push(line);
    });

    directory.remove_objects(&root, |object: &NetworkObject| object.kind == ObjectKind::Host);

    assert_eq!(
        *seen.borrow(),
        vec!["removing H1 of 2", "left 1", "removing H2 of 1", "left 0"]
    );
}

#[test]
fn channel_consumer_sees_one_pair_per_object() {
    let mut directory: NetworkObjectDirectory = NetworkObjectDirectory::new();
    let root: NetworkObject = directory.root().clone();
    let (listener, mut rx) = event_channel();
    directory.subscribe(listener);

    for id in 20..23 {
        directory.insert_object(host(id, "pc"), &root);
    }
    directory.remove_objects(&root, |_: &NetworkObject| true);

    let mut events: Vec<DirectoryEvent> = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }

    let inserts: Vec<usize> = events
        .iter()
        .filter_map(|event| match event {
            DirectoryEvent::ObjectsAboutToBeInserted { start, count, .. } => {
                assert_eq!(*count, 1);
                Some(*start)
            }
            _ => None,
        })
        .collect();
    let removals: Vec<usize> = events
        .iter()
        .filter_map(|event| match event {
            DirectoryEvent::ObjectsAboutToBeRemoved { start, count, .. } => {
                assert_eq!(*count, 1);
                Some(*start)
            }
            _ => None,
        })
        .collect();

    assert_eq!(events.len(), 12);
    assert_eq!(inserts, vec![0, 1, 2]);
    assert_eq!(removals, vec![0, 0, 0]);
}

#[test]
fn cascade_modes_differ_only_in_nested_buckets() {
    for cascade in [CascadeMode::Shallow, CascadeMode::Recursive] {
        let mut directory: NetworkObjectDirectory =
            NetworkObjectDirectory::new().with_cascade(cascade);
        let root: NetworkObject = directory.root().clone();
        let campus: NetworkObject = group(10, "campus");
        let building: NetworkObject = group(11, "building");
        let room: NetworkObject = group(12, "room");
        directory.insert_object(campus.clone(), &root);
        directory.insert_object(building.clone(), &campus);
        directory.insert_object(room.clone(), &building);
        directory.insert_object(host(20, "pc"), &room);

        directory.remove_objects(&root, |_: &NetworkObject| true);

        assert_eq!(directory.object_count(), 0);
        assert!(!directory.contains_bucket(campus.model_id));
        assert!(directory.contains_bucket(ModelId::ROOT));

        match cascade {
            CascadeMode::Shallow => {
                assert_eq!(directory.orphaned_buckets(), vec![ModelId(11), ModelId(12)]);
            }
            CascadeMode::Recursive => {
                assert!(directory.orphaned_buckets().is_empty());
            }
        }
    }
}
