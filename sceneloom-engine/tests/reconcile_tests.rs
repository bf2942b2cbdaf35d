//! Tests for snapshot reconciliation: diff semantics, replace
//! semantics, suppression along the load path, and forward tolerance
//! of unknown kinds.

mod common;

use common::{entries, journal, material_params, mesh_params, record_topics, standard_project};
use pretty_assertions::assert_eq;
use sceneloom_engine::{LoadMode, StoreSnapshot};
use sceneloom_kinds::{LightAsset, MeshAsset, StandardMaterial};
use sceneloom_types::{EntityClass, MutationOrigin, Params};
use std::sync::Arc;

// ── Diff semantics ───────────────────────────────────────────────────

#[test]
fn diff_deletes_stale_entities_and_updates_live_ones_in_place() {
    let project = standard_project();
    let store = project.materials();
    let original = store
        .add_new_entity(
            StandardMaterial::KIND_ID,
            material_params("A", 0.2),
            MutationOrigin::Local,
        )
        .unwrap();
    store
        .add_new_entity(
            StandardMaterial::KIND_ID,
            material_params("B", 0.4),
            MutationOrigin::Local,
        )
        .unwrap();

    let log = journal();
    project
        .bus()
        .subscribe("probe", "MATERIAL_ADDED", record_topics(&log));
    project
        .bus()
        .subscribe("probe", "MATERIAL_DELETED", record_topics(&log));

    let snapshot = StoreSnapshot::new()
        .with_bucket(StandardMaterial::KIND_ID, vec![material_params("A", 0.9)]);
    let report = store.load(&snapshot, LoadMode::Diff);

    assert_eq!(report.updated, 1);
    assert_eq!(report.removed, 1);
    assert_eq!(report.added, 0);
    assert!(entries(&log).is_empty());

    assert!(!store.contains("B"));
    let live = store.get_entity("A").unwrap();
    assert!(Arc::ptr_eq(&original, &live), "updated in place, not reconstructed");
    let guard = live.read();
    let material = guard.as_any().downcast_ref::<StandardMaterial>().unwrap();
    assert_eq!(material.roughness, 0.9);
}

#[test]
fn applying_the_same_snapshot_twice_changes_nothing() {
    let project = standard_project();
    let store = project.assets();
    for id in ["A", "B", "C"] {
        store
            .add_new_entity(MeshAsset::KIND_ID, mesh_params(id, "cube"), MutationOrigin::Local)
            .unwrap();
    }
    let snapshot = store.export_details();
    let before: Vec<_> = store.live_entities();

    let first = store.load(&snapshot, LoadMode::Diff);
    assert_eq!(first.added, 0);
    assert_eq!(first.removed, 0);
    assert_eq!(first.updated, 3);

    let second = store.load(&snapshot, LoadMode::Diff);
    assert_eq!(second.added, 0);
    assert_eq!(second.removed, 0);

    let after = store.live_entities();
    assert_eq!(before.len(), after.len());
    for (b, a) in before.iter().zip(&after) {
        assert!(Arc::ptr_eq(b, a));
    }
    assert_eq!(store.export_details(), snapshot);
}

#[test]
fn an_id_moving_between_kinds_is_a_delete_plus_recreate() {
    let project = standard_project();
    let store = project.assets();
    store
        .add_new_entity(MeshAsset::KIND_ID, mesh_params("A", "cube"), MutationOrigin::Local)
        .unwrap();

    let snapshot =
        StoreSnapshot::new().with_bucket(LightAsset::KIND_ID, vec![Params::new().with("id", "A")]);
    let report = store.load(&snapshot, LoadMode::Diff);

    assert_eq!(report.removed, 1);
    assert_eq!(report.added, 1);
    assert_eq!(
        store.get_entity("A").unwrap().read().kind_id(),
        LightAsset::KIND_ID
    );
}

// ── Suppression along the load path ──────────────────────────────────

#[test]
fn loads_never_publish_entity_events() {
    let project = standard_project();
    let log = journal();
    for class in EntityClass::ALL {
        project
            .bus()
            .subscribe("probe", class.added_topic(), record_topics(&log));
        project
            .bus()
            .subscribe("probe", class.deleted_topic(), record_topics(&log));
    }
    project
        .assets()
        .add_new_entity(MeshAsset::KIND_ID, mesh_params("old", "cube"), MutationOrigin::RemoteReplay)
        .unwrap();
    let log_baseline = entries(&log).len();

    let snapshot = StoreSnapshot::new()
        .with_bucket(MeshAsset::KIND_ID, vec![mesh_params("new", "cone")]);
    project.assets().load(&snapshot, LoadMode::Diff);
    project.update();

    assert_eq!(entries(&log).len(), log_baseline);
}

#[test]
fn loads_never_touch_the_undo_history() {
    let project = standard_project();
    let store = project.assets();
    store
        .add_new_entity(MeshAsset::KIND_ID, mesh_params("A", "cube"), MutationOrigin::Local)
        .unwrap();
    assert_eq!(project.history().len(), 1);

    let snapshot = StoreSnapshot::new()
        .with_bucket(MeshAsset::KIND_ID, vec![mesh_params("A", "cone"), mesh_params("B", "cube")]);
    store.load(&snapshot, LoadMode::Diff);

    assert_eq!(project.history().len(), 1);
    assert!(project.undo());
    assert!(!store.contains("A"));
    assert!(store.contains("B"));
}

// ── Forward tolerance ────────────────────────────────────────────────

#[test]
fn unknown_kinds_are_skipped_and_the_rest_applies() {
    let project = standard_project();
    let store = project.textures();

    let snapshot = StoreSnapshot::new()
        .with_bucket(
            "HOLOGRAM_TEXTURE",
            vec![Params::new().with("id", "h1"), Params::new().with("id", "h2")],
        )
        .with_bucket(
            "IMAGE_TEXTURE",
            vec![Params::new().with("id", "t1").with("url", "bricks.png")],
        );
    let report = store.load(&snapshot, LoadMode::Diff);

    assert_eq!(report.added, 1);
    assert_eq!(report.skipped_kinds.len(), 1);
    assert_eq!(report.skipped_kinds[0].as_str(), "HOLOGRAM_TEXTURE");
    assert!(store.contains("t1"));
    assert!(!store.contains("h1"));
}

// ── Replace semantics ────────────────────────────────────────────────

#[test]
fn replace_rebuilds_even_matching_ids() {
    let project = standard_project();
    let store = project.assets();
    let old_b = store
        .add_new_entity(MeshAsset::KIND_ID, mesh_params("B", "cube"), MutationOrigin::Local)
        .unwrap();
    store
        .add_new_entity(MeshAsset::KIND_ID, mesh_params("A", "cube"), MutationOrigin::Local)
        .unwrap();

    let snapshot = StoreSnapshot::new().with_bucket(
        MeshAsset::KIND_ID,
        vec![mesh_params("B", "cone"), mesh_params("C", "cube")],
    );
    let report = store.load(&snapshot, LoadMode::Replace);

    assert_eq!(report.removed, 2);
    assert_eq!(report.added, 2);
    assert_eq!(report.updated, 0);

    let mut ids: Vec<String> = store
        .live_ids()
        .iter()
        .map(|id| id.as_str().to_string())
        .collect();
    ids.sort();
    assert_eq!(ids, vec!["B", "C"]);
    let new_b = store.get_entity("B").unwrap();
    assert!(!Arc::ptr_eq(&old_b, &new_b), "replace reconstructs, never updates");
}
