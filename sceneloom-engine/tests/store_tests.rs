//! Tests for the entity store: add/delete with origin handling, the
//! live/session split, kind-scoped events, and undo integration.

mod common;

use common::{entries, journal, mesh_params, record_topics, standard_project, JournalCommand};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use sceneloom_engine::{CommandId, EngineError, SceneEvent};
use sceneloom_kinds::{LightAsset, MeshAsset};
use sceneloom_types::{EntityClass, MutationOrigin, Params};
use std::sync::Arc;

// ── Add ──────────────────────────────────────────────────────────────

#[test]
fn add_new_entity_constructs_and_registers() {
    let project = standard_project();
    let store = project.assets();

    let entity = store
        .add_new_entity(MeshAsset::KIND_ID, mesh_params("A", "sphere"), MutationOrigin::Local)
        .unwrap();

    assert_eq!(store.len(), 1);
    assert!(store.contains("A"));
    let looked_up = store.get_entity("A").unwrap();
    assert!(Arc::ptr_eq(&entity, &looked_up));
    assert_eq!(looked_up.read().kind_id(), MeshAsset::KIND_ID);
}

#[test]
fn colliding_id_add_is_a_silent_noop() {
    let project = standard_project();
    let store = project.assets();
    let first = store
        .add_new_entity(MeshAsset::KIND_ID, mesh_params("A", "cube"), MutationOrigin::Local)
        .unwrap();

    let log = journal();
    project.bus().subscribe("probe", "ASSET_ADDED", record_topics(&log));

    let second = store
        .add_new_entity(MeshAsset::KIND_ID, mesh_params("A", "sphere"), MutationOrigin::Local)
        .unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(store.len(), 1);
    assert!(entries(&log).is_empty());
    assert_eq!(project.history().len(), 1);
    // The colliding params were never applied.
    let guard = first.read();
    let mesh = guard.as_any().downcast_ref::<MeshAsset>().unwrap();
    assert_eq!(mesh.mesh, "cube");
}

#[test]
fn unknown_kind_is_a_recoverable_error() {
    let project = standard_project();
    let err = project
        .materials()
        .add_new_entity("NOPE", Params::new(), MutationOrigin::Local)
        .unwrap_err();

    match &err {
        EngineError::UnknownKind { class, kind } => {
            assert_eq!(*class, EntityClass::Material);
            assert_eq!(kind.as_str(), "NOPE");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.to_string(), "unknown material kind: NOPE");
    assert!(project.materials().is_empty());
}

// ── Live/session split ───────────────────────────────────────────────

#[test]
fn deleted_entities_stay_resolvable_in_the_session_store() {
    let project = standard_project();
    let store = project.assets();
    let entity = store
        .add_new_entity(MeshAsset::KIND_ID, mesh_params("A", "cube"), MutationOrigin::Local)
        .unwrap();
    store
        .add_new_entity(MeshAsset::KIND_ID, mesh_params("B", "cube"), MutationOrigin::Local)
        .unwrap();

    store.delete_entity("A", MutationOrigin::Local);

    assert!(!store.contains("A"));
    assert_eq!(store.len(), 1);
    assert_eq!(store.session_len(), 2);
    let from_session = store.get_session_entity("A").unwrap();
    assert!(Arc::ptr_eq(&entity, &from_session));
}

#[test]
fn deleting_an_absent_id_is_a_silent_noop() {
    let project = standard_project();
    let store = project.assets();
    let log = journal();
    project
        .bus()
        .subscribe("probe", "ASSET_DELETED", record_topics(&log));

    assert!(store.delete_entity("ghost", MutationOrigin::Local).is_none());
    assert!(entries(&log).is_empty());
    assert!(project.history().is_empty());
}

// ── Undo integration ─────────────────────────────────────────────────

#[test]
fn undo_of_an_add_restores_the_same_object_on_redo() {
    let project = standard_project();
    let store = project.assets();
    let entity = store
        .add_new_entity(MeshAsset::KIND_ID, mesh_params("A", "cube"), MutationOrigin::Local)
        .unwrap();
    assert_eq!(project.history().len(), 1);

    assert!(project.undo());
    assert!(store.is_empty());
    assert!(store.get_session_entity("A").is_some());

    assert!(project.redo());
    let back = store.get_entity("A").unwrap();
    assert!(Arc::ptr_eq(&entity, &back));
}

#[test]
fn undoing_a_mixed_sequence_restores_the_starting_content() {
    let project = standard_project();
    let store = project.assets();
    store
        .add_new_entity(MeshAsset::KIND_ID, mesh_params("A", "cube"), MutationOrigin::Local)
        .unwrap();
    store
        .add_new_entity(MeshAsset::KIND_ID, mesh_params("B", "cone"), MutationOrigin::Local)
        .unwrap();
    store.delete_entity("A", MutationOrigin::Local);
    assert_eq!(project.history().len(), 3);

    while project.undo() {}
    assert!(store.is_empty());

    while project.redo() {}
    let ids: Vec<String> = store
        .live_ids()
        .iter()
        .map(|id| id.as_str().to_string())
        .collect();
    assert_eq!(ids, vec!["B"]);
}

#[test]
fn delete_events_carry_an_amendable_undo_handle() {
    let project = standard_project();
    let store = project.assets();
    store
        .add_new_entity(MeshAsset::KIND_ID, mesh_params("A", "cube"), MutationOrigin::Local)
        .unwrap();

    let captured: Arc<Mutex<Option<CommandId>>> = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&captured);
    project.bus().subscribe("probe", "ASSET_DELETED", move |envelope| {
        if let SceneEvent::EntityDeleted { command, .. } = &envelope.message {
            *sink.lock() = *command;
        }
    });

    store.delete_entity("A", MutationOrigin::Local);
    let command = captured.lock().take().expect("delete event carries the handle");

    let log = journal();
    assert!(project.history().amend(command, JournalCommand::boxed(&log, "restore-ref")));

    assert!(project.undo());
    assert_eq!(entries(&log), vec!["undo restore-ref"]);
    assert!(store.contains("A"));
}

// ── Origin handling ──────────────────────────────────────────────────

#[test]
fn remote_replay_neither_records_nor_publishes() {
    let project = standard_project();
    let store = project.assets();
    let log = journal();
    project.bus().subscribe("probe", "ASSET_ADDED", record_topics(&log));
    project
        .bus()
        .subscribe("probe", "ASSET_DELETED", record_topics(&log));

    store
        .add_new_entity(MeshAsset::KIND_ID, mesh_params("A", "cube"), MutationOrigin::RemoteReplay)
        .unwrap();
    store.delete_entity("A", MutationOrigin::RemoteReplay);

    assert!(entries(&log).is_empty());
    assert!(project.history().is_empty());
}

#[test]
fn undo_replay_publishes_without_recording() {
    let project = standard_project();
    let store = project.assets();
    let log = journal();
    project.bus().subscribe("probe", "ASSET_ADDED", record_topics(&log));

    store
        .add_new_entity(MeshAsset::KIND_ID, mesh_params("A", "cube"), MutationOrigin::UndoReplay)
        .unwrap();

    assert_eq!(entries(&log), vec!["ASSET_ADDED:MESH_ASSET"]);
    assert!(project.history().is_empty());
}

// ── Events ───────────────────────────────────────────────────────────

#[test]
fn added_events_are_scoped_by_kind() {
    let project = standard_project();
    let store = project.assets();
    let log = journal();
    project.bus().subscribe("list", "ASSET_ADDED", record_topics(&log));
    project
        .bus()
        .subscribe("lights", "ASSET_ADDED:LIGHT_ASSET", record_topics(&log));

    store
        .add_new_entity(MeshAsset::KIND_ID, mesh_params("A", "cube"), MutationOrigin::Local)
        .unwrap();
    assert_eq!(entries(&log), vec!["ASSET_ADDED:MESH_ASSET"]);

    store
        .add_new_entity(LightAsset::KIND_ID, Params::new().with("id", "L"), MutationOrigin::Local)
        .unwrap();
    assert_eq!(
        entries(&log),
        vec![
            "ASSET_ADDED:MESH_ASSET",
            "ASSET_ADDED:LIGHT_ASSET",
            "ASSET_ADDED:LIGHT_ASSET",
        ]
    );
}

#[test]
fn added_event_carries_the_live_entity() {
    let project = standard_project();
    let store = project.assets();

    let seen: Arc<Mutex<Vec<(EntityClass, String)>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    project.bus().subscribe("probe", "ASSET_ADDED", move |envelope| {
        if let SceneEvent::EntityAdded { class, kind_id, entity } = &envelope.message {
            sink.lock()
                .push((*class, format!("{kind_id}/{}", entity.read().id())));
        }
    });

    store
        .add_new_entity(MeshAsset::KIND_ID, mesh_params("A", "cube"), MutationOrigin::Local)
        .unwrap();
    assert_eq!(
        seen.lock().clone(),
        vec![(EntityClass::Asset, "MESH_ASSET/A".to_string())]
    );
}

// ── Export ───────────────────────────────────────────────────────────

#[test]
fn export_preserves_discovery_order_per_bucket() {
    let project = standard_project();
    let store = project.assets();
    for id in ["A", "B", "C"] {
        store
            .add_new_entity(MeshAsset::KIND_ID, mesh_params(id, "cube"), MutationOrigin::Local)
            .unwrap();
    }
    store
        .add_new_entity(LightAsset::KIND_ID, Params::new().with("id", "L"), MutationOrigin::Local)
        .unwrap();

    let bucket_ids = |snapshot: &sceneloom_engine::StoreSnapshot| -> Vec<String> {
        snapshot
            .bucket(MeshAsset::KIND_ID)
            .unwrap()
            .iter()
            .filter_map(|p| p.get_str("id").map(str::to_string))
            .collect()
    };

    assert_eq!(bucket_ids(&store.export_details()), vec!["A", "B", "C"]);

    store.delete_entity("B", MutationOrigin::Local);
    store
        .add_new_entity(MeshAsset::KIND_ID, mesh_params("D", "cube"), MutationOrigin::Local)
        .unwrap();
    let snapshot = store.export_details();
    assert_eq!(bucket_ids(&snapshot), vec!["A", "C", "D"]);
    assert_eq!(snapshot.bucket(LightAsset::KIND_ID).unwrap().len(), 1);
    assert_eq!(snapshot.entity_count(), 4);
}
