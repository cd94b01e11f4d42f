//! Cross-store delivery-order scenarios.
//!
//! These exercise the guarantee that flushing a store first completes
//! every upstream store's flush, so downstream listeners always run
//! after the listeners of everything they depend on.

use std::rc::Rc;

use silt_core::{ChangeListener, ComponentId, ItemId};
use silt_graph::GraphBuilder;
use silt_test_utils::{EventLog, RecordingListener, TaggedListener};

#[test]
fn upstream_listeners_run_before_downstream_listeners() {
    // instances depends on meshes: mesh batches must land first.
    let mut builder = GraphBuilder::new();
    let meshes = builder.add_store();
    let instances = builder.add_store();
    builder.depends_on(instances, meshes).unwrap();
    let mut graph = builder.build().unwrap();
    graph.flush_all();

    let log = EventLog::new();
    graph
        .listeners_mut(meshes)
        .add_items_added(TaggedListener::shared("meshes", log.clone()));
    graph
        .listeners_mut(instances)
        .add_items_added(TaggedListener::shared("instances", log.clone()));

    graph.note_item_added(meshes, ItemId(0));
    graph.note_item_added(instances, ItemId(0));
    graph.flush(instances);

    assert_eq!(log.events(), vec!["meshes:added", "instances:added"]);
    assert!(!graph.store(meshes).is_dirty());
    assert!(!graph.store(instances).is_dirty());
}

#[test]
fn flushing_downstream_completes_upstream_even_when_only_upstream_changed() {
    let mut builder = GraphBuilder::new();
    let meshes = builder.add_store();
    let instances = builder.add_store();
    builder.depends_on(instances, meshes).unwrap();
    let mut graph = builder.build().unwrap();
    graph.flush_all();

    let log = EventLog::new();
    graph
        .listeners_mut(meshes)
        .add_items_added(TaggedListener::shared("meshes", log.clone()));

    graph.note_item_added(meshes, ItemId(0));
    // Only the upstream store changed, but the downstream store went
    // dirty by propagation, so flushing it reconciles both.
    graph.flush(instances);

    assert_eq!(log.events(), vec!["meshes:added"]);
    assert!(!graph.store(meshes).is_dirty());
    assert!(!graph.store(instances).is_dirty());
}

#[test]
fn diamond_delivers_top_before_middles_before_bottom() {
    let mut builder = GraphBuilder::new();
    let top = builder.add_store();
    let left = builder.add_store();
    let right = builder.add_store();
    let bottom = builder.add_store();
    builder.depends_on(left, top).unwrap();
    builder.depends_on(right, top).unwrap();
    builder.depends_on(bottom, left).unwrap();
    builder.depends_on(bottom, right).unwrap();
    let mut graph = builder.build().unwrap();
    graph.flush_all();

    let log = EventLog::new();
    for (node, tag) in [(top, "top"), (left, "left"), (right, "right"), (bottom, "bottom")] {
        graph
            .listeners_mut(node)
            .add_items_added(TaggedListener::shared(tag, log.clone()));
        graph.note_item_added(node, ItemId(0));
    }
    graph.flush(bottom);

    let events = log.events();
    assert_eq!(events.len(), 4);
    let pos = |tag: &str| {
        events
            .iter()
            .position(|e| e == &format!("{tag}:added"))
            .unwrap()
    };
    assert!(pos("top") < pos("left"));
    assert!(pos("top") < pos("right"));
    assert!(pos("left") < pos("bottom"));
    assert!(pos("right") < pos("bottom"));
}

#[test]
fn second_flush_with_no_mutations_delivers_nothing() {
    let mut builder = GraphBuilder::new();
    let meshes = builder.add_store();
    let instances = builder.add_store();
    builder.depends_on(instances, meshes).unwrap();
    let mut graph = builder.build().unwrap();

    let recorder = RecordingListener::shared();
    graph.listeners_mut(meshes).add_items_added(recorder.clone());
    graph
        .listeners_mut(instances)
        .add_items_added(recorder.clone());

    graph.note_item_added(meshes, ItemId(0));
    graph.flush(instances);
    let after_first = recorder.total_callbacks();

    graph.flush(instances);
    graph.flush_all();
    assert_eq!(recorder.total_callbacks(), after_first);
}

#[test]
fn baseline_flush_of_fresh_graph_delivers_nothing() {
    let mut builder = GraphBuilder::new();
    let a = builder.add_store();
    let b = builder.add_store();
    builder.depends_on(b, a).unwrap();
    let mut graph = builder.build().unwrap();

    let recorder = RecordingListener::shared();
    for node in [a, b] {
        let l: Rc<dyn ChangeListener> = recorder.clone();
        graph.listeners_mut(node).add_items_added(l.clone());
        graph.listeners_mut(node).add_items_removed(l.clone());
        graph.listeners_mut(node).add_item_component_modified(l.clone());
        graph
            .listeners_mut(node)
            .add_container_components_modified(l);
    }

    graph.flush_all();
    assert_eq!(recorder.total_callbacks(), 0);
    assert!(!graph.store(a).is_dirty());
    assert!(!graph.store(b).is_dirty());
}

#[test]
fn full_frame_scenario_across_two_stores() {
    // meshes carries two components; instances references meshes.
    let mut builder = GraphBuilder::new();
    let meshes = builder.add_store();
    let instances = builder.add_store();
    builder.depends_on(instances, meshes).unwrap();
    let mut graph = builder.build().unwrap();
    graph.note_components_added(meshes, 2);
    graph.note_components_added(instances, 1);
    graph.flush_all();

    let mesh_rec = RecordingListener::shared();
    let inst_rec = RecordingListener::shared();
    graph.listeners_mut(meshes).add_items_added(mesh_rec.clone());
    graph
        .listeners_mut(meshes)
        .add_item_component_modified(mesh_rec.clone());
    graph
        .listeners_mut(instances)
        .add_items_added(inst_rec.clone());

    // Frame 1: a mesh appears; an instance referencing it appears.
    graph.note_item_added(meshes, ItemId(0));
    graph.note_item_added(instances, ItemId(0));
    graph.flush_all();

    assert_eq!(mesh_rec.added_batches(), vec![vec![ItemId(0)]]);
    assert_eq!(
        mesh_rec.modified_batches(),
        vec![
            (ComponentId(0), vec![ItemId(0)]),
            (ComponentId(1), vec![ItemId(0)]),
        ]
    );
    assert_eq!(inst_rec.added_batches(), vec![vec![ItemId(0)]]);

    // Frame 2: the mesh's second component changes in place.
    graph.note_item_component_modified(meshes, ItemId(0), ComponentId(1));
    graph.flush_all();

    assert_eq!(
        mesh_rec.modified_batches().last().unwrap(),
        &(ComponentId(1), vec![ItemId(0)])
    );
    // The instance store reconciled too (it was dirtied by upstream),
    // but had nothing of its own to deliver.
    assert_eq!(inst_rec.added_batches().len(), 1);
}
