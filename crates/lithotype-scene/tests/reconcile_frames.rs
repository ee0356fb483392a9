//! Reconciliation across consecutive frames, driven through the mock sink.

use std::sync::Arc;

use lithotype_geometry::{EarcutTriangulator, MeshOptions, Placement, PolygonWithHoles, ShapeId, Transform};
use lithotype_scene::{LiveInstance, Reconciler};
use lithotype_test_utils::{fixtures, MockInstance, MockRenderSink, SinkCall};

fn placement(id: &str, x: f64) -> Placement {
    Placement {
        id: ShapeId::from(id),
        transform: Transform::new(x, 0.0, 0.0, 10.0),
        geometry: Arc::new(PolygonWithHoles::new(fixtures::square(0.0, 0.0, 1.0), vec![])),
    }
}

fn frame(ids: &[&str]) -> Vec<Placement> {
    ids.iter()
        .enumerate()
        .map(|(i, id)| placement(id, i as f64 * 10.0))
        .collect()
}

fn serials(live: &[LiveInstance<MockInstance>]) -> Vec<u64> {
    live.iter().map(|l| l.instance.serial()).collect()
}

#[test]
fn test_abc_then_bcd() {
    let sink = MockRenderSink::new();
    let mut reconciler = Reconciler::new();
    let options = MeshOptions::default();

    let (live, stats) = reconciler.reconcile(
        &sink,
        Vec::new(),
        &frame(&["A", "B", "C"]),
        &options,
        &EarcutTriangulator,
    );
    assert_eq!(stats.created, 3);
    assert_eq!(stats.masters_built, 3);
    let first = serials(&live);

    let (live, stats) = reconciler.reconcile(
        &sink,
        live,
        &frame(&["B", "C", "D"]),
        &options,
        &EarcutTriangulator,
    );

    // B and C are the same objects, D is new, A is pooled.
    assert_eq!(serials(&live)[..2], first[1..]);
    assert!(!first.contains(&live[2].instance.serial()));
    assert_eq!(stats.reused, 2);
    assert_eq!(stats.created, 1);
    assert_eq!(stats.released, 1);
    assert_eq!(reconciler.pool().available(&ShapeId::from("A")), 1);
    assert_eq!(sink.visible_count(), 3);
    assert_eq!(sink.count_master_creates(), 4);
    assert!(sink.calls().contains(&SinkCall::Detach { serial: first[0] }));
}

#[test]
fn test_released_instance_recycled_for_same_identity() {
    let sink = MockRenderSink::new();
    let mut reconciler = Reconciler::new();
    let options = MeshOptions::default();

    let (live, _) = reconciler.reconcile(&sink, Vec::new(), &frame(&["A", "B"]), &options, &EarcutTriangulator);
    let a_serial = live[0].instance.serial();
    let (live, _) = reconciler.reconcile(&sink, live, &frame(&["B"]), &options, &EarcutTriangulator);
    let (live, stats) = reconciler.reconcile(&sink, live, &frame(&["B", "A"]), &options, &EarcutTriangulator);

    assert_eq!(stats.recycled, 1);
    assert_eq!(stats.created, 0);
    assert_eq!(live[1].instance.serial(), a_serial);
    assert!(sink.is_visible(&live[1].instance));
    assert_eq!(
        sink.transform_of(&live[1].instance),
        Some(Transform::new(-10.0, 0.0, 0.0, 10.0))
    );
}

#[test]
fn test_instance_count_bounded_by_two_frames() {
    let sink = MockRenderSink::new();
    let mut reconciler = Reconciler::new();
    let options = MeshOptions::default();

    let frames: [&[&str]; 4] = [&["A", "A", "A"], &["A"], &["A", "A"], &["A", "A", "A", "A"]];
    let mut live = Vec::new();
    for ids in frames {
        live = reconciler
            .reconcile(&sink, live, &frame(ids), &options, &EarcutTriangulator)
            .0;
    }

    // Never more than the largest frame: 4 instances for 4 occurrences.
    assert_eq!(sink.count_instance_creates(), 4);
    assert_eq!(sink.count_master_creates(), 1);
    assert_eq!(live.len(), 4);
    assert!(reconciler.pool().is_empty());
}

#[test]
fn test_master_built_in_local_space() {
    let sink = MockRenderSink::new();
    let mut reconciler = Reconciler::new();
    let options = MeshOptions::new(2.0);

    reconciler.reconcile(&sink, Vec::new(), &frame(&["A"]), &options, &EarcutTriangulator);

    let master = sink.master(&ShapeId::from("A")).unwrap();
    assert_eq!(master.triangle_count(), 12);
    // Depth 2 at scale 10 puts the front face at z = -0.2 in local units.
    let min_z = master.points.iter().map(|p| p.z).fold(f64::INFINITY, f64::min);
    assert!((min_z + 0.2).abs() < 1e-12);
}

#[test]
fn test_detach_follows_previous_frame_order() {
    let sink = MockRenderSink::new();
    let mut reconciler = Reconciler::new();
    let options = MeshOptions::default();

    let ids = ["Z", "M", "A", "Q", "C", "M", "K", "B"];
    let (live, _) = reconciler.reconcile(&sink, Vec::new(), &frame(&ids), &options, &EarcutTriangulator);
    let first = serials(&live);

    let (_, stats) = reconciler.reconcile(&sink, live, &[], &options, &EarcutTriangulator);
    assert_eq!(stats.released, ids.len());

    let detached: Vec<u64> = sink
        .calls()
        .iter()
        .filter_map(|call| match call {
            SinkCall::Detach { serial } => Some(*serial),
            _ => None,
        })
        .collect();
    assert_eq!(detached, first);
}
