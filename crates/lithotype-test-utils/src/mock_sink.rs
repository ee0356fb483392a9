//! Mock implementation of RenderSink for testing.
//!
//! This module provides a render sink that records reconciliation calls
//! without drawing anything.

use lithotype_core::alloc::{HashMap, HashSet};
use lithotype_geometry::{Mesh3D, ShapeId, Transform};
use lithotype_scene::RenderSink;
use parking_lot::Mutex;

/// Records a sink call for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkCall {
    CreateMaster {
        id: ShapeId,
        points: usize,
        triangles: usize,
    },
    CreateInstance {
        id: ShapeId,
        serial: u64,
    },
    Attach {
        serial: u64,
    },
    Detach {
        serial: u64,
    },
    Place {
        serial: u64,
        transform: Transform,
    },
}

/// Instance handed out by [`MockRenderSink`].
///
/// Not `Clone`: a serial number identifies exactly one instance object.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct MockInstance {
    serial: u64,
    id: ShapeId,
}

impl MockInstance {
    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub fn id(&self) -> &ShapeId {
        &self.id
    }
}

/// Mock implementation of [`RenderSink`].
///
/// # Borrow Checking Pattern: Interior Mutability
///
/// Trait methods take `&self` but record calls, so the state lives behind
/// `parking_lot::Mutex`.
pub struct MockRenderSink {
    /// Recorded calls for verification
    calls: Mutex<Vec<SinkCall>>,

    /// Template meshes by identity
    masters: Mutex<HashMap<ShapeId, Mesh3D>>,

    /// Serials of instances currently in the scene
    attached: Mutex<HashSet<u64>>,

    /// Last transform of every instance
    transforms: Mutex<HashMap<u64, Transform>>,

    next_serial: Mutex<u64>,
}

impl MockRenderSink {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            masters: Mutex::new(HashMap::new()),
            attached: Mutex::new(HashSet::new()),
            transforms: Mutex::new(HashMap::new()),
            next_serial: Mutex::new(0),
        }
    }

    /// Get a copy of all recorded calls (for test assertions).
    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.lock().clone()
    }

    /// Count master mesh registrations.
    pub fn count_master_creates(&self) -> usize {
        self.count(|call| matches!(call, SinkCall::CreateMaster { .. }))
    }

    /// Count instance creations.
    pub fn count_instance_creates(&self) -> usize {
        self.count(|call| matches!(call, SinkCall::CreateInstance { .. }))
    }

    /// Count attaches of pooled instances.
    pub fn count_attaches(&self) -> usize {
        self.count(|call| matches!(call, SinkCall::Attach { .. }))
    }

    /// Count detaches.
    pub fn count_detaches(&self) -> usize {
        self.count(|call| matches!(call, SinkCall::Detach { .. }))
    }

    fn count(&self, predicate: impl Fn(&SinkCall) -> bool) -> usize {
        self.calls.lock().iter().filter(|&call| predicate(call)).count()
    }

    /// Clear recorded calls (useful between reflows).
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// Get total number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Copy of the template registered for `id`.
    pub fn master(&self, id: &ShapeId) -> Option<Mesh3D> {
        self.masters.lock().get(id).cloned()
    }

    /// Number of instances currently in the scene.
    pub fn visible_count(&self) -> usize {
        self.attached.lock().len()
    }

    pub fn is_visible(&self, instance: &MockInstance) -> bool {
        self.attached.lock().contains(&instance.serial)
    }

    /// Last transform given to `instance`.
    pub fn transform_of(&self, instance: &MockInstance) -> Option<Transform> {
        self.transforms.lock().get(&instance.serial).copied()
    }
}

impl Default for MockRenderSink {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSink for MockRenderSink {
    type Instance = MockInstance;

    fn create_master(&self, id: &ShapeId, mesh: &Mesh3D) {
        self.masters.lock().insert(id.clone(), mesh.clone());
        self.calls.lock().push(SinkCall::CreateMaster {
            id: id.clone(),
            points: mesh.points.len(),
            triangles: mesh.triangle_count(),
        });
    }

    fn create_instance(&self, id: &ShapeId) -> MockInstance {
        let mut next = self.next_serial.lock();
        let serial = *next;
        *next += 1;

        self.attached.lock().insert(serial);
        self.calls.lock().push(SinkCall::CreateInstance {
            id: id.clone(),
            serial,
        });

        MockInstance {
            serial,
            id: id.clone(),
        }
    }

    fn attach(&self, instance: &MockInstance) {
        self.attached.lock().insert(instance.serial);
        self.calls.lock().push(SinkCall::Attach {
            serial: instance.serial,
        });
    }

    fn detach(&self, instance: &MockInstance) {
        self.attached.lock().remove(&instance.serial);
        self.calls.lock().push(SinkCall::Detach {
            serial: instance.serial,
        });
    }

    fn place(&self, instance: &MockInstance, transform: &Transform) {
        self.transforms.lock().insert(instance.serial, *transform);
        self.calls.lock().push(SinkCall::Place {
            serial: instance.serial,
            transform: *transform,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_serials_are_unique() {
        let sink = MockRenderSink::new();
        let id = ShapeId::from("a");
        let first = sink.create_instance(&id);
        let second = sink.create_instance(&id);

        assert_ne!(first.serial(), second.serial());
        assert_eq!(first.id(), &id);
        assert_eq!(sink.visible_count(), 2);
    }

    #[test]
    fn test_attach_detach_and_place() {
        let sink = MockRenderSink::new();
        let instance = sink.create_instance(&ShapeId::from("a"));

        sink.detach(&instance);
        assert!(!sink.is_visible(&instance));
        sink.attach(&instance);
        assert!(sink.is_visible(&instance));

        let transform = Transform::new(1.0, 2.0, 3.0, 4.0);
        sink.place(&instance, &transform);
        assert_eq!(sink.transform_of(&instance), Some(transform));
        assert_eq!(sink.count_detaches(), 1);
        assert_eq!(sink.count_attaches(), 1);
        assert_eq!(sink.call_count(), 4);

        sink.clear_calls();
        assert_eq!(sink.call_count(), 0);
    }

    #[test]
    fn test_master_is_stored() {
        let sink = MockRenderSink::new();
        let id = ShapeId::from("a");
        sink.create_master(&id, &Mesh3D::new());

        assert_eq!(sink.master(&id), Some(Mesh3D::new()));
        assert_eq!(sink.count_master_creates(), 1);
    }
}
