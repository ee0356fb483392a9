//! Mapping a frame's glyph placements onto render instances.

use std::collections::VecDeque;

use lithotype_core::alloc::HashMap;
use lithotype_core::profiling::profile_function;
use lithotype_geometry::{MeshOptions, Placement, ShapeId, Triangulator};

use crate::{InstancePool, MasterMeshCache, RenderSink};

/// A displayed instance and the identity of the geometry it shows.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveInstance<I> {
    pub id: ShapeId,
    pub instance: I,
}

/// What one reconciliation did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Template meshes built for identities seen for the first time.
    pub masters_built: usize,
    /// Instances carried over from the previous frame.
    pub reused: usize,
    /// Instances taken back out of a free list.
    pub recycled: usize,
    /// Instances created from a template.
    pub created: usize,
    /// Previous-frame instances detached and pooled.
    pub released: usize,
}

impl ReconcileStats {
    /// Instances displayed after the reconciliation.
    pub fn live(&self) -> usize {
        self.reused + self.recycled + self.created
    }
}

/// Owner of the master mesh cache and the instance free lists.
///
/// Lives as long as the session that renders through it. Nothing it holds
/// is ever destroyed: masters stay cached and unused instances are pooled.
#[derive(Debug)]
pub struct Reconciler<I> {
    masters: MasterMeshCache,
    pool: InstancePool<I>,
}

impl<I> Default for Reconciler<I> {
    fn default() -> Self {
        Self {
            masters: MasterMeshCache::new(),
            pool: InstancePool::new(),
        }
    }
}

impl<I> Reconciler<I> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn masters(&self) -> &MasterMeshCache {
        &self.masters
    }

    pub fn pool(&self) -> &InstancePool<I> {
        &self.pool
    }

    /// Bring the sink from `previous` to one instance per placement.
    ///
    /// Each placement is served, in order of preference, by a previous-frame
    /// instance of the same identity, by a pooled instance, or by a new
    /// instance of the identity's template. Previous instances left over are
    /// detached and pooled in their `previous` order. Returns the new live list in placement order.
    pub fn reconcile<S>(
        &mut self,
        sink: &S,
        previous: Vec<LiveInstance<I>>,
        placements: &[Placement],
        options: &MeshOptions,
        triangulator: &dyn Triangulator,
    ) -> (Vec<LiveInstance<I>>, ReconcileStats)
    where
        S: RenderSink<Instance = I> + ?Sized,
    {
        profile_function!();

        let mut stats = ReconcileStats::default();
        // Previous instances stay in their slots until claimed; the map only
        // holds slot indices per identity, oldest first.
        let mut by_id: HashMap<ShapeId, VecDeque<usize>> = HashMap::new();
        for (slot, live) in previous.iter().enumerate() {
            by_id.entry(live.id.clone()).or_default().push_back(slot);
        }
        let mut stale: Vec<Option<LiveInstance<I>>> = previous.into_iter().map(Some).collect();

        let mut live = Vec::with_capacity(placements.len());
        for placement in placements {
            let id = &placement.id;

            if !self.masters.contains(id) {
                let (mesh, _) = self
                    .masters
                    .get_or_build(id, || placement.template_mesh(options, triangulator));
                sink.create_master(id, &mesh);
                stats.masters_built += 1;
                tracing::trace!(shape = %id, triangles = mesh.triangle_count(), "Built master mesh");
            }

            let reused = by_id
                .get_mut(id)
                .and_then(VecDeque::pop_front)
                .and_then(|slot| stale[slot].take());
            let instance = if let Some(prev) = reused {
                stats.reused += 1;
                prev.instance
            } else if let Some(instance) = self.pool.pop(id) {
                stats.recycled += 1;
                sink.attach(&instance);
                instance
            } else {
                stats.created += 1;
                sink.create_instance(id)
            };

            sink.place(&instance, &placement.instance_transform(options));
            live.push(LiveInstance {
                id: id.clone(),
                instance,
            });
        }

        for LiveInstance { id, instance } in stale.into_iter().flatten() {
            sink.detach(&instance);
            self.pool.push(id, instance);
            stats.released += 1;
        }

        tracing::debug!(
            placements = placements.len(),
            masters_built = stats.masters_built,
            reused = stats.reused,
            recycled = stats.recycled,
            created = stats.created,
            released = stats.released,
            "Reconciled instances"
        );

        (live, stats)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::sync::Arc;

    use super::*;
    use lithotype_geometry::{
        EarcutTriangulator, Mesh3D, Point2D, Polygon2D, PolygonWithHoles, Transform,
    };

    /// Counts calls; instances are plain serial numbers.
    #[derive(Default)]
    struct CountingSink {
        masters: RefCell<Vec<ShapeId>>,
        next: RefCell<u32>,
        attached: RefCell<usize>,
        detached: RefCell<Vec<u32>>,
        placed: RefCell<Vec<(u32, Transform)>>,
    }

    impl RenderSink for CountingSink {
        type Instance = u32;

        fn create_master(&self, id: &ShapeId, _mesh: &Mesh3D) {
            self.masters.borrow_mut().push(id.clone());
        }

        fn create_instance(&self, _id: &ShapeId) -> u32 {
            let mut next = self.next.borrow_mut();
            *next += 1;
            *next
        }

        fn attach(&self, _instance: &u32) {
            *self.attached.borrow_mut() += 1;
        }

        fn detach(&self, instance: &u32) {
            self.detached.borrow_mut().push(*instance);
        }

        fn place(&self, instance: &u32, transform: &Transform) {
            self.placed.borrow_mut().push((*instance, *transform));
        }
    }

    fn placement(id: &str, x: f64) -> Placement {
        let square = Polygon2D::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(1.0, 1.0),
            Point2D::new(0.0, 1.0),
        ])
        .unwrap();
        Placement {
            id: ShapeId::from(id),
            transform: Transform::new(x, 0.0, 0.0, 1.0),
            geometry: Arc::new(PolygonWithHoles::new(square, vec![])),
        }
    }

    #[test]
    fn test_repeated_identity_shares_master() {
        let sink = CountingSink::default();
        let mut reconciler = Reconciler::new();
        let placements = [placement("a", 0.0), placement("a", 2.0), placement("b", 4.0)];

        let (live, stats) = reconciler.reconcile(
            &sink,
            Vec::new(),
            &placements,
            &MeshOptions::default(),
            &EarcutTriangulator,
        );

        assert_eq!(stats.masters_built, 2);
        assert_eq!(stats.created, 3);
        assert_eq!(live.len(), 3);
        assert_eq!(sink.masters.borrow().len(), 2);
        assert_eq!(reconciler.masters().len(), 2);
    }

    #[test]
    fn test_instances_are_mirrored_when_placed() {
        let sink = CountingSink::default();
        let mut reconciler = Reconciler::new();
        let (live, _) = reconciler.reconcile(
            &sink,
            Vec::new(),
            &[placement("a", 3.0)],
            &MeshOptions::default(),
            &EarcutTriangulator,
        );

        let placed = sink.placed.borrow();
        assert_eq!(placed[0], (live[0].instance, Transform::new(-3.0, 0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_empty_frame_pools_everything() {
        let sink = CountingSink::default();
        let mut reconciler = Reconciler::new();
        let options = MeshOptions::default();

        let (live, _) = reconciler.reconcile(
            &sink,
            Vec::new(),
            &[placement("a", 0.0), placement("b", 1.0)],
            &options,
            &EarcutTriangulator,
        );
        let (live, stats) = reconciler.reconcile(&sink, live, &[], &options, &EarcutTriangulator);

        assert!(live.is_empty());
        assert_eq!(stats.released, 2);
        assert_eq!(sink.detached.borrow().len(), 2);
        assert_eq!(reconciler.pool().len(), 2);

        let (_, stats) = reconciler.reconcile(
            &sink,
            live,
            &[placement("b", 5.0)],
            &options,
            &EarcutTriangulator,
        );
        assert_eq!(stats.recycled, 1);
        assert_eq!(stats.created, 0);
        assert_eq!(stats.masters_built, 0);
        assert_eq!(*sink.attached.borrow(), 1);
        assert_eq!(reconciler.pool().available(&ShapeId::from("a")), 1);
    }

    #[test]
    fn test_leftovers_released_in_previous_order() {
        let sink = CountingSink::default();
        let mut reconciler = Reconciler::new();
        let options = MeshOptions::default();
        let ids = ["e", "a", "d", "a", "c", "b", "e"];

        let first: Vec<Placement> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| placement(id, i as f64))
            .collect();
        let (live, _) =
            reconciler.reconcile(&sink, Vec::new(), &first, &options, &EarcutTriangulator);
        let serials: Vec<u32> = live.iter().map(|l| l.instance).collect();

        // Keeps the first "a"; every other instance is left over.
        let (live, stats) = reconciler.reconcile(
            &sink,
            live,
            &[placement("a", 0.0)],
            &options,
            &EarcutTriangulator,
        );

        assert_eq!(live[0].instance, serials[1]);
        assert_eq!(stats.reused, 1);
        assert_eq!(stats.released, 6);
        let expected: Vec<u32> = serials
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != 1)
            .map(|(_, &serial)| serial)
            .collect();
        assert_eq!(*sink.detached.borrow(), expected);
    }
}
