//! The seam between reconciliation and the renderer.

use lithotype_geometry::{Mesh3D, ShapeId, Transform};

/// Receives template meshes and drives render instances.
///
/// # Borrow Checking Pattern
///
/// Methods take `&self` and instances are owned values handed back to the
/// caller, so a sink can be shared and a mock can record calls behind a
/// `Mutex`. The reconciler owns every instance between calls.
pub trait RenderSink {
    /// Handle to one displayed copy of a template mesh.
    type Instance;

    /// Register the template mesh for `id`. Templates are never displayed
    /// and are called for at most once per identity.
    fn create_master(&self, id: &ShapeId, mesh: &Mesh3D);

    /// Create a new instance of the template registered for `id`. The
    /// instance starts attached to the scene.
    fn create_instance(&self, id: &ShapeId) -> Self::Instance;

    /// Put a pooled instance back into the scene.
    fn attach(&self, instance: &Self::Instance);

    /// Take an instance out of the scene without destroying it.
    fn detach(&self, instance: &Self::Instance);

    /// Position and scale an instance. Rotation is left to the renderer.
    fn place(&self, instance: &Self::Instance, transform: &Transform);
}

impl<S: RenderSink + ?Sized> RenderSink for &S {
    type Instance = S::Instance;

    fn create_master(&self, id: &ShapeId, mesh: &Mesh3D) {
        (**self).create_master(id, mesh)
    }

    fn create_instance(&self, id: &ShapeId) -> Self::Instance {
        (**self).create_instance(id)
    }

    fn attach(&self, instance: &Self::Instance) {
        (**self).attach(instance)
    }

    fn detach(&self, instance: &Self::Instance) {
        (**self).detach(instance)
    }

    fn place(&self, instance: &Self::Instance, transform: &Transform) {
        (**self).place(instance, transform)
    }
}
