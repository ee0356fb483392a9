//! Reflow a few edits of a sentence with a real font file.
//!
//! ```sh
//! cargo run -p lithotype --example ttf_reflow --features ttf -- path/to/font.ttf
//! ```

use std::cell::Cell;

use lithotype::prelude::*;
use lithotype::text::TtfGlyphSource;

/// Logs what reconciliation asks of it and counts triangles uploaded.
#[derive(Default)]
struct LogSink {
    next: Cell<u32>,
    triangles: Cell<usize>,
}

impl RenderSink for LogSink {
    type Instance = u32;

    fn create_master(&self, id: &ShapeId, mesh: &Mesh3D) {
        self.triangles.set(self.triangles.get() + mesh.triangle_count());
        tracing::trace!(shape = %id, vertices = mesh.vertices().len(), "Upload master");
    }

    fn create_instance(&self, id: &ShapeId) -> u32 {
        let serial = self.next.get();
        self.next.set(serial + 1);
        tracing::trace!(shape = %id, serial, "Create instance");
        serial
    }

    fn attach(&self, instance: &u32) {
        tracing::trace!(instance, "Attach");
    }

    fn detach(&self, instance: &u32) {
        tracing::trace!(instance, "Detach");
    }

    fn place(&self, _instance: &u32, _transform: &Transform) {}
}

fn main() {
    lithotype::core::logging::init();

    let Some(path) = std::env::args().nth(1) else {
        tracing::error!("Usage: ttf_reflow <font.ttf>");
        return;
    };
    let data = match std::fs::read(&path) {
        Ok(data) => data,
        Err(err) => {
            tracing::error!("Failed to read {}: {}", path, err);
            return;
        }
    };
    let source = match TtfGlyphSource::parse(&data, 0) {
        Ok(source) => source,
        Err(err) => {
            tracing::error!("{}", err);
            return;
        }
    };

    let name = std::path::Path::new(&path)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("font");
    let sink = LogSink::default();
    let mut session = SessionBuilder::new(name, source).build();

    for text in [
        "The quick brown fox",
        "The quick brown fox jumps",
        "The quick brown fox jumps over the lazy dog",
        "The lazy dog",
    ] {
        let stats = session.reflow(text, &sink);
        tracing::info!(
            text,
            placements = stats.placements,
            masters = stats.reconcile.masters_built,
            reused = stats.reconcile.reused,
            recycled = stats.reconcile.recycled,
            created = stats.reconcile.created,
            released = stats.reconcile.released,
            "Reflow"
        );
    }
    tracing::info!(triangles = sink.triangles.get(), "Uploaded master meshes");
}
