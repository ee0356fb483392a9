//! The reflow session.

use lithotype_core::config::Config;
use lithotype_core::profiling::{self, profile_function};
use lithotype_geometry::{
    ConverterOptions, EarcutTriangulator, MeshOptions, Placement, Transform, Triangulator,
};
use lithotype_scene::{LiveInstance, ReconcileStats, Reconciler, RenderSink};
use lithotype_text::{Font, GlyphSource, flow_text};

/// What one reflow did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReflowStats {
    /// Non-empty lines laid out.
    pub lines: usize,
    /// Glyph polygons placed across every line.
    pub placements: usize,
    pub reconcile: ReconcileStats,
}

/// Long-lived owner of every cache a reflow uses.
///
/// Holds the font with its glyph shape cache, the master mesh cache, the
/// instance free lists and the instances displayed by the last reflow. `I`
/// is the instance type of the render sink the session draws through.
///
/// # Example
///
/// ```ignore
/// let mut session = SessionBuilder::new("Sans", source).build();
/// session.reflow("first", &sink);
/// // Glyphs shared with the previous text keep their instances.
/// session.reflow("first and second", &sink);
/// ```
pub struct Session<G, I> {
    font: Font<G>,
    reconciler: Reconciler<I>,
    live: Vec<LiveInstance<I>>,
    triangulator: Box<dyn Triangulator>,
    mesh_options: MeshOptions,
    config: Config,
}

impl<G: GlyphSource, I> Session<G, I> {
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn font(&self) -> &Font<G> {
        &self.font
    }

    pub fn reconciler(&self) -> &Reconciler<I> {
        &self.reconciler
    }

    /// Instances displayed by the last reflow, in layout order.
    pub fn live_instances(&self) -> &[LiveInstance<I>] {
        &self.live
    }

    /// Glyph placements for `text`, in layout order.
    pub fn layout(&mut self, text: &str) -> (usize, Vec<Placement>) {
        profile_function!();

        let layout = flow_text(text, &self.config.layout);
        let lines = layout.placed_lines(&self.config.layout);

        let mut placements = Vec::new();
        for line in &lines {
            let shape = self.font.shape_for_text(line.text, line.transform);
            placements.extend(shape.placements(&Transform::IDENTITY));
        }
        (lines.len(), placements)
    }

    /// Re-render the session for `text`.
    ///
    /// Taking `&mut self` serializes reflows; a reflow always runs to
    /// completion before the next can start.
    pub fn reflow<S>(&mut self, text: &str, sink: &S) -> ReflowStats
    where
        S: RenderSink<Instance = I> + ?Sized,
    {
        profiling::new_frame();
        profile_function!();

        let (lines, placements) = self.layout(text);
        let previous = std::mem::take(&mut self.live);
        let (live, reconcile) = self.reconciler.reconcile(
            sink,
            previous,
            &placements,
            &self.mesh_options,
            self.triangulator.as_ref(),
        );
        self.live = live;

        let stats = ReflowStats {
            lines,
            placements: placements.len(),
            reconcile,
        };
        tracing::debug!(
            lines = stats.lines,
            placements = stats.placements,
            cached_glyphs = self.font.cached_glyphs(),
            masters = self.reconciler.masters().len(),
            "Reflow complete"
        );
        stats
    }

    /// Detach every displayed instance, pooling it for later reflows.
    pub fn clear<S>(&mut self, sink: &S) -> ReconcileStats
    where
        S: RenderSink<Instance = I> + ?Sized,
    {
        let previous = std::mem::take(&mut self.live);
        let (live, stats) = self.reconciler.reconcile(
            sink,
            previous,
            &[],
            &self.mesh_options,
            self.triangulator.as_ref(),
        );
        self.live = live;
        stats
    }
}

/// Builder for constructing a [`Session`].
pub struct SessionBuilder<G> {
    font_name: String,
    source: G,
    config: Config,
    triangulator: Box<dyn Triangulator>,
}

impl<G: GlyphSource> SessionBuilder<G> {
    pub fn new(font_name: &str, source: G) -> Self {
        Self {
            font_name: font_name.to_string(),
            source,
            config: Config::default(),
            triangulator: Box::new(EarcutTriangulator),
        }
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Use a different triangulation primitive for mesh faces.
    pub fn triangulator(mut self, triangulator: impl Triangulator + 'static) -> Self {
        self.triangulator = Box::new(triangulator);
        self
    }

    pub fn build<I>(self) -> Session<G, I> {
        profiling::init_with_mode(self.config.profiling);

        let extrusion = &self.config.extrusion;
        let mesh_options = MeshOptions::new(extrusion.depth)
            .with_bevel(extrusion.bevel)
            .with_mirror_xy(extrusion.mirror_xy);
        let font = Font::new(self.font_name, self.source).with_converter_options(ConverterOptions {
            curve_samples: self.config.curve_samples,
        });

        Session {
            font,
            reconciler: Reconciler::new(),
            live: Vec::new(),
            triangulator: self.triangulator,
            mesh_options,
            config: self.config,
        }
    }
}
