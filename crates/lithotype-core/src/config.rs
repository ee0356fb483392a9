/// Configuration for the lithotype pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub extrusion: ExtrusionConfig,
    pub layout: LayoutConfig,
    /// Samples taken along every quadratic or cubic segment when flattening glyphs.
    pub curve_samples: usize,
    pub profiling: ProfilingMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            extrusion: ExtrusionConfig::default(),
            layout: LayoutConfig::default(),
            curve_samples: 10,
            profiling: ProfilingMode::Off,
        }
    }
}

impl Config {
    pub fn with_extrusion(mut self, extrusion: ExtrusionConfig) -> Self {
        self.extrusion = extrusion;
        self
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_curve_samples(mut self, samples: usize) -> Self {
        self.curve_samples = samples.max(1);
        self
    }

    pub fn with_profiling(mut self, profiling: ProfilingMode) -> Self {
        self.profiling = profiling;
        self
    }
}

/// How glyph shapes are turned into solids.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrusionConfig {
    /// Extrusion depth in world units. Zero produces flat, double-sided glyphs.
    pub depth: f64,
    /// Fraction of the depth reserved for a bevel, in `[0, 1]`.
    pub bevel: f64,
    /// Negate x and y of every emitted vertex (left-handed target convention).
    pub mirror_xy: bool,
}

impl Default for ExtrusionConfig {
    fn default() -> Self {
        Self {
            depth: 1.0,
            bevel: 0.2,
            mirror_xy: true,
        }
    }
}

impl ExtrusionConfig {
    /// Flat glyphs: front and back faces in the same plane.
    pub fn flat() -> Self {
        Self {
            depth: 0.0,
            ..Self::default()
        }
    }
}

/// Paragraph flowing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// World units per em; also the vertical distance between lines.
    pub line_scale: f64,
    pub min_chars: usize,
    pub max_chars: usize,
    /// Vertical advance (in lines) taken by an empty line.
    pub blank_line_advance: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            line_scale: 10.0,
            min_chars: 20,
            max_chars: 80,
            blank_line_advance: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfilingMode {
    /// Profiling is disabled
    Off,
    /// Profiling scopes are recorded
    On,
    /// Profiling scopes are recorded and served to 'puffin_viewer' over HTTP
    WithWebserver,
}
