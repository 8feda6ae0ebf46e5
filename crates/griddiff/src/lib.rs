#![forbid(unsafe_code)]

//! `griddiff` renders a visual diff overlay on grid-network diagrams:
//! given the structured result of comparing two snapshots of the same
//! network, it classifies every diagram element (switch, transformer,
//! wire, flow arrow) into a severity level and rewrites the diagram's
//! style classes so changed elements light up with level-appropriate
//! colors.
//!
//! The network differ and the diagram layout/renderer are external
//! collaborators; this workspace only owns the classification and the
//! style rewriting.
//!
//! # Features
//!
//! - `render`: enable the style overlay engine + SVG post-processing
//!   (`griddiff::render`)

pub use griddiff_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use griddiff_render::model::{DiagramEdge, DiagramNode, NodeKind};
    pub use griddiff_render::postprocess::{ArrowBindings, PostProcessOptions, rewrite_diagram};
    pub use griddiff_render::{StyleOverlay, replace_exact_class};

    #[derive(Debug, thiserror::Error)]
    pub enum OverlayError {
        #[error(transparent)]
        Core(#[from] griddiff_core::Error),
        #[error(transparent)]
        Render(#[from] griddiff_render::Error),
    }

    pub type Result<T> = std::result::Result<T, OverlayError>;

    /// One-call overlay pipeline: parses the differ result and the level
    /// configuration, then patches the rendered SVG's arrow classes and
    /// (per `options`) its embedded stylesheet.
    ///
    /// An invalid `levels_json` falls back to the default single band; a
    /// malformed `diff_json` is an error the caller surfaces as a bad
    /// request.
    pub fn overlay_svg(
        diff_json: &str,
        levels_json: Option<&str>,
        mode: griddiff_core::DeltaMode,
        svg: &str,
        bindings: &ArrowBindings,
        options: &PostProcessOptions,
    ) -> Result<String> {
        let diff = griddiff_core::DiffData::parse(diff_json)?;
        let levels = griddiff_core::LevelsData::parse_or_default(levels_json);
        let classifier = griddiff_core::LevelClassifier::new(levels, mode);
        let overlay = StyleOverlay::new(&diff, &classifier);
        Ok(rewrite_diagram(svg, &overlay, bindings, options)?)
    }
}
