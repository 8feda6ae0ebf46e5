#![forbid(unsafe_code)]

//! Style overlay + SVG post-processing for network-diff diagrams.
//!
//! The external renderer lays out and draws the diagram; this crate only
//! decides style classes (per node, wire and flow arrow) and patches the
//! already-rendered SVG where the renderer committed to default classes
//! too early.

pub mod model;
pub mod overlay;
pub mod postprocess;

pub use model::{DiagramEdge, DiagramNode, NodeKind};
pub use overlay::{StyleOverlay, replace_exact_class};
pub use postprocess::{ArrowBindings, PostProcessOptions, rewrite_diagram};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("SVG rewrite failed: {message}")]
    SvgRewrite { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
