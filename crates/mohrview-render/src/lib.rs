//! MohrView Render Library
//!
//! Turns the geometry computed by `mohrview-core` into ordered drawing
//! primitives, defines the renderer abstraction that paints them, and drives
//! the per-frame animation loops.

mod frame;
mod primitives;
mod renderer;
mod scene;

pub use frame::{
    Animation, CurveAnimation, DiagramAnimation, FrameHandle, FrameLoop, FrameScheduler, LoopKey,
};
pub use primitives::{Palette, Primitive, PrimitiveStyle, TextAnchor};
pub use renderer::{RecordingRenderer, RenderResult, Renderer, RendererError};
pub use scene::{
    ARC_INDICATOR_FRACTION, MARKER_DOT_RADIUS, Scene, SceneContext, build_circle_scene,
    build_curve_scene, build_element_scene,
};
