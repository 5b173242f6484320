//! Renderer trait abstraction.

use crate::primitives::{Palette, Primitive};
use crate::scene::Scene;
use kurbo::{Point, Size};
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Trait for drawing backends.
///
/// Backends receive finished scenes in paint order; all geometry has already
/// been mapped to surface pixels.
pub trait Renderer: Send + Sync {
    /// Paint one scene.
    fn render(&mut self, scene: &Scene) -> RenderResult<()>;

    /// Get the background color (for clearing).
    fn background_color(&self, palette: &Palette) -> Color {
        palette.background
    }
}

/// Renderer that keeps every scene it receives; used by tests and headless
/// hosts.
#[derive(Debug, Clone)]
pub struct RecordingRenderer {
    surface: Size,
    frames: Vec<Vec<Primitive>>,
}

impl RecordingRenderer {
    /// Create a recorder for a surface of `surface` pixels.
    pub fn new(surface: Size) -> RenderResult<Self> {
        if !(surface.width > 0.0 && surface.height > 0.0) {
            return Err(RendererError::InitFailed(format!(
                "surface {}x{} has no area",
                surface.width, surface.height
            )));
        }
        Ok(Self {
            surface,
            frames: Vec::new(),
        })
    }

    pub fn surface(&self) -> Size {
        self.surface
    }

    /// Track a host resize. A collapsed surface (minimized window) is refused.
    pub fn resize(&mut self, surface: Size) -> RenderResult<()> {
        if !(surface.width > 0.0 && surface.height > 0.0) {
            return Err(RendererError::Surface(format!(
                "cannot resize to {}x{}",
                surface.width, surface.height
            )));
        }
        self.surface = surface;
        Ok(())
    }

    pub fn frames(&self) -> &[Vec<Primitive>] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&[Primitive]> {
        self.frames.last().map(Vec::as_slice)
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

fn finite(point: &Point) -> bool {
    point.x.is_finite() && point.y.is_finite()
}

fn primitive_is_finite(primitive: &Primitive) -> bool {
    match primitive {
        Primitive::Line { from, to, .. } => finite(from) && finite(to),
        Primitive::Arc { from, to, radius, .. } => finite(from) && finite(to) && radius.is_finite(),
        Primitive::Circle { center, radius, .. } => finite(center) && radius.is_finite(),
        Primitive::Polyline { points, .. } => points.iter().all(finite),
        Primitive::Text { position, .. } => finite(position),
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, scene: &Scene) -> RenderResult<()> {
        if let Some(index) = scene.primitives().iter().position(|p| !primitive_is_finite(p)) {
            return Err(RendererError::RenderFailed(format!(
                "{} #{index} has non-finite coordinates",
                scene.primitives()[index].kind()
            )));
        }
        log::trace!("recorded {} primitives", scene.len());
        self.frames.push(scene.primitives().to_vec());
        Ok(())
    }
}
