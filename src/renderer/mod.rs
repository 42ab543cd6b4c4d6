//! 2D rendering
//!
//! The scene is described through the `RenderTarget` trait: the browser
//! backs it with a canvas context, tests and the headless build record the
//! calls instead. Drawing only reads game state.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod palette;
pub mod scene;

use glam::Vec2;

use crate::assets::SpriteId;
use crate::sim::Aabb;
pub use palette::Color;
pub use scene::{DebugOverlay, draw_frame};

/// Primitive used for placeholders and HUD elements
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Rect(Aabb),
    OutlineRect(Aabb),
    Circle { center: Vec2, radius: f32 },
    Ellipse { center: Vec2, radii: Vec2 },
}

/// Surface the scene draws onto
pub trait RenderTarget {
    fn clear(&mut self, width: f32, height: f32);
    /// Draw a loaded sprite stretched over `rect`; `flipped` turns it upside down
    fn draw_sprite(&mut self, sprite: SpriteId, rect: Aabb, flipped: bool);
    fn draw_shape(&mut self, shape: Shape, color: Color);
    /// Left-aligned text with its baseline at `pos`
    fn draw_text(&mut self, text: &str, pos: Vec2, size: f32, color: Color);
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Sprite { sprite: SpriteId, rect: Aabb, flipped: bool },
    Shape { shape: Shape, color: Color },
    Text { text: String, pos: Vec2, size: f32 },
}

/// Render target that keeps the calls for inspection
#[derive(Debug, Default)]
pub struct CommandRecorder {
    pub commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sprites(&self) -> impl Iterator<Item = (SpriteId, Aabb, bool)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Sprite { sprite, rect, flipped } => Some((*sprite, *rect, *flipped)),
            _ => None,
        })
    }

    pub fn shapes(&self) -> impl Iterator<Item = (Shape, Color)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Shape { shape, color } => Some((*shape, *color)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl RenderTarget for CommandRecorder {
    fn clear(&mut self, _width: f32, _height: f32) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn draw_sprite(&mut self, sprite: SpriteId, rect: Aabb, flipped: bool) {
        self.commands.push(DrawCommand::Sprite { sprite, rect, flipped });
    }

    fn draw_shape(&mut self, shape: Shape, color: Color) {
        self.commands.push(DrawCommand::Shape { shape, color });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, size: f32, _color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            size,
        });
    }
}
