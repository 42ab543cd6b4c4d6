//! Canvas 2D render target (WASM only)

use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::palette::{self, Color};
use super::{RenderTarget, Shape};
use crate::assets::SpriteId;
use crate::assets::loader::{SpriteSource, SpriteStore};
use crate::sim::Aabb;

pub struct CanvasTarget {
    ctx: CanvasRenderingContext2d,
    sprites: Rc<RefCell<SpriteStore>>,
}

impl CanvasTarget {
    pub fn new(ctx: CanvasRenderingContext2d, sprites: Rc<RefCell<SpriteStore>>) -> Self {
        Self { ctx, sprites }
    }

    fn blit(&self, source: &SpriteSource, x: f64, y: f64, w: f64, h: f64) -> Result<(), JsValue> {
        match source {
            SpriteSource::Image(img) => self.ctx.draw_image_with_html_image_element_and_dw_and_dh(img, x, y, w, h),
            SpriteSource::Canvas(canvas) => self
                .ctx
                .draw_image_with_html_canvas_element_and_dw_and_dh(canvas, x, y, w, h),
        }
    }

    fn sprite(&self, sprite: SpriteId, rect: Aabb, flipped: bool) -> Result<(), JsValue> {
        let sprites = self.sprites.borrow();
        let Some(source) = sprites.get(&sprite) else {
            return Ok(());
        };
        let (w, h) = (rect.width as f64, rect.height as f64);

        if !flipped {
            return self.blit(source, rect.x as f64, rect.y as f64, w, h);
        }

        // Rotate half a turn about the box center
        self.ctx.save();
        let center = rect.center();
        self.ctx.translate(center.x as f64, center.y as f64)?;
        self.ctx.rotate(PI)?;
        let result = self.blit(source, -w / 2.0, -h / 2.0, w, h);
        self.ctx.restore();
        result
    }

    fn shape(&self, shape: Shape, color: Color) -> Result<(), JsValue> {
        let css = palette::to_css(color);
        match shape {
            Shape::Rect(r) => {
                self.ctx.set_fill_style_str(&css);
                self.ctx.fill_rect(r.x as f64, r.y as f64, r.width as f64, r.height as f64);
            }
            Shape::OutlineRect(r) => {
                self.ctx.set_stroke_style_str(&css);
                self.ctx.set_line_width(2.0);
                self.ctx
                    .stroke_rect(r.x as f64, r.y as f64, r.width as f64, r.height as f64);
            }
            Shape::Circle { center, radius } => {
                self.ctx.set_fill_style_str(&css);
                self.ctx.begin_path();
                self.ctx
                    .arc(center.x as f64, center.y as f64, radius as f64, 0.0, PI * 2.0)?;
                self.ctx.fill();
            }
            Shape::Ellipse { center, radii } => {
                self.ctx.set_fill_style_str(&css);
                self.ctx.begin_path();
                self.ctx.ellipse(
                    center.x as f64,
                    center.y as f64,
                    radii.x as f64,
                    radii.y as f64,
                    0.0,
                    0.0,
                    PI * 2.0,
                )?;
                self.ctx.fill();
            }
        }
        Ok(())
    }
}

impl RenderTarget for CanvasTarget {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.set_fill_style_str(&palette::to_css(palette::BACKGROUND));
        self.ctx.fill_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn draw_sprite(&mut self, sprite: SpriteId, rect: Aabb, flipped: bool) {
        if let Err(e) = self.sprite(sprite, rect, flipped) {
            log::warn!("drawImage failed for {:?}: {:?}", sprite, e);
        }
    }

    fn draw_shape(&mut self, shape: Shape, color: Color) {
        if let Err(e) = self.shape(shape, color) {
            log::warn!("Shape draw failed: {:?}", e);
        }
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, size: f32, color: Color) {
        self.ctx.set_fill_style_str(&palette::to_css(color));
        self.ctx.set_font(&format!("{}px Arial", size));
        if let Err(e) = self.ctx.fill_text(text, pos.x as f64, pos.y as f64) {
            log::warn!("fillText failed: {:?}", e);
        }
    }
}
