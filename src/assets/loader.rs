//! Browser image loading (WASM only)
//!
//! Each sprite is fetched through an `HtmlImageElement`. Sprites with a
//! matte preset are redrawn into an offscreen canvas with the backdrop
//! cleared; the canvas then stands in for the image.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, ImageData};

use super::matte::MatteError;
use super::{AssetRegistry, SpriteId};

/// Something drawable by a 2D canvas context
#[derive(Debug, Clone)]
pub enum SpriteSource {
    Image(HtmlImageElement),
    Canvas(HtmlCanvasElement),
}

pub type SpriteStore = HashMap<SpriteId, SpriteSource>;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("DOM call failed: {0}")]
    Dom(String),
    #[error("image decoded with zero size")]
    Empty,
    #[error("2D canvas context unavailable")]
    NoContext,
    #[error(transparent)]
    Matte(#[from] MatteError),
}

impl From<JsValue> for AssetError {
    fn from(value: JsValue) -> Self {
        AssetError::Dom(format!("{:?}", value))
    }
}

/// Start loading every sprite in the catalogue
pub fn load_all(
    registry: &Rc<RefCell<AssetRegistry>>,
    store: &Rc<RefCell<SpriteStore>>,
    bad_fruit_variants: u8,
) -> Result<(), AssetError> {
    for id in SpriteId::catalogue(bad_fruit_variants) {
        load_sprite(id, Rc::clone(registry), Rc::clone(store))?;
    }
    log::info!("Requested {} sprites", registry.borrow().pending());
    Ok(())
}

fn load_sprite(
    id: SpriteId,
    registry: Rc<RefCell<AssetRegistry>>,
    store: Rc<RefCell<SpriteStore>>,
) -> Result<(), AssetError> {
    let img = HtmlImageElement::new()?;

    let onload = {
        let img = img.clone();
        let registry = Rc::clone(&registry);
        Closure::once(move || match prepare(id, &img) {
            Ok(source) => {
                store.borrow_mut().insert(id, source);
                registry.borrow_mut().mark_ready(id);
            }
            Err(e) => registry.borrow_mut().mark_failed(id, &e.to_string()),
        })
    };
    let onerror = Closure::once(move || {
        registry.borrow_mut().mark_failed(id, "network error");
    });

    img.set_onload(Some(onload.as_ref().unchecked_ref()));
    img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    // Handlers fire once; the page owns them from here
    onload.forget();
    onerror.forget();

    img.set_src(&id.path());
    Ok(())
}

/// Turn a decoded image into a drawable, applying its matte
fn prepare(id: SpriteId, img: &HtmlImageElement) -> Result<SpriteSource, AssetError> {
    let (width, height) = (img.natural_width(), img.natural_height());
    if width == 0 || height == 0 {
        return Err(AssetError::Empty);
    }

    let Some(preset) = id.matte() else {
        return Ok(SpriteSource::Image(img.clone()));
    };

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| AssetError::Dom("no document".into()))?;
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")?
        .dyn_into()
        .map_err(|_| AssetError::Dom("not a canvas".into()))?;
    canvas.set_width(width);
    canvas.set_height(height);

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or(AssetError::NoContext)?
        .dyn_into()
        .map_err(|_| AssetError::NoContext)?;

    ctx.draw_image_with_html_image_element(img, 0.0, 0.0)?;
    let pixels = ctx.get_image_data(0.0, 0.0, width as f64, height as f64)?.data();
    let cleared = preset.apply(&pixels.0, width, height)?;
    let image_data = ImageData::new_with_u8_clamped_array_and_sh(Clamped(&cleared), width, height)?;
    ctx.put_image_data(&image_data, 0.0, 0.0)?;

    Ok(SpriteSource::Canvas(canvas))
}
