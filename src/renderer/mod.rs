//! Canvas 2D rendering
//!
//! Three surfaces: the page backdrop, the game card and a confetti overlay.
//! The scratch card has its own overlay canvas (see [`scratch`]).

pub mod effects;
pub mod scene;
pub mod scratch;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub use scratch::ScratchLayer;

/// Palette shared by every surface
pub mod colors {
    pub const IVORY: &str = "#FEECD0";
    pub const PEACH: &str = "#F5C6A5";
    pub const CLAY: &str = "#DCA278";
    pub const EUCALYPTUS: &str = "#8FA98A";
    pub const NIGHT: &str = "#0f0f1a";
    pub const ROAD: &str = "#333333";
}

/// A canvas and its 2D context, sized in CSS pixels
pub struct Surface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl Surface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;
        let mut surface = Self {
            canvas,
            ctx,
            width: 0.0,
            height: 0.0,
        };
        surface.fit()?;
        Ok(surface)
    }

    /// Look up a canvas by id
    pub fn by_id(id: &str) -> Result<Self, JsValue> {
        let canvas: HtmlCanvasElement = crate::platform::web::document()
            .and_then(|d| d.get_element_by_id(id))
            .ok_or_else(|| JsValue::from_str(&format!("no #{id}")))?
            .dyn_into()?;
        Self::new(canvas)
    }

    /// Match the backing store to the element's CSS size and device pixel ratio
    pub fn fit(&mut self) -> Result<(), JsValue> {
        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        let w = self.canvas.client_width().max(1) as f64;
        let h = self.canvas.client_height().max(1) as f64;
        if w != self.width || h != self.height {
            self.canvas.set_width((w * dpr) as u32);
            self.canvas.set_height((h * dpr) as u32);
            self.width = w;
            self.height = h;
        }
        self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
        Ok(())
    }

    pub fn ctx(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn clear(&self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    /// Centered emoji or text at a point
    pub fn glyph(&self, text: &str, x: f64, y: f64, size_px: f64) {
        self.ctx.set_font(&format!("{size_px}px sans-serif"));
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx.fill_text(text, x, y).ok();
    }
}
