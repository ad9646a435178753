//! The scratch-off cover drawn over the Day 5 photo
//!
//! The simulation keeps its own coverage mask for the reveal test; this layer
//! only mirrors the strokes visually so the two never have to read pixels back.

use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use super::{Surface, colors};
use crate::sim::ScratchCard;

pub struct ScratchLayer {
    surface: Surface,
    painted: bool,
}

impl ScratchLayer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        Ok(Self {
            surface: Surface::new(canvas)?,
            painted: false,
        })
    }

    /// CSS size of the card, used to size the simulation mask
    pub fn size(&self) -> (u32, u32) {
        let (w, h) = self.surface.size();
        (w.round() as u32, h.round() as u32)
    }

    /// Paint a fresh opaque cover
    pub fn cover(&mut self) -> Result<(), JsValue> {
        self.surface.fit()?;
        let ctx = self.surface.ctx();
        let (w, h) = self.surface.size();
        ctx.set_global_composite_operation("source-over")?;
        ctx.set_global_alpha(1.0);
        ctx.set_fill_style_str(colors::CLAY);
        ctx.fill_rect(0.0, 0.0, w, h);
        ctx.set_fill_style_str("#FFF9E2");
        ctx.set_font("20px sans-serif");
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.fill_text("Scratch to Reveal Her Majesty", w / 2.0, h / 2.0).ok();
        self.painted = true;
        Ok(())
    }

    /// Erase the strokes the card recorded since the last frame
    pub fn sync(&mut self, card: &mut ScratchCard) -> Result<(), JsValue> {
        if !self.painted {
            self.cover()?;
        }
        let strokes = card.take_strokes();
        if strokes.is_empty() {
            return Ok(());
        }
        let ctx = self.surface.ctx();
        let radius = card.brush_radius() as f64;
        ctx.set_global_composite_operation("destination-out")?;
        for point in strokes {
            ctx.begin_path();
            ctx.arc(point.x as f64, point.y as f64, radius, 0.0, std::f64::consts::TAU)
                .ok();
            ctx.fill();
        }
        ctx.set_global_composite_operation("source-over")?;
        Ok(())
    }

    /// Forget the painted state so the next sync repaints
    pub fn reset(&mut self) {
        self.painted = false;
    }
}
