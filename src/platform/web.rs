//! Browser glue: frame loops and small DOM helpers

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use super::pointer::Bounds;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A running requestAnimationFrame loop.
///
/// The callback returns `false` to stop scheduling further frames. Dropping
/// the loop cancels any pending frame and releases the closure.
pub struct FrameLoop {
    callback: FrameCallback,
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    pub fn start<F>(mut on_frame: F) -> Result<Self, JsValue>
    where
        F: FnMut(f64) -> bool + 'static,
    {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));

        let f = Rc::downgrade(&callback);
        let handle = pending.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
            handle.set(None);
            if !on_frame(ts) {
                return;
            }
            let (Some(f), Some(w)) = (f.upgrade(), web_sys::window()) else {
                return;
            };
            if let Some(cb) = f.borrow().as_ref() {
                match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => handle.set(Some(id)),
                    Err(e) => log::warn!("requestAnimationFrame failed: {:?}", e),
                }
            }
        }) as Box<dyn FnMut(f64)>));

        if let Some(cb) = callback.borrow().as_ref() {
            pending.set(Some(window.request_animation_frame(cb.as_ref().unchecked_ref())?));
        }

        Ok(Self { callback, pending })
    }

    /// Whether another frame is scheduled
    pub fn is_running(&self) -> bool {
        self.pending.get().is_some()
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let (Some(id), Some(w)) = (self.pending.take(), web_sys::window()) {
            if w.cancel_animation_frame(id).is_err() {
                log::warn!("cancelAnimationFrame failed");
            }
        }
        self.callback.borrow_mut().take();
    }
}

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

/// Set an element's text if it exists
pub fn set_text(doc: &Document, id: &str, text: &str) {
    if let Some(el) = doc.get_element_by_id(id) {
        if el.text_content().as_deref() != Some(text) {
            el.set_text_content(Some(text));
        }
    }
}

/// Show or hide an element via the `hidden` class
pub fn set_visible(doc: &Document, id: &str, visible: bool) {
    if let Some(el) = doc.get_element_by_id(id) {
        let class = if visible { "" } else { "hidden" };
        if el.get_attribute("class").as_deref().unwrap_or("") != class {
            let _ = el.set_attribute("class", class);
        }
    }
}

pub fn set_style(doc: &Document, id: &str, style: &str) {
    if let Some(el) = doc.get_element_by_id(id) {
        let _ = el.set_attribute("style", style);
    }
}

/// Client rect of an element
pub fn bounds_of(el: &Element) -> Bounds {
    let r = el.get_bounding_client_rect();
    Bounds::new(r.left() as f32, r.top() as f32, r.width() as f32, r.height() as f32)
}
