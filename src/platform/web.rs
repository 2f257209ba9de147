//! DOM access for the canvas, counter and end indicator

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement, Window};

use crate::sim::Viewport;

/// Element showing the number of shapes still in play
pub const COUNTER_ID: &str = "count";
/// Element revealed once every shape is caught
pub const END_ID: &str = "theend";

/// Current window inner size
pub fn window_viewport(window: &Window) -> Viewport {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    Viewport::new(width, height)
}

/// Match the canvas backing store to the viewport
pub fn fit_canvas(canvas: &HtmlCanvasElement, viewport: Viewport) {
    canvas.set_width(viewport.width as u32);
    canvas.set_height(viewport.height as u32);
}

/// First `<canvas>` in the document
pub fn find_canvas(document: &Document) -> Result<HtmlCanvasElement, JsValue> {
    document
        .query_selector("canvas")?
        .ok_or_else(|| JsValue::from_str("no <canvas> element"))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str("element is not a canvas"))
}

pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| JsValue::from_str("not a 2d context"))
}

/// Counter text and end indicator. Missing elements are skipped.
pub struct Hud {
    counter: Option<Element>,
    end: Option<HtmlElement>,
}

impl Hud {
    pub fn find(document: &Document) -> Self {
        let counter = document.get_element_by_id(COUNTER_ID);
        if counter.is_none() {
            log::warn!("No #{} element, live counter hidden", COUNTER_ID);
        }
        let end = document
            .get_element_by_id(END_ID)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        Self { counter, end }
    }

    pub fn show_count(&self, live: usize) {
        if let Some(el) = &self.counter {
            el.set_text_content(Some(&live.to_string()));
        }
    }

    pub fn show_end(&self) {
        if let Some(el) = &self.end {
            if let Err(e) = el.style().set_property("visibility", "visible") {
                log::warn!("Could not reveal end indicator: {:?}", e);
            }
        }
    }
}
