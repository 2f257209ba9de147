//! Canvas 2D surface

use std::f64::consts::TAU;

use glam::DVec2;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::Surface;
use crate::sim::{Rgb, Viewport};

/// Paints draw commands with the browser's 2D context
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    fn set_fill(&self, css: &str) {
        self.ctx.set_fill_style_str(css);
    }

    fn trace_circle(&self, center: DVec2, radius: f64) {
        self.ctx.begin_path();
        if let Err(e) = self.ctx.arc(center.x, center.y, radius, 0.0, TAU) {
            log_js_error("arc", &e);
        }
    }
}

impl Surface for CanvasSurface {
    fn fade(&mut self, alpha: f64, viewport: Viewport) {
        self.set_fill(&format!("rgba(0, 0, 0, {alpha})"));
        self.ctx
            .fill_rect(0.0, 0.0, viewport.width, viewport.height);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgb) {
        self.trace_circle(center, radius);
        self.set_fill(&color.to_string());
        self.ctx.fill();
    }

    fn fill_square(&mut self, center: DVec2, side: f64, color: Rgb) {
        self.set_fill(&color.to_string());
        self.ctx
            .fill_rect(center.x - side / 2.0, center.y - side / 2.0, side, side);
    }

    fn stroke_circle(&mut self, center: DVec2, radius: f64, color: Rgb) {
        self.trace_circle(center, radius);
        self.ctx.set_stroke_style_str(&color.to_string());
        self.ctx.stroke();
    }
}

fn log_js_error(op: &str, err: &JsValue) {
    log::warn!("Canvas {} failed: {:?}", op, err);
}
