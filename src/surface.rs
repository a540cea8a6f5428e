// The slice of a 2d canvas context the hero layers draw with.
// Implemented for the real browser context, and by a recorder in tests.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub trait Surface {
    type Error;

    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn clear(&mut self);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn set_global_alpha(&mut self, alpha: f64);
    fn set_fill_color(&mut self, color: &str);
    fn set_font(&mut self, font: &str);
    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), Self::Error>;
}

impl Surface for CanvasRenderingContext2d {
    type Error = JsValue;

    fn width(&self) -> f64 {
        self.canvas().map(|canvas| canvas.width() as f64).unwrap_or(0.0)
    }

    fn height(&self) -> f64 {
        self.canvas().map(|canvas| canvas.height() as f64).unwrap_or(0.0)
    }

    fn clear(&mut self) {
        let (width, height) = (Surface::width(self), Surface::height(self));
        self.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        CanvasRenderingContext2d::fill_rect(self, x, y, width, height);
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        CanvasRenderingContext2d::set_global_alpha(self, alpha);
    }

    #[allow(deprecated)]
    fn set_fill_color(&mut self, color: &str) {
        self.set_fill_style(&JsValue::from_str(color));
    }

    fn set_font(&mut self, font: &str) {
        CanvasRenderingContext2d::set_font(self, font);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::fill_text(self, text, x, y)
    }
}

// Grabs the 2d context off a canvas, None if the browser won't hand one out
pub fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|context| context.dyn_into::<CanvasRenderingContext2d>().ok())
}
