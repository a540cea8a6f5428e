mod utils;

pub mod color;
pub mod field;
pub mod hero;
pub mod particle;
pub mod pointer;
pub mod rain;
pub mod surface;

use wasm_bindgen::prelude::*;
use web_sys::console;

pub use field::{FieldConfig, ParticleField};
pub use hero::{HeroCanvas, HeroConfig};
pub use rain::{DigitalRain, RainConfig};
pub use surface::Surface;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

// Wraps console.time / console.timeEnd around a scope
pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}
