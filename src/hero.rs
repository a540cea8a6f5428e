// Host-facing handle for the hero banner background. The page owns the
// canvas and the requestAnimationFrame loop, and calls `tick` once per frame.

use crate::field::{FieldConfig, ParticleField};
use crate::rain::{DigitalRain, RainConfig};
use crate::surface::{self, Surface};
use crate::Timer;
use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, CanvasRenderingContext2d, HtmlCanvasElement};

#[wasm_bindgen]
#[derive(Clone, Debug)]
pub struct HeroConfig {
    field: FieldConfig,
    rain: Option<RainConfig>,
}

fn lookup(options: &Object, key: &str) -> Option<JsValue> {
    Reflect::get(options, &JsValue::from_str(key))
        .ok()
        .filter(|value| !value.is_undefined())
}

fn number(options: &Object, key: &str) -> Option<f64> {
    lookup(options, key)
        .and_then(|value| value.as_f64())
        .filter(|n| n.is_finite())
}

fn particle_count_override(count: f64) -> usize {
    count.max(0.0).min(FieldConfig::MAX_PARTICLES as f64) as usize
}

// Anything under one frame switches lifetimes off
fn lifetime_override(frames: f64) -> Option<u32> {
    if frames >= 1.0 {
        Some(frames.min(FieldConfig::MAX_LIFETIME as f64) as u32)
    } else {
        None
    }
}

#[wasm_bindgen]
impl HeroConfig {
    #[wasm_bindgen(constructor)]
    pub fn new() -> HeroConfig {
        HeroConfig {
            field: FieldConfig::default(),
            rain: Some(RainConfig::default()),
        }
    }

    /// Plain drifting digits over sparse binary rain: no lifetimes, no cursor pull.
    pub fn basic() -> HeroConfig {
        HeroConfig {
            field: FieldConfig::basic(),
            rain: Some(RainConfig::basic()),
        }
    }

    /// Defaults overridden by whatever recognised keys `options` carries:
    /// `particleCount`, `maxSpeed`, `lifetime` (below 1 or null turns it off),
    /// `restitution`, `pointer` (false turns it off), `pointerRadius`,
    /// `pointerStrength` and `rain`. Anything else is ignored.
    #[wasm_bindgen(js_name = fromObject)]
    pub fn from_object(options: &JsValue) -> HeroConfig {
        let mut config = HeroConfig::new();
        if let Some(options) = options.dyn_ref::<Object>() {
            config.apply(options);
        }
        config
    }

    #[wasm_bindgen(getter, js_name = particleCount)]
    pub fn particle_count(&self) -> u32 {
        self.field.particle_count as u32
    }

    #[wasm_bindgen(getter)]
    pub fn rain(&self) -> bool {
        self.rain.is_some()
    }

    #[wasm_bindgen(getter, js_name = hasLifetime)]
    pub fn has_lifetime(&self) -> bool {
        self.field.lifetime.is_some()
    }

    #[wasm_bindgen(getter, js_name = hasPointer)]
    pub fn has_pointer(&self) -> bool {
        self.field.pointer.is_some()
    }
}

impl HeroConfig {
    pub fn field(&self) -> &FieldConfig {
        &self.field
    }

    pub fn rain_config(&self) -> Option<&RainConfig> {
        self.rain.as_ref()
    }

    fn apply(&mut self, options: &Object) {
        let field = &mut self.field;
        if let Some(count) = number(options, "particleCount") {
            field.particle_count = particle_count_override(count);
        }
        if let Some(speed) = number(options, "maxSpeed") {
            field.max_speed = speed.abs();
        }
        if let Some(lifetime) = lookup(options, "lifetime") {
            if lifetime.is_null() {
                field.lifetime = None;
            } else if let Some(frames) = lifetime.as_f64().filter(|n| n.is_finite()) {
                field.lifetime = lifetime_override(frames);
            }
        }
        if let Some(restitution) = number(options, "restitution") {
            field.restitution = restitution.max(0.0).min(1.0);
        }
        if lookup(options, "pointer").and_then(|value| value.as_bool()) == Some(false) {
            field.pointer = None;
        } else {
            let radius = number(options, "pointerRadius");
            let strength = number(options, "pointerStrength");
            if radius.is_some() || strength.is_some() {
                let mut force = field.pointer.unwrap_or_default();
                force.radius = radius.unwrap_or(force.radius);
                force.strength = strength.unwrap_or(force.strength);
                field.pointer = if force.radius > 0.0 { Some(force) } else { None };
            }
        }
        match lookup(options, "rain").and_then(|value| value.as_bool()) {
            Some(false) => self.rain = None,
            Some(true) if self.rain.is_none() => self.rain = Some(RainConfig::default()),
            _ => {}
        }
    }
}

impl Default for HeroConfig {
    fn default() -> Self {
        HeroConfig::new()
    }
}

#[wasm_bindgen]
pub struct HeroCanvas {
    field: Option<ParticleField>,
    rain: Option<DigitalRain>,
    pointer: Option<[f64; 2]>,
    profiling: bool,
}

#[wasm_bindgen]
impl HeroCanvas {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> HeroCanvas {
        HeroCanvas::with_config(width, height, &HeroConfig::new())
    }

    pub fn basic(width: f64, height: f64) -> HeroCanvas {
        HeroCanvas::with_config(width, height, &HeroConfig::basic())
    }

    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(width: f64, height: f64, config: &HeroConfig) -> HeroCanvas {
        let field = ParticleField::new(width, height, config.field.clone());
        console::log_1(
            &format!(
                "hero canvas: {} particles on {}x{}",
                field.particles().len(),
                field.width(),
                field.height()
            )
            .into(),
        );
        HeroCanvas {
            field: Some(field),
            rain: config
                .rain
                .map(|rain| DigitalRain::new(width, height, rain)),
            pointer: None,
            profiling: false,
        }
    }

    #[wasm_bindgen(getter, js_name = particleCount)]
    pub fn particle_count(&self) -> u32 {
        self.field
            .as_ref()
            .map(|field| field.particles().len() as u32)
            .unwrap_or(0)
    }

    #[wasm_bindgen(getter, js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.field.is_some()
    }

    #[wasm_bindgen(js_name = setProfiling)]
    pub fn set_profiling(&mut self, profiling: bool) {
        self.profiling = profiling;
    }

    #[wasm_bindgen(js_name = setPointer)]
    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.pointer = Some([x, y]);
    }

    #[wasm_bindgen(js_name = clearPointer)]
    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        if let Some(field) = self.field.as_mut() {
            field.resize(width, height);
        }
        if let Some(rain) = self.rain.as_mut() {
            rain.resize(width, height);
        }
    }

    /// Advances and paints one frame. Without a context the frame is skipped.
    pub fn tick(&mut self, context: Option<CanvasRenderingContext2d>) {
        if let Some(mut context) = context {
            self.render(&mut context, None);
        }
    }

    /// Like `tick`, but paints the rain onto its own canvas stacked under the
    /// particle canvas, so the particle trails don't smear it.
    #[wasm_bindgen(js_name = tickLayers)]
    pub fn tick_layers(
        &mut self,
        context: Option<CanvasRenderingContext2d>,
        rain_context: Option<CanvasRenderingContext2d>,
    ) {
        let mut rain_context = rain_context;
        if let Some(mut context) = context {
            self.render(&mut context, rain_context.as_mut());
        }
    }

    #[wasm_bindgen(js_name = tickCanvas)]
    pub fn tick_canvas(&mut self, canvas: &HtmlCanvasElement) {
        match surface::context_2d(canvas) {
            Some(mut context) => self.render(&mut context, None),
            None => console::log_1(&"hero canvas: no 2d context, skipping frame".into()),
        }
    }

    /// Drops the particles and rain, every later tick is a no-op.
    pub fn teardown(&mut self) {
        if self.field.take().is_some() {
            console::log_1(&"hero canvas: torn down".into());
        }
        self.rain = None;
        self.pointer = None;
    }
}

impl HeroCanvas {
    pub fn field(&self) -> Option<&ParticleField> {
        self.field.as_ref()
    }

    fn render(
        &mut self,
        context: &mut CanvasRenderingContext2d,
        rain_context: Option<&mut CanvasRenderingContext2d>,
    ) {
        let field = match self.field.as_mut() {
            Some(field) => field,
            None => return,
        };
        let _timer = if self.profiling {
            Some(Timer::new("HeroCanvas::tick"))
        } else {
            None
        };
        if let Err(err) = render_frame(field, self.rain.as_mut(), self.pointer, context, rain_context) {
            console::log_2(&"hero canvas: draw failed".into(), &err);
        }
    }
}

/// One frame in paint order: wash or clear, rain, then the particles on top.
/// Given a `rain_surface`, the rain is cleared and painted there instead.
pub fn render_frame<S: Surface>(
    field: &mut ParticleField,
    rain: Option<&mut DigitalRain>,
    pointer: Option<[f64; 2]>,
    surface: &mut S,
    rain_surface: Option<&mut S>,
) -> Result<(), S::Error> {
    field.clear_frame(surface);
    if let Some(rain) = rain {
        rain.step();
        match rain_surface {
            Some(rain_surface) => {
                rain_surface.clear();
                rain.draw(rain_surface)?;
            }
            None => rain.draw(surface)?,
        }
    }
    field.step(pointer);
    field.draw(surface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::recording::{Call, RecordingSurface};

    const RAIN_FONT: &str = "12px monospace";

    fn fonts(surface: &RecordingSurface) -> Vec<&str> {
        surface
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::Font(font) => Some(font.as_str()),
                _ => None,
            })
            .collect()
    }

    fn scene() -> (ParticleField, DigitalRain) {
        let field = ParticleField::with_seed(400.0, 600.0, FieldConfig::default(), 1);
        let mut rain = DigitalRain::with_seed(400.0, 600.0, RainConfig::default(), 2);
        // Far enough in that the first columns are mid-fall
        for _ in 0..150 {
            rain.step();
        }
        (field, rain)
    }

    #[test]
    fn frame_paints_wash_then_rain_then_particles() {
        let (mut field, mut rain) = scene();
        let mut surface = RecordingSurface::new(400.0, 600.0);
        render_frame(&mut field, Some(&mut rain), None, &mut surface, None).unwrap();

        assert_eq!(surface.calls[2], Call::FillRect(0.0, 0.0, 400.0, 600.0));
        let fonts = fonts(&surface);
        assert_eq!(fonts[0], RAIN_FONT);
        assert!(fonts[1..].iter().all(|font| *font != RAIN_FONT));
        assert_eq!(fonts.len(), 1 + field.particles().len());
        assert_eq!(rain.frame(), 151);
    }

    #[test]
    fn separate_rain_surface_is_cleared_and_keeps_the_rain() {
        let (mut field, mut rain) = scene();
        let mut surface = RecordingSurface::new(400.0, 600.0);
        let mut rain_surface = RecordingSurface::new(400.0, 600.0);
        render_frame(
            &mut field,
            Some(&mut rain),
            None,
            &mut surface,
            Some(&mut rain_surface),
        )
        .unwrap();

        assert_eq!(rain_surface.calls[0], Call::Clear);
        assert!(!rain_surface.texts().is_empty());
        assert_eq!(fonts(&rain_surface), vec![RAIN_FONT]);
        assert!(!fonts(&surface).contains(&RAIN_FONT));
        assert_eq!(surface.texts().len(), field.particles().len());
    }

    #[test]
    fn frame_without_rain_only_paints_particles() {
        let mut field = ParticleField::with_seed(100.0, 100.0, FieldConfig::basic(), 3);
        let mut surface = RecordingSurface::new(100.0, 100.0);
        render_frame(&mut field, None, None, &mut surface, None).unwrap();
        assert_eq!(surface.calls[0], Call::Clear);
        assert_eq!(surface.texts().len(), 100);
    }

    #[test]
    fn huge_lifetime_override_is_capped() {
        assert_eq!(lifetime_override(1e12), Some(FieldConfig::MAX_LIFETIME));
        assert_eq!(lifetime_override(200.0), Some(200));
        assert_eq!(lifetime_override(0.5), None);
        assert_eq!(lifetime_override(-3.0), None);
    }

    #[test]
    fn huge_particle_count_override_is_capped() {
        assert_eq!(particle_count_override(1e12), FieldConfig::MAX_PARTICLES);
        assert_eq!(particle_count_override(80.0), 80);
        assert_eq!(particle_count_override(-5.0), 0);
    }

    #[test]
    fn capped_lifetime_builds_a_field() {
        let config = FieldConfig {
            lifetime: lifetime_override(1e12),
            particle_count: particle_count_override(3.0),
            ..FieldConfig::default()
        };
        let mut field = ParticleField::with_seed(100.0, 100.0, config, 4);
        field.step(None);
        assert_eq!(field.particles().len(), 3);
    }

    #[test]
    fn basic_preset_keeps_sparse_rain() {
        let config = HeroConfig::basic();
        assert_eq!(config.rain_config(), Some(&RainConfig::basic()));
        assert!(config.field().lifetime.is_none());
        assert!(config.field().pointer.is_none());
    }
}
