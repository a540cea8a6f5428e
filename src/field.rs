// The floating binary digit field: a fixed set of particles that drift,
// bounce off the canvas edges, get tugged by the cursor and fade out and
// respawn as their lifetime runs down.

use crate::color::Color;
use crate::particle::{Particle, Symbol};
use crate::pointer::PointerForce;
use crate::surface::Surface;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Colors for the two digits.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Palette {
    pub one: Color,
    pub zero: Color,
}

impl Palette {
    pub fn color_for(&self, symbol: Symbol) -> Color {
        match symbol {
            Symbol::One => self.one,
            Symbol::Zero => self.zero,
        }
    }
}

/// Visual parameters of a field. `Default` is the interactive variant with
/// lifetimes and cursor pull, `basic()` the plain drifting one.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub particle_count: usize,
    pub max_speed: f64,
    pub alpha_range: (f64, f64),
    pub size_range: (f64, f64),
    pub lifetime: Option<u32>,
    pub peak_alpha: f64,
    pub restitution: f64,
    pub pointer: Option<PointerForce>,
    pub palette: Palette,
    pub font_scale: f64,
    pub font_family: String,
    // Translucent wash painted each frame instead of a full clear
    pub trail: Option<Color>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            particle_count: 80,
            max_speed: 0.6,
            alpha_range: (0.2, 0.8),
            size_range: (1.0, 4.0),
            lifetime: Some(200),
            peak_alpha: 0.8,
            restitution: 0.8,
            pointer: Some(PointerForce::default()),
            palette: Palette {
                one: Color::MATRIX_GREEN,
                zero: Color::EMBER_ORANGE,
            },
            font_scale: 10.0,
            font_family: "'Courier New', monospace".to_owned(),
            trail: Some(Color::from_u32(0x0000000d)),
        }
    }
}

impl FieldConfig {
    // Upper bounds for host overrides, an hour of frames at 60 fps for lifetimes
    pub const MAX_PARTICLES: usize = 5_000;
    pub const MAX_LIFETIME: u32 = 216_000;

    pub fn basic() -> Self {
        FieldConfig {
            particle_count: 100,
            max_speed: 0.25,
            alpha_range: (0.2, 0.7),
            size_range: (1.0, 3.0),
            lifetime: None,
            peak_alpha: 0.7,
            restitution: 1.0,
            pointer: None,
            palette: Palette {
                one: Color::MATRIX_GREEN,
                zero: Color::MATRIX_GREEN,
            },
            font_scale: 8.0,
            font_family: "monospace".to_owned(),
            trail: None,
        }
    }
}

// Negative and NaN dimensions collapse to an empty surface
fn normalize(dimension: f64) -> f64 {
    if dimension.is_finite() {
        dimension.max(0.0)
    } else {
        0.0
    }
}

pub struct ParticleField {
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    config: FieldConfig,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(width: f64, height: f64, config: FieldConfig) -> ParticleField {
        ParticleField::with_rng(width, height, config, StdRng::from_entropy())
    }

    pub fn with_seed(width: f64, height: f64, config: FieldConfig, seed: u64) -> ParticleField {
        ParticleField::with_rng(width, height, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(width: f64, height: f64, mut config: FieldConfig, mut rng: StdRng) -> ParticleField {
        let (width, height) = (normalize(width), normalize(height));
        config.particle_count = config.particle_count.min(FieldConfig::MAX_PARTICLES);
        let mut particles = Vec::with_capacity(config.particle_count);
        for _ in 0..config.particle_count {
            particles.push(Particle::spawn(&mut rng, [width, height], &config));
        }
        ParticleField {
            width,
            height,
            particles,
            config,
            rng,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn is_empty_surface(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Advances every particle by one frame. `pointer` is the cursor position
    /// in surface coordinates, if the cursor is over the page.
    pub fn step(&mut self, pointer: Option<[f64; 2]>) {
        let bounds = [self.width, self.height];
        let force = self.config.pointer.zip(pointer);
        for particle in &mut self.particles {
            if let Some((force, target)) = force {
                force.nudge(particle, target);
            }
            particle.advance();
            if particle.age(self.config.peak_alpha) {
                particle.respawn(&mut self.rng, bounds, &self.config);
            }
            particle.reflect(bounds, self.config.restitution);
        }
    }

    /// Only the bounds change, particles left outside are pulled back in by
    /// the next `step`.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = normalize(width);
        self.height = normalize(height);
    }

    pub fn clear_frame<S: Surface>(&self, surface: &mut S) {
        match self.config.trail {
            Some(wash) => {
                surface.set_global_alpha(1.0);
                let (width, height) = (surface.width(), surface.height());
                surface.set_fill_color(&wash.css());
                surface.fill_rect(0.0, 0.0, width, height);
            }
            None => surface.clear(),
        }
    }

    pub fn draw<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        if self.is_empty_surface() {
            return Ok(());
        }
        let one = self.config.palette.color_for(Symbol::One).css();
        let zero = self.config.palette.color_for(Symbol::Zero).css();
        for particle in &self.particles {
            surface.set_global_alpha(particle.alpha);
            surface.set_fill_color(match particle.symbol {
                Symbol::One => one.as_str(),
                Symbol::Zero => zero.as_str(),
            });
            surface.set_font(&format!(
                "{}px {}",
                particle.size * self.config.font_scale,
                self.config.font_family
            ));
            surface.fill_text(particle.symbol.glyph(), particle.pos[0], particle.pos[1])?;
        }
        surface.set_global_alpha(1.0);
        Ok(())
    }
}
