// "Digital rain" layer: columns of binary digits and block glyphs that
// sweep down the canvas, each on its own speed and start delay.

use crate::color::Color;
use crate::surface::Surface;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const FRAMES_PER_SECOND: f64 = 60.0;
const FONT: &str = "12px monospace";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Glyphs {
    // Even split of "0" and "1"
    Binary,
    // Mostly digits with the odd shaded block
    Blocks,
}

impl Glyphs {
    fn pick<R: Rng>(self, rng: &mut R) -> &'static str {
        match self {
            Glyphs::Binary => {
                if rng.gen_bool(0.5) {
                    "1"
                } else {
                    "0"
                }
            }
            Glyphs::Blocks => {
                if rng.gen_bool(0.3) {
                    "1"
                } else if rng.gen_bool(0.2) {
                    "0"
                } else if rng.gen_bool(0.1) {
                    "█"
                } else {
                    "▓"
                }
            }
        }
    }
}

/// Layout and timing of the rain. `Default` is the dense block rain,
/// `basic()` the sparser all-binary one.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RainConfig {
    pub columns: usize,
    pub glyphs_per_column: usize,
    pub column_spacing: f64,
    pub delay_step_seconds: f64,
    pub cycle_seconds: (f64, f64),
    pub layer_alpha: f64,
    pub line_height: f64,
    pub glyphs: Glyphs,
    // Orange glyphs sprinkled down the column
    pub accents: bool,
}

impl Default for RainConfig {
    fn default() -> Self {
        RainConfig {
            columns: 25,
            glyphs_per_column: 30,
            column_spacing: 0.04,
            delay_step_seconds: 0.15,
            cycle_seconds: (2.0, 5.0),
            layer_alpha: 0.4,
            line_height: 15.0,
            glyphs: Glyphs::Blocks,
            accents: true,
        }
    }
}

impl RainConfig {
    pub fn basic() -> Self {
        RainConfig {
            columns: 20,
            glyphs_per_column: 20,
            column_spacing: 0.05,
            delay_step_seconds: 0.1,
            cycle_seconds: (3.0, 3.0),
            layer_alpha: 0.15,
            line_height: 16.0,
            glyphs: Glyphs::Binary,
            accents: false,
        }
    }
}

// Mostly green, with the odd orange glyph down the column
pub fn glyph_color(index: usize) -> Color {
    if index % 7 != 0 && index % 11 == 0 {
        Color::EMBER_ORANGE
    } else {
        Color::MATRIX_GREEN
    }
}

// Fade in over the first tenth of the fall, out over the last
fn envelope(progress: f64) -> f64 {
    if progress < 0.1 {
        progress / 0.1
    } else if progress > 0.9 {
        (1.0 - progress) / 0.1
    } else {
        1.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RainColumn {
    pub x_fraction: f64,
    pub delay_frames: u64,
    pub cycle_frames: u64,
    pub glyphs: Vec<&'static str>,
}

impl RainColumn {
    fn new<R: Rng>(rng: &mut R, index: usize, config: &RainConfig) -> RainColumn {
        let (min, max) = config.cycle_seconds;
        let cycle_seconds = rng.gen::<f64>() * (max - min) + min;
        RainColumn {
            x_fraction: index as f64 * config.column_spacing,
            delay_frames: (index as f64 * config.delay_step_seconds * FRAMES_PER_SECOND).round()
                as u64,
            cycle_frames: ((cycle_seconds * FRAMES_PER_SECOND).round() as u64).max(1),
            glyphs: (0..config.glyphs_per_column)
                .map(|_| config.glyphs.pick(&mut *rng))
                .collect(),
        }
    }

    /// How far through its current fall the column is, None until it starts.
    pub fn progress(&self, frame: u64) -> Option<f64> {
        if frame < self.delay_frames {
            return None;
        }
        let into_cycle = (frame - self.delay_frames) % self.cycle_frames;
        Some(into_cycle as f64 / self.cycle_frames as f64)
    }
}

pub struct DigitalRain {
    width: f64,
    height: f64,
    frame: u64,
    config: RainConfig,
    columns: Vec<RainColumn>,
}

impl DigitalRain {
    pub fn new(width: f64, height: f64, config: RainConfig) -> DigitalRain {
        DigitalRain::with_rng(width, height, config, &mut StdRng::from_entropy())
    }

    pub fn with_seed(width: f64, height: f64, config: RainConfig, seed: u64) -> DigitalRain {
        DigitalRain::with_rng(width, height, config, &mut StdRng::seed_from_u64(seed))
    }

    fn with_rng<R: Rng>(width: f64, height: f64, config: RainConfig, rng: &mut R) -> DigitalRain {
        let columns = (0..config.columns)
            .map(|i| RainColumn::new(&mut *rng, i, &config))
            .collect();
        let mut rain = DigitalRain {
            width: 0.0,
            height: 0.0,
            frame: 0,
            config,
            columns,
        };
        rain.resize(width, height);
        rain
    }

    pub fn columns(&self) -> &[RainColumn] {
        &self.columns
    }

    pub fn config(&self) -> &RainConfig {
        &self.config
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        self.height = if height.is_finite() { height.max(0.0) } else { 0.0 };
    }

    pub fn step(&mut self) {
        self.frame += 1;
    }

    pub fn draw<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Ok(());
        }
        let green = Color::MATRIX_GREEN.css();
        let orange = Color::EMBER_ORANGE.css();
        let line_height = self.config.line_height;
        surface.set_font(FONT);
        for column in &self.columns {
            let progress = match column.progress(self.frame) {
                Some(progress) => progress,
                None => continue,
            };
            let alpha = self.config.layer_alpha * envelope(progress);
            if alpha <= 0.0 {
                continue;
            }
            surface.set_global_alpha(alpha);
            let x = column.x_fraction * self.width;
            let top = -self.height + progress * 2.0 * self.height;
            for (i, glyph) in column.glyphs.iter().enumerate() {
                let y = top + (i + 1) as f64 * line_height;
                if y < 0.0 || y > self.height + line_height {
                    continue;
                }
                let color = if self.config.accents && glyph_color(i) == Color::EMBER_ORANGE {
                    &orange
                } else {
                    &green
                };
                surface.set_fill_color(color);
                surface.fill_text(glyph, x, y)?;
            }
        }
        surface.set_global_alpha(1.0);
        Ok(())
    }
}
