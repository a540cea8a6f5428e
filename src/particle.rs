// Particle struct keeping track of an individual floating digit:
// position, velocity, opacity, font size and which digit it shows

use crate::field::FieldConfig;
use rand::Rng;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Symbol {
    Zero,
    One,
}

impl Symbol {
    pub fn glyph(self) -> &'static str {
        match self {
            Symbol::Zero => "0",
            Symbol::One => "1",
        }
    }

    fn random<R: Rng>(rng: &mut R) -> Symbol {
        if rng.gen_bool(0.5) {
            Symbol::One
        } else {
            Symbol::Zero
        }
    }
}

/// Frames left before a particle respawns, out of `max`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Lifetime {
    pub remaining: u32,
    pub max: u32,
}

impl Lifetime {
    pub fn fraction(&self) -> f64 {
        self.remaining as f64 / self.max as f64
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: [f64; 2],
    pub vel: [f64; 2],
    pub alpha: f64,
    pub size: f64,
    pub symbol: Symbol,
    pub life: Option<Lifetime>,
}

// Uniform sample in [min, max), tolerates min == max
fn random_in<R: Rng>(rng: &mut R, (min, max): (f64, f64)) -> f64 {
    rng.gen::<f64>() * (max - min) + min
}

impl Particle {
    pub fn new(pos: [f64; 2], vel: [f64; 2], alpha: f64, size: f64, symbol: Symbol) -> Particle {
        Particle {
            pos,
            vel,
            alpha,
            size,
            symbol,
            life: None,
        }
    }

    /// Fresh particle somewhere inside `bounds`. With a configured lifetime the
    /// particle starts partway through it so the field doesn't respawn in lockstep.
    pub fn spawn<R: Rng>(rng: &mut R, bounds: [f64; 2], config: &FieldConfig) -> Particle {
        let mut particle = Particle::new([0.0; 2], [0.0; 2], 0.0, 0.0, Symbol::Zero);
        particle.scatter(rng, bounds, config);
        if let Some(max) = config.lifetime {
            let max = max.max(1);
            particle.life = Some(Lifetime {
                remaining: rng.gen_range(0, max) + 1,
                max,
            });
            particle.fade(config.peak_alpha);
        }
        particle
    }

    /// Reinitializes in place once the lifetime has run out.
    pub fn respawn<R: Rng>(&mut self, rng: &mut R, bounds: [f64; 2], config: &FieldConfig) {
        self.scatter(rng, bounds, config);
        if let Some(life) = self.life.as_mut() {
            life.remaining = life.max;
        }
        self.fade(config.peak_alpha);
    }

    fn scatter<R: Rng>(&mut self, rng: &mut R, bounds: [f64; 2], config: &FieldConfig) {
        let speed = config.max_speed.abs();
        self.pos = [rng.gen::<f64>() * bounds[0], rng.gen::<f64>() * bounds[1]];
        self.vel = [
            random_in(rng, (-speed, speed)),
            random_in(rng, (-speed, speed)),
        ];
        self.alpha = random_in(rng, config.alpha_range).max(0.0).min(1.0);
        self.size = random_in(rng, config.size_range);
        self.symbol = Symbol::random(rng);
    }

    pub fn advance(&mut self) {
        self.pos[0] += self.vel[0];
        self.pos[1] += self.vel[1];
    }

    /// Burns one frame of life. Returns true when the particle has expired.
    pub fn age(&mut self, peak_alpha: f64) -> bool {
        match self.life.as_mut() {
            Some(life) => {
                life.remaining = life.remaining.saturating_sub(1);
                if life.remaining == 0 {
                    return true;
                }
            }
            None => return false,
        }
        self.fade(peak_alpha);
        false
    }

    fn fade(&mut self, peak_alpha: f64) {
        if let Some(life) = self.life {
            self.alpha = (life.fraction() * peak_alpha).max(0.0).min(1.0);
        }
    }

    // Bounce off the walls, pointing the velocity back inside and bleeding
    // off energy when restitution is under 1
    pub fn reflect(&mut self, bounds: [f64; 2], restitution: f64) {
        for axis in 0..2 {
            let limit = bounds[axis];
            if self.pos[axis] < 0.0 {
                self.vel[axis] = self.vel[axis].abs() * restitution;
                self.pos[axis] = 0.0;
            } else if self.pos[axis] > limit {
                self.vel[axis] = -self.vel[axis].abs() * restitution;
                self.pos[axis] = limit;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn still(x: f64, y: f64) -> Particle {
        Particle::new([x, y], [0.0, 0.0], 0.5, 2.0, Symbol::One)
    }

    #[test]
    fn reflect_right_wall_points_velocity_inward() {
        let mut p = still(800.4, 10.0);
        p.vel = [0.5, 0.1];
        p.reflect([800.0, 600.0], 1.0);
        assert_eq!(p.pos, [800.0, 10.0]);
        assert_eq!(p.vel, [-0.5, 0.1]);
    }

    #[test]
    fn reflect_top_wall_loses_energy() {
        let mut p = still(10.0, -2.0);
        p.vel = [0.0, -1.0];
        p.reflect([800.0, 600.0], 0.8);
        assert_eq!(p.pos[1], 0.0);
        assert!((p.vel[1] - 0.8).abs() < 1e-12);
    }

    #[test]
    fn reflect_far_outside_after_shrink_clamps_to_edge() {
        let mut p = still(700.0, 500.0);
        p.vel = [-0.3, -0.3];
        p.reflect([400.0, 300.0], 1.0);
        assert_eq!(p.pos, [400.0, 300.0]);
        assert!(p.vel[0] < 0.0 && p.vel[1] < 0.0);
    }

    #[test]
    fn age_fades_with_remaining_life() {
        let mut p = still(1.0, 1.0);
        p.life = Some(Lifetime {
            remaining: 101,
            max: 200,
        });
        assert!(!p.age(0.8));
        assert!((p.alpha - 0.4).abs() < 1e-12);
    }

    #[test]
    fn age_reports_expiry_at_zero() {
        let mut p = still(1.0, 1.0);
        p.life = Some(Lifetime { remaining: 1, max: 200 });
        assert!(p.age(0.8));
    }

    #[test]
    fn age_without_lifetime_is_inert() {
        let mut p = still(1.0, 1.0);
        assert!(!p.age(0.8));
        assert_eq!(p.alpha, 0.5);
    }

    #[test]
    fn respawn_resets_life_and_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = FieldConfig::default();
        let mut p = still(1.0, 1.0);
        p.life = Some(Lifetime { remaining: 0, max: 200 });
        p.respawn(&mut rng, [800.0, 600.0], &config);
        assert_eq!(p.life, Some(Lifetime { remaining: 200, max: 200 }));
        assert!((p.alpha - config.peak_alpha).abs() < 1e-12);
        assert!(p.pos[0] >= 0.0 && p.pos[0] <= 800.0);
        assert!(p.pos[1] >= 0.0 && p.pos[1] <= 600.0);
    }

    #[test]
    fn spawn_respects_configured_bands() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = FieldConfig::basic();
        for _ in 0..200 {
            let p = Particle::spawn(&mut rng, [320.0, 240.0], &config);
            assert!(p.life.is_none());
            assert!(p.vel[0].abs() <= config.max_speed);
            assert!(p.vel[1].abs() <= config.max_speed);
            assert!(p.alpha >= config.alpha_range.0 && p.alpha <= config.alpha_range.1);
            assert!(p.size >= config.size_range.0 && p.size <= config.size_range.1);
        }
    }

    #[test]
    fn spawn_with_longest_lifetime_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(5);
        let config = FieldConfig {
            lifetime: Some(u32::MAX),
            ..FieldConfig::default()
        };
        for _ in 0..50 {
            let life = Particle::spawn(&mut rng, [100.0, 100.0], &config).life.unwrap();
            assert_eq!(life.max, u32::MAX);
            assert!(life.remaining >= 1);
        }
    }

    #[test]
    fn spawn_with_single_frame_lifetime() {
        let mut rng = StdRng::seed_from_u64(6);
        let config = FieldConfig {
            lifetime: Some(1),
            ..FieldConfig::default()
        };
        let p = Particle::spawn(&mut rng, [100.0, 100.0], &config);
        assert_eq!(p.life, Some(Lifetime { remaining: 1, max: 1 }));
    }

    #[test]
    fn spawn_with_lifetime_starts_partway() {
        let mut rng = StdRng::seed_from_u64(3);
        let config = FieldConfig::default();
        for _ in 0..100 {
            let p = Particle::spawn(&mut rng, [100.0, 100.0], &config);
            let life = p.life.unwrap();
            assert!(life.remaining >= 1 && life.remaining <= life.max);
            assert!(p.alpha >= 0.0 && p.alpha <= 1.0);
        }
    }
}
