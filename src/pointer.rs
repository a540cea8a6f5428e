// Cursor pull on nearby particles, strongest right under the pointer and
// fading to nothing at the edge of its radius

use crate::particle::Particle;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerForce {
    pub radius: f64,
    // Positive pulls particles toward the pointer, negative pushes them away
    pub strength: f64,
}

impl PointerForce {
    pub const DEFAULT_RADIUS: f64 = 100.0;
    pub const DEFAULT_STRENGTH: f64 = 0.01;

    pub fn new(radius: f64, strength: f64) -> Self {
        PointerForce { radius, strength }
    }

    pub fn nudge(&self, particle: &mut Particle, pointer: Vector2<f64>) {
        if !(pointer[0].is_finite() && pointer[1].is_finite()) {
            return;
        }
        let to_pointer = vecmath::vec2_sub(pointer, particle.pos);
        let distance = vecmath::vec2_len(to_pointer);
        // Sitting exactly on the pointer has no direction to push along
        if distance <= 0.0 || distance >= self.radius {
            return;
        }
        let falloff = (self.radius - distance) / self.radius;
        let dir = vecmath::vec2_scale(to_pointer, 1.0 / distance);
        let dv = vecmath::vec2_scale(dir, falloff * self.strength);
        particle.vel = vecmath::vec2_add(particle.vel, dv);
    }
}

impl Default for PointerForce {
    fn default() -> Self {
        PointerForce::new(PointerForce::DEFAULT_RADIUS, PointerForce::DEFAULT_STRENGTH)
    }
}
