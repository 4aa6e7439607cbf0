use raylib::prelude::*;
use crate::constants::*;

const PERIOD: f32 = 6.0;        // Seconds for one float up and back down
const DRIFT: f32 = 0.025;       // Vertical travel, as a fraction of the render height
const BASE_OPACITY: f32 = 0.25;
const PEAK_OPACITY: f32 = 0.75;

/// Decorative light speck at a fixed relative position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub left: f32,   // Relative horizontal position, 0..1
    pub top: f32,    // Relative vertical position, 0..1
    pub size: f32,   // Diameter in pixels at render size
    pub delay: f32,  // Seconds before the particle starts moving
}

const fn particle(left: f32, top: f32, size: f32, delay: f32) -> Particle {
    Particle { left, top, size: size * 1.5, delay }
}

pub const PARTICLES: [Particle; 10] = [
    particle(0.08, 0.78, 14.0, 0.0),
    particle(0.22, 0.24, 10.0, 1.8),
    particle(0.34, 0.68, 18.0, 3.2),
    particle(0.46, 0.12, 12.0, 2.5),
    particle(0.58, 0.84, 16.0, 4.1),
    particle(0.72, 0.32, 9.0, 1.1),
    particle(0.82, 0.74, 13.0, 0.7),
    particle(0.88, 0.18, 11.0, 3.8),
    particle(0.14, 0.42, 9.0, 5.5),
    particle(0.64, 0.54, 15.0, 2.2),
];

/// Where and how bright a particle is on a given frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleFrame {
    pub center: Vector2,
    pub radius: f32,
    pub opacity: f32,
}

impl Particle {
    pub fn sample(&self, t: f32) -> ParticleFrame {
        let phase = if t < self.delay {
            0.0
        } else {
            ((t - self.delay) % PERIOD) / PERIOD
        };

        // 0 at rest, 1 at the top of the float
        let swing = if phase < 0.5 {
            ease::sine_in_out(phase, 0.0, 1.0, 0.5)
        } else {
            ease::sine_in_out(phase - 0.5, 1.0, -1.0, 0.5)
        };

        let height = RENDER_HEIGHT as f32;
        ParticleFrame {
            center: Vector2::new(
                RENDER_WIDTH as f32 * self.left,
                height * self.top - swing * DRIFT * height,
            ),
            radius: self.size * 0.5 * (1.0 + 0.25 * swing),
            opacity: BASE_OPACITY + (PEAK_OPACITY - BASE_OPACITY) * swing,
        }
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, t: f32, tint: Color) {
        let frame = self.sample(t);
        let alpha = (frame.opacity * 255.0) as u8;
        d.draw_circle_v(frame.center, frame.radius * 2.0, Color::new(tint.r, tint.g, tint.b, alpha / 6));
        d.draw_circle_v(frame.center, frame.radius, Color::new(tint.r, tint.g, tint.b, alpha));
    }
}
