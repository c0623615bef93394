//! Background particle field.
//!
//! Particles sit at a random position in the unit square and drift upward,
//! wrapping at the top. Each has its own drift period and start delay.

use std::time::Duration;

use uuid::Uuid;

pub const DEFAULT_PARTICLE_COUNT: usize = 50;

/// Uniform sample in `[0, 1)` from a v4 UUID's random bits.
pub fn random_unit() -> f64 {
    let bits = Uuid::new_v4().as_u128() >> 75;
    bits as f64 / (1u64 << 53) as f64
}

/// Uniform sample in `[low, high)`.
pub fn random_range(low: f64, high: f64) -> f64 {
    low + random_unit() * (high - low)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Horizontal position, `0.0..1.0`.
    pub x: f64,
    /// Vertical start position, `0.0..1.0` from the top.
    pub y: f64,
    /// Size class 1..=4, drawn as progressively brighter glyphs.
    pub size: f64,
    pub opacity: f64,
    pub period: Duration,
    pub delay: Duration,
}

impl Particle {
    pub fn random() -> Self {
        Self {
            x: random_unit(),
            y: random_unit(),
            size: random_range(1.0, 4.0),
            opacity: random_range(0.2, 0.7),
            period: Duration::from_secs_f64(random_range(10.0, 20.0)),
            delay: Duration::from_secs_f64(random_range(0.0, 5.0)),
        }
    }

    /// Vertical position after `elapsed`; stays put until the delay passes.
    pub fn y_at(&self, elapsed: Duration) -> f64 {
        let Some(moving) = elapsed.checked_sub(self.delay) else {
            return self.y;
        };
        let period = self.period.as_secs_f64();
        if period <= 0.0 {
            return self.y;
        }
        let travelled = (moving.as_secs_f64() / period).fract();
        (self.y - travelled).rem_euclid(1.0)
    }

    pub fn glyph(&self) -> char {
        match self.size {
            s if s < 1.75 => '·',
            s if s < 2.5 => '∙',
            s if s < 3.25 => '•',
            _ => '●',
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    /// `count == 0` gives an empty field.
    pub fn new(count: usize) -> Self {
        Self {
            particles: (0..count).map(|_| Particle::random()).collect(),
        }
    }

    pub fn from_particles(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Cell positions for a `width` x `height` area at `elapsed`.
    pub fn positions(
        &self,
        width: u16,
        height: u16,
        elapsed: Duration,
    ) -> impl Iterator<Item = (u16, u16, &Particle)> + '_ {
        self.particles.iter().filter_map(move |p| {
            if width == 0 || height == 0 {
                return None;
            }
            let col = ((p.x * f64::from(width)) as u16).min(width - 1);
            let row = ((p.y_at(elapsed) * f64::from(height)) as u16).min(height - 1);
            Some((col, row, p))
        })
    }
}
