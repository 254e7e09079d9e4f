// The full particle set plus the viewport it lives in. Recreated wholesale on
// every setup, never resized in place.

use rand::Rng;

use crate::config::FieldConfig;
use crate::particle::Particle;

/// Viewport extent in pixels. Both sides are strictly positive.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Option<Bounds> {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            Some(Bounds { width, height })
        } else {
            None
        }
    }
}

/// A rendered edge between two particles, `a < b`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub distance: f64,
    pub opacity: f64,
}

/// Line opacity for two particles `distance` apart: fades linearly from 1 at
/// distance 0 to 0 at `threshold`. `None` at or beyond the threshold.
pub fn link_opacity(distance: f64, threshold: f64) -> Option<f64> {
    if distance < threshold {
        Some(1.0 - distance / threshold)
    } else {
        None
    }
}

#[derive(Clone, Debug)]
pub struct Field {
    bounds: Bounds,
    particles: Vec<Particle>,
}

impl Field {
    pub fn populate<R: Rng>(bounds: Bounds, config: &FieldConfig, rng: &mut R) -> Field {
        let mut particles = Vec::with_capacity(config.particle_count);
        for _ in 0..config.particle_count {
            particles.push(Particle::random(
                rng,
                bounds,
                config.particle_radius,
                config.min_speed,
                config.max_speed,
            ));
        }
        Field { bounds, particles }
    }

    pub fn from_particles(bounds: Bounds, particles: Vec<Particle>) -> Field {
        Field { bounds, particles }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Advances every particle by one tick.
    pub fn step(&mut self) {
        let bounds = self.bounds;
        for particle in &mut self.particles {
            particle.advance(bounds);
        }
    }

    /// Every unordered pair closer than `threshold`, each pair visited once.
    pub fn links(&self, threshold: f64) -> impl Iterator<Item = Link> + '_ {
        let particles = &self.particles;
        (0..particles.len()).flat_map(move |a| {
            (a + 1..particles.len()).filter_map(move |b| {
                let distance = particles[a].distance_to(&particles[b]);
                link_opacity(distance, threshold).map(|opacity| Link {
                    a,
                    b,
                    distance,
                    opacity,
                })
            })
        })
    }
}
