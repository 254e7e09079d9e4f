// Simple particle struct: position and velocity in viewport pixels, fixed radius

use std::f64::consts::PI;

use rand::Rng;
use vecmath::Vector2;

use crate::field::Bounds;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub radius: f64,
}

impl Particle {
    pub fn new(pos: Vector2<f64>, vel: Vector2<f64>, radius: f64) -> Particle {
        Particle { pos, vel, radius }
    }

    /// Uniform position inside `bounds`, uniform heading, speed drawn from
    /// `[min_speed, max_speed]`.
    pub fn random<R: Rng>(
        rng: &mut R,
        bounds: Bounds,
        radius: f64,
        min_speed: f64,
        max_speed: f64,
    ) -> Particle {
        let pos_x = rng.gen::<f64>() * bounds.width;
        let pos_y = rng.gen::<f64>() * bounds.height;
        let heading = rng.gen::<f64>() * 2.0 * PI;
        let speed = min_speed + rng.gen::<f64>() * (max_speed - min_speed);
        Particle::new(
            [pos_x, pos_y],
            [heading.cos() * speed, heading.sin() * speed],
            radius,
        )
    }

    pub fn speed(&self) -> f64 {
        vecmath::vec2_len(self.vel)
    }

    /// Moves one step and bounces off the bounds.
    ///
    /// The check runs on the new position and only flips velocity, so a
    /// particle can sit outside the bounds for one frame before coming back.
    /// Returns which axes were reflected.
    pub fn advance(&mut self, bounds: Bounds) -> [bool; 2] {
        self.pos = vecmath::vec2_add(self.pos, self.vel);
        let extent = [bounds.width, bounds.height];
        let mut reflected = [false; 2];
        for axis in 0..2 {
            if self.pos[axis] < 0.0 || self.pos[axis] > extent[axis] {
                self.vel[axis] = -self.vel[axis];
                reflected[axis] = true;
            }
        }
        reflected
    }

    pub fn distance_to(&self, other: &Particle) -> f64 {
        vecmath::vec2_len(vecmath::vec2_sub(self.pos, other.pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bounds() -> Bounds {
        Bounds::new(1000.0, 800.0).unwrap()
    }

    #[test]
    fn random_particles_stay_in_bounds_and_speed_band() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let p = Particle::random(&mut rng, bounds(), 2.0, 0.1, 0.35);
            assert!(p.pos[0] >= 0.0 && p.pos[0] <= 1000.0);
            assert!(p.pos[1] >= 0.0 && p.pos[1] <= 800.0);
            assert!(p.speed() >= 0.1 - 1e-12 && p.speed() <= 0.35 + 1e-12);
        }
    }

    #[test]
    fn interior_move_does_not_reflect() {
        let mut p = Particle::new([500.0, 400.0], [0.25, -0.5], 2.0);
        assert_eq!(p.advance(bounds()), [false, false]);
        assert_eq!(p.pos, [500.25, 399.5]);
        assert_eq!(p.vel, [0.25, -0.5]);
    }

    #[test]
    fn crossing_flips_once_and_overshoots_one_frame() {
        let mut p = Particle::new([0.1, 400.0], [-0.25, 0.0], 2.0);

        assert_eq!(p.advance(bounds()), [true, false]);
        assert!(p.pos[0] < 0.0, "position is not clamped");
        assert_eq!(p.vel[0], 0.25);

        assert_eq!(p.advance(bounds()), [false, false]);
        assert!(p.pos[0] > 0.0);
        assert_eq!(p.vel[0], 0.25);
    }

    #[test]
    fn corner_reflects_both_axes_independently() {
        let mut p = Particle::new([999.9, 799.9], [0.5, 0.5], 2.0);
        assert_eq!(p.advance(bounds()), [true, true]);
        assert_eq!(p.vel, [-0.5, -0.5]);
    }

    #[test]
    fn landing_exactly_on_the_edge_is_inside() {
        let mut p = Particle::new([999.5, 10.0], [0.5, 0.0], 2.0);
        assert_eq!(p.advance(bounds()), [false, false]);
        assert_eq!(p.pos[0], 1000.0);
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Particle::new([0.0, 0.0], [0.0, 0.0], 2.0);
        let b = Particle::new([3.0, 4.0], [0.0, 0.0], 2.0);
        assert_eq!(a.distance_to(&b), 5.0);
    }
}
