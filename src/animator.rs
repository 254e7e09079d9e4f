//! The particle network animator.
//!
//! Owns the field, the drawing surface, the random source and the loop
//! lifecycle. Nothing outside mutates particles directly; callers go through
//! `setup`, `tick`, `frame`, `pause`, `resume` and the resize pair. Scheduling
//! of frames and timeouts stays with the caller, which makes the animator
//! itself free of any browser dependency beyond its surface.

use rand::Rng;

use crate::color::Theme;
use crate::config::FieldConfig;
use crate::debounce::{Debouncer, Ticket};
use crate::field::{Bounds, Field};
use crate::lifecycle::{FrameAction, Lifecycle, Resume};
use crate::surface::Surface;
#[cfg(feature = "profiling")]
use crate::utils::Timer;

pub struct Animator<S, R> {
    config: FieldConfig,
    surface: S,
    rng: R,
    field: Field,
    lifecycle: Lifecycle,
    resize: Debouncer<Bounds>,
    setups: u64,
}

impl<S: Surface, R: Rng> Animator<S, R> {
    /// Builds the animator and runs the initial setup. The lifecycle starts
    /// out running; call [`Animator::start`] to claim the first frame.
    pub fn new(config: FieldConfig, surface: S, mut rng: R, bounds: Bounds) -> Animator<S, R> {
        let field = Field::populate(bounds, &config, &mut rng);
        let resize = Debouncer::new(config.resize_debounce_ms);
        let mut animator = Animator {
            config,
            surface,
            rng,
            field,
            lifecycle: Lifecycle::new(),
            resize,
            setups: 0,
        };
        animator.resize_surface(bounds);
        animator.setups = 1;
        animator
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle.is_running()
    }

    /// Number of setups performed so far, the initial one included.
    pub fn setups(&self) -> u64 {
        self.setups
    }

    /// Resizes the surface and replaces the whole particle set.
    pub fn setup(&mut self, bounds: Bounds) {
        self.resize_surface(bounds);
        self.field = Field::populate(bounds, &self.config, &mut self.rng);
        self.setups += 1;
        log::debug!(
            "field setup #{}: {}x{}, {} particles",
            self.setups,
            bounds.width,
            bounds.height,
            self.field.len()
        );
    }

    fn resize_surface(&mut self, bounds: Bounds) {
        self.surface
            .resize(bounds.width as u32, bounds.height as u32);
    }

    /// One simulation and render step.
    pub fn tick(&mut self, theme: Theme) {
        #[cfg(feature = "profiling")]
        let _timer = Timer::new("Animator::tick");
        self.field.step();
        self.render(theme);
    }

    fn render(&mut self, theme: Theme) {
        let base = theme.color();
        let fill = base.with_alpha(self.config.particle_alpha);
        self.surface.clear();
        for particle in self.field.particles() {
            self.surface
                .fill_circle(particle.pos, particle.radius, fill);
        }
        let particles = self.field.particles();
        for link in self.field.links(self.config.link_distance) {
            self.surface.stroke_line(
                particles[link.a].pos,
                particles[link.b].pos,
                self.config.line_width,
                base.with_alpha(link.opacity),
            );
        }
    }

    /// Claims the first frame of the loop. True if the caller should
    /// request it.
    pub fn start(&mut self) -> bool {
        self.lifecycle.start()
    }

    /// Body of the frame callback. Ticks when running; on `Render` the caller
    /// requests the next frame, on `Stop` the loop ends. `theme` is only
    /// consulted for frames that render.
    pub fn frame<T: FnOnce() -> Theme>(&mut self, theme: T) -> FrameAction {
        let action = self.lifecycle.on_frame();
        if action == FrameAction::Render {
            self.tick(theme());
        }
        action
    }

    /// The caller failed to request the next frame.
    pub fn frame_dropped(&mut self) {
        self.lifecycle.cancel_frame();
    }

    pub fn pause(&mut self) -> bool {
        let changed = self.lifecycle.pause();
        if changed {
            log::debug!("animation paused");
        }
        changed
    }

    /// On [`Resume::Restart`] the caller requests exactly one frame.
    pub fn resume(&mut self) -> Resume {
        let outcome = self.lifecycle.resume();
        match outcome {
            Resume::Restart => log::debug!("animation resumed, restarting frame loop"),
            Resume::Rearmed => log::debug!("animation resumed on pending frame"),
            Resume::AlreadyRunning => {}
        }
        outcome
    }

    pub fn resize_delay_ms(&self) -> u32 {
        self.resize.delay_ms()
    }

    /// Records a viewport change. The caller fires the ticket after the
    /// debounce delay.
    pub fn request_resize(&mut self, bounds: Bounds) -> Ticket {
        self.resize.schedule(bounds)
    }

    /// Runs setup if `ticket` is the latest request. Returns whether it did.
    pub fn apply_resize(&mut self, ticket: Ticket) -> bool {
        match self.resize.fire(ticket) {
            Some(bounds) => {
                self.setup(bounds);
                true
            }
            None => {
                log::debug!("resize coalesced into a later request");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Particle;
    use crate::surface::{DrawCommand, RecordingSurface};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bounds(w: f64, h: f64) -> Bounds {
        Bounds::new(w, h).unwrap()
    }

    fn animator(seed: u64) -> Animator<RecordingSurface, StdRng> {
        Animator::new(
            FieldConfig::default(),
            RecordingSurface::new(),
            StdRng::seed_from_u64(seed),
            bounds(1000.0, 800.0),
        )
    }

    fn positions(a: &Animator<RecordingSurface, StdRng>) -> Vec<[f64; 2]> {
        a.field().particles().iter().map(|p| p.pos).collect()
    }

    #[test]
    fn new_runs_initial_setup() {
        let a = animator(1);
        assert_eq!(a.setups(), 1);
        assert_eq!(a.field().len(), 60);
        assert_eq!(a.surface().size, (1000, 800));
        assert!(a.is_running());
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let mut a = animator(42);
        let mut b = animator(42);
        assert_eq!(positions(&a), positions(&b));
        for _ in 0..500 {
            a.tick(Theme::Default);
            b.tick(Theme::Default);
            assert_eq!(positions(&a), positions(&b));
        }
    }

    #[test]
    fn reflections_flip_once_per_tick() {
        let mut a = animator(9);
        for _ in 0..2000 {
            let before: Vec<Particle> = a.field().particles().to_vec();
            a.tick(Theme::Default);
            for (old, new) in before.iter().zip(a.field().particles()) {
                for axis in 0..2 {
                    assert!(
                        new.vel[axis] == old.vel[axis] || new.vel[axis] == -old.vel[axis],
                        "velocity magnitude changed"
                    );
                }
                assert!((new.speed() - old.speed()).abs() < 1e-12);
            }
        }
        let extent = [1000.0, 800.0];
        for p in a.field().particles() {
            for axis in 0..2 {
                let slack = p.vel[axis].abs();
                assert!(p.pos[axis] >= -slack && p.pos[axis] <= extent[axis] + slack);
            }
        }
    }

    #[test]
    fn tick_draws_particles_and_half_faded_link() {
        let mut a = animator(1);
        a.field = Field::from_particles(
            bounds(1000.0, 800.0),
            vec![
                Particle::new([100.0, 100.0], [0.0, 0.0], 2.0),
                Particle::new([175.0, 100.0], [0.0, 0.0], 2.0),
                Particle::new([500.0, 100.0], [0.0, 0.0], 2.0),
            ],
        );
        a.tick(Theme::Default);

        let surface = a.surface();
        assert_eq!(surface.circles().count(), 3);
        let lines: Vec<&DrawCommand> = surface.lines().collect();
        assert_eq!(lines.len(), 1);
        match lines[0] {
            DrawCommand::Line {
                from, to, color, width,
            } => {
                assert_eq!(*from, [100.0, 100.0]);
                assert_eq!(*to, [175.0, 100.0]);
                assert_eq!(*width, 1.0);
                assert_eq!(color.a, 0.5);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn far_pair_draws_no_link() {
        let mut a = animator(1);
        a.field = Field::from_particles(
            bounds(1000.0, 800.0),
            vec![
                Particle::new([100.0, 100.0], [0.0, 0.0], 2.0),
                Particle::new([300.0, 100.0], [0.0, 0.0], 2.0),
            ],
        );
        a.tick(Theme::Default);
        assert_eq!(a.surface().lines().count(), 0);
    }

    #[test]
    fn theme_selects_palette() {
        let mut a = animator(1);
        a.tick(Theme::Alternate);
        let alt = Theme::Alternate.color().with_alpha(0.5);
        assert!(a.surface().circles().all(|c| match c {
            DrawCommand::Circle { color, .. } => *color == alt,
            _ => false,
        }));
    }

    #[test]
    fn each_tick_clears_previous_frame() {
        let mut a = animator(3);
        a.tick(Theme::Default);
        let first = a.surface().circles().count();
        a.tick(Theme::Default);
        assert_eq!(a.surface().circles().count(), first);
        assert_eq!(a.surface().clears, 2);
    }

    #[test]
    fn paused_frame_does_not_tick() {
        let mut a = animator(5);
        assert!(a.start());
        assert_eq!(a.frame(|| Theme::Default), FrameAction::Render);
        a.pause();
        let frozen = positions(&a);
        assert_eq!(a.frame(|| Theme::Default), FrameAction::Stop);
        assert_eq!(positions(&a), frozen);
        assert_eq!(a.lifecycle().pending_frames(), 0);
    }

    #[test]
    fn stop_frame_never_reads_theme() {
        let mut a = animator(5);
        a.start();
        a.pause();
        let action = a.frame(|| panic!("theme read on a stopping frame"));
        assert_eq!(action, FrameAction::Stop);
    }

    #[test]
    fn render_frame_reads_theme_once() {
        let mut a = animator(5);
        a.start();
        let mut reads = 0;
        a.frame(|| {
            reads += 1;
            Theme::Alternate
        });
        assert_eq!(reads, 1);
    }

    #[test]
    fn double_resume_keeps_single_loop() {
        let mut a = animator(5);
        a.start();
        a.pause();
        a.frame(|| Theme::Default);
        assert_eq!(a.resume(), Resume::Restart);
        assert_eq!(a.resume(), Resume::AlreadyRunning);
        assert_eq!(a.lifecycle().pending_frames(), 1);
    }

    #[test]
    fn resume_continues_from_paused_positions() {
        let mut a = animator(8);
        a.start();
        for _ in 0..10 {
            a.frame(|| Theme::Default);
        }
        a.pause();
        a.frame(|| Theme::Default);
        let at_pause = positions(&a);
        a.pause();
        assert_eq!(a.resume(), Resume::Restart);
        assert_eq!(positions(&a), at_pause);
        assert_eq!(a.setups(), 1);
    }

    #[test]
    fn resize_burst_runs_one_setup_with_final_size() {
        let mut a = animator(2);
        let first = a.request_resize(bounds(1200.0, 900.0));
        let second = a.request_resize(bounds(1400.0, 1000.0));
        assert!(!a.apply_resize(first));
        assert!(a.apply_resize(second));
        assert_eq!(a.setups(), 2);
        assert_eq!(a.field().bounds(), bounds(1400.0, 1000.0));
        assert_eq!(a.surface().size, (1400, 1000));
        assert_eq!(a.field().len(), 60);
    }

    #[test]
    fn resize_does_not_touch_lifecycle() {
        let mut a = animator(2);
        a.start();
        a.pause();
        let t = a.request_resize(bounds(900.0, 700.0));
        a.apply_resize(t);
        assert!(!a.is_running());
        assert_eq!(a.lifecycle().pending_frames(), 1);
    }
}
