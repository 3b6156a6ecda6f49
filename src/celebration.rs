use chrono::{DateTime, Duration, Local};
use rand::Rng;

pub const PARTICLE_COUNT: usize = 50;
const COLOR_COUNT: usize = 7;

/// One piece of confetti, positioned in fractions of the screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Horizontal position, 0.0..1.0
    pub x: f64,
    /// Seconds before it starts falling
    pub delay: f64,
    /// Seconds to fall the full height
    pub fall_secs: f64,
    pub symbol: char,
    pub color_index: usize,
}

impl Particle {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            x: rng.gen_range(0.0..1.0),
            delay: rng.gen_range(0.0..0.5),
            fall_secs: rng.gen_range(1.0..3.0),
            symbol: ['*', '•', '+', '✦', '◆'][rng.gen_range(0..5)],
            color_index: rng.gen_range(0..COLOR_COUNT),
        }
    }

    /// Vertical position after `t` seconds, or `None` if not on screen.
    pub fn y_at(&self, t: f64) -> Option<f64> {
        let falling = t - self.delay;
        if falling < 0.0 || falling > self.fall_secs {
            return None;
        }
        Some(falling / self.fall_secs)
    }
}

/// Confetti shown over the results screen after a session completes.
#[derive(Debug, Default)]
pub struct Confetti {
    particles: Vec<Particle>,
    started_at: Option<DateTime<Local>>,
}

impl Confetti {
    pub fn duration() -> Duration {
        Duration::seconds(3)
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R, now: DateTime<Local>) {
        self.particles = (0..PARTICLE_COUNT).map(|_| Particle::random(rng)).collect();
        self.started_at = Some(now);
    }

    /// Drop the particles once the animation has run its course.
    pub fn update(&mut self, now: DateTime<Local>) {
        if let Some(start) = self.started_at {
            if now - start >= Self::duration() {
                self.stop();
            }
        }
    }

    pub fn stop(&mut self) {
        self.particles.clear();
        self.started_at = None;
    }

    pub fn is_active(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Seconds since the animation started
    pub fn elapsed_secs(&self, now: DateTime<Local>) -> f64 {
        self.started_at
            .map(|start| (now - start).num_milliseconds() as f64 / 1000.0)
            .unwrap_or(0.0)
    }

    /// Visible particles at `now` as (x, y) fractions of the screen.
    pub fn visible(&self, now: DateTime<Local>) -> impl Iterator<Item = (&Particle, f64, f64)> {
        let t = self.elapsed_secs(now);
        self.particles
            .iter()
            .filter_map(move |p| p.y_at(t).map(|y| (p, p.x, y)))
    }
}
