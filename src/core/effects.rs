//! Cosmetic hover particles, click ripples and the icon bounce curve.
//!
//! Positions are in cells.  Effects on the [`Layer::Document`] use document
//! rows counted from the page top so they scroll with the content; effects
//! on the [`Layer::Navbar`] use screen rows and stay put.

use std::time::{Duration, Instant};

use rand::Rng;

pub const PARTICLE_INTERVAL: Duration = Duration::from_millis(200);
pub const PARTICLE_CHANCE: f64 = 0.3;
pub const PARTICLE_LIFETIME: Duration = Duration::from_millis(1500);
/// Rows a particle rises over its lifetime.
pub const PARTICLE_RISE: f64 = 3.0;
pub const RIPPLE_LIFETIME: Duration = Duration::from_millis(500);
pub const BOUNCE_DURATION: Duration = Duration::from_millis(600);

/// Which surface an effect is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layer {
    #[default]
    Document,
    Navbar,
}

/// A rectangle in cells on one layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocRect {
    pub x: u16,
    pub y: usize,
    pub width: u16,
    pub height: usize,
}

impl DocRect {
    pub fn contains(&self, col: u16, row: usize) -> bool {
        col >= self.x
            && col < self.x.saturating_add(self.width)
            && row >= self.y
            && row < self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    layer: Layer,
    born: Instant,
}

/// Where to draw a particle right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleView {
    pub x: f64,
    pub y: f64,
    pub layer: Layer,
    /// 0.8 at birth fading to 0.
    pub opacity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    pub center_x: f64,
    pub center_y: f64,
    /// Size of the clicked control in columns, counting one row as two
    /// columns since cells are twice as tall as they are wide.
    pub size: f64,
    pub layer: Layer,
    /// The clicked control; the ring never leaves it.
    pub clip: DocRect,
    born: Instant,
}

impl Ripple {
    /// Current radius in columns; grows from 0 to `size` over its lifetime.
    pub fn radius(&self, now: Instant) -> f64 {
        let t = progress(self.born, now, RIPPLE_LIFETIME);
        self.size * t
    }
}

#[derive(Debug, Clone, Copy)]
struct Emitter {
    rect: DocRect,
    layer: Layer,
    next_tick: Instant,
}

#[derive(Debug, Clone, Default)]
pub struct Effects {
    particles: Vec<Particle>,
    ripples: Vec<Ripple>,
    emitter: Option<Emitter>,
}

fn progress(born: Instant, now: Instant, life: Duration) -> f64 {
    let elapsed = now.saturating_duration_since(born).as_secs_f64();
    (elapsed / life.as_secs_f64()).clamp(0.0, 1.0)
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start emitting particles over `rect`.
    pub fn hover_enter(&mut self, rect: DocRect, layer: Layer, now: Instant) {
        if self.emitter.map(|e| (e.rect, e.layer)) == Some((rect, layer)) {
            return;
        }
        self.emitter = Some(Emitter {
            rect,
            layer,
            next_tick: now + PARTICLE_INTERVAL,
        });
    }

    pub fn hover_leave(&mut self) {
        self.emitter = None;
    }

    #[cfg(test)]
    pub fn emitting_on(&self) -> Option<Layer> {
        self.emitter.map(|e| e.layer)
    }

    pub fn click(&mut self, rect: DocRect, layer: Layer, col: u16, row: usize, now: Instant) {
        let tall = rect.height.saturating_mul(2) as f64;
        self.ripples.push(Ripple {
            center_x: col as f64,
            center_y: row as f64,
            size: (rect.width as f64).max(tall),
            layer,
            clip: rect,
            born: now,
        });
    }

    /// Emit due particles and drop expired ones.
    pub fn tick<R: Rng>(&mut self, now: Instant, rng: &mut R) {
        if let Some(emitter) = self.emitter.as_mut() {
            while emitter.next_tick <= now {
                if rng.gen_bool(PARTICLE_CHANCE) {
                    let r = emitter.rect;
                    self.particles.push(Particle {
                        x: r.x as f64 + rng.gen::<f64>() * r.width as f64,
                        y: r.y as f64 + rng.gen::<f64>() * r.height as f64,
                        layer: emitter.layer,
                        born: emitter.next_tick,
                    });
                }
                emitter.next_tick += PARTICLE_INTERVAL;
            }
        }
        self.particles.retain(|p| now < p.born + PARTICLE_LIFETIME);
        self.ripples.retain(|r| now < r.born + RIPPLE_LIFETIME);
    }

    pub fn particles(&self, now: Instant) -> impl Iterator<Item = ParticleView> + '_ {
        self.particles.iter().map(move |p| {
            let t = progress(p.born, now, PARTICLE_LIFETIME);
            ParticleView {
                x: p.x,
                y: p.y - PARTICLE_RISE * t,
                layer: p.layer,
                opacity: 0.8 * (1.0 - t),
            }
        })
    }

    pub fn ripples(&self) -> &[Ripple] {
        &self.ripples
    }

    pub fn is_active(&self) -> bool {
        self.emitter.is_some() || !self.particles.is_empty() || !self.ripples.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        let emit = self.emitter.map(|e| e.next_tick);
        let expire = self
            .particles
            .iter()
            .map(|p| p.born + PARTICLE_LIFETIME)
            .chain(self.ripples.iter().map(|r| r.born + RIPPLE_LIFETIME))
            .min();
        match (emit, expire) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

/// Vertical icon offset (px, negative is up) `elapsed` into a bounce.
pub fn bounce_offset(elapsed: Duration) -> f64 {
    // (fraction of the animation, translateY)
    const KEYS: &[(f64, f64)] = &[
        (0.0, 0.0),
        (0.20, 0.0),
        (0.40, -8.0),
        (0.43, -8.0),
        (0.53, 0.0),
        (0.70, -4.0),
        (0.80, 0.0),
        (0.90, -2.0),
        (1.0, 0.0),
    ];
    let t = elapsed.as_secs_f64() / BOUNCE_DURATION.as_secs_f64();
    if t >= 1.0 {
        return 0.0;
    }
    KEYS.windows(2)
        .find(|w| t >= w[0].0 && t <= w[1].0)
        .map(|w| {
            let (t0, y0) = w[0];
            let (t1, y1) = w[1];
            y0 + (y1 - y0) * (t - t0) / (t1 - t0)
        })
        .unwrap_or(0.0)
}
