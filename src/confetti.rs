use rand::seq::SliceRandom;
use rand::Rng;

const SYMBOLS: [char; 6] = ['*', '+', '.', 'o', '~', '^'];
const GRAVITY: f64 = 15.0;

/// One falling scrap of confetti
#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub symbol: char,
    pub color_index: usize,
    pub age: f64,
    pub max_age: f64,
}

impl Particle {
    fn launch<R: Rng>(x: f64, y: f64, rng: &mut R) -> Self {
        Self {
            x,
            y,
            vel_x: rng.gen_range(-6.0..6.0),
            vel_y: rng.gen_range(-8.0..-2.0),
            symbol: *SYMBOLS.choose(rng).unwrap_or(&'*'),
            color_index: rng.gen_range(0..7),
            age: 0.0,
            max_age: rng.gen_range(1.0..2.5),
        }
    }

    /// Advance by `dt` seconds; false once the particle has burnt out
    fn update(&mut self, dt: f64) -> bool {
        self.x += self.vel_x * dt;
        self.y += self.vel_y * dt;
        self.vel_y += GRAVITY * dt;
        self.age += dt;
        self.age < self.max_age
    }

    /// Remaining life in `0.0..=1.0`, used to fade the particle out
    pub fn life(&self) -> f64 {
        (1.0 - self.age / self.max_age).clamp(0.0, 1.0)
    }
}

/// A burst of confetti over the play area, driven by the tick loop
#[derive(Debug, Default)]
pub struct Confetti {
    pub particles: Vec<Particle>,
}

impl Confetti {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        !self.particles.is_empty()
    }

    /// Fire a burst from the middle of a `width` x `height` area
    pub fn burst(&mut self, width: u16, height: u16) {
        let mut rng = rand::thread_rng();
        let center_x = width as f64 / 2.0;
        let center_y = height as f64 / 2.0;

        for _ in 0..40 {
            let x = center_x + rng.gen_range(-10.0..10.0);
            let y = center_y + rng.gen_range(-3.0..3.0);
            self.particles.push(Particle::launch(x, y, &mut rng));
        }
    }

    pub fn update(&mut self, dt: f64) {
        self.particles.retain_mut(|p| p.update(dt));
    }
}
