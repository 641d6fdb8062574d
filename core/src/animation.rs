//! Walk interpolation for transition requests.
//!
//! A walk goes from wherever the marker is *drawn* right now to the
//! destination anchor. That start point can be mid-way through an earlier
//! walk, since the logical department may change before the visual
//! catches up.

use crate::types::{Anchor, PersonId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    EaseInOut,
}

impl Easing {
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            // smoothstep
            Easing::EaseInOut => t * t * (3.0 - 2.0 * t),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Walk {
    pub person_id: PersonId,
    pub from: Anchor,
    pub to: Anchor,
    pub frames: u32,
    pub fps: u32,
    pub easing: Easing,
}

impl Walk {
    pub fn new(person_id: PersonId, from: Anchor, to: Anchor, frames: u32, fps: u32) -> Self {
        Self {
            person_id,
            from,
            to,
            frames: frames.max(1),
            fps: fps.max(1),
            easing: Easing::Linear,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Fraction of the walk completed at `frame`, after easing.
    pub fn progress(&self, frame: u32) -> f32 {
        self.easing.apply(frame as f32 / self.frames as f32)
    }

    pub fn position_at(&self, frame: u32) -> Anchor {
        self.from.lerp(&self.to, self.progress(frame))
    }

    /// Position after `elapsed_ms` of wall time.
    pub fn position_after_ms(&self, elapsed_ms: u64) -> Anchor {
        self.position_at(self.frame_after_ms(elapsed_ms))
    }

    pub fn frame_after_ms(&self, elapsed_ms: u64) -> u32 {
        let frame = elapsed_ms.saturating_mul(self.fps as u64) / 1000;
        frame.min(self.frames as u64) as u32
    }

    pub fn is_finished(&self, frame: u32) -> bool {
        frame >= self.frames
    }

    pub fn duration_ms(&self) -> u64 {
        self.frames as u64 * 1000 / self.fps as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;

    fn walk() -> Walk {
        let id = PersonId::generate(&mut ScriptedRng::new(vec![3, 4]));
        Walk::new(id, Anchor::new(-20.0, 0.0), Anchor::new(0.0, 20.0), 60, 30)
    }

    #[test]
    fn walk_starts_and_ends_on_its_endpoints() {
        let w = walk();
        assert_eq!(w.position_at(0), Anchor::new(-20.0, 0.0));
        assert_eq!(w.position_at(60), Anchor::new(0.0, 20.0));
        assert_eq!(w.position_at(600), Anchor::new(0.0, 20.0));
        assert!(w.is_finished(60));
        assert!(!w.is_finished(59));
    }

    #[test]
    fn default_walk_lasts_two_seconds() {
        let w = walk();
        assert_eq!(w.duration_ms(), 2000);
        assert_eq!(w.frame_after_ms(1000), 30);
        assert_eq!(w.position_after_ms(1000), Anchor::new(-10.0, 10.0));
    }

    #[test]
    fn eased_walk_progresses_monotonically() {
        let w = walk().with_easing(Easing::EaseInOut);
        let mut last = -1.0;
        for frame in 0..=60 {
            let p = w.progress(frame);
            assert!(p >= last, "progress went backwards at frame {frame}");
            last = p;
        }
        assert_eq!(w.progress(30), 0.5);
    }
}
