//! Simulation clock — owns tick state, the transfer timer, speed and pause.

use crate::types::Tick;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimClock {
    pub current_tick: Tick,
    pub period_ms:    u64,
    pub speed:        SimSpeed,
    pub paused:       bool,
    /// Set by teardown; a stopped clock never fires again.
    pub stopped:      bool,
    /// Scaled milliseconds accumulated towards the next tick.
    carry_ms:         u64,
}

impl SimClock {
    pub fn new(period_ms: u64) -> Self {
        Self {
            current_tick: 0,
            period_ms: period_ms.max(1),
            speed: SimSpeed::Normal,
            paused: false,
            stopped: false,
            carry_ms: 0,
        }
    }

    /// Advance one tick. Returns the new tick number.
    pub fn advance(&mut self) -> Tick {
        self.current_tick += 1;
        self.current_tick
    }

    /// Feed elapsed real milliseconds. Returns how many ticks are now due.
    /// A paused or stopped clock swallows the time.
    pub fn accumulate(&mut self, elapsed_ms: u64) -> u64 {
        if self.paused || self.stopped {
            return 0;
        }
        let scaled = elapsed_ms.saturating_mul(self.speed.multiplier());
        self.carry_ms = self.carry_ms.saturating_add(scaled);
        let due = self.carry_ms / self.period_ms;
        self.carry_ms %= self.period_ms;
        due
    }

    /// Milliseconds of scaled time until the next tick fires.
    pub fn ms_until_next_tick(&self) -> u64 {
        self.period_ms - self.carry_ms
    }

    pub fn pause(&mut self)  { self.paused = true;  }
    pub fn resume(&mut self) { self.paused = false; }

    pub fn stop(&mut self) {
        self.stopped = true;
        self.carry_ms = 0;
    }

    pub fn set_speed(&mut self, speed: SimSpeed) {
        self.speed = speed;
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SimSpeed {
    Normal,       // 1 transfer per period
    Accelerated,  // 4x
    FastForward,  // 16x
}

impl SimSpeed {
    pub fn multiplier(&self) -> u64 {
        match self {
            SimSpeed::Normal      => 1,
            SimSpeed::Accelerated => 4,
            SimSpeed::FastForward => 16,
        }
    }
}
