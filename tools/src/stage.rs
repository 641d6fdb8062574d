//! Headless stand-in for the renderer.
//!
//! Consumes presentation requests, hands out render handles, and keeps
//! every marker's drawn position up to date as walks play out. Walks are
//! never reported back to the engine.

use anyhow::Result;
use office_core::{
    animation::Walk,
    bus::PresentationRequest,
    types::{Anchor, PersonId, RenderHandle},
    OfficeSim,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::mpsc::Receiver;

struct Marker {
    handle: RenderHandle,
    rest: Anchor,
    walk: Option<(Walk, u64)>,
}

impl Marker {
    fn drawn_at(&self, now_ms: u64) -> Anchor {
        match &self.walk {
            Some((walk, started)) => walk.position_after_ms(now_ms - started),
            None => self.rest,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MarkerView {
    pub person_id: PersonId,
    pub handle: RenderHandle,
    pub x: f32,
    pub z: f32,
    pub walking: bool,
}

pub struct Stage {
    rx: Receiver<PresentationRequest>,
    markers: BTreeMap<PersonId, Marker>,
    next_handle: u64,
    now_ms: u64,
    walk_frames: u32,
    walk_fps: u32,
}

impl Stage {
    pub fn new(sim: &mut OfficeSim) -> Self {
        let config = sim.config();
        let (walk_frames, walk_fps) = (config.walk_frames, config.walk_fps);
        Self {
            rx: sim.subscribe(),
            markers: BTreeMap::new(),
            next_handle: 1,
            now_ms: 0,
            walk_frames,
            walk_fps,
        }
    }

    /// Drain pending requests: create markers, start walks.
    pub fn sync(&mut self, sim: &mut OfficeSim) -> Result<()> {
        let pending: Vec<_> = self.rx.try_iter().collect();
        for request in pending {
            match request {
                PresentationRequest::Spawn(spawn) => {
                    let handle = RenderHandle(self.next_handle);
                    self.next_handle += 1;
                    sim.attach_handle(spawn.person_id, handle)?;
                    self.markers.insert(
                        spawn.person_id,
                        Marker { handle, rest: spawn.position, walk: None },
                    );
                    log::debug!("stage: spawned {} at {:?}", spawn.person_id.short(), spawn.position);
                }
                PresentationRequest::Transition(t) => {
                    let Some(marker) = self.markers.get_mut(&t.person_id) else {
                        log::warn!("stage: transition for unknown marker {}", t.person_id.short());
                        continue;
                    };
                    let start = marker.drawn_at(self.now_ms);
                    let walk = Walk::new(t.person_id, start, t.to_anchor, self.walk_frames, self.walk_fps);
                    marker.rest = start;
                    marker.walk = Some((walk, self.now_ms));
                    log::debug!("stage: {} walking {} -> {}", t.person_id.short(), t.from, t.to);
                }
            }
        }
        Ok(())
    }

    /// Let `ms` of wall time pass for every walk in flight.
    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
        let now = self.now_ms;
        for marker in self.markers.values_mut() {
            let arrived = match &marker.walk {
                Some((walk, started)) => walk.is_finished(walk.frame_after_ms(now - started)),
                None => false,
            };
            if arrived {
                if let Some((walk, _)) = marker.walk.take() {
                    marker.rest = walk.to;
                }
            }
        }
    }

    /// Let `ms` of wall time pass for the office and the stage together.
    /// Time is fed in steps that end on tick boundaries, so every walk
    /// starts at the moment its tick fired.
    pub fn run_for(&mut self, sim: &mut OfficeSim, ms: u64) -> Result<()> {
        let mut remaining = ms;
        while remaining > 0 {
            let clock = &sim.clock;
            let step = if clock.paused || clock.stopped {
                remaining
            } else {
                clock
                    .ms_until_next_tick()
                    .div_ceil(clock.speed.multiplier())
                    .clamp(1, remaining)
            };
            sim.advance(step)?;
            self.advance(step);
            self.sync(sim)?;
            remaining -= step;
        }
        Ok(())
    }

    pub fn walking(&self) -> usize {
        self.markers.values().filter(|m| m.walk.is_some()).count()
    }

    pub fn markers(&self) -> Vec<MarkerView> {
        self.markers
            .iter()
            .map(|(id, m)| {
                let at = m.drawn_at(self.now_ms);
                MarkerView {
                    person_id: *id,
                    handle: m.handle,
                    x: at.x,
                    z: at.z,
                    walking: m.walk.is_some(),
                }
            })
            .collect()
    }
}
