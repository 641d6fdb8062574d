//! Subsystem trait.
//!
//! RULE: Every tick-driven behavior implements SimSubsystem.
//! The engine calls update() on each registered subsystem
//! in registration order, every tick.

use crate::{
    error::SimResult,
    event::OfficeEvent,
    office::Office,
    rng::RandomSource,
    types::Tick,
};
use std::any::Any;

/// The contract every subsystem must fulfill.
pub trait SimSubsystem: Send {
    /// Unique stable name for this subsystem.
    fn name(&self) -> &'static str;

    /// Called once per tick by the engine.
    ///
    /// - `tick`:   the current tick number
    /// - `office`: departments and people, mutable
    /// - `rng`:    the random source for this tick
    ///
    /// Returns the events this subsystem produced.
    fn update(
        &mut self,
        tick: Tick,
        office: &mut Office,
        rng: &mut dyn RandomSource,
    ) -> SimResult<Vec<OfficeEvent>>;

    /// For downcasting in tests and tooling only.
    fn as_any(&self) -> &dyn Any;
}
