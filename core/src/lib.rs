//! Department simulation engine for the virtual office.
//!
//! Departments sit at fixed anchors; people are hired into them, earn
//! their department a score, and every transfer tick one of them walks
//! to another department. Everything visual is left to a presentation
//! layer that pulls `DisplayState`s and consumes `PresentationRequest`s.

pub mod animation;
pub mod bus;
pub mod clock;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod office;
pub mod people;
pub mod registry;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod store;
pub mod subsystem;
pub mod transfer_subsystem;
pub mod types;

pub use engine::OfficeSim;
pub use error::{SimError, SimResult};
