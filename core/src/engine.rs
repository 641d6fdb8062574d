//! The simulation engine — the one owned context for the whole office.
//!
//! Every collaborator (UI callbacks, the timer, the renderer) reaches the
//! model through a `&mut OfficeSim`. There is no ambient global state.
//!
//! RULES:
//!   - Each public mutation runs to completion or not at all.
//!   - Subsystems execute in registration order, every tick.
//!   - All randomness flows through the RngBank (or an injected source).
//!   - All state changes are recorded in the event log.
//!   - Presentation requests are fire-and-forget.

use crate::{
    bus::{PresentationBus, PresentationRequest, SpawnRequest, TransitionRequest},
    clock::{SimClock, SimSpeed},
    command::{CommandOutcome, OfficeCommand},
    config::OfficeConfig,
    error::SimResult,
    event::OfficeEvent,
    office::Office,
    people::Person,
    rng::{RandomSource, RngBank, StreamSlot, SubsystemRng},
    scoring::{self, AccrualReason},
    snapshot::{DisplayState, OfficeSnapshot},
    store::EventStore,
    subsystem::SimSubsystem,
    transfer_subsystem::TransferSubsystem,
    types::{PersonId, RenderHandle, Tick},
};
use std::sync::mpsc::Receiver;

/// Tint applied to a new hire relative to the department color.
const HIRE_TINT: f32 = 0.9;

pub struct OfficeSim {
    pub clock:     SimClock,
    pub rng_bank:  RngBank,
    config:        OfficeConfig,
    office:        Office,
    subsystems:    Vec<Box<dyn SimSubsystem>>,
    store:         EventStore,
    bus:           PresentationBus,
    identity_rng:  SubsystemRng,
    scatter_rng:   SubsystemRng,
}

impl OfficeSim {
    /// Initialize departments from `config` and register the transfer
    /// timer. An empty or malformed layout is an error; callers treat it
    /// as fatal.
    pub fn new(config: OfficeConfig, seed: u64) -> SimResult<Self> {
        config.validate()?;
        let office = Office::new(&config.departments)?;
        let rng_bank = RngBank::new(seed);

        let mut sim = Self {
            clock:        SimClock::new(config.transfer_interval_ms),
            identity_rng: rng_bank.for_stream(StreamSlot::Identity),
            scatter_rng:  rng_bank.for_stream(StreamSlot::Scatter),
            rng_bank,
            config,
            office,
            subsystems:   Vec::new(),
            store:        EventStore::new(),
            bus:          PresentationBus::new(),
        };
        sim.register(Box::new(TransferSubsystem::new()));

        let departments: Vec<String> = sim.office.registry.names().map(str::to_string).collect();
        log::info!("office: initialized {} departments (seed={seed})", departments.len());
        sim.record("engine", OfficeEvent::DepartmentsInitialized { seed, departments })?;
        Ok(sim)
    }

    /// Register a subsystem. Runs after every subsystem registered before it.
    pub fn register(&mut self, subsystem: Box<dyn SimSubsystem>) {
        self.subsystems.push(subsystem);
    }

    // ── Mutations ──────────────────────────────────────────────

    /// Hire a person into `department`. Accrues the hire score and asks the
    /// presentation layer to spawn a visual near the department's anchor.
    pub fn hire(&mut self, department: &str) -> SimResult<PersonId> {
        let dept = self.office.registry.get(department)?;
        let anchor = dept.anchor();
        let tint = dept.color().scale(HIRE_TINT);
        let tick = self.clock.current_tick;

        let id = PersonId::generate(&mut self.identity_rng);
        self.office
            .people
            .create_person(&mut self.office.registry, department, id, tick)?;
        let amount = self.config.hire_score;
        let new_score = scoring::accrue(&mut self.office.registry, department, i64::from(amount))?;

        let jitter = self.config.spawn_jitter;
        let position = anchor.offset(
            self.scatter_rng.jitter(jitter),
            self.scatter_rng.jitter(jitter),
        );

        log::info!("tick={tick} hire: {} joined {department} (score {new_score})", id.short());
        self.record("engine", OfficeEvent::PersonHired {
            tick,
            person_id: id,
            department: department.to_string(),
            position,
        })?;
        self.record("engine", OfficeEvent::ScoreAccrued {
            tick,
            department: department.to_string(),
            amount: u64::from(amount),
            new_score,
            reason: AccrualReason::Hire,
        })?;
        self.bus.publish(PresentationRequest::Spawn(SpawnRequest {
            person_id: id,
            department: department.to_string(),
            position,
            tint,
        }));
        Ok(id)
    }

    /// Add `amount` to a department's score, e.g. from an action button.
    pub fn boost(&mut self, department: &str, amount: i64) -> SimResult<u64> {
        let new_score = scoring::accrue(&mut self.office.registry, department, amount)?;
        let tick = self.clock.current_tick;
        log::debug!("tick={tick} boost: {department} +{amount} -> {new_score}");
        self.record("engine", OfficeEvent::ScoreAccrued {
            tick,
            department: department.to_string(),
            amount: amount as u64,
            new_score,
            reason: AccrualReason::Boost,
        })?;
        Ok(new_score)
    }

    /// Move a person directly. Returns false if they were already there.
    pub fn reassign(&mut self, person: PersonId, department: &str) -> SimResult<bool> {
        let Some(request) = self.office.reassign(person, department)? else {
            return Ok(false);
        };
        let tick = self.clock.current_tick;
        self.store.append_event(tick, "engine", &OfficeEvent::TransferRequested {
            tick,
            request: request.clone(),
        })?;
        self.bus.publish(PresentationRequest::Transition(request));
        Ok(true)
    }

    pub fn attach_handle(&mut self, person: PersonId, handle: RenderHandle) -> SimResult<()> {
        self.office.people.attach_handle(person, handle)
    }

    pub fn apply(&mut self, command: OfficeCommand) -> SimResult<CommandOutcome> {
        match command {
            OfficeCommand::Hire { department } => {
                self.hire(&department).map(CommandOutcome::Hired)
            }
            OfficeCommand::Boost { department, amount } => {
                self.boost(&department, amount).map(CommandOutcome::Boosted)
            }
            OfficeCommand::Transfer { person_id, department } => {
                self.reassign(person_id, &department).map(CommandOutcome::Transferred)
            }
            OfficeCommand::Pause => {
                self.clock.pause();
                Ok(CommandOutcome::Clock)
            }
            OfficeCommand::Resume => {
                self.clock.resume();
                Ok(CommandOutcome::Clock)
            }
            OfficeCommand::SetSpeed { speed } => {
                self.set_speed(speed);
                Ok(CommandOutcome::Clock)
            }
        }
    }

    // ── Time ───────────────────────────────────────────────────

    /// Run one tick with the engine's own transfer stream.
    pub fn tick(&mut self) -> SimResult<Vec<OfficeEvent>> {
        let next = self.clock.current_tick + 1;
        let mut rng = self.rng_bank.for_stream_at_tick(StreamSlot::Transfer, next);
        self.tick_with(&mut rng)
    }

    /// Run one tick with an injected random source.
    pub fn tick_with(&mut self, rng: &mut dyn RandomSource) -> SimResult<Vec<OfficeEvent>> {
        let current_tick = self.clock.advance();
        let mut tick_events = vec![OfficeEvent::TickStarted { tick: current_tick }];

        for subsystem in &mut self.subsystems {
            let new_events = subsystem.update(current_tick, &mut self.office, rng)?;
            for event in &new_events {
                self.store.append_event(current_tick, subsystem.name(), event)?;
                if let OfficeEvent::TransferRequested { request, .. } = event {
                    self.bus.publish(PresentationRequest::Transition(request.clone()));
                }
            }
            tick_events.extend(new_events);
        }

        tick_events.push(OfficeEvent::TickCompleted { tick: current_tick });
        Ok(tick_events)
    }

    /// Run n ticks back to back. Used for testing and fast-forward.
    pub fn run_ticks(&mut self, n: u64) -> SimResult<()> {
        for _ in 0..n {
            self.tick()?;
        }
        Ok(())
    }

    /// Feed elapsed wall time to the timer and run every tick that became
    /// due. Returns the events of those ticks.
    pub fn advance(&mut self, elapsed_ms: u64) -> SimResult<Vec<OfficeEvent>> {
        let due = self.clock.accumulate(elapsed_ms);
        let mut events = Vec::new();
        for _ in 0..due {
            events.extend(self.tick()?);
        }
        Ok(events)
    }

    pub fn set_speed(&mut self, speed: SimSpeed) {
        self.clock.set_speed(speed);
    }

    /// Teardown: the timer never fires again. Direct calls to `tick` still
    /// work, so tests can keep driving a stopped office.
    pub fn stop(&mut self) -> SimResult<()> {
        if self.clock.stopped {
            return Ok(());
        }
        self.clock.stop();
        let tick = self.clock.current_tick;
        log::info!("tick={tick} office: timer stopped");
        self.record("engine", OfficeEvent::ClockStopped { tick })
    }

    // ── Presentation hooks ─────────────────────────────────────

    pub fn subscribe(&mut self) -> Receiver<PresentationRequest> {
        self.bus.subscribe()
    }

    pub fn on_transition_requested<F>(&mut self, callback: F)
    where
        F: FnMut(&TransitionRequest) + Send + 'static,
    {
        self.bus.on_transition_requested(callback);
    }

    // ── Reads ──────────────────────────────────────────────────

    pub fn display_state(&self, department: &str) -> SimResult<DisplayState> {
        scoring::display_state(&self.office.registry, department)
    }

    pub fn current_score(&self, department: &str) -> SimResult<u64> {
        scoring::current_score(&self.office.registry, department)
    }

    pub fn people_count(&self, department: &str) -> SimResult<usize> {
        scoring::people_count(&self.office.registry, department)
    }

    pub fn snapshot(&self) -> OfficeSnapshot {
        OfficeSnapshot::capture(&self.office.registry, &self.clock, self.office.people.len())
    }

    pub fn people(&self) -> impl Iterator<Item = &Person> + '_ {
        self.office.people.list_all()
    }

    pub fn person(&self, id: PersonId) -> SimResult<&Person> {
        self.office.people.get(id)
    }

    pub fn department_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.office.registry.names()
    }

    pub fn config(&self) -> &OfficeConfig {
        &self.config
    }

    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn event_log(&self) -> &EventStore {
        &self.store
    }

    /// The transfer subsystem's counters.
    pub fn transfer_stats(&self) -> Option<&TransferSubsystem> {
        self.subsystems
            .iter()
            .find_map(|sub| sub.as_any().downcast_ref::<TransferSubsystem>())
    }

    fn record(&mut self, source: &str, event: OfficeEvent) -> SimResult<()> {
        self.store.append_event(self.clock.current_tick, source, &event)
    }
}
