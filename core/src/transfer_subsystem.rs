//! Department transfers — one random move per tick.
//!
//! Each tick: pick a person uniformly at random, pick a destination
//! uniformly from every *other* department (configuration order), move
//! them. Excluding the current department here is what guarantees the
//! destination differs from the origin.
//!
//! A tick that hits an inconsistency is aborted and logged; it never
//! takes the timer down with it.

use crate::{
    bus::TransitionRequest,
    error::{SimError, SimResult},
    event::OfficeEvent,
    office::Office,
    rng::RandomSource,
    subsystem::SimSubsystem,
    types::Tick,
};

#[derive(Debug, Default)]
pub struct TransferSubsystem {
    pub transfers_requested: u64,
    pub ticks_aborted: u64,
}

impl TransferSubsystem {
    pub fn new() -> Self {
        Self::default()
    }

    fn select_and_move(
        &self,
        office: &mut Office,
        rng: &mut dyn RandomSource,
    ) -> SimResult<Option<TransitionRequest>> {
        let n = office.people.len() as u64;
        let pick = rng.next_u64_below(n) as usize;
        let person = office
            .people
            .nth(pick)
            .ok_or_else(|| SimError::person_not_found(format!("#{pick}")))?;
        let id = person.id;
        let current = person.department.clone();

        let candidates: Vec<String> = office
            .registry
            .names()
            .filter(|name| *name != current)
            .map(str::to_string)
            .collect();
        if candidates.is_empty() {
            return Ok(None);
        }
        let dest = &candidates[rng.next_u64_below(candidates.len() as u64) as usize];

        office.reassign(id, dest)
    }
}

impl SimSubsystem for TransferSubsystem {
    fn name(&self) -> &'static str { "transfer" }

    fn update(
        &mut self,
        tick: Tick,
        office: &mut Office,
        rng: &mut dyn RandomSource,
    ) -> SimResult<Vec<OfficeEvent>> {
        if office.people.is_empty() {
            return Ok(vec![]);
        }

        match self.select_and_move(office, rng) {
            Ok(Some(request)) => {
                self.transfers_requested += 1;
                log::debug!(
                    "tick={tick} transfer: {} {} -> {}",
                    request.person_id.short(),
                    request.from,
                    request.to
                );
                Ok(vec![OfficeEvent::TransferRequested { tick, request }])
            }
            Ok(None) => {
                log::debug!("tick={tick} transfer: no other department to move to");
                Ok(vec![])
            }
            Err(e) => {
                self.ticks_aborted += 1;
                log::warn!("tick={tick} transfer: aborted: {e}");
                Ok(vec![OfficeEvent::TransferAborted { tick, reason: e.to_string() }])
            }
        }
    }

    fn as_any(&self) -> &dyn std::any::Any { self }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{DepartmentConfig, OfficeConfig},
        registry::DepartmentRegistry,
        rng::{RngBank, ScriptedRng, StreamSlot},
        types::{Color, PersonId},
    };

    fn layout(names: &[&str]) -> Vec<DepartmentConfig> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| DepartmentConfig::new(n, i as f32 * 10.0, 0.0, Color::rgb(0, 0, 0)))
            .collect()
    }

    fn office_with(names: &[&str]) -> Office {
        Office::new(&layout(names)).unwrap()
    }

    fn hire(office: &mut Office, dept: &str, seed: u64) -> PersonId {
        let id = PersonId::generate(&mut ScriptedRng::new(vec![seed, seed + 1]));
        office.people.create_person(&mut office.registry, dept, id, 0).unwrap();
        id
    }

    #[test]
    fn empty_office_tick_is_a_no_op() {
        let mut office = office_with(&["A", "B"]);
        let mut sub = TransferSubsystem::new();
        let mut rng = ScriptedRng::picks(&[0, 0]);
        let events = sub.update(1, &mut office, &mut rng).unwrap();
        assert!(events.is_empty());
        assert_eq!(rng.draws(), 0, "no draws should be made on an empty office");
    }

    #[test]
    fn scripted_choice_moves_to_first_other_department() {
        let mut office = office_with(&["A", "B", "C"]);
        let p = hire(&mut office, "B", 1);
        let mut sub = TransferSubsystem::new();

        // person 0, candidate 0 of [A, C]
        let events = sub.update(1, &mut office, &mut ScriptedRng::picks(&[0, 0])).unwrap();

        match events.as_slice() {
            [OfficeEvent::TransferRequested { request, .. }] => {
                assert_eq!(request.person_id, p);
                assert_eq!(request.from, "B");
                assert_eq!(request.to, "A");
            }
            other => panic!("unexpected events: {other:?}"),
        }
        assert_eq!(sub.transfers_requested, 1);
    }

    #[test]
    fn destination_never_equals_origin() {
        let mut office = office_with(&["A", "B", "C", "D"]);
        for seed in 0..5 {
            hire(&mut office, "A", seed * 10);
        }
        let bank = RngBank::new(2024);
        let mut sub = TransferSubsystem::new();
        for tick in 1..=200 {
            let mut rng = bank.for_stream_at_tick(StreamSlot::Transfer, tick);
            for event in sub.update(tick, &mut office, &mut rng).unwrap() {
                if let OfficeEvent::TransferRequested { request, .. } = event {
                    assert_ne!(request.from, request.to, "tick {tick} moved in place");
                }
            }
        }
        assert_eq!(sub.transfers_requested, 200);
        let total: usize = office.registry.iter().map(|d| d.people_count()).sum();
        assert_eq!(total, 5, "transfers must conserve head count");
    }

    #[test]
    fn single_department_office_never_moves_anyone() {
        let mut office = office_with(&["Solo"]);
        hire(&mut office, "Solo", 1);
        let mut sub = TransferSubsystem::new();
        let events = sub.update(1, &mut office, &mut ScriptedRng::picks(&[0])).unwrap();
        assert!(events.is_empty());
        assert_eq!(office.registry.get("Solo").unwrap().people_count(), 1);
    }

    #[test]
    fn stock_office_offers_five_candidates() {
        let config = OfficeConfig::default_office();
        let mut office = Office::new(&config.departments).unwrap();
        hire(&mut office, "Sales", 1);
        let mut sub = TransferSubsystem::new();
        // candidate 4 of [Marketing, Delivery, Support, Customers, Management]
        let events = sub.update(1, &mut office, &mut ScriptedRng::picks(&[0, 4])).unwrap();
        let OfficeEvent::TransferRequested { request, .. } = &events[0] else {
            panic!("expected a transfer, got {events:?}");
        };
        assert_eq!(request.to, "Management");
    }

    #[test]
    fn inconsistent_office_aborts_tick_without_failing() {
        let names = ["Sales", "Support"];
        let mut office = office_with(&names);
        let p = hire(&mut office, "Sales", 1);
        // Registry no longer lists the person under Sales.
        office.registry = DepartmentRegistry::initialize(&layout(&names)).unwrap();
        let mut sub = TransferSubsystem::new();

        let events = sub.update(1, &mut office, &mut ScriptedRng::picks(&[0, 0])).unwrap();
        match events.as_slice() {
            [OfficeEvent::TransferAborted { tick, reason }] => {
                assert_eq!(*tick, 1);
                assert!(reason.contains("Sales"), "reason was {reason:?}");
            }
            other => panic!("expected an aborted tick, got {other:?}"),
        }
        assert_eq!(sub.ticks_aborted, 1);
        assert_eq!(sub.transfers_requested, 0);
        assert_eq!(office.people.get(p).unwrap().department, "Sales");
        assert_eq!(office.registry.get("Support").unwrap().people_count(), 0);

        // The next tick still runs.
        let events = sub.update(2, &mut office, &mut ScriptedRng::picks(&[0, 0])).unwrap();
        assert!(matches!(events.as_slice(), [OfficeEvent::TransferAborted { tick: 2, .. }]));
        assert_eq!(sub.ticks_aborted, 2);
    }
}
