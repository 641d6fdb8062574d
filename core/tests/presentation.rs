//! The presentation-facing surface: spawn and transition requests.

use office_core::{
    bus::PresentationRequest,
    config::OfficeConfig,
    rng::ScriptedRng,
    types::RenderHandle,
    OfficeSim,
};
use std::sync::{Arc, Mutex};

fn build() -> OfficeSim {
    let _ = env_logger::builder().is_test(true).try_init();
    OfficeSim::new(OfficeConfig::default_office(), 3).expect("build office")
}

#[test]
fn callback_receives_person_and_both_anchors() {
    let mut sim = build();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    sim.on_transition_requested(move |t| {
        sink.lock().unwrap().push((t.person_id, t.from_anchor, t.to_anchor));
    });

    let p = sim.hire("Sales").unwrap();
    sim.tick_with(&mut ScriptedRng::picks(&[0, 1])).unwrap(); // -> Delivery

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (id, from, to) = seen[0];
    assert_eq!(id, p);
    assert_eq!((from.x, from.z), (-20.0, 0.0));
    assert_eq!((to.x, to.z), (0.0, 20.0));
}

#[test]
fn logical_state_does_not_wait_for_walks() {
    let mut sim = build();
    let rx = sim.subscribe();
    let p = sim.hire("Sales").unwrap();
    sim.attach_handle(p, RenderHandle(1)).unwrap();

    // Two moves in a row, no walk ever "completes".
    sim.tick_with(&mut ScriptedRng::picks(&[0, 0])).unwrap(); // -> Marketing
    sim.tick_with(&mut ScriptedRng::picks(&[0, 0])).unwrap(); // -> Sales

    let requests: Vec<_> = rx.try_iter().collect();
    assert!(matches!(requests[0], PresentationRequest::Spawn(_)));
    let moves: Vec<_> = requests
        .iter()
        .filter_map(|r| match r {
            PresentationRequest::Transition(t) => Some((t.from.as_str(), t.to.as_str())),
            _ => None,
        })
        .collect();
    assert_eq!(moves, [("Sales", "Marketing"), ("Marketing", "Sales")]);
    assert_eq!(sim.person(p).unwrap().department, "Sales");
}

#[test]
fn transition_carries_the_attached_handle() {
    let mut sim = build();
    let rx = sim.subscribe();
    let p = sim.hire("Sales").unwrap();
    sim.tick_with(&mut ScriptedRng::picks(&[0, 0])).unwrap();
    sim.attach_handle(p, RenderHandle(7)).unwrap();
    sim.tick_with(&mut ScriptedRng::picks(&[0, 0])).unwrap();

    let handles: Vec<_> = rx
        .try_iter()
        .filter_map(|r| match r {
            PresentationRequest::Transition(t) => Some(t.handle),
            _ => None,
        })
        .collect();
    assert_eq!(handles, [None, Some(RenderHandle(7))]);
}
