//! Outbound presentation requests.
//!
//! RULE: The core never waits on the presentation layer. Requests are
//! pushed to every subscriber and forgotten; a person's logical department
//! may change again before the previous walk has finished rendering.

use crate::types::{Anchor, Color, DepartmentName, PersonId, RenderHandle};
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{self, Receiver, Sender};

/// Ask the presentation layer to create a visual for a new hire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnRequest {
    pub person_id: PersonId,
    pub department: DepartmentName,
    /// Anchor plus cosmetic scatter. Not part of the logical model.
    pub position: Anchor,
    pub tint: Color,
}

/// Ask the presentation layer to walk a person between anchors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionRequest {
    pub person_id: PersonId,
    /// Whatever the presentation layer attached; `None` if it never did.
    pub handle: Option<RenderHandle>,
    pub from: DepartmentName,
    pub to: DepartmentName,
    pub from_anchor: Anchor,
    pub to_anchor: Anchor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PresentationRequest {
    Spawn(SpawnRequest),
    Transition(TransitionRequest),
}

type TransitionCallback = Box<dyn FnMut(&TransitionRequest) + Send>;

/// Fan-out of presentation requests to channel subscribers and callbacks.
#[derive(Default)]
pub struct PresentationBus {
    senders: Vec<Sender<PresentationRequest>>,
    transition_callbacks: Vec<TransitionCallback>,
}

impl PresentationBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a channel that receives every request from now on.
    pub fn subscribe(&mut self) -> Receiver<PresentationRequest> {
        let (tx, rx) = mpsc::channel();
        self.senders.push(tx);
        rx
    }

    /// Register a callback invoked for every transition request.
    pub fn on_transition_requested<F>(&mut self, callback: F)
    where
        F: FnMut(&TransitionRequest) + Send + 'static,
    {
        self.transition_callbacks.push(Box::new(callback));
    }

    pub fn publish(&mut self, request: PresentationRequest) {
        if let PresentationRequest::Transition(transition) = &request {
            for callback in &mut self.transition_callbacks {
                callback(transition);
            }
        }
        // Dropped receivers are pruned; nobody is listening there any more.
        self.senders.retain(|tx| tx.send(request.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.senders.len() + self.transition_callbacks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;
    use std::sync::{Arc, Mutex};

    fn transition() -> TransitionRequest {
        TransitionRequest {
            person_id: PersonId::generate(&mut ScriptedRng::new(vec![1, 2])),
            handle: Some(RenderHandle(4)),
            from: "Sales".into(),
            to: "Support".into(),
            from_anchor: Anchor::new(-20.0, 0.0),
            to_anchor: Anchor::new(20.0, 20.0),
        }
    }

    #[test]
    fn every_channel_subscriber_receives_requests() {
        let mut bus = PresentationBus::new();
        let rx_a = bus.subscribe();
        let rx_b = bus.subscribe();
        bus.publish(PresentationRequest::Transition(transition()));
        assert!(matches!(rx_a.try_recv(), Ok(PresentationRequest::Transition(_))));
        assert!(matches!(rx_b.try_recv(), Ok(PresentationRequest::Transition(_))));
    }

    #[test]
    fn dropped_receivers_are_pruned() {
        let mut bus = PresentationBus::new();
        let rx = bus.subscribe();
        drop(rx);
        bus.publish(PresentationRequest::Transition(transition()));
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn callbacks_only_see_transitions() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut bus = PresentationBus::new();
        bus.on_transition_requested(move |t| sink.lock().unwrap().push(t.to.clone()));

        bus.publish(PresentationRequest::Spawn(SpawnRequest {
            person_id: transition().person_id,
            department: "Sales".into(),
            position: Anchor::new(-20.0, 0.0),
            tint: Color::rgb(1, 2, 3),
        }));
        bus.publish(PresentationRequest::Transition(transition()));

        assert_eq!(*seen.lock().unwrap(), vec!["Support".to_string()]);
    }
}
