//! Discrete gameplay events for presentation and audio collaborators.

use serde::{Deserialize, Serialize};

/// What cost the actor a life.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitCause {
    Enemy,
    Hazard,
    Fall,
}

/// Engine-facing event. Emitted at most once per occurrence, in frame order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    CoinCollected { score: i32 },
    Jump,
    Landed,
    Hit { cause: HitCause, health: u8 },
    LevelUp { level: u32 },
    HealthDepleted { score: i32 },
    GameOver { score: i32 },
    TimeExpired,
}

/// Optional callback for game events.
pub type EventCallback = Box<dyn Fn(&GameEvent) + Send + Sync>;

/// Ordered queue of events between the simulation and its observers.
///
/// Callbacks fire as events are published; the queue keeps them until drained.
pub struct EventBus {
    sender: crossbeam_channel::Sender<GameEvent>,
    receiver: crossbeam_channel::Receiver<GameEvent>,
    callbacks: Vec<EventCallback>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        Self {
            sender,
            receiver,
            callbacks: Vec::new(),
        }
    }

    pub fn on_event<F>(&mut self, callback: F)
    where
        F: Fn(&GameEvent) + Send + Sync + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    pub fn publish(&self, event: GameEvent) {
        for cb in &self.callbacks {
            cb(&event);
        }
        // The bus owns the receiver, so the channel cannot be disconnected here.
        if self.sender.send(event).is_err() {
            log::warn!("event bus disconnected, dropped {event:?}");
        }
    }

    pub fn publish_all(&self, events: impl IntoIterator<Item = GameEvent>) {
        for event in events {
            self.publish(event);
        }
    }

    /// Drain events published since the last drain.
    pub fn drain(&self) -> Vec<GameEvent> {
        self.receiver.try_iter().collect()
    }

    /// Number of events waiting to be drained.
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn drain_preserves_order_and_empties_queue() {
        let bus = EventBus::new();
        bus.publish(GameEvent::Jump);
        bus.publish(GameEvent::CoinCollected { score: 1 });
        assert_eq!(bus.pending(), 2);

        assert_eq!(
            bus.drain(),
            vec![GameEvent::Jump, GameEvent::CoinCollected { score: 1 }]
        );
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn callbacks_see_every_event() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);

        let mut bus = EventBus::new();
        bus.on_event(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        bus.publish_all([GameEvent::Jump, GameEvent::Landed, GameEvent::TimeExpired]);

        assert_eq!(seen.load(Ordering::SeqCst), 3);
    }
}
