//! Fan-out of view-state snapshots to display surfaces.

use std::sync::mpsc;

use crate::state::display::ViewState;

/// Sends a clone of every published snapshot to each subscriber.
///
/// Subscribers whose receiver has been dropped are forgotten on the next
/// publish.
#[derive(Default)]
pub struct SnapshotBroadcaster {
    subscribers: Vec<mpsc::Sender<ViewState>>,
}

impl SnapshotBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> mpsc::Receiver<ViewState> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn publish(&mut self, snapshot: &ViewState) {
        self.subscribers
            .retain(|subscriber| subscriber.send(snapshot.clone()).is_ok());
    }

    #[cfg(test)]
    fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::City;
    use chrono::Local;

    #[test]
    fn test_every_subscriber_receives_snapshot() {
        let mut broadcaster = SnapshotBroadcaster::new();
        let a = broadcaster.subscribe();
        let b = broadcaster.subscribe();

        let snapshot = ViewState::compute(&Local::now(), City::Oulu, true);
        broadcaster.publish(&snapshot);

        assert_eq!(a.try_recv().unwrap().selected_city, City::Oulu);
        assert_eq!(b.try_recv().unwrap().selected_city, City::Oulu);
    }

    #[test]
    fn test_dropped_subscribers_are_removed() {
        let mut broadcaster = SnapshotBroadcaster::new();
        let kept = broadcaster.subscribe();
        drop(broadcaster.subscribe());
        assert_eq!(broadcaster.subscriber_count(), 2);

        broadcaster.publish(&ViewState::compute(&Local::now(), City::Helsinki, false));

        assert_eq!(broadcaster.subscriber_count(), 1);
        assert!(kept.try_recv().is_ok());
    }
}
