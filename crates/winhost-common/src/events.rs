use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::types::TeardownTrigger;

/// Notifications an embedding session publishes to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum EmbedEvent {
    /// The child process owns a window that now lives under the host.
    /// Fired at most once per session.
    HostProcessStarted { pid: u32 },
    LaunchFailed { reason: String },
    Disposed { trigger: TeardownTrigger },
    #[serde(other)]
    Unknown,
}

pub struct EventBus {
    sender: broadcast::Sender<EmbedEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EmbedEvent> {
        self.sender.subscribe()
    }

    /// Publish an event, returning the number of receivers it reached.
    pub fn publish(&self, event: EmbedEvent) -> usize {
        match self.sender.send(event) {
            Ok(count) => count,
            Err(broadcast::error::SendError(event)) => {
                tracing::trace!(?event, "no subscribers for embed event");
                0
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(EmbedEvent::HostProcessStarted { pid: 42 });

        let event = rx.recv().await.unwrap();
        assert_eq!(event, EmbedEvent::HostProcessStarted { pid: 42 });
    }

    #[tokio::test]
    async fn multiple_subscribers() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(EmbedEvent::Disposed {
            trigger: TeardownTrigger::ApplicationExit,
        });

        let e1 = rx1.recv().await.unwrap();
        let e2 = rx2.recv().await.unwrap();
        assert!(matches!(e1, EmbedEvent::Disposed { .. }));
        assert!(matches!(e2, EmbedEvent::Disposed { .. }));
    }

    #[test]
    fn try_recv_from_sync_code() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(EmbedEvent::LaunchFailed {
            reason: "launch failed: not found".into(),
        });

        let event = rx.try_recv().unwrap();
        assert!(matches!(event, EmbedEvent::LaunchFailed { ref reason } if reason.contains("not found")));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn publish_returns_zero_with_no_subscribers() {
        let bus = EventBus::new(16);
        let count = bus.publish(EmbedEvent::HostProcessStarted { pid: 1 });
        assert_eq!(count, 0);
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let json = serde_json::to_string(&EmbedEvent::HostProcessStarted { pid: 7 }).unwrap();
        assert_eq!(json, r#"{"type":"HostProcessStarted","data":{"pid":7}}"#);
    }

    #[test]
    fn unknown_event_deserializes() {
        let json = r#"{"type":"SomethingNew","data":null}"#;
        let event: EmbedEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event, EmbedEvent::Unknown);
    }
}
