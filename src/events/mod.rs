use crate::domain::entities::WaitlistStatus;
use tokio::sync::broadcast;

/// System events emitted by the booking and waitlist flows. Subscribers
/// (operator tooling, notification senders) attach via [`EventBus::subscribe`].
#[derive(Debug, Clone)]
pub enum SystemEvent {
    ReservationCreated {
        reservation_id: String,
        tenant_id: String,
        resource_id: Option<String>,
        start_date: String,
        end_date: String,
        timestamp: String, // ISO 8601
    },
    ReservationCancelled {
        reservation_id: String,
        tenant_id: String,
        resource_id: Option<String>,
        service_id: String,
        start_date: String,
        end_date: String,
        timestamp: String, // ISO 8601
    },
    WaitlistJoined {
        entry_id: String,
        tenant_id: String,
        service_id: String,
        priority: i64,
        timestamp: String, // ISO 8601
    },
    WaitlistStatusChanged {
        entry_id: String,
        tenant_id: String,
        service_id: String,
        old_status: WaitlistStatus,
        new_status: WaitlistStatus,
        timestamp: String, // ISO 8601
        reason: String, // "promotion", "hold_expired", "confirmed", "cancelled"
    },
}

/// Event bus for publishing and subscribing to system events
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<SystemEvent>,
}

impl EventBus {
    /// Create a new event bus with specified capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish an event to all subscribers (non-blocking, fire-and-forget)
    pub fn publish(&self, event: SystemEvent) {
        // Fire-and-forget - if no subscribers or channel full, just log and continue
        if let Err(e) = self.tx.send(event) {
            tracing::debug!("No subscribers for event: {}", e);
        }
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> broadcast::Receiver<SystemEvent> {
        self.tx.subscribe()
    }
}
