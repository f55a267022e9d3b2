use crate::session::{DeliveryError, SessionRegistry};
use beacon_core::{SessionId, SignalMessage};
use tracing::{debug, error, warn};

/// Best-effort, fire-and-forget sends through the session registry.
///
/// Nothing here retries or reports back to the caller: a target that is
/// gone, closed, or failing just does not get the frame.
#[derive(Clone)]
pub struct Delivery {
    sessions: SessionRegistry,
}

impl Delivery {
    pub fn new(sessions: SessionRegistry) -> Self {
        Self { sessions }
    }

    pub fn deliver(&self, target_id: &SessionId, message: &SignalMessage) {
        if let Err(e) = self.try_deliver(target_id, message) {
            report(target_id, e);
        }
    }

    /// Sends one message to every recipient, encoding it once.
    pub fn fan_out<'a, I>(&self, recipients: I, message: &SignalMessage)
    where
        I: IntoIterator<Item = &'a SessionId>,
    {
        let json = match message.to_json() {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize {} message: {}", message.kind, e);
                return;
            }
        };

        for target_id in recipients {
            if let Err(e) = self.try_deliver_text(target_id, json.clone()) {
                report(target_id, e);
            }
        }
    }

    fn try_deliver(
        &self,
        target_id: &SessionId,
        message: &SignalMessage,
    ) -> Result<(), DeliveryError> {
        let json = message.to_json()?;
        self.try_deliver_text(target_id, json)
    }

    fn try_deliver_text(&self, target_id: &SessionId, json: String) -> Result<(), DeliveryError> {
        let handle = self
            .sessions
            .lookup(target_id)
            .ok_or(DeliveryError::NotConnected)?;

        if !handle.is_open() {
            return Err(DeliveryError::Closed);
        }

        handle.send_text(json)?;
        debug!("Delivered message to session {}", target_id);
        Ok(())
    }
}

fn report(target_id: &SessionId, e: DeliveryError) {
    match e {
        DeliveryError::NotConnected | DeliveryError::Closed => {
            warn!("Dropping message for session {}: {}", target_id, e)
        }
        e => error!("Failed to send message to session {}: {}", target_id, e),
    }
}
