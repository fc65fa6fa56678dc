//! Channel aliases wiring the commander to the engine.
//!
//! The command channel carries one-shot fill requests; the ack travels back
//! on a oneshot slot inside the request so the sender learns about delivery
//! without waiting on completion. Completion is observable separately on the
//! event channel.

use tokio::sync::{mpsc, oneshot};

use crate::{Ack, EngineEvent, Person};

/// A fill command in flight: the full profile plus the ack slot.
#[derive(Debug)]
pub struct FillRequest {
    /// Profile to drive into the form.
    pub person: Person,
    /// Acknowledged synchronously on receipt, before any DOM work starts.
    pub ack: oneshot::Sender<Ack>,
}

impl FillRequest {
    /// Package a profile with a fresh ack slot, returning the receiver half.
    pub fn new(person: Person) -> (Self, oneshot::Receiver<Ack>) {
        let (tx, rx) = oneshot::channel();
        (Self { person, ack: tx }, rx)
    }
}

/// Sender half of the command channel.
pub type CommandTx = mpsc::UnboundedSender<FillRequest>;
/// Receiver half of the command channel.
pub type CommandRx = mpsc::UnboundedReceiver<FillRequest>;

/// Create the command channel (sender, receiver).
pub fn command_channel() -> (CommandTx, CommandRx) {
    mpsc::unbounded_channel()
}

/// Sender half of the engine event stream.
pub type EventTx = mpsc::UnboundedSender<EngineEvent>;
/// Receiver half of the engine event stream.
pub type EventRx = mpsc::UnboundedReceiver<EngineEvent>;

/// Create the engine event channel (sender, receiver).
pub fn event_channel() -> (EventTx, EventRx) {
    mpsc::unbounded_channel()
}
