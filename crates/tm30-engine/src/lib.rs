//! tm30fill engine
//!
//! The engine receives one-shot fill commands and drives a third-party,
//! asynchronously-mutating form into the values of a traveler profile:
//! - resolves each logical field through ordered selector fallbacks
//! - writes values with the minimum native-event sequence the host
//!   framework's two-way binding needs to observe the change
//! - cooperates with asynchronous option panels via bounded polling and
//!   settle delays taken from a configurable timing table
//!
//! Every step is best-effort: a missing field or empty panel is logged,
//! reported, and skipped; the sequence always runs to completion. Partial
//! fills are acceptable outcomes for a human to finish manually.

use std::sync::Arc;

use config::Timing;
use formdom::Dom;
use tm30_protocol::{
    Ack, EngineEvent, FillReport, Person, SkipReason,
    ipc::{CommandRx, EventTx},
};
use tracing::{debug, info, warn};

mod address;
mod autocomplete;
mod fields;
mod resolve;
mod select;
mod text;
mod wait;

pub use fields::{ControlKind, FieldSpec, GENDER_VOCAB, OPTION_SELECTORS, TextField, text_fields};
pub use resolve::resolve;
pub use wait::WaitError;

/// Phases of one fill sequence. Strictly sequential and one-directional:
/// no revisits, no rollback, and `Done` is reached unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FillState {
    Idle,
    AddressSelecting,
    TextFieldsFilling,
    GenderSelecting,
    NationalitySelecting,
    Done,
}

impl std::fmt::Display for FillState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Idle => "Idle",
            Self::AddressSelecting => "AddressSelecting",
            Self::TextFieldsFilling => "TextFieldsFilling",
            Self::GenderSelecting => "GenderSelecting",
            Self::NationalitySelecting => "NationalitySelecting",
            Self::Done => "Done",
        };
        f.write_str(name)
    }
}

/// The fill engine: one DOM handle, one timing table, one event stream.
///
/// The document is an externally-owned resource the engine reads and
/// mutates for the duration of a sequence; it is never locked, and there is
/// exactly one sequence in flight at a time by construction.
#[derive(Clone)]
pub struct Engine {
    dom: Arc<dyn Dom>,
    timing: Timing,
    events: EventTx,
}

impl Engine {
    /// Create an engine over the given document handle.
    pub fn new(dom: Arc<dyn Dom>, timing: Timing, events: EventTx) -> Self {
        Self {
            dom,
            timing,
            events,
        }
    }

    /// Consume fill commands until the channel closes.
    ///
    /// Each command is acknowledged synchronously on receipt — before any
    /// DOM work — and then filled to completion before the next command is
    /// taken, so overlapping commands queue instead of interleaving.
    pub async fn serve(self, mut rx: CommandRx) {
        while let Some(req) = rx.recv().await {
            let _ = req.ack.send(Ack::Received);
            let report = self.fill(&req.person).await;
            info!(
                filled = report.filled.len(),
                skipped = report.skipped.len(),
                "fill sequence complete"
            );
            let _ = self.events.send(EngineEvent::FillCompleted(report));
        }
        debug!("command channel closed, engine stopping");
    }

    /// Run one fill sequence for `person`, returning the report.
    pub async fn fill(&self, person: &Person) -> FillReport {
        let timing = &self.timing;
        let mut report = FillReport::default();
        let mut state = FillState::Idle;
        info!(id = %person.id, first_name = %person.first_name, "starting fill sequence");
        let _ = self.events.send(EngineEvent::FillStarted(person.id));

        // Address first: selecting it can reflow the rest of the form.
        self.advance(&mut state, FillState::AddressSelecting);
        tokio::time::sleep(timing.pre_address).await;
        self.drive(&fields::ADDRESS, "", &mut report).await;

        self.advance(&mut state, FillState::TextFieldsFilling);
        for field in fields::text_fields(person) {
            self.drive(&field.spec, &field.value, &mut report).await;
            tokio::time::sleep(timing.between_text).await;
        }

        self.advance(&mut state, FillState::GenderSelecting);
        tokio::time::sleep(timing.before_gender).await;
        self.drive(&fields::GENDER, person.gender.label(), &mut report)
            .await;

        // Nationality last: the slowest, most failure-prone step should not
        // delay the simpler fields.
        self.advance(&mut state, FillState::NationalitySelecting);
        tokio::time::sleep(timing.before_nationality).await;
        self.drive(&fields::NATIONALITY, person.nationality_query(), &mut report)
            .await;

        self.advance(&mut state, FillState::Done);
        report
    }

    /// Resolve one mapping entry and run the setter its control kind calls
    /// for. The radio chain ignores `value`; every other kind drives the
    /// control toward it.
    async fn drive(&self, spec: &FieldSpec, value: &str, report: &mut FillReport) {
        let dom = self.dom.as_ref();
        let Some(node) = resolve::resolve(dom, spec.selectors) else {
            self.skip(report, spec.name, SkipReason::NotFound);
            return;
        };
        let outcome = match spec.kind {
            ControlKind::Radio => {
                address::select_radio(dom, node, &self.timing).await;
                Ok(())
            }
            ControlKind::Text => {
                text::set_text(dom, node, value);
                Ok(())
            }
            ControlKind::Select { fallback_vocab } => {
                select::set_select(dom, node, value, fallback_vocab, &self.timing).await
            }
            ControlKind::Autocomplete => {
                autocomplete::set_autocomplete(dom, node, value, &self.timing).await
            }
        };
        match outcome {
            Ok(()) => report.mark_filled(spec.name),
            Err(reason) => self.skip(report, spec.name, reason),
        }
    }

    /// Log and apply a state transition.
    fn advance(&self, state: &mut FillState, next: FillState) {
        debug!(from = %state, to = %next, "state transition");
        *state = next;
    }

    /// Record a skipped field and surface it on the event stream.
    fn skip(&self, report: &mut FillReport, field: &str, reason: SkipReason) {
        warn!(field, %reason, "field skipped");
        report.mark_skipped(field, reason);
        let _ = self.events.send(EngineEvent::FieldSkipped {
            field: field.to_string(),
            reason,
        });
    }
}
