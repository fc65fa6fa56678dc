//! The host page as an externally-owned resource.
//!
//! The fill engine never owns the document it mutates; it gets a handle to
//! something that answers selector queries, accepts synthetic events, and
//! exposes the un-overridden value setter. [`Dom`] is that seam. The only
//! in-tree implementation is [`SyntheticDom`], a scriptable in-memory tree
//! used by tests and the demo harness; a real page backend plugs in behind
//! the same trait.
//!
//! All trait methods are synchronous. The timing games the host framework
//! forces on us (settle delays, option polling) belong to the engine, not
//! to the resource.

mod fixtures;
mod selector;
mod synthetic;

pub use fixtures::{Tm30Page, tm30_page};
pub use synthetic::{Element, PanelTrigger, SyntheticDom};

/// Handle to one element inside a [`Dom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// Kind of synthetic event dispatched at an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// `input` — reactive frameworks listen to this for two-way binding.
    Input,
    /// `change`.
    Change,
    /// `blur` — finalizes the host's validation state.
    Blur,
    /// `click`.
    Click,
    /// `focus`.
    Focus,
    /// `keydown` with the given key; nudges key-event-keyed search triggers.
    KeyDown(String),
}

/// A synthetic event. `bubbles` must be set for ancestor delegation to see
/// the event, which is how the host framework observes our writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEvent {
    /// What kind of event this is.
    pub kind: EventKind,
    /// Whether the event propagates to ancestors.
    pub bubbles: bool,
}

impl DomEvent {
    /// A bubbling event of the given kind.
    pub fn bubbling(kind: EventKind) -> Self {
        Self {
            kind,
            bubbles: true,
        }
    }
}

/// The bulk text-insertion command is not available in this execution
/// environment; callers fall back to direct value assignment.
#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("insert-text command unsupported")]
pub struct Unsupported;

/// An externally-owned, asynchronously-mutating document tree.
///
/// Implementations must treat every method as best-effort against a tree
/// they do not control: a `NodeId` may have gone stale, in which case the
/// operation is a no-op.
pub trait Dom: Send + Sync {
    /// First element matching `selector`, in document order.
    fn query(&self, selector: &str) -> Option<NodeId>;

    /// All elements matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<NodeId>;

    /// First descendant of `root` matching `selector`.
    fn query_within(&self, root: NodeId, selector: &str) -> Option<NodeId>;

    /// Visible text of the element.
    fn text(&self, node: NodeId) -> String;

    /// Current control value.
    fn value(&self, node: NodeId) -> String;

    /// Write the control value through the original, un-overridden setter so
    /// the host framework's wrapped accessor never intercepts it. Elements
    /// without a value slot take the write as a plain assignment; this never
    /// fails.
    fn set_value_native(&self, node: NodeId, value: &str);

    /// Dispatch a synthetic event at the element.
    fn dispatch(&self, node: NodeId, event: DomEvent);

    /// Click the element (dispatches a bubbling `click`).
    fn click(&self, node: NodeId);

    /// Focus the element.
    fn focus(&self, node: NodeId);

    /// Bulk "insert text" editing command, the closest mimic of real typing.
    fn insert_text(&self, node: NodeId, text: &str) -> Result<(), Unsupported>;

    /// Whether a radio/checkbox control is checked.
    fn is_checked(&self, node: NodeId) -> bool;
}
