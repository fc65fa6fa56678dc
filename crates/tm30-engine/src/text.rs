//! Plain text input setter.

use formdom::{Dom, DomEvent, EventKind, NodeId};

/// Write `value` so the host's reactive binding observes it as typed input.
///
/// Direct property assignment is invisible to frameworks that wrap the value
/// accessor, so the write goes through the un-overridden native setter and
/// is followed by bubbling `input`, `change`, `blur` — the delegation events
/// reactive frameworks key on. Idempotent; never fails.
pub fn set_text(dom: &dyn Dom, node: NodeId, value: &str) {
    dom.set_value_native(node, value);
    dom.dispatch(node, DomEvent::bubbling(EventKind::Input));
    dom.dispatch(node, DomEvent::bubbling(EventKind::Change));
    dom.dispatch(node, DomEvent::bubbling(EventKind::Blur));
}

#[cfg(test)]
mod tests {
    use formdom::{Element, SyntheticDom};

    use super::*;

    fn input() -> (SyntheticDom, NodeId) {
        let dom = SyntheticDom::new();
        let root = dom.root();
        let node = dom.append(root, Element::new("input").attr("formcontrolname", "firstName"));
        (dom, node)
    }

    #[test]
    fn dispatches_input_change_blur_in_order() {
        let (dom, node) = input();
        set_text(&dom, node, "Somchai");
        assert_eq!(dom.value(node), "Somchai");
        let kinds: Vec<EventKind> = dom.events_for(node).into_iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![EventKind::Input, EventKind::Change, EventKind::Blur]
        );
        assert!(dom.events_for(node).iter().all(|e| e.bubbles));
    }

    #[test]
    fn idempotent_for_equal_values() {
        let (dom, node) = input();
        set_text(&dom, node, "Somchai");
        set_text(&dom, node, "Somchai");
        assert_eq!(dom.value(node), "Somchai");
        // A repeat write re-dispatches the same event set; the final DOM
        // state does not compound.
        let kinds: Vec<EventKind> = dom.events_for(node).into_iter().map(|e| e.kind).collect();
        assert_eq!(
            &kinds[kinds.len() - 3..],
            &[EventKind::Input, EventKind::Change, EventKind::Blur]
        );
    }

    #[test]
    fn tolerates_value_less_elements() {
        let dom = SyntheticDom::new();
        let root = dom.root();
        let div = dom.append(root, Element::new("div"));
        // Must not panic; falls through to plain assignment.
        set_text(&dom, div, "x");
        assert_eq!(dom.value(div), "x");
    }
}
