//! Address radio selection.
//!
//! Selecting the address can trigger the appearance and layout of other
//! fields, which is why the orchestrator runs this step first.

use config::Timing;
use formdom::{Dom, DomEvent, EventKind, NodeId};
use tracing::debug;

/// Click the address radio through its whole chain: the custom element, the
/// inner label, and the native input (with a `change` so delegation-based
/// listeners notice). The host form has been observed to need all three.
pub async fn select_radio(dom: &dyn Dom, radio: NodeId, timing: &Timing) {
    debug!(node = radio.0, "clicking address radio");
    dom.click(radio);

    if let Some(label) = dom.query_within(radio, "label") {
        dom.click(label);
    }
    if let Some(input) = dom.query_within(radio, r#"input[type="radio"]"#) {
        dom.click(input);
        dom.dispatch(input, DomEvent::bubbling(EventKind::Change));
    }

    tokio::time::sleep(timing.post_address).await;
}

#[cfg(test)]
mod tests {
    use formdom::{Element, SyntheticDom};

    use super::*;

    fn fast() -> Timing {
        config::TimingPolicy::Aggressive.timing()
    }

    #[tokio::test]
    async fn clicks_radio_label_and_native_input() {
        let dom = SyntheticDom::new();
        let root = dom.root();
        let radio = dom.append(
            root,
            Element::new("mat-radio-button").attr("sit-element", "address-radio"),
        );
        let _label = dom.append(radio, Element::new("label").text("Home"));
        let input = dom.append(radio, Element::new("input").attr("type", "radio"));

        select_radio(&dom, radio, &fast()).await;
        assert!(dom.is_checked(input));
        let kinds: Vec<EventKind> = dom.events_for(input).into_iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EventKind::Click, EventKind::Change]);
    }

    #[tokio::test]
    async fn bare_radio_without_children_still_selects() {
        let dom = SyntheticDom::new();
        let root = dom.root();
        let radio = dom.append(root, Element::new("mat-radio-button"));
        select_radio(&dom, radio, &fast()).await;
        assert!(!dom.events_for(radio).is_empty());
    }
}
