//! Autocomplete setter — the most delicate control.
//!
//! The host input debounces a search as the user types and renders a results
//! panel afterwards. The injection order matters: clear through the native
//! setter so the bound model clears in lock-step, inject the query the way
//! real typing would arrive, nudge key-event-keyed listeners, then give the
//! debounce window and render cycle time to finish before enumerating.

use formdom::{Dom, DomEvent, EventKind, NodeId};
use tm30_protocol::SkipReason;
use tracing::{debug, warn};

use config::Timing;

use crate::{fields::OPTION_SELECTORS, wait};

/// Drive the autocomplete to the option matching `value`.
///
/// Selection policy, in order: case-insensitive prefix match, case-
/// insensitive substring match, first rendered option. Zero rendered options
/// leaves the field unset and reports [`SkipReason::NoOptions`]; the caller
/// continues the sequence regardless.
pub async fn set_autocomplete(
    dom: &dyn Dom,
    node: NodeId,
    value: &str,
    timing: &Timing,
) -> Result<(), SkipReason> {
    dom.focus(node);
    dom.click(node);

    // Clear any prior value with the host's model following along.
    dom.set_value_native(node, "");
    dom.dispatch(node, DomEvent::bubbling(EventKind::Input));

    debug!(value, "typing autocomplete query");
    inject_value(dom, node, value, timing).await;

    // Some hosts ignore synthetic input events for search triggering but
    // react to key activity.
    dom.dispatch(node, DomEvent::bubbling(EventKind::KeyDown("a".into())));

    tokio::time::sleep(timing.autocomplete_settle).await;

    let options = wait::collect_options(dom, OPTION_SELECTORS);
    debug!(options = options.len(), "autocomplete options rendered");
    if options.is_empty() {
        warn!(value, "no autocomplete options appeared");
        return Err(SkipReason::NoOptions);
    }

    let wanted = value.to_lowercase();
    let texts: Vec<String> = options.iter().map(|o| dom.text(*o)).collect();
    let idx = texts
        .iter()
        .position(|t| t.trim().to_lowercase().starts_with(&wanted))
        .or_else(|| texts.iter().position(|t| t.to_lowercase().contains(&wanted)))
        .unwrap_or(0);

    debug!(option = %texts[idx], "clicking autocomplete option");
    dom.click(options[idx]);
    tokio::time::sleep(timing.post_option_click).await;
    dom.dispatch(node, DomEvent::bubbling(EventKind::Blur));
    Ok(())
}

/// Put `value` into the control, mimicking real typing as closely as the
/// environment allows.
async fn inject_value(dom: &dyn Dom, node: NodeId, value: &str, timing: &Timing) {
    match timing.keystroke {
        // Character-by-character for hosts whose search trigger wants
        // discrete keystroke-shaped input events.
        Some(delay) => {
            let mut buf = [0u8; 4];
            for ch in value.chars() {
                let s = ch.encode_utf8(&mut buf);
                if dom.insert_text(node, s).is_err() {
                    let current = dom.value(node);
                    dom.set_value_native(node, &format!("{current}{s}"));
                }
                dom.dispatch(node, DomEvent::bubbling(EventKind::Input));
                tokio::time::sleep(delay).await;
            }
        }
        // Bulk insert first: it routes through the host's native input
        // handling. Unsupported environments get a plain assignment; the
        // behavior is preserved, so no diagnostic.
        None => {
            if dom.insert_text(node, value).is_err() {
                dom.set_value_native(node, value);
            }
            dom.dispatch(node, DomEvent::bubbling(EventKind::Input));
        }
    }
}

#[cfg(test)]
mod tests {
    use formdom::{Element, PanelTrigger, SyntheticDom};

    use super::*;

    fn nationality_dom(countries: &[&str]) -> (SyntheticDom, NodeId) {
        let dom = SyntheticDom::new();
        let root = dom.root();
        let input = dom.append(root, Element::new("input").attr("formcontrolname", "key"));
        let panel = dom.append(root, Element::new("div").class("mat-autocomplete-panel"));
        let mut opts = Vec::new();
        for c in countries {
            let o = dom.append(panel, Element::new("mat-option").text(c).hidden());
            dom.bind_click_value(o, input);
            opts.push(o);
        }
        dom.reveal_on(input, PanelTrigger::Input, opts, 0);
        (dom, input)
    }

    fn fast() -> Timing {
        config::TimingPolicy::Aggressive.timing()
    }

    #[tokio::test]
    async fn prefix_match_beats_substring() {
        let (dom, input) = nationality_dom(&["RUS : RUSSIAN FEDERATION", "AUS : AUSTRALIA"]);
        set_autocomplete(&dom, input, "RUS", &fast())
            .await
            .expect("selects");
        assert_eq!(dom.value(input), "RUS : RUSSIAN FEDERATION");
    }

    #[tokio::test]
    async fn substring_match_when_no_prefix() {
        let (dom, input) = nationality_dom(&["KOR : KOREAN", "GBR : BRITISH"]);
        set_autocomplete(&dom, input, "BRIT", &fast())
            .await
            .expect("selects");
        assert_eq!(dom.value(input), "GBR : BRITISH");
    }

    #[tokio::test]
    async fn first_option_when_nothing_matches() {
        let (dom, input) = nationality_dom(&["KOR : KOREAN", "GBR : BRITISH"]);
        set_autocomplete(&dom, input, "ZZZ", &fast())
            .await
            .expect("selects");
        assert_eq!(dom.value(input), "KOR : KOREAN");
    }

    #[tokio::test]
    async fn zero_options_reports_failure_without_panic() {
        let dom = SyntheticDom::new();
        let root = dom.root();
        let input = dom.append(root, Element::new("input"));
        let got = set_autocomplete(&dom, input, "THA", &fast()).await;
        assert!(matches!(got, Err(SkipReason::NoOptions)));
        assert_eq!(dom.value(input), "");
    }

    #[tokio::test]
    async fn falls_back_when_insert_text_unsupported() {
        let (dom, input) = nationality_dom(&["THA : THAI"]);
        dom.set_insert_text_supported(false);
        set_autocomplete(&dom, input, "THA", &fast())
            .await
            .expect("selects via fallback");
        assert_eq!(dom.value(input), "THA : THAI");
    }

    #[tokio::test]
    async fn per_character_mode_types_the_query() {
        let (dom, input) = nationality_dom(&["THA : THAI"]);
        let timing = fast().with_keystroke(std::time::Duration::from_millis(1));
        set_autocomplete(&dom, input, "THA", &timing)
            .await
            .expect("selects");
        assert_eq!(dom.value(input), "THA : THAI");
        // One input event for the clear, then one per character.
        let inputs = dom
            .events_for(input)
            .into_iter()
            .filter(|e| e.kind == EventKind::Input)
            .count();
        assert_eq!(inputs, 1 + 3);
    }
}
