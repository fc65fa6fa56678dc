//! Custom dropdown setter.

use config::Timing;
use formdom::{Dom, NodeId};
use tm30_protocol::SkipReason;
use tracing::{debug, warn};

use crate::{fields::OPTION_SELECTORS, wait};

/// Choose an option from a custom (non-native) dropdown.
///
/// Opens the panel with a click, polls for rendered options under the
/// configured deadline, then matches the wanted value case-insensitively as
/// a substring; when nothing matches, an option containing any entry of the
/// fixed fallback vocabulary is taken instead.
pub async fn set_select(
    dom: &dyn Dom,
    node: NodeId,
    value: &str,
    fallback_vocab: &[&str],
    timing: &Timing,
) -> Result<(), SkipReason> {
    dom.click(node);

    let options = match wait::await_options(
        dom,
        OPTION_SELECTORS,
        "select options",
        timing.poll_timeout,
        timing.poll_interval,
    )
    .await
    {
        Ok(options) => options,
        Err(err) => {
            warn!(%err, "select panel never rendered");
            return Err(SkipReason::NoOptions);
        }
    };

    let wanted = value.to_lowercase();
    let texts: Vec<String> = options.iter().map(|o| dom.text(*o)).collect();
    let chosen = texts
        .iter()
        .position(|t| t.to_lowercase().contains(&wanted))
        .or_else(|| {
            texts
                .iter()
                .position(|t| fallback_vocab.iter().any(|v| t.contains(v)))
        });

    match chosen {
        Some(idx) => {
            debug!(option = %texts[idx], "selecting option");
            dom.click(options[idx]);
            Ok(())
        }
        None => {
            warn!(value, options = options.len(), "no select option matched");
            Err(SkipReason::NoMatch)
        }
    }
}

#[cfg(test)]
mod tests {
    use formdom::{Element, PanelTrigger, SyntheticDom};

    use super::*;

    fn gender_dom(labels: &[&str]) -> (SyntheticDom, NodeId, Vec<NodeId>) {
        let dom = SyntheticDom::new();
        let root = dom.root();
        let select = dom.append(
            root,
            Element::new("mat-select").attr("formcontrolname", "genderCode"),
        );
        let mut opts = Vec::new();
        for label in labels {
            let o = dom.append(root, Element::new("mat-option").text(label).hidden());
            dom.bind_click_value(o, select);
            opts.push(o);
        }
        dom.reveal_on(select, PanelTrigger::Click, opts.clone(), 1);
        (dom, select, opts)
    }

    fn fast() -> Timing {
        config::TimingPolicy::Aggressive.timing()
    }

    #[tokio::test]
    async fn picks_case_insensitive_substring_match() {
        let (dom, select, _) = gender_dom(&["Male", "Female"]);
        set_select(&dom, select, "male", &[], &fast())
            .await
            .expect("match");
        assert_eq!(dom.value(select), "Male");
    }

    #[tokio::test]
    async fn falls_back_to_fixed_vocabulary() {
        let (dom, select, _) = gender_dom(&["Male", "Female"]);
        set_select(&dom, select, "X", &["Male", "Female"], &fast())
            .await
            .expect("vocab fallback");
        assert_eq!(dom.value(select), "Male");
    }

    #[tokio::test]
    async fn empty_panel_reports_no_options() {
        let dom = SyntheticDom::new();
        let root = dom.root();
        let select = dom.append(root, Element::new("mat-select"));
        let got = set_select(&dom, select, "Male", &[], &fast()).await;
        assert!(matches!(got, Err(SkipReason::NoOptions)));
    }
}
