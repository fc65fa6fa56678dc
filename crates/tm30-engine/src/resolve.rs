//! Ordered-fallback field resolution.

use formdom::{Dom, NodeId};
use tracing::trace;

/// Return the first element matched by the candidate selectors, tried
/// strictly in order. A total miss is `None`, never an error: callers skip
/// the field and keep the overall fill going.
pub fn resolve(dom: &dyn Dom, selectors: &[&str]) -> Option<NodeId> {
    for sel in selectors {
        if let Some(node) = dom.query(sel) {
            trace!(selector = sel, node = node.0, "resolved");
            return Some(node);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use formdom::{Element, SyntheticDom};

    use super::*;

    #[test]
    fn earlier_selector_wins_when_both_match() {
        let dom = SyntheticDom::new();
        let root = dom.root();
        let b = dom.append(root, Element::new("input").attr("formcontrolname", "lastName"));
        let a = dom.append(root, Element::new("input").attr("formcontrolname", "familyName"));
        // `a` sits later in document order but its selector comes first.
        let got = resolve(
            &dom,
            &[
                r#"input[formcontrolname="familyName"]"#,
                r#"input[formcontrolname="lastName"]"#,
            ],
        );
        assert_eq!(got, Some(a));
        assert_ne!(got, Some(b));
    }

    #[test]
    fn total_miss_is_none() {
        let dom = SyntheticDom::new();
        assert_eq!(resolve(&dom, &[r#"input[formcontrolname="nope"]"#]), None);
    }
}
