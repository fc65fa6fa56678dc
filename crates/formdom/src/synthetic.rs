//! Scriptable in-memory document used by tests and the demo harness.
//!
//! Beyond plain tree queries, the synthetic page can imitate the one thing
//! that makes the real host hard to automate: options panels that render
//! asynchronously, some number of polls after a trigger interaction. Every
//! dispatched event is recorded per node so tests can assert on the exact
//! sequence a setter produced.

use parking_lot::Mutex;
use tracing::trace;

use crate::{
    DomEvent, EventKind, NodeId, Unsupported,
    selector::{Compound, Selector},
};

/// Builder for one synthetic element.
#[derive(Debug, Clone, Default)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    classes: Vec<String>,
    text: String,
    hidden: bool,
}

impl Element {
    /// Element with the given tag name.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    /// Add an attribute.
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    /// Add a class.
    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    /// Set the element's own text.
    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// Start hidden; panel rules reveal hidden elements later.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// Which interaction arms a panel rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelTrigger {
    /// Armed by a click on the trigger element.
    Click,
    /// Armed by an input event at the trigger element.
    Input,
}

/// A scripted "panel renders later" behavior: once the trigger interaction
/// happens, the listed nodes become visible after `after_polls` calls to
/// `query_all`.
struct PanelRule {
    trigger: NodeId,
    on: PanelTrigger,
    nodes: Vec<NodeId>,
    after_polls: u32,
    armed: bool,
    polls: u32,
    revealed: bool,
}

struct Node {
    element: Element,
    value: String,
    checked: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

struct Inner {
    nodes: Vec<Node>,
    rules: Vec<PanelRule>,
    /// `(clicked, target)` pairs: clicking `clicked` copies its text into
    /// `target`'s value, the way selecting an option commits it upstream.
    click_bindings: Vec<(NodeId, NodeId)>,
    events: Vec<(NodeId, DomEvent)>,
    insert_text_supported: bool,
}

/// In-memory [`crate::Dom`] implementation.
pub struct SyntheticDom {
    inner: Mutex<Inner>,
}

impl Default for SyntheticDom {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntheticDom {
    /// Empty document with a root element.
    pub fn new() -> Self {
        let root = Node {
            element: Element::new("html"),
            value: String::new(),
            checked: false,
            parent: None,
            children: Vec::new(),
        };
        Self {
            inner: Mutex::new(Inner {
                nodes: vec![root],
                rules: Vec::new(),
                click_bindings: Vec::new(),
                events: Vec::new(),
                insert_text_supported: true,
            }),
        }
    }

    /// The document root.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a child element under `parent`, returning its handle.
    pub fn append(&self, parent: NodeId, element: Element) -> NodeId {
        let mut inner = self.inner.lock();
        let id = NodeId(inner.nodes.len() as u64);
        inner.nodes.push(Node {
            element,
            value: String::new(),
            checked: false,
            parent: Some(parent),
            children: Vec::new(),
        });
        if let Some(p) = inner.nodes.get_mut(parent.0 as usize) {
            p.children.push(id);
        }
        id
    }

    /// Script a panel: once `trigger` sees the given interaction, reveal
    /// `nodes` after `after_polls` calls to `query_all`. Pass 0 to reveal on
    /// the first poll after arming.
    pub fn reveal_on(&self, trigger: NodeId, on: PanelTrigger, nodes: Vec<NodeId>, after_polls: u32) {
        self.inner.lock().rules.push(PanelRule {
            trigger,
            on,
            nodes,
            after_polls,
            armed: false,
            polls: 0,
            revealed: false,
        });
    }

    /// Clicking `clicked` copies its text into `target`'s value.
    pub fn bind_click_value(&self, clicked: NodeId, target: NodeId) {
        self.inner.lock().click_bindings.push((clicked, target));
    }

    /// Toggle availability of the bulk insert-text command.
    pub fn set_insert_text_supported(&self, supported: bool) {
        self.inner.lock().insert_text_supported = supported;
    }

    /// Events dispatched at `node`, oldest first.
    pub fn events_for(&self, node: NodeId) -> Vec<DomEvent> {
        self.inner
            .lock()
            .events
            .iter()
            .filter(|(n, _)| *n == node)
            .map(|(_, e)| e.clone())
            .collect()
    }
}

impl Inner {
    fn matches_compound(&self, id: NodeId, part: &Compound) -> bool {
        let Some(node) = self.nodes.get(id.0 as usize) else {
            return false;
        };
        let el = &node.element;
        if let Some(tag) = &part.tag
            && el.tag != *tag
        {
            return false;
        }
        if !part.classes.iter().all(|c| el.classes.contains(c)) {
            return false;
        }
        part.attrs
            .iter()
            .all(|(k, v)| el.attrs.iter().any(|(ak, av)| ak == k && av == v))
    }

    /// Right-to-left descendant matching.
    fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        let Some((last, rest)) = selector.parts.split_last() else {
            return false;
        };
        if !self.matches_compound(id, last) {
            return false;
        }
        let mut cursor = self.nodes[id.0 as usize].parent;
        for part in rest.iter().rev() {
            let mut found = false;
            while let Some(anc) = cursor {
                cursor = self.nodes[anc.0 as usize].parent;
                if self.matches_compound(anc, part) {
                    found = true;
                    break;
                }
            }
            if !found {
                return false;
            }
        }
        true
    }

    /// Preorder walk of visible elements under `root` (exclusive).
    fn visible_descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[root.0 as usize]
            .children
            .iter()
            .rev()
            .copied()
            .collect();
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0 as usize];
            if !node.element.hidden {
                out.push(id);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    fn select_from(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        let Some(sel) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.visible_descendants(root)
            .into_iter()
            .filter(|id| self.matches(*id, &sel))
            .collect()
    }

    /// Advance armed panel rules by one poll, revealing due panels.
    fn tick_rules(&mut self) {
        let mut due: Vec<NodeId> = Vec::new();
        for rule in &mut self.rules {
            if !rule.armed || rule.revealed {
                continue;
            }
            if rule.polls >= rule.after_polls {
                rule.revealed = true;
                due.extend(rule.nodes.iter().copied());
            } else {
                rule.polls += 1;
            }
        }
        for id in due {
            if let Some(node) = self.nodes.get_mut(id.0 as usize) {
                node.element.hidden = false;
            }
        }
    }

    fn arm_rules(&mut self, node: NodeId, kind: &EventKind) {
        let on = match kind {
            EventKind::Click => PanelTrigger::Click,
            EventKind::Input => PanelTrigger::Input,
            _ => return,
        };
        for rule in &mut self.rules {
            if rule.trigger == node && rule.on == on {
                rule.armed = true;
            }
        }
    }

    fn gather_text(&self, id: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            let node = &self.nodes[cur.0 as usize];
            if !node.element.text.is_empty() {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(&node.element.text);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }
}

impl crate::Dom for SyntheticDom {
    fn query(&self, selector: &str) -> Option<NodeId> {
        let inner = self.inner.lock();
        inner.select_from(self.root(), selector).first().copied()
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        let mut inner = self.inner.lock();
        inner.tick_rules();
        inner.select_from(self.root(), selector)
    }

    fn query_within(&self, root: NodeId, selector: &str) -> Option<NodeId> {
        let inner = self.inner.lock();
        inner.select_from(root, selector).first().copied()
    }

    fn text(&self, node: NodeId) -> String {
        self.inner.lock().gather_text(node)
    }

    fn value(&self, node: NodeId) -> String {
        self.inner
            .lock()
            .nodes
            .get(node.0 as usize)
            .map(|n| n.value.clone())
            .unwrap_or_default()
    }

    fn set_value_native(&self, node: NodeId, value: &str) {
        if let Some(n) = self.inner.lock().nodes.get_mut(node.0 as usize) {
            n.value = value.to_string();
        }
    }

    fn dispatch(&self, node: NodeId, event: DomEvent) {
        let mut inner = self.inner.lock();
        trace!(node = node.0, kind = ?event.kind, "dispatch");
        inner.arm_rules(node, &event.kind);
        if event.kind == EventKind::Click {
            // Radio inputs check themselves on click.
            if let Some(n) = inner.nodes.get_mut(node.0 as usize) {
                let is_radio = n.element.tag == "input"
                    && n.element
                        .attrs
                        .iter()
                        .any(|(k, v)| k == "type" && v == "radio");
                if is_radio {
                    n.checked = true;
                }
            }
            let bindings: Vec<NodeId> = inner
                .click_bindings
                .iter()
                .filter(|(c, _)| *c == node)
                .map(|(_, t)| *t)
                .collect();
            for target in bindings {
                let text = inner.gather_text(node);
                if let Some(t) = inner.nodes.get_mut(target.0 as usize) {
                    t.value = text;
                }
            }
            // Selecting an option closes its panel: hide the whole rule set
            // and disarm so a later trigger can reopen it.
            let mut to_hide: Vec<NodeId> = Vec::new();
            for rule in &mut inner.rules {
                if rule.revealed && rule.nodes.contains(&node) {
                    rule.revealed = false;
                    rule.armed = false;
                    rule.polls = 0;
                    to_hide.extend(rule.nodes.iter().copied());
                }
            }
            for id in to_hide {
                if let Some(n) = inner.nodes.get_mut(id.0 as usize) {
                    n.element.hidden = true;
                }
            }
        }
        inner.events.push((node, event));
    }

    fn click(&self, node: NodeId) {
        self.dispatch(node, DomEvent::bubbling(EventKind::Click));
    }

    fn focus(&self, node: NodeId) {
        self.dispatch(
            node,
            DomEvent {
                kind: EventKind::Focus,
                bubbles: false,
            },
        );
    }

    fn insert_text(&self, node: NodeId, text: &str) -> Result<(), Unsupported> {
        let mut inner = self.inner.lock();
        if !inner.insert_text_supported {
            return Err(Unsupported);
        }
        if let Some(n) = inner.nodes.get_mut(node.0 as usize) {
            n.value.push_str(text);
        }
        Ok(())
    }

    fn is_checked(&self, node: NodeId) -> bool {
        self.inner
            .lock()
            .nodes
            .get(node.0 as usize)
            .is_some_and(|n| n.checked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dom;

    #[test]
    fn query_is_document_order() {
        let dom = SyntheticDom::new();
        let root = dom.root();
        let a = dom.append(root, Element::new("input").attr("formcontrolname", "x"));
        let _b = dom.append(root, Element::new("input").attr("formcontrolname", "x"));
        assert_eq!(dom.query(r#"input[formcontrolname="x"]"#), Some(a));
    }

    #[test]
    fn descendant_selector_requires_ancestor() {
        let dom = SyntheticDom::new();
        let root = dom.root();
        let cont = dom.append(root, Element::new("div").class("style-list-address-cont"));
        let inside = dom.append(cont, Element::new("mat-radio-button"));
        let _outside = dom.append(root, Element::new("mat-radio-button"));
        assert_eq!(
            dom.query(".style-list-address-cont mat-radio-button"),
            Some(inside)
        );
    }

    #[test]
    fn hidden_elements_do_not_match_until_revealed() {
        let dom = SyntheticDom::new();
        let root = dom.root();
        let trigger = dom.append(root, Element::new("mat-select"));
        let opt = dom.append(root, Element::new("mat-option").text("Male").hidden());
        dom.reveal_on(trigger, PanelTrigger::Click, vec![opt], 2);

        assert!(dom.query_all("mat-option").is_empty());
        dom.click(trigger);
        // Two empty polls, then the panel renders.
        assert!(dom.query_all("mat-option").is_empty());
        assert!(dom.query_all("mat-option").is_empty());
        assert_eq!(dom.query_all("mat-option"), vec![opt]);
    }

    #[test]
    fn click_binding_commits_option_text() {
        let dom = SyntheticDom::new();
        let root = dom.root();
        let input = dom.append(root, Element::new("input"));
        let opt = dom.append(root, Element::new("mat-option").text("THA : THAI"));
        dom.bind_click_value(opt, input);
        dom.click(opt);
        assert_eq!(dom.value(input), "THA : THAI");
    }

    #[test]
    fn radio_checks_on_click() {
        let dom = SyntheticDom::new();
        let root = dom.root();
        let radio = dom.append(root, Element::new("input").attr("type", "radio"));
        assert!(!dom.is_checked(radio));
        dom.click(radio);
        assert!(dom.is_checked(radio));
    }

    #[test]
    fn insert_text_appends_or_reports_unsupported() {
        let dom = SyntheticDom::new();
        let root = dom.root();
        let input = dom.append(root, Element::new("input"));
        dom.insert_text(input, "TH").expect("supported");
        dom.insert_text(input, "A").expect("supported");
        assert_eq!(dom.value(input), "THA");
        dom.set_insert_text_supported(false);
        assert!(dom.insert_text(input, "x").is_err());
    }
}
