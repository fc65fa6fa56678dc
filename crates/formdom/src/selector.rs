//! A small CSS selector subset: tag names, `.class`, `[attr="value"]`, and
//! the descendant combinator. That is everything the field mapping table
//! uses; anything fancier is a parse failure, which matches nothing.

/// One compound selector: `tag.class[attr="v"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Compound {
    /// Required tag name, if any.
    pub tag: Option<String>,
    /// Required classes.
    pub classes: Vec<String>,
    /// Required attribute equalities.
    pub attrs: Vec<(String, String)>,
}

/// A full selector: compounds joined by descendant combinators, matched
/// right to left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Selector {
    /// Compound parts, leftmost first.
    pub parts: Vec<Compound>,
}

impl Selector {
    /// Parse a selector string. `None` on empty or malformed input.
    pub fn parse(input: &str) -> Option<Self> {
        let mut parts = Vec::new();
        for piece in input.split_whitespace() {
            parts.push(parse_compound(piece)?);
        }
        if parts.is_empty() { None } else { Some(Self { parts }) }
    }
}

/// Parse one compound selector.
fn parse_compound(piece: &str) -> Option<Compound> {
    let mut out = Compound::default();
    let mut rest = piece;

    // Leading tag name runs until the first `.` or `[`.
    let tag_end = rest.find(['.', '[']).unwrap_or(rest.len());
    if tag_end > 0 {
        out.tag = Some(rest[..tag_end].to_string());
        rest = &rest[tag_end..];
    }

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix('.') {
            let end = after.find(['.', '[']).unwrap_or(after.len());
            if end == 0 {
                return None;
            }
            out.classes.push(after[..end].to_string());
            rest = &after[end..];
        } else if let Some(after) = rest.strip_prefix('[') {
            let close = after.find(']')?;
            let body = &after[..close];
            let (name, value) = body.split_once('=')?;
            let value = value.strip_prefix('"')?.strip_suffix('"')?;
            out.attrs.push((name.to_string(), value.to_string()));
            rest = &after[close + 1..];
        } else {
            return None;
        }
    }

    if out.tag.is_none() && out.classes.is_empty() && out.attrs.is_empty() {
        None
    } else {
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tag_with_attr() {
        let s = Selector::parse(r#"input[formcontrolname="firstName"]"#).expect("parse");
        assert_eq!(s.parts.len(), 1);
        let p = &s.parts[0];
        assert_eq!(p.tag.as_deref(), Some("input"));
        assert_eq!(
            p.attrs,
            vec![("formcontrolname".to_string(), "firstName".to_string())]
        );
    }

    #[test]
    fn parses_descendant_chain() {
        let s = Selector::parse(".style-list-address-cont mat-radio-button").expect("parse");
        assert_eq!(s.parts.len(), 2);
        assert_eq!(s.parts[0].classes, vec!["style-list-address-cont"]);
        assert_eq!(s.parts[1].tag.as_deref(), Some("mat-radio-button"));
    }

    #[test]
    fn parses_class_panel_selector() {
        let s = Selector::parse(".mat-autocomplete-panel mat-option").expect("parse");
        assert_eq!(s.parts.len(), 2);
    }

    #[test]
    fn rejects_garbage() {
        assert!(Selector::parse("").is_none());
        assert!(Selector::parse("input[unclosed").is_none());
        assert!(Selector::parse("input[novalue]").is_none());
    }
}
