//! A synthetic rendition of the TM30 guest form, faithful enough to exercise
//! every control kind the engine knows: the address radio chain, plain text
//! inputs, the gender select with a late-rendering panel, and the
//! nationality autocomplete.

use std::sync::Arc;

use crate::{Element, NodeId, PanelTrigger, SyntheticDom};

/// Country options offered by the synthetic nationality autocomplete.
const COUNTRIES: &[&str] = &[
    "AUS : AUSTRALIA",
    "FRA : FRENCH",
    "GBR : BRITISH",
    "RUS : RUSSIAN FEDERATION",
    "THA : THAI",
    "USA : AMERICAN",
];

/// Handles into the synthetic TM30 page.
pub struct Tm30Page {
    /// The page itself.
    pub dom: Arc<SyntheticDom>,
    /// The native radio input inside the address radio button.
    pub address_input: NodeId,
    /// The gender `mat-select` control.
    pub gender: NodeId,
    /// The nationality autocomplete input.
    pub nationality: NodeId,
}

impl Tm30Page {
    /// Value of the text input bound to `formcontrolname`, for assertions.
    pub fn control_value(&self, control_name: &str) -> String {
        use crate::Dom;
        let sel = format!(r#"input[formcontrolname="{control_name}"]"#);
        self.dom
            .query(&sel)
            .map(|n| self.dom.value(n))
            .unwrap_or_default()
    }
}

/// Build the synthetic page.
///
/// - gender options render one poll after the select is clicked;
/// - nationality options render on the first poll after an input event at
///   the autocomplete, and selecting one closes the panel;
/// - text inputs use the modern `familyName` control name.
pub fn tm30_page() -> Tm30Page {
    let dom = SyntheticDom::new();
    let root = dom.root();

    let addr_cont = dom.append(root, Element::new("div").class("style-list-address-cont"));
    let radio = dom.append(
        addr_cont,
        Element::new("mat-radio-button").attr("sit-element", "address-radio"),
    );
    let _label = dom.append(radio, Element::new("label").text("My residence"));
    let address_input = dom.append(radio, Element::new("input").attr("type", "radio"));

    for name in [
        "firstName",
        "familyName",
        "passportNo",
        "dayOfBirth",
        "monthOfBirth",
        "yearOfBirth",
        "phoneNo",
    ] {
        dom.append(root, Element::new("input").attr("formcontrolname", name));
    }

    let gender = dom.append(
        root,
        Element::new("mat-select").attr("formcontrolname", "genderCode"),
    );
    let mut gender_opts = Vec::new();
    for label in ["Male", "Female"] {
        let opt = dom.append(root, Element::new("mat-option").text(label).hidden());
        dom.bind_click_value(opt, gender);
        gender_opts.push(opt);
    }
    dom.reveal_on(gender, PanelTrigger::Click, gender_opts, 1);

    let nationality = dom.append(root, Element::new("input").attr("formcontrolname", "key"));
    let panel = dom.append(root, Element::new("div").class("mat-autocomplete-panel"));
    let mut country_opts = Vec::new();
    for label in COUNTRIES {
        let opt = dom.append(panel, Element::new("mat-option").text(label).hidden());
        dom.bind_click_value(opt, nationality);
        country_opts.push(opt);
    }
    dom.reveal_on(nationality, PanelTrigger::Input, country_opts, 0);

    Tm30Page {
        dom: Arc::new(dom),
        address_input,
        gender,
        nationality,
    }
}
