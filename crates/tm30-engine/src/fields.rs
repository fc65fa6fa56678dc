//! The field mapping table for the TM30 guest form.
//!
//! One entry per logical field: selector fallbacks ordered most-preferred
//! first, and the control kind the orchestrator dispatches on. Supporting a
//! new host-form revision means adding a selector string here, never
//! touching orchestration code.

use tm30_protocol::Person;

/// How a mapped control is driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Plain text input: native setter plus input/change/blur.
    Text,
    /// Radio button chain (outer custom element, inner label and input).
    Radio,
    /// Custom dropdown whose options panel renders asynchronously.
    Select {
        /// Fixed vocabulary tried when no option matches the wanted value.
        fallback_vocab: &'static [&'static str],
    },
    /// Debounced search input with a results panel.
    Autocomplete,
}

/// One logical field of the target form.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Human-readable name used in logs and reports.
    pub name: &'static str,
    /// Candidate selectors, most specific/modern first.
    pub selectors: &'static [&'static str],
    /// Control kind.
    pub kind: ControlKind,
}

/// The address radio, with fallbacks from the tagged element down to "any
/// radio on the page".
pub const ADDRESS: FieldSpec = FieldSpec {
    name: "Address",
    selectors: &[
        r#"mat-radio-button[sit-element="address-radio"]"#,
        ".style-list-address-cont mat-radio-button",
        "mat-radio-button",
    ],
    kind: ControlKind::Radio,
};

/// Fixed vocabulary tried when the gender panel matches nothing directly.
pub const GENDER_VOCAB: &[&str] = &["Male", "Female"];

/// The gender dropdown.
pub const GENDER: FieldSpec = FieldSpec {
    name: "Gender",
    selectors: &[r#"mat-select[formcontrolname="genderCode"]"#],
    kind: ControlKind::Select {
        fallback_vocab: GENDER_VOCAB,
    },
};

/// The nationality autocomplete.
pub const NATIONALITY: FieldSpec = FieldSpec {
    name: "Nationality",
    selectors: &[r#"input[formcontrolname="key"]"#],
    kind: ControlKind::Autocomplete,
};

/// Where rendered options appear, across observed host-form revisions.
pub const OPTION_SELECTORS: &[&str] = &["mat-option", ".mat-autocomplete-panel mat-option"];

/// A text field paired with the profile value bound to it.
#[derive(Debug, Clone)]
pub struct TextField {
    /// Mapping entry.
    pub spec: FieldSpec,
    /// Value to drive into the control.
    pub value: String,
}

/// Static specs for the plain text fields.
const FIRST_NAME: FieldSpec = text_spec("First Name", &[r#"input[formcontrolname="firstName"]"#]);
const LAST_NAME: FieldSpec = text_spec(
    "Last Name",
    &[
        r#"input[formcontrolname="familyName"]"#,
        r#"input[formcontrolname="lastName"]"#,
    ],
);
const PASSPORT_NO: FieldSpec =
    text_spec("Passport No.", &[r#"input[formcontrolname="passportNo"]"#]);
const BIRTH_DAY: FieldSpec = text_spec("Birth Day", &[r#"input[formcontrolname="dayOfBirth"]"#]);
const BIRTH_MONTH: FieldSpec =
    text_spec("Birth Month", &[r#"input[formcontrolname="monthOfBirth"]"#]);
const BIRTH_YEAR: FieldSpec = text_spec("Birth Year", &[r#"input[formcontrolname="yearOfBirth"]"#]);
const PHONE_NO: FieldSpec = text_spec("Phone No.", &[r#"input[formcontrolname="phoneNo"]"#]);
const CHECK_IN: FieldSpec = text_spec(
    "Check-in Date",
    &[
        r#"input[formcontrolname="checkInDate"]"#,
        r#"input[formcontrolname="checkIn"]"#,
    ],
);
const CHECK_OUT: FieldSpec = text_spec(
    "Check-out Date",
    &[
        r#"input[formcontrolname="checkOutDate"]"#,
        r#"input[formcontrolname="checkOut"]"#,
    ],
);

/// Shorthand for a plain text mapping entry.
const fn text_spec(name: &'static str, selectors: &'static [&'static str]) -> FieldSpec {
    FieldSpec {
        name,
        selectors,
        kind: ControlKind::Text,
    }
}

/// The ordered text fields for one profile, birth date already split into
/// its three sub-fields. Stay dates appear only when the profile has them.
pub fn text_fields(person: &Person) -> Vec<TextField> {
    let (day, month, year) = person.birth_parts().unwrap_or(("", "", ""));
    let mut fields = vec![
        bind(FIRST_NAME, &person.first_name),
        bind(LAST_NAME, &person.last_name),
        bind(PASSPORT_NO, &person.passport_no),
        bind(BIRTH_DAY, day),
        bind(BIRTH_MONTH, month),
        bind(BIRTH_YEAR, year),
        bind(PHONE_NO, &person.phone_no),
    ];
    if let Some(check_in) = &person.check_in {
        fields.push(bind(CHECK_IN, check_in));
    }
    if let Some(check_out) = &person.check_out {
        fields.push(bind(CHECK_OUT, check_out));
    }
    fields
}

/// Pair a spec with its value.
fn bind(spec: FieldSpec, value: &str) -> TextField {
    TextField {
        spec,
        value: value.to_string(),
    }
}
