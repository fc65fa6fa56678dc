//! Shared types for the tm30fill workspace.
//!
//! Defines the traveler profile record ([`Person`]), the one-shot fill
//! command exchanged between the commander and the engine, and the event
//! stream the engine emits while a fill runs. Field names serialize in
//! camelCase so records round-trip with exports from the original browser
//! extension.

use serde::{Deserialize, Serialize};

pub mod ipc;

/// Opaque, time-derived profile identifier. Assigned once at creation and
/// immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub u64);

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Binary gender code carried by the host form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    /// Serialized as `"M"`.
    M,
    /// Serialized as `"F"`.
    F,
}

impl Gender {
    /// Display label matching the host form's select options.
    pub fn label(self) -> &'static str {
        match self {
            Self::M => "Male",
            Self::F => "Female",
        }
    }

    /// Parse from the stored one-letter code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "M" | "m" => Some(Self::M),
            "F" | "f" => Some(Self::F),
            _ => None,
        }
    }
}

/// A traveler profile. Everything except `id` is freely editable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Stable identifier; `PersonId(0)` on records not yet persisted.
    pub id: PersonId,
    pub first_name: String,
    pub last_name: String,
    pub passport_no: String,
    /// Display string, e.g. `"RUS : RUSSIAN FEDERATION"`.
    pub nationality: String,
    /// Canonical 3-letter code, e.g. `"RUS"`. May be empty on legacy records.
    #[serde(default)]
    pub nationality_code: String,
    pub gender: Gender,
    /// `DD/MM/YYYY`.
    pub birth_date: String,
    #[serde(default)]
    pub phone_no: String,
    /// Optional stay dates; present only on form variants that ask for them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out: Option<String>,
}

impl Person {
    /// Split the birth date into `(day, month, year)` components.
    ///
    /// Returns `None` when the string does not have three `/`-separated
    /// parts; content validation is [`validate_birth_date`]'s job.
    pub fn birth_parts(&self) -> Option<(&str, &str, &str)> {
        let mut it = self.birth_date.split('/');
        match (it.next(), it.next(), it.next(), it.next()) {
            (Some(d), Some(m), Some(y), None) => Some((d, m, y)),
            _ => None,
        }
    }

    /// Value the engine types into the nationality autocomplete: the
    /// canonical code when present, else the display string.
    pub fn nationality_query(&self) -> &str {
        if self.nationality_code.is_empty() {
            &self.nationality
        } else {
            &self.nationality_code
        }
    }
}

/// Current calendar year (UTC), from the system clock. The upper bound for
/// [`validate_birth_date`].
pub fn current_year() -> u32 {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    // Civil-from-days (Howard Hinnant's algorithm), year component only.
    let z = (secs / 86_400) as i64 + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    (if month <= 2 { y + 1 } else { y }) as u32
}

/// Check a birth date for the `DD/MM/YYYY` shape with plausible ranges.
pub fn validate_birth_date(date: &str, current_year: u32) -> bool {
    let parts: Vec<&str> = date.split('/').collect();
    let [d, m, y] = parts.as_slice() else {
        return false;
    };
    if d.len() != 2 || m.len() != 2 || y.len() != 4 {
        return false;
    }
    let (Ok(day), Ok(month), Ok(year)) = (d.parse::<u32>(), m.parse::<u32>(), y.parse::<u32>())
    else {
        return false;
    };
    (1..=31).contains(&day) && (1..=12).contains(&month) && year > 1900 && year <= current_year
}

/// Synchronous acknowledgement returned the moment the engine accepts a fill
/// command. Does not imply the fill has completed, or ever will.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ack {
    /// Command accepted; the fill proceeds in the background.
    Received,
}

/// Why a field was left unset during a fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Every candidate selector missed.
    NotFound,
    /// The control was found but no options rendered before the deadline.
    NoOptions,
    /// Options rendered but none matched the wanted value or its fallback
    /// vocabulary.
    NoMatch,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "no matching element"),
            Self::NoOptions => write!(f, "no options rendered"),
            Self::NoMatch => write!(f, "no option matched"),
        }
    }
}

/// Outcome of one fill run. Purely observational: the engine reports
/// completion regardless of how many fields were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillReport {
    /// Logical field names that were driven to a value.
    pub filled: Vec<String>,
    /// Fields left for the operator to finish by hand.
    pub skipped: Vec<(String, SkipReason)>,
}

impl FillReport {
    /// Record a successfully driven field.
    pub fn mark_filled(&mut self, field: &str) {
        self.filled.push(field.to_string());
    }

    /// Record a field left unset.
    pub fn mark_skipped(&mut self, field: &str, reason: SkipReason) {
        self.skipped.push((field.to_string(), reason));
    }
}

/// Events the engine emits while serving fill commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EngineEvent {
    /// A fill sequence began for the given profile.
    FillStarted(PersonId),
    /// A field was skipped mid-sequence.
    FieldSkipped {
        /// Logical field name from the mapping table.
        field: String,
        /// Why it was skipped.
        reason: SkipReason,
    },
    /// The state machine reached `Done`.
    FillCompleted(FillReport),
}
