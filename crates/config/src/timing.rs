//! Per-step wait durations for the fill sequence.
//!
//! Both policies drive the identical orchestrator; they differ only in
//! these constants. The conservative table carries the delays observed to
//! work on slow client hardware; the aggressive table is tuned to the
//! shortest waits that still let the host framework's change detection run.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Named timing policy, selectable from settings or the CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimingPolicy {
    /// Fixed, generous delays between every step.
    #[default]
    Conservative,
    /// No inter-field delay for independent text fields; minimal waits
    /// before steps that depend on prior DOM effects.
    Aggressive,
}

impl TimingPolicy {
    /// Materialize the duration table for this policy.
    pub fn timing(self) -> Timing {
        match self {
            Self::Conservative => Timing::conservative(),
            Self::Aggressive => Timing::aggressive(),
        }
    }
}

/// The full duration table consumed by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Before touching the address radio.
    pub pre_address: Duration,
    /// After the address radio chain, letting the form reflow.
    pub post_address: Duration,
    /// Between independent text fields.
    pub between_text: Duration,
    /// Before opening the gender select.
    pub before_gender: Duration,
    /// Interval between option-presence polls.
    pub poll_interval: Duration,
    /// Deadline for an options panel to render before the field is skipped.
    pub poll_timeout: Duration,
    /// Before starting the nationality autocomplete (the slowest step).
    pub before_nationality: Duration,
    /// Settle window covering the host's debounce plus search round-trip.
    pub autocomplete_settle: Duration,
    /// After clicking an option, before blurring the control.
    pub post_option_click: Duration,
    /// When set, the autocomplete value is typed character by character with
    /// this inter-character delay instead of one bulk insert.
    pub keystroke: Option<Duration>,
}

impl Timing {
    /// Delays tolerant of slow hardware and network-backed rendering.
    pub const fn conservative() -> Self {
        Self {
            pre_address: Duration::from_millis(300),
            post_address: Duration::from_millis(300),
            between_text: Duration::from_millis(100),
            before_gender: Duration::from_millis(300),
            poll_interval: Duration::from_millis(50),
            poll_timeout: Duration::from_millis(600),
            before_nationality: Duration::from_millis(800),
            autocomplete_settle: Duration::from_millis(1500),
            post_option_click: Duration::from_millis(200),
            keystroke: None,
        }
    }

    /// The shortest waits that still let change detection run.
    pub const fn aggressive() -> Self {
        Self {
            pre_address: Duration::from_millis(20),
            post_address: Duration::from_millis(30),
            between_text: Duration::ZERO,
            before_gender: Duration::from_millis(30),
            poll_interval: Duration::from_millis(10),
            poll_timeout: Duration::from_millis(150),
            before_nationality: Duration::from_millis(50),
            autocomplete_settle: Duration::from_millis(200),
            post_option_click: Duration::from_millis(30),
            keystroke: None,
        }
    }

    /// Switch the autocomplete to per-character injection.
    pub const fn with_keystroke(mut self, delay: Duration) -> Self {
        self.keystroke = Some(delay);
        self
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::conservative()
    }
}
