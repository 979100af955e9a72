//! Heterogeneous store event: numeric reading or categorical system state

use super::roundtrip_timestamp;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Event record as it appears on the wire.
///
/// Every field except the timestamp is optional: the store serves two schema
/// variants for the same kind of stream (quality flags required in one,
/// optional in the other), and non-verbose responses drop null-valued fields
/// entirely. Both variants deserialize into this one shape; [`Event`] is
/// produced from it by boundary validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WireEvent {
    pub timestamp: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_questionable: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_substituted: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_annotated: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_state_code: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digital_state_name: Option<String>,
}

/// Quality flags attached to every event. Absent on the wire means `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QualityFlags {
    pub questionable: bool,
    pub substituted: bool,
    pub annotated: bool,
}

/// A validated observation at a point in time.
///
/// Exactly one of the two representations holds: a numeric reading, or a
/// named system condition (e.g. a sensor fault) standing in for one. The
/// split is enforced at deserialization time by [`Event::try_from`].
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A numeric reading
    Numeric {
        timestamp: DateTime<Utc>,
        value: f64,
        flags: QualityFlags,
    },

    /// A categorical system condition in place of a reading
    SystemState {
        timestamp: DateTime<Utc>,
        code: i32,
        name: String,
        flags: QualityFlags,
    },
}

impl Event {
    /// Timestamp of the observation, the total-order key within a stream
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Event::Numeric { timestamp, .. } | Event::SystemState { timestamp, .. } => *timestamp,
        }
    }

    /// Numeric reading, if this event carries one
    pub fn value(&self) -> Option<f64> {
        match self {
            Event::Numeric { value, .. } => Some(*value),
            Event::SystemState { .. } => None,
        }
    }

    /// Quality flags
    pub fn flags(&self) -> QualityFlags {
        match self {
            Event::Numeric { flags, .. } | Event::SystemState { flags, .. } => *flags,
        }
    }
}

impl TryFrom<WireEvent> for Event {
    type Error = Error;

    fn try_from(wire: WireEvent) -> Result<Self> {
        let flags = QualityFlags {
            questionable: wire.is_questionable.unwrap_or(false),
            substituted: wire.is_substituted.unwrap_or(false),
            annotated: wire.is_annotated.unwrap_or(false),
        };

        match (wire.value, wire.system_state_code) {
            (Some(value), None) => Ok(Event::Numeric {
                timestamp: wire.timestamp,
                value,
                flags,
            }),
            (None, Some(code)) => {
                let name = wire.digital_state_name.ok_or_else(|| {
                    Error::Validation(format!(
                        "event at {} has system state code {} without a digital state name",
                        roundtrip_timestamp(&wire.timestamp),
                        code
                    ))
                })?;
                Ok(Event::SystemState {
                    timestamp: wire.timestamp,
                    code,
                    name,
                    flags,
                })
            }
            (Some(_), Some(_)) => Err(Error::Validation(format!(
                "event at {} carries both a numeric value and a system state code",
                roundtrip_timestamp(&wire.timestamp)
            ))),
            (None, None) => Err(Error::Validation(format!(
                "event at {} carries neither a numeric value nor a system state code",
                roundtrip_timestamp(&wire.timestamp)
            ))),
        }
    }
}

impl fmt::Display for Event {
    /// Fixed field order: timestamp, value (numeric only), quality flags,
    /// state-code pair (system-state only).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp: {}, ", roundtrip_timestamp(&self.timestamp()))?;

        if let Event::Numeric { value, .. } = self {
            write!(f, "Value: {}, ", value)?;
        }

        let flags = self.flags();
        write!(
            f,
            "IsQuestionable: {}, IsSubstituted: {}, IsAnnotated: {}",
            flags.questionable, flags.substituted, flags.annotated
        )?;

        if let Event::SystemState { code, name, .. } = self {
            write!(f, ", SystemStateCode: {}, DigitalStateName: {}", code, name)?;
        }

        Ok(())
    }
}
