//! Submission identifiers in `component-sequence` form

use crate::config::validation::validate_name;
use crate::error::HoloError;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Dot-separated version sequence of a submission (`38`, `37.1`)
///
/// Orders numerically part by part, a shorter sequence sorting before any
/// longer sequence it prefixes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sequence(Vec<u32>);

impl Sequence {
    /// Numeric parts of the sequence
    #[must_use]
    pub fn parts(&self) -> &[u32] {
        &self.0
    }
}

impl Ord for Sequence {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for Sequence {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Sequence {
    type Err = HoloError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                part.parse::<u32>().ok()
            })
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| {
                HoloError::invalid_argument(format!(
                    "invalid sequence '{s}': expected dot-separated numbers such as 38 or 37.1"
                ))
            })?;
        Ok(Self(parts))
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for part in &self.0 {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{part}")?;
            first = false;
        }
        Ok(())
    }
}

/// Identifier of one version of a component, e.g. `osd-38`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubmissionId {
    component: String,
    sequence: Sequence,
}

impl SubmissionId {
    /// Build an identifier from its parts
    ///
    /// # Errors
    ///
    /// Returns an error if the component name is not a valid name
    pub fn new<S: Into<String>>(component: S, sequence: Sequence) -> Result<Self, HoloError> {
        let component = component.into();
        validate_name("component", &component)?;
        Ok(Self {
            component,
            sequence,
        })
    }

    /// Name of the component this submission belongs to
    #[must_use]
    pub fn component(&self) -> &str {
        &self.component
    }

    #[must_use]
    pub const fn sequence(&self) -> &Sequence {
        &self.sequence
    }
}

impl FromStr for SubmissionId {
    type Err = HoloError;

    /// Split at the last `-`, so component names may themselves contain dashes
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (component, sequence) = s.rsplit_once('-').ok_or_else(|| {
            HoloError::invalid_argument(format!(
                "invalid submission '{s}': expected COMPONENT-SEQUENCE such as osd-38"
            ))
        })?;
        if component.is_empty() {
            return Err(HoloError::invalid_argument(format!(
                "invalid submission '{s}': missing component name"
            )));
        }
        let sequence = sequence.parse::<Sequence>().map_err(|_err| {
            HoloError::invalid_argument(format!(
                "invalid submission '{s}': expected COMPONENT-SEQUENCE such as osd-38"
            ))
        })?;
        Self::new(component, sequence)
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.component, self.sequence)
    }
}
