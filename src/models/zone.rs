//! Availability zone identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque availability zone identifier such as `us-east-1a`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct AvailabilityZone(pub String);

impl AvailabilityZone {
    pub fn new(name: impl Into<String>) -> Self {
        AvailabilityZone(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AvailabilityZone {
    fn from(name: &str) -> Self {
        AvailabilityZone::new(name)
    }
}

impl fmt::Display for AvailabilityZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
