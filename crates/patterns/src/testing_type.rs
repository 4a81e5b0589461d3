use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category a spec run belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestingType {
    E2e,
    Component,
}

impl TestingType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::E2e => "e2e",
            Self::Component => "component",
        }
    }

    #[must_use]
    pub const fn spec_type(self) -> SpecType {
        match self {
            Self::Component => SpecType::Component,
            Self::E2e => SpecType::Integration,
        }
    }
}

impl fmt::Display for TestingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "e2e" => Ok(Self::E2e),
            "component" => Ok(Self::Component),
            other => Err(format!("unknown testing type {other:?}")),
        }
    }
}

/// Kind recorded on each discovered spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecType {
    Component,
    Integration,
}
