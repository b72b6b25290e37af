use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// Which part of an object a table row carries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct IncludeObjectPolicy(String);

impl IncludeObjectPolicy {
    pub const METADATA: &str = "Metadata";

    pub const NONE: &str = "None";

    pub const OBJECT: &str = "Object";

    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for IncludeObjectPolicy {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for IncludeObjectPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for IncludeObjectPolicy {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for IncludeObjectPolicy {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<IncludeObjectPolicy> for String {
    fn from(value: IncludeObjectPolicy) -> Self {
        value.0
    }
}

impl PartialEq<&str> for IncludeObjectPolicy {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
