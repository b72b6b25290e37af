use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// How a resource version on a list request is interpreted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ResourceVersionMatch(String);

impl ResourceVersionMatch {
    pub const EXACT: &str = "Exact";

    pub const NOT_OLDER_THAN: &str = "NotOlderThan";

    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for ResourceVersionMatch {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<String> for ResourceVersionMatch {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ResourceVersionMatch {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<ResourceVersionMatch> for String {
    fn from(value: ResourceVersionMatch) -> Self {
        value.0
    }
}
