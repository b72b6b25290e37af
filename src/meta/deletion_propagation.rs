use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// How the garbage collector treats dependents of a deleted object.
///
/// Any string is accepted; the associated constants name the values the API
/// server understands.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct DeletionPropagation(String);

impl DeletionPropagation {
    /// Delete dependents in the background.
    pub const BACKGROUND: &str = "Background";

    /// Delete dependents before the owner.
    pub const FOREGROUND: &str = "Foreground";

    /// Leave dependents in place.
    pub const ORPHAN: &str = "Orphan";

    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for DeletionPropagation {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for DeletionPropagation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DeletionPropagation {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for DeletionPropagation {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<DeletionPropagation> for String {
    fn from(value: DeletionPropagation) -> Self {
        value.0
    }
}

impl PartialEq<&str> for DeletionPropagation {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
