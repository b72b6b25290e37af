#![warn(clippy::pedantic)]

pub mod cli;
pub mod conversion;
pub mod meta;

/*
 * ============================================================================
 * Error
 * ============================================================================
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    InvalidArgument(String),
    NoConversionPath {
        source: &'static str,
        destination: &'static str,
        field: Option<String>,
    },
    Parse {
        type_name: &'static str,
        value: String,
        reason: String,
        field: Option<String>,
    },
    Serialization(String),
    Unrepresentable {
        target: &'static str,
        reason: String,
        field: Option<String>,
    },
}

impl Error {
    /// Prefixes the field path of a conversion error with `parent`.
    ///
    /// Errors that are not about a conversion are returned unchanged.
    #[must_use]
    pub fn within(mut self, parent: &str) -> Self {
        if let Error::NoConversionPath { field, .. }
        | Error::Parse { field, .. }
        | Error::Unrepresentable { field, .. } = &mut self
        {
            *field = Some(match field.take() {
                Some(field) => format!("{parent}.{field}"),
                None => parent.to_string(),
            });
        }
        self
    }

    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Error::NoConversionPath { field, .. }
            | Error::Parse { field, .. }
            | Error::Unrepresentable { field, .. } => field.as_deref(),
            Error::InvalidArgument(_) | Error::Serialization(_) => None,
        }
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidArgument(e) => write!(f, "invalid argument: {e}"),
            Error::NoConversionPath {
                source,
                destination,
                ..
            } => write!(f, "no conversion path from {source} to {destination}"),
            Error::Parse {
                type_name,
                value,
                reason,
                ..
            } => write!(f, "invalid {type_name} {value:?}: {reason}"),
            Error::Serialization(e) => write!(f, "serialization error: {e}"),
            Error::Unrepresentable { target, reason, .. } => {
                write!(f, "unrepresentable as {target}: {reason}")
            }
        }?;

        match self.field() {
            Some(field) => write!(f, " (field {field})"),
            None => Ok(()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::Serialization(value.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(value: serde_yaml::Error) -> Self {
        Error::Serialization(value.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Serialization(value.to_string())
    }
}

/*
 * ============================================================================
 * Result
 * ============================================================================
 */
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn within_builds_field_path() {
        // arrange
        let error = Error::NoConversionPath {
            source: "u8",
            destination: "String",
            field: Some("inner".into()),
        };

        // act
        let error = error.within("outer");

        // assert
        assert_eq!(Some("outer.inner"), error.field());
        assert_eq!(
            "no conversion path from u8 to String (field outer.inner)",
            error.to_string()
        );
    }

    #[test]
    fn within_tags_parse_errors() {
        // arrange
        let error = Error::Parse {
            type_name: "Time",
            value: "x".into(),
            reason: "bad".into(),
            field: None,
        };

        // act
        let error = error.within("time");

        // assert
        assert_eq!(Some("time"), error.field());
        assert_eq!("invalid Time \"x\": bad (field time)", error.to_string());
    }

    #[test]
    fn within_leaves_other_errors_alone() {
        // arrange
        let error = Error::InvalidArgument("label".into());

        // act
        let within = error.clone().within("outer");

        // assert
        assert_eq!(error, within);
    }
}
