use std::collections::{BTreeMap, btree_map::Entry};

use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;

use crate::{Error, Result};

/*
 * ============================================================================
 * Operators
 * ============================================================================
 */
pub const DOES_NOT_EXIST: &str = "DoesNotExist";

pub const EXISTS: &str = "Exists";

pub const IN: &str = "In";

pub const NOT_IN: &str = "NotIn";

/*
 * ============================================================================
 * Conversions
 * ============================================================================
 */
/// Builds the selector matching exactly `labels`.
///
/// An empty set gives the empty selector, which matches everything.
#[must_use]
pub fn set_as_label_selector(labels: &BTreeMap<String, String>) -> LabelSelector {
    if labels.is_empty() {
        return LabelSelector::default();
    }

    LabelSelector {
        match_expressions: None,
        match_labels: Some(labels.clone()),
    }
}

/// Flattens an equality-only selector back into its label set.
///
/// `match_labels` are taken as they are. A `match_expressions` entry is kept
/// only when it is an `In` with a single value.
///
/// # Errors
///
/// Will return `Err` if the selector carries any requirement a label set
/// cannot express, or two requirements disagree on the value of a key.
pub fn label_selector_as_map(selector: &LabelSelector) -> Result<BTreeMap<String, String>> {
    let mut labels = selector.match_labels.clone().unwrap_or_default();

    for requirement in selector.match_expressions.iter().flatten() {
        let value = match (
            requirement.operator.as_str(),
            requirement.values.as_deref().unwrap_or_default(),
        ) {
            (IN, [value]) => value,
            (IN, values) => {
                return Err(unrepresentable(format!(
                    "{:?} In requirement has {} values, expected 1",
                    requirement.key,
                    values.len()
                )));
            }
            (operator, _) => {
                return Err(unrepresentable(format!(
                    "{:?} is not an equality operator on {:?}",
                    operator, requirement.key
                )));
            }
        };

        match labels.entry(requirement.key.clone()) {
            Entry::Occupied(entry) if entry.get() != value => {
                return Err(unrepresentable(format!(
                    "{:?} is required to equal both {:?} and {value:?}",
                    requirement.key,
                    entry.get()
                )));
            }
            Entry::Occupied(_) => {}
            Entry::Vacant(entry) => {
                entry.insert(value.clone());
            }
        }
    }

    Ok(labels)
}

fn unrepresentable(reason: String) -> Error {
    Error::Unrepresentable {
        target: "label map",
        reason,
        field: None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, LabelSelectorRequirement};

    use crate::Error;

    use super::{DOES_NOT_EXIST, EXISTS, IN, NOT_IN, label_selector_as_map, set_as_label_selector};

    fn requirement(key: &str, operator: &str, values: &[&str]) -> LabelSelectorRequirement {
        LabelSelectorRequirement {
            key: key.into(),
            operator: operator.into(),
            values: Some(values.iter().map(ToString::to_string).collect()),
        }
    }

    #[test]
    fn empty_set_is_empty_selector() {
        assert_eq!(
            LabelSelector::default(),
            set_as_label_selector(&BTreeMap::new())
        );
    }

    #[test]
    fn labels_become_match_labels() {
        // arrange
        let labels = BTreeMap::from([
            ("two".to_string(), "bar".to_string()),
            ("one".to_string(), "foo".to_string()),
        ]);

        // act
        let selector = set_as_label_selector(&labels);

        // assert
        assert_eq!(Some(labels), selector.match_labels);
        assert_eq!(None, selector.match_expressions);
    }

    #[test]
    fn single_value_in_is_an_equality() {
        // arrange
        let selector = LabelSelector {
            match_expressions: Some(vec![requirement("two", IN, &["bar"])]),
            match_labels: Some(BTreeMap::from([("one".into(), "foo".into())])),
        };

        // act
        let labels = label_selector_as_map(&selector).unwrap();

        // assert
        assert_eq!(
            BTreeMap::from([
                ("one".to_string(), "foo".to_string()),
                ("two".to_string(), "bar".to_string()),
            ]),
            labels
        );
    }

    #[test]
    fn set_based_requirements_are_unrepresentable() {
        for requirement in [
            requirement("one", EXISTS, &[]),
            requirement("one", DOES_NOT_EXIST, &[]),
            requirement("one", NOT_IN, &["foo"]),
            requirement("one", "Foo", &["foo"]),
            requirement("one", IN, &["foo", "bar"]),
            requirement("one", IN, &[]),
            LabelSelectorRequirement {
                key: "one".into(),
                operator: IN.into(),
                values: None,
            },
        ] {
            // arrange
            let selector = LabelSelector {
                match_expressions: Some(vec![requirement]),
                match_labels: None,
            };

            // act
            let error = label_selector_as_map(&selector).unwrap_err();

            // assert
            assert!(
                matches!(error, Error::Unrepresentable { .. }),
                "unexpected error: {error}"
            );
        }
    }

    #[test]
    fn conflicting_requirements_are_unrepresentable() {
        // arrange
        let selector = LabelSelector {
            match_expressions: Some(vec![requirement("one", IN, &["bar"])]),
            match_labels: Some(BTreeMap::from([("one".into(), "foo".into())])),
        };

        // act
        let result = label_selector_as_map(&selector);

        // assert
        assert!(matches!(result, Err(Error::Unrepresentable { .. })));
    }
}
