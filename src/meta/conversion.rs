#![allow(clippy::ptr_arg, clippy::unnecessary_wraps)]

use std::{any::Any, collections::BTreeMap};

use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;

use crate::{
    Error, Result,
    conversion::{Registry, Scope},
};

use super::{
    DeleteOptions, DeletionPropagation, IncludeObjectPolicy, ListOptions, ResourceVersionMatch,
    Time, UrlValues, label_selector_as_map, set_as_label_selector,
};

/// Registers every `meta/v1` conversion rule and aggregate on `registry`.
pub fn add_conversion_funcs(registry: &mut Registry) -> &mut Registry {
    registry
        .add_field_source::<UrlValues>()
        .add_aggregate::<DeleteOptions>()
        .add_aggregate::<ListOptions>();

    /*
     * ========================================================================
     * Label Selector
     * ========================================================================
     */
    registry
        .register(convert_map_to_label_selector)
        .register(
            |source: &Option<BTreeMap<String, String>>,
             destination: &mut LabelSelector,
             scope: &Scope<'_>| {
                convert_optional_map_to_label_selector(source.as_ref(), destination, scope)
            },
        )
        .register(convert_label_selector_to_map)
        .register(
            |source: &LabelSelector,
             destination: &mut Option<BTreeMap<String, String>>,
             scope: &Scope<'_>| {
                let mut labels = BTreeMap::new();
                convert_label_selector_to_map(source, &mut labels, scope)?;
                *destination = Some(labels);
                Ok(())
            },
        );

    /*
     * ========================================================================
     * Query Parameters
     * ========================================================================
     */
    registry
        .register(
            |source: &Option<Vec<String>>,
             destination: &mut DeletionPropagation,
             scope: &Scope<'_>| {
                convert_slice_string_to_deletion_propagation(
                    source.as_ref().unwrap_or(&Vec::new()),
                    destination,
                    scope,
                )
            },
        )
        .register(convert_slice_string_to_bool)
        .register(convert_slice_string_to_deletion_propagation)
        .register(convert_slice_string_to_i64)
        .register(convert_slice_string_to_include_object_policy)
        .register(convert_slice_string_to_pointer_bool)
        .register(convert_slice_string_to_pointer_i64)
        .register(convert_slice_string_to_pointer_time)
        .register(convert_slice_string_to_resource_version_match)
        .register(convert_slice_string_to_slice_i32)
        .register(convert_slice_string_to_string)
        .register(convert_slice_string_to_time);

    /*
     * ========================================================================
     * Pointers
     * ========================================================================
     */
    register_pointer::<bool>(registry);
    register_pointer::<f64>(registry);
    register_pointer::<i32>(registry);
    register_pointer::<i64>(registry);
    register_pointer::<String>(registry);

    registry
}

/// `None` becomes the zero value, a value becomes `Some`.
fn register_pointer<T: Any + Clone + Default>(registry: &mut Registry) -> &mut Registry {
    registry
        .register(|source: &Option<T>, destination: &mut T, _: &Scope<'_>| {
            *destination = source.clone().unwrap_or_default();
            Ok(())
        })
        .register(|source: &T, destination: &mut Option<T>, _: &Scope<'_>| {
            *destination = Some(source.clone());
            Ok(())
        })
}

fn first(source: &[String]) -> &str {
    source.first().map_or("", String::as_str)
}

fn parse_error(type_name: &'static str, value: &str, reason: impl std::fmt::Display) -> Error {
    Error::Parse {
        type_name,
        value: value.to_string(),
        reason: reason.to_string(),
        field: None,
    }
}

/*
 * ============================================================================
 * Label Selector
 * ============================================================================
 */
/// # Errors
///
/// Never fails; every label set has a selector.
pub fn convert_map_to_label_selector(
    source: &BTreeMap<String, String>,
    destination: &mut LabelSelector,
    _: &Scope<'_>,
) -> Result<()> {
    *destination = set_as_label_selector(source);
    Ok(())
}

/// An absent map selects everything, the same as an empty one.
///
/// # Errors
///
/// Never fails; every label set has a selector.
pub fn convert_optional_map_to_label_selector(
    source: Option<&BTreeMap<String, String>>,
    destination: &mut LabelSelector,
    scope: &Scope<'_>,
) -> Result<()> {
    if let Some(source) = source {
        return convert_map_to_label_selector(source, destination, scope);
    }

    *destination = LabelSelector::default();
    Ok(())
}

/// Replaces `destination` with the label set of `source`. An empty selector
/// gives an empty map.
///
/// # Errors
///
/// Will return `Err` if `source` has a requirement that is not an equality.
/// `destination` is untouched in that case.
pub fn convert_label_selector_to_map(
    source: &LabelSelector,
    destination: &mut BTreeMap<String, String>,
    _: &Scope<'_>,
) -> Result<()> {
    *destination = label_selector_as_map(source)?;
    Ok(())
}

/*
 * ============================================================================
 * Query Parameters
 * ============================================================================
 */
/// First value wins. Absent, `0` and `false` (any case) are false; anything
/// else, including an empty value, is true.
///
/// # Errors
///
/// Never fails.
pub fn convert_slice_string_to_bool(
    source: &Vec<String>,
    destination: &mut bool,
    _: &Scope<'_>,
) -> Result<()> {
    *destination = match source.first() {
        Some(value) => value != "0" && !value.eq_ignore_ascii_case("false"),
        None => false,
    };
    Ok(())
}

/// # Errors
///
/// Never fails.
pub fn convert_slice_string_to_pointer_bool(
    source: &Vec<String>,
    destination: &mut Option<bool>,
    scope: &Scope<'_>,
) -> Result<()> {
    if source.is_empty() {
        *destination = None;
        return Ok(());
    }

    let mut value = false;
    convert_slice_string_to_bool(source, &mut value, scope)?;
    *destination = Some(value);
    Ok(())
}

/// First value wins; extra values are dropped and no validation happens.
///
/// # Errors
///
/// Never fails.
pub fn convert_slice_string_to_deletion_propagation(
    source: &Vec<String>,
    destination: &mut DeletionPropagation,
    _: &Scope<'_>,
) -> Result<()> {
    *destination = first(source).into();
    Ok(())
}

/// # Errors
///
/// Never fails.
pub fn convert_slice_string_to_include_object_policy(
    source: &Vec<String>,
    destination: &mut IncludeObjectPolicy,
    _: &Scope<'_>,
) -> Result<()> {
    *destination = first(source).into();
    Ok(())
}

/// # Errors
///
/// Never fails.
pub fn convert_slice_string_to_resource_version_match(
    source: &Vec<String>,
    destination: &mut ResourceVersionMatch,
    _: &Scope<'_>,
) -> Result<()> {
    *destination = first(source).into();
    Ok(())
}

/// # Errors
///
/// Never fails.
pub fn convert_slice_string_to_string(
    source: &Vec<String>,
    destination: &mut String,
    _: &Scope<'_>,
) -> Result<()> {
    *destination = first(source).to_string();
    Ok(())
}

/// # Errors
///
/// Will return `Err` if the first value is not a decimal integer.
pub fn convert_slice_string_to_i64(
    source: &Vec<String>,
    destination: &mut i64,
    _: &Scope<'_>,
) -> Result<()> {
    *destination = match source.first() {
        Some(value) => value.parse().map_err(|e| parse_error("i64", value, e))?,
        None => 0,
    };
    Ok(())
}

/// # Errors
///
/// Will return `Err` if the first value is not a decimal integer.
pub fn convert_slice_string_to_pointer_i64(
    source: &Vec<String>,
    destination: &mut Option<i64>,
    _: &Scope<'_>,
) -> Result<()> {
    *destination = match source.first() {
        Some(value) => Some(value.parse().map_err(|e| parse_error("i64", value, e))?),
        None => None,
    };
    Ok(())
}

/// Every value is a comma separated list of ports, all of them are appended
/// to `destination`.
///
/// # Errors
///
/// Will return `Err` if an item is not a port number. Items before it are
/// already appended.
pub fn convert_slice_string_to_slice_i32(
    source: &Vec<String>,
    destination: &mut Vec<i32>,
    _: &Scope<'_>,
) -> Result<()> {
    for value in source {
        for item in value.split(',') {
            let port = item
                .parse::<u16>()
                .map_err(|e| parse_error("port", item, e))?;
            destination.push(i32::from(port));
        }
    }
    Ok(())
}

/// # Errors
///
/// Will return `Err` if the first value is neither empty, `null` nor RFC 3339.
pub fn convert_slice_string_to_time(
    source: &Vec<String>,
    destination: &mut Time,
    _: &Scope<'_>,
) -> Result<()> {
    *destination = Time::parse_query_parameter(first(source))?;
    Ok(())
}

/// A present key always yields `Some`: no value or an empty first value is
/// the zero time. Absent keys never reach this rule.
///
/// # Errors
///
/// Will return `Err` if the first value is neither empty, `null` nor RFC 3339.
/// `destination` is untouched in that case.
pub fn convert_slice_string_to_pointer_time(
    source: &Vec<String>,
    destination: &mut Option<Time>,
    _: &Scope<'_>,
) -> Result<()> {
    *destination = Some(Time::parse_query_parameter(first(source))?);
    Ok(())
}
