mod conversion;
mod delete_options;
mod deletion_propagation;
mod include_object_policy;
mod label_selector;
mod list_options;
mod resource_version_match;
mod time;

use std::{collections::BTreeMap, sync::OnceLock};

pub use conversion::{
    add_conversion_funcs, convert_label_selector_to_map, convert_map_to_label_selector,
    convert_optional_map_to_label_selector, convert_slice_string_to_bool,
    convert_slice_string_to_deletion_propagation, convert_slice_string_to_i64,
    convert_slice_string_to_include_object_policy, convert_slice_string_to_pointer_bool,
    convert_slice_string_to_pointer_i64, convert_slice_string_to_pointer_time,
    convert_slice_string_to_resource_version_match, convert_slice_string_to_slice_i32,
    convert_slice_string_to_string, convert_slice_string_to_time,
};
pub use delete_options::DeleteOptions;
pub use deletion_propagation::DeletionPropagation;
pub use include_object_policy::IncludeObjectPolicy;
pub use label_selector::{
    DOES_NOT_EXIST, EXISTS, IN, NOT_IN, label_selector_as_map, set_as_label_selector,
};
pub use list_options::ListOptions;
pub use resource_version_match::ResourceVersionMatch;
pub use time::Time;

use crate::conversion::{Converter, Registry};

/// Parsed query parameters: every key maps to its values in request order.
pub type UrlValues = BTreeMap<String, Vec<String>>;

/// Builds a converter with every `meta/v1` rule registered.
#[must_use]
pub fn new_converter() -> Converter {
    let mut registry = Registry::new();
    add_conversion_funcs(&mut registry);
    Converter::new(registry)
}

/// Process-wide converter, built on first use and never mutated afterwards.
#[must_use]
pub fn converter() -> &'static Converter {
    static CONVERTER: OnceLock<Converter> = OnceLock::new();
    CONVERTER.get_or_init(|| {
        tracing::debug!("building meta/v1 converter");
        new_converter()
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;

    use super::{converter, new_converter};

    #[test]
    fn shared_converter_is_built_once() {
        assert!(std::ptr::eq(converter(), converter()));
        assert_eq!(
            new_converter().registry().len(),
            converter().registry().len()
        );
    }

    #[test]
    fn shared_converter_across_threads() {
        // arrange
        let handles = (0..4)
            .map(|i| {
                std::thread::spawn(move || {
                    let labels = BTreeMap::from([("index".to_string(), i.to_string())]);
                    let mut selector = LabelSelector::default();
                    let mut output = BTreeMap::<String, String>::new();

                    converter().convert(&labels, &mut selector, None)?;
                    converter().convert(&selector, &mut output, None)?;

                    Ok::<_, crate::Error>(labels == output)
                })
            })
            .collect::<Vec<_>>();

        // act
        let results = handles
            .into_iter()
            .map(|handle| handle.join().unwrap().unwrap())
            .collect::<Vec<_>>();

        // assert
        assert_eq!(vec![true; 4], results);
    }
}
