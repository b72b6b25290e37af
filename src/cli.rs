use std::{collections::BTreeMap, path::PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::{Error, Result, meta::UrlValues};

/*
 * ============================================================================
 * Cli
 * ============================================================================
 */
#[allow(clippy::module_name_repetitions)]
#[derive(Parser, Debug)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: CliCommands,

    /// Log filter directives, e.g. `meta_convert=debug`
    #[arg(long, env = "META_CONVERT_LOG", default_value = "warn", global = true)]
    pub log_filter: String,
}

#[must_use]
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[allow(clippy::module_name_repetitions)]
#[derive(Subcommand, Debug)]
pub enum CliCommands {
    /// Query Parameters
    Query(QueryArgs),

    /// Label Selector
    Selector(SelectorArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum CliArgsFormat {
    Json,
    Yaml,
}

/// Renders `value` in `format`.
///
/// # Errors
///
/// Will return `Err` if `value` could not be serialized.
pub fn render<T: serde::Serialize>(value: &T, format: CliArgsFormat) -> Result<String> {
    match format {
        CliArgsFormat::Json => Ok(serde_json::to_string_pretty(value)? + "\n"),
        CliArgsFormat::Yaml => Ok(serde_yaml::to_string(value)?),
    }
}

/*
 * ============================================================================
 * Query
 * ============================================================================
 */
#[derive(Args, Debug)]
pub struct QueryArgs {
    #[command(subcommand)]
    pub command: QueryCommands,
}

#[derive(Subcommand, Debug)]
pub enum QueryCommands {
    /// Delete Options
    Delete(QueryConvertArgs),

    /// List Options
    List(QueryConvertArgs),
}

#[derive(Args, Debug)]
pub struct QueryConvertArgs {
    #[arg(long, value_enum, default_value_t = CliArgsFormat::Yaml)]
    pub format: CliArgsFormat,

    /// Query parameter as `key=value`, repeat for multiple values
    #[arg(long = "param", short = 'p')]
    pub params: Vec<String>,
}

impl QueryConvertArgs {
    /// Collects the params into url values, keeping the order of repeated keys.
    ///
    /// # Errors
    ///
    /// Will return `Err` if a param is not of the form `key=value`.
    pub fn url_values(&self) -> Result<UrlValues> {
        let mut values = UrlValues::new();
        for param in &self.params {
            let (key, value) = split_pair(param)?;
            values
                .entry(key.to_string())
                .or_default()
                .push(value.to_string());
        }
        Ok(values)
    }
}

/*
 * ============================================================================
 * Selector
 * ============================================================================
 */
#[derive(Args, Debug)]
pub struct SelectorArgs {
    #[command(subcommand)]
    pub command: SelectorCommands,
}

#[derive(Subcommand, Debug)]
pub enum SelectorCommands {
    /// Label map to Label Selector
    FromLabels(SelectorFromLabelsArgs),

    /// Label Selector to label map
    ToLabels(SelectorToLabelsArgs),
}

#[derive(Args, Debug)]
pub struct SelectorFromLabelsArgs {
    #[arg(long, value_enum, default_value_t = CliArgsFormat::Yaml)]
    pub format: CliArgsFormat,

    /// Label as `key=value`
    #[arg(long = "label", short = 'l')]
    pub labels: Vec<String>,
}

impl SelectorFromLabelsArgs {
    /// # Errors
    ///
    /// Will return `Err` if a label is not of the form `key=value`, or a key is
    /// given twice with different values.
    pub fn labels(&self) -> Result<BTreeMap<String, String>> {
        let mut labels = BTreeMap::new();
        for label in &self.labels {
            let (key, value) = split_pair(label)?;
            if let Some(existing) = labels
                .insert(key.to_string(), value.to_string())
                .filter(|existing| existing != value)
            {
                return Err(Error::InvalidArgument(format!(
                    "label {key:?} given as both {existing:?} and {value:?}"
                )));
            }
        }
        Ok(labels)
    }
}

#[derive(Args, Debug)]
pub struct SelectorToLabelsArgs {
    #[arg(long, value_enum, default_value_t = CliArgsFormat::Yaml)]
    pub format: CliArgsFormat,

    /// JSON or YAML label selector, stdin when omitted
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub input: Option<PathBuf>,
}

fn split_pair(value: &str) -> Result<(&str, &str)> {
    match value.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key, value)),
        _ => Err(Error::InvalidArgument(format!(
            "expected key=value, found {value:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use clap::Parser;

    use crate::Error;

    use super::{
        CliArgs, CliArgsFormat, CliCommands, QueryCommands, QueryConvertArgs, SelectorCommands,
        SelectorFromLabelsArgs, render,
    };

    #[test]
    fn url_values_keep_repeated_keys_in_order() {
        // arrange
        let args = QueryConvertArgs {
            format: CliArgsFormat::Json,
            params: vec!["time=b".into(), "watch=".into(), "time=a=1".into()],
        };

        // act
        let values = args.url_values().unwrap();

        // assert
        assert_eq!(
            BTreeMap::from([
                ("time".to_string(), vec!["b".to_string(), "a=1".to_string()]),
                ("watch".to_string(), vec![String::new()]),
            ]),
            values
        );
    }

    #[test]
    fn malformed_pairs_are_rejected() {
        for param in ["novalue", "=value"] {
            // arrange
            let args = QueryConvertArgs {
                format: CliArgsFormat::Json,
                params: vec![param.into()],
            };

            // act
            let result = args.url_values();

            // assert
            assert!(matches!(result, Err(Error::InvalidArgument(_))));
        }
    }

    #[test]
    fn conflicting_labels_are_rejected() {
        // arrange
        let args = SelectorFromLabelsArgs {
            format: CliArgsFormat::Yaml,
            labels: vec!["one=foo".into(), "one=foo".into(), "one=bar".into()],
        };

        // act
        let result = args.labels();

        // assert
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn render_json() {
        // arrange
        let labels = BTreeMap::from([("one".to_string(), "foo".to_string())]);

        // act
        let json = render(&labels, CliArgsFormat::Json).unwrap();
        let yaml = render(&labels, CliArgsFormat::Yaml).unwrap();

        // assert
        assert_eq!("{\n  \"one\": \"foo\"\n}\n", json);
        assert_eq!("one: foo\n", yaml);
    }

    #[test]
    fn parse_commands() {
        // act
        let query = CliArgs::try_parse_from([
            "meta-convert",
            "query",
            "delete",
            "-p",
            "propagationPolicy=Orphan",
        ])
        .unwrap();
        let selector = CliArgs::try_parse_from([
            "meta-convert",
            "selector",
            "from-labels",
            "--label",
            "one=foo",
            "--format",
            "json",
        ])
        .unwrap();

        // assert
        assert!(matches!(
            query.command,
            CliCommands::Query(ref args) if matches!(args.command, QueryCommands::Delete(_))
        ));
        assert!(matches!(
            selector.command,
            CliCommands::Selector(ref args)
                if matches!(args.command, SelectorCommands::FromLabels(_))
        ));
    }
}
