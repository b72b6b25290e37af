use std::io::Read;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use meta_convert::{
    Error, Result,
    cli::{
        CliArgs, CliCommands, QueryCommands, QueryConvertArgs, SelectorCommands,
        SelectorFromLabelsArgs, SelectorToLabelsArgs, parse, render,
    },
    meta::{self, DeleteOptions, ListOptions},
};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = &parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&cli.log_filter).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        CliCommands::Query(query) => match &query.command {
            QueryCommands::Delete(args) => query_convert::<DeleteOptions>(cli, args),
            QueryCommands::List(args) => query_convert::<ListOptions>(cli, args),
        },
        CliCommands::Selector(selector) => match &selector.command {
            SelectorCommands::FromLabels(args) => selector_from_labels(cli, args),
            SelectorCommands::ToLabels(args) => selector_to_labels(cli, args),
        },
    };

    match result {
        Ok(output) => print!("{output}"),
        Err(error) => {
            tracing::error!(error =% error, "conversion failed");
            eprintln!("error: {error}");
            std::process::exit(1);
        }
    }
}

#[tracing::instrument(skip(_cli))]
fn query_convert<T>(_cli: &CliArgs, args: &QueryConvertArgs) -> Result<String>
where
    T: Default + serde::Serialize + 'static,
{
    let values = args.url_values()?;
    let mut options = T::default();
    meta::converter().convert(&values, &mut options, None)?;
    render(&options, args.format)
}

#[tracing::instrument(skip(_cli))]
fn selector_from_labels(_cli: &CliArgs, args: &SelectorFromLabelsArgs) -> Result<String> {
    let labels = args.labels()?;
    let mut selector = LabelSelector::default();
    meta::converter().convert(&labels, &mut selector, None)?;
    render(&selector, args.format)
}

#[tracing::instrument(skip(_cli))]
fn selector_to_labels(_cli: &CliArgs, args: &SelectorToLabelsArgs) -> Result<String> {
    let content = match &args.input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut content = String::new();
            std::io::stdin().read_to_string(&mut content)?;
            content
        }
    };

    // YAML is a superset of JSON.
    let selector: LabelSelector = serde_yaml::from_str(&content)
        .map_err(|e| Error::Serialization(format!("label selector: {e}")))?;

    let mut labels = std::collections::BTreeMap::<String, String>::new();
    meta::converter().convert(&selector, &mut labels, None)?;
    render(&labels, args.format)
}
