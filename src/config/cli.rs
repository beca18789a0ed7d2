// Command line interface

use anyhow::{anyhow, bail, Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::Path;

use super::description_file::{
    load_description, serializer_for_format, DescriptionSerializer, XmlSerializer,
};
use crate::codec::DecodeOptions;
use crate::domain::{Description, TemplateParams};
use crate::{create_router, AppState};

const DEFAULT_MEDIA_TYPE: &str = "text/html";
const DEFAULT_BIND: &str = "127.0.0.1:8000";

fn file_arg() -> Arg {
    Arg::new("file")
        .value_name("FILE")
        .required(true)
        .help("Description file (.xml, .yml, .yaml or .json)")
}

fn base_arg() -> Arg {
    Arg::new("base")
        .short('b')
        .long("base")
        .value_name("BASE_URL")
        .help("Resolve relative URL templates against this URI")
}

fn type_arg() -> Arg {
    Arg::new("type")
        .short('t')
        .long("type")
        .value_name("MEDIA_TYPE")
        .default_value(DEFAULT_MEDIA_TYPE)
        .help("Media type of the URL template to use")
}

pub fn build_cli() -> Command {
    Command::new("opensearch-description")
        .about("Decode, publish and query OpenSearch description documents")
        .subcommand_required(true)
        .arg(
            Arg::new("strict_language")
                .long("strict-language")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Fail on an invalid Language element instead of ignoring it"),
        )
        .subcommand(
            Command::new("decode")
                .about("Print a description as YAML or JSON")
                .arg(file_arg())
                .arg(
                    Arg::new("format")
                        .short('f')
                        .long("format")
                        .value_name("FORMAT")
                        .value_parser(["yaml", "json", "xml"])
                        .default_value("yaml")
                        .help("Output format"),
                ),
        )
        .subcommand(
            Command::new("encode")
                .about("Print a description as OpenSearch XML")
                .arg(file_arg()),
        )
        .subcommand(
            Command::new("resolve")
                .about("Print the description with relative URL templates made absolute")
                .arg(file_arg())
                .arg(base_arg().required(true)),
        )
        .subcommand(
            Command::new("request")
                .about("Print the search URL for a query")
                .arg(file_arg())
                .arg(type_arg())
                .arg(base_arg())
                .arg(
                    Arg::new("terms")
                        .short('q')
                        .long("terms")
                        .value_name("SEARCH_TERMS")
                        .help("Search terms"),
                )
                .arg(
                    Arg::new("filters")
                        .long("filters")
                        .value_name("FILTERS")
                        .help("Value for the {filters} token"),
                )
                .arg(
                    Arg::new("page")
                        .short('p')
                        .long("page")
                        .value_name("START_PAGE")
                        .help("Value for the {startPage} token"),
                ),
        )
        .subcommand(
            Command::new("serve")
                .about("Publish the description and redirect searches to it")
                .arg(file_arg())
                .arg(type_arg())
                .arg(base_arg())
                .arg(
                    Arg::new("bind")
                        .long("bind")
                        .value_name("ADDR")
                        .default_value(DEFAULT_BIND)
                        .help("Address to listen on"),
                ),
        )
}

fn string_arg<'a>(matches: &'a ArgMatches, id: &str) -> &'a str {
    matches
        .try_get_one::<String>(id)
        .ok()
        .flatten()
        .map(String::as_str)
        .unwrap_or("")
}

fn load(matches: &ArgMatches, options: DecodeOptions) -> Result<Description> {
    let path = Path::new(string_arg(matches, "file"));
    let mut description = load_description(path, options)?;
    // Not every subcommand takes --base
    if let Some(base) = matches.try_get_one::<String>("base").ok().flatten() {
        description
            .resolve_reference(base)
            .with_context(|| format!("Could not resolve templates against {}", base))?;
    }
    Ok(description)
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let options = if matches.get_flag("strict_language") {
        DecodeOptions::strict()
    } else {
        DecodeOptions::default()
    };

    match matches.subcommand() {
        Some(("decode", sub)) => {
            let description = load(sub, options)?;
            let format = string_arg(sub, "format");
            let serializer = serializer_for_format(format, options)
                .ok_or_else(|| anyhow!("Unknown output format {}", format))?;
            print!("{}", serializer.serialize(&description)?);
        }
        Some(("encode", sub)) | Some(("resolve", sub)) => {
            let description = load(sub, options)?;
            print!("{}", XmlSerializer { options }.serialize(&description)?);
        }
        Some(("request", sub)) => {
            let description = load(sub, options)?;
            let params = TemplateParams::new(string_arg(sub, "terms"))
                .with_filters(string_arg(sub, "filters"))
                .with_start_page(string_arg(sub, "page"));
            let url = description.request_with(string_arg(sub, "type"), &params)?;
            println!("{}", url);
        }
        Some(("serve", sub)) => {
            let description = load(sub, options)?;
            let bind = string_arg(sub, "bind");
            let state = AppState {
                description,
                default_type: string_arg(sub, "type").to_string(),
            };

            let listener = tokio::net::TcpListener::bind(bind)
                .await
                .with_context(|| format!("Could not bind {}", bind))?;
            tracing::info!(addr = %bind, "serving description");
            axum::serve(listener, create_router(state)).await?;
        }
        _ => bail!("Unknown command"),
    }

    Ok(())
}
