//! Resolve a single request against a route table without starting a server.
//!
//! ```text
//! route-check --config routes.toml GET '/hello/keith?lang=en'
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use axum::http::Method;
use clap::Parser;
use serde::Serialize;

use pattern_mux::config::load_config;
use pattern_mux::http::request::decode_captures;
use pattern_mux::http::responder::register_routes;
use pattern_mux::http::response::allow_header;
use pattern_mux::routing::{Params, Resolution};

#[derive(Parser)]
#[command(name = "route-check")]
#[command(about = "Resolve one request against a pattern-mux route table", long_about = None)]
struct Cli {
    /// Route table (TOML).
    #[arg(short, long)]
    config: PathBuf,

    /// Print the outcome as JSON.
    #[arg(long)]
    json: bool,

    /// Request method, e.g. GET.
    method: String,

    /// Request target: path with optional query, e.g. /users/42?x=1
    target: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
enum Report {
    Matched {
        route: String,
        pattern: String,
        params: Params,
    },
    Redirect {
        location: String,
    },
    MethodNotAllowed {
        allow: String,
    },
    NotFound,
}

impl Report {
    fn is_routable(&self) -> bool {
        matches!(self, Report::Matched { .. } | Report::Redirect { .. })
    }
}

fn split_target(target: &str) -> (&str, Option<&str>) {
    match target.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (target, None),
    }
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    let labels: Vec<String> = config.routes.iter().map(|r| r.label()).collect();
    let mux = register_routes(&config.routes, |index, _| index);

    let method = Method::from_bytes(cli.method.to_ascii_uppercase().as_bytes())?;
    let (path, query) = split_target(&cli.target);

    let report = match mux.resolve(&method, path, query) {
        Resolution::Matched {
            handler,
            pattern,
            captures,
            ..
        } => Report::Matched {
            route: labels[*handler].clone(),
            pattern: pattern.to_string(),
            params: decode_captures(&captures, query)?.1,
        },
        Resolution::Redirect { location } => Report::Redirect { location },
        Resolution::MethodNotAllowed { allowed } => Report::MethodNotAllowed {
            allow: allow_header(&allowed),
        },
        Resolution::NotFound => Report::NotFound,
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match &report {
            Report::Matched {
                route,
                pattern,
                params,
            } => {
                println!("matched {} ({})", pattern, route);
                for (key, values) in params.iter() {
                    println!("  {} = {}", key, values.join(", "));
                }
            }
            Report::Redirect { location } => println!("redirect {}", location),
            Report::MethodNotAllowed { allow } => println!("method-not-allowed {}", allow),
            Report::NotFound => println!("not-found"),
        }
    }

    Ok(if report.is_routable() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
