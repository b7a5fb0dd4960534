use chatflow::config::BuilderConfig;
use chatflow::html;
use chatflow::prelude::*;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Which builder page to print.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum PageVariant {
    /// Standalone document loading the builder from the CDN
    Cdn,
    /// Iframe wrapper around a locally served builder
    Iframe,
}

/// Validate chatbot flow payloads and render builder pages
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Optional JSON builder config; defaults apply to missing keys
    #[arg(short, long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the markdown report for a flow payload
    Report {
        /// Path to the payload JSON; reads stdin when omitted
        payload_path: Option<String>,

        /// Print the canonical JSON instead of the full report
        #[arg(long)]
        json: bool,

        /// Print timing information to stderr
        #[arg(long)]
        timings: bool,
    },
    /// Print the HTML the host would show
    Page {
        #[arg(short, long, value_enum, default_value_t = PageVariant::Cdn)]
        variant: PageVariant,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => BuilderConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&e.to_string())),
        None => BuilderConfig::default(),
    };

    match cli.command {
        Command::Report {
            payload_path,
            json,
            timings,
        } => run_report(payload_path, json, timings),
        Command::Page { variant } => {
            let page = match variant {
                PageVariant::Cdn => html::cdn_page(&config.assets),
                PageVariant::Iframe => html::builder_interface(&config.chatbot_builder_url),
            };
            println!("{}", page);
        }
    }
}

fn run_report(payload_path: Option<String>, json: bool, timings: bool) {
    // --- 1. Loading ---
    let load_start = Instant::now();
    let text = match &payload_path {
        Some(path) => fs::read_to_string(path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to read payload file '{}': {}", path, e))
        }),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to read stdin: {}", e)));
            buffer
        }
    };
    let load_duration = load_start.elapsed();

    // --- 2. Validation ---
    let pipeline = FlowGraphPipeline::new();
    let parse_start = Instant::now();
    let graph = pipeline
        .parse_payload(&Value::String(text))
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid flow payload: {}", e)));
    let parse_duration = parse_start.elapsed();

    // --- 3. Rendering ---
    let render_start = Instant::now();
    let output = if json {
        graph
            .to_canonical_json()
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to encode flow: {}", e)))
    } else {
        pipeline.render_report(&graph)
    };
    let render_duration = render_start.elapsed();

    println!("{}", output);

    if timings {
        eprintln!("\n--- Performance Summary ---");
        eprintln!("Payload Loading:  {:?}", load_duration);
        eprintln!("Validation:       {:?}", parse_duration);
        eprintln!("Rendering:        {:?}", render_duration);
        eprintln!("Nodes / Edges:    {} / {}", graph.nodes.len(), graph.edges.len());
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
