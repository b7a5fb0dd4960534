use clap::Parser;
use itertools::Itertools;
use rand::Rng;
use rand::rngs::ThreadRng;
use serde_json::{Value, json};
use std::fs;

/// A CLI tool to generate random chatbot flow payloads
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_flow.json")]
    output: String,

    /// The minimum number of steps between the start and end nodes
    #[arg(long, default_value_t = 1)]
    min: usize,

    /// The maximum number of steps between the start and end nodes
    #[arg(long, default_value_t = 12)]
    max: usize,

    /// Add edges pointing at nodes that do not exist
    #[arg(long)]
    dangling: bool,
}

const CHANNELS: &[&str] = &["sms", "whatsapp", "messenger", "email"];
const MESSAGES: &[&str] = &[
    "Hi there! How can I help?",
    "Could you share your order number?",
    "Thanks, one moment please.",
    "Is there anything else I can do for you?",
];
const CONDITIONS: &[&str] = &[
    "user.replied == true",
    "order.status == 'shipped'",
    "message contains 'agent'",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.min > cli.max {
        eprintln!(
            "Error: --min ({}) cannot be greater than --max ({})",
            cli.min, cli.max
        );
        std::process::exit(1);
    }

    let steps = rng.random_range(cli.min..=cli.max);
    println!("Generating a flow with {} step(s) between start and end...", steps);

    let nodes = generate_nodes(&mut rng, steps);
    let mut edges = link_nodes(&nodes);
    if cli.dangling {
        edges.push(json!({
            "id": format!("e{}", edges.len() + 1),
            "source": "n1",
            "target": "missing",
            "type": "default"
        }));
        println!("-> Added a dangling edge.");
    }

    let payload = json!({
        "nodes": nodes,
        "edges": edges,
        "timestamp": 1_700_000_000_000_i64 + rng.random_range(0..86_400_000_i64),
        "metadata": {"generator": "flow-gen", "steps": steps}
    });

    fs::write(&cli.output, serde_json::to_string_pretty(&payload)?)?;
    println!("Successfully generated and saved flow to '{}'", cli.output);
    Ok(())
}

/// A start node, `steps` random message/condition nodes, and an end node, laid out left to right.
fn generate_nodes(rng: &mut ThreadRng, steps: usize) -> Vec<Value> {
    let mut nodes = vec![node(1, "start", 0.0, json!({}))];
    for i in 0..steps {
        let id = i + 2;
        let x = (id - 1) as f64 * 200.0;
        let generated = if rng.random_bool(0.7) {
            node(id, "textMessage", x, json!({
                "channel": pick(rng, CHANNELS),
                "message": pick(rng, MESSAGES),
            }))
        } else {
            node(id, "conditionalPath", x, json!({"condition": pick(rng, CONDITIONS)}))
        };
        nodes.push(generated);
    }
    nodes.push(node(steps + 2, "end", (steps + 1) as f64 * 200.0, json!({})));
    nodes
}

fn node(id: usize, node_type: &str, x: f64, data: Value) -> Value {
    json!({
        "id": format!("n{}", id),
        "type": node_type,
        "position": {"x": x, "y": 100.0},
        "data": data
    })
}

/// Chains consecutive nodes into a single path.
fn link_nodes(nodes: &[Value]) -> Vec<Value> {
    nodes
        .iter()
        .tuple_windows()
        .enumerate()
        .map(|(i, (from, to))| {
            json!({
                "id": format!("e{}", i + 1),
                "source": from["id"],
                "target": to["id"],
                "type": "default"
            })
        })
        .collect()
}

fn pick<'a>(rng: &mut ThreadRng, options: &[&'a str]) -> &'a str {
    options[rng.random_range(0..options.len())]
}
