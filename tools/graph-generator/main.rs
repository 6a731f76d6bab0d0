use clap::Parser;
use nagare::codec::encode;
use nagare::graph::{Branch, Graph, InputType, Node, Payload};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;

/// A CLI tool to generate random acyclic flowcharts in the canonical YAML format
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated YAML file to
    #[arg(short, long, default_value = "generated_flowchart.yaml")]
    output: String,

    /// The number of decision nodes to generate
    #[arg(short, long, default_value_t = 8)]
    decisions: usize,

    /// The number of terminator nodes to generate
    #[arg(short, long, default_value_t = 4)]
    terminators: usize,

    /// Seed for reproducible output; random when omitted
    #[arg(long)]
    seed: Option<u64>,
}

const INPUTS: [(&str, InputType); 4] = [
    ("temperature", InputType::Double),
    ("humidity", InputType::Double),
    ("is_sealed", InputType::Boolean),
    ("grade", InputType::String),
];

const OPERATORS: [&str; 4] = [">", "<", ">=", "<="];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.terminators == 0 {
        eprintln!("Error: --terminators must be at least 1");
        std::process::exit(1);
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    println!(
        "Generating flowchart ({} decisions, {} terminators)...",
        cli.decisions, cli.terminators
    );

    let graph = generate_graph(&mut rng, cli.decisions, cli.terminators)?;
    let yaml_output = encode(&graph)?;
    fs::write(&cli.output, yaml_output)?;

    println!(
        "Successfully generated and saved flowchart to '{}'",
        cli.output
    );

    Ok(())
}

/// Builds a DAG: decision `d<i>` may only point at later decisions or terminators.
fn generate_graph(
    rng: &mut StdRng,
    decisions: usize,
    terminators: usize,
) -> Result<Graph, Box<dyn std::error::Error>> {
    let decision_ids: Vec<String> = (0..decisions).map(|i| format!("d{:03}", i)).collect();
    let terminator_ids: Vec<String> = (0..terminators).map(|i| format!("t{:03}", i)).collect();

    let start_id = decision_ids
        .first()
        .unwrap_or(&terminator_ids[0])
        .clone();
    let start_node = if decisions > 0 {
        Node::decision("", "", "")
    } else {
        generate_terminator(0)
    };
    let mut graph = Graph::new(start_id, start_node)?;

    for (name, input_type) in INPUTS {
        graph.add_input(name, input_type)?;
    }

    for (i, id) in terminator_ids.iter().enumerate() {
        if !graph.contains(id) {
            graph.insert_node(id.clone(), generate_terminator(i))?;
        }
    }

    for (i, id) in decision_ids.iter().enumerate() {
        if !graph.contains(id) {
            graph.insert_node(id.clone(), Node::decision("", "", ""))?;
        }
        graph.set_condition(id, generate_condition(rng))?;
        for branch in [Branch::Positive, Branch::Negative] {
            // Later decisions first, terminators otherwise; keeps the graph acyclic.
            let later = &decision_ids[i + 1..];
            let target = if !later.is_empty() && rng.random_bool(0.6) {
                &later[rng.random_range(0..later.len())]
            } else {
                &terminator_ids[rng.random_range(0..terminator_ids.len())]
            };
            graph.set_path(id, branch, target.clone())?;
        }
    }

    println!("-> Generated {} nodes.", graph.len());
    Ok(graph)
}

fn generate_condition(rng: &mut StdRng) -> String {
    let (name, input_type) = INPUTS[rng.random_range(0..INPUTS.len())];
    match input_type {
        InputType::Double => {
            let op = OPERATORS[rng.random_range(0..OPERATORS.len())];
            format!("{} {} {:.1}", name, op, rng.random_range(0.0..100.0))
        }
        InputType::Boolean => format!("{} == {}", name, rng.random_bool(0.5)),
        InputType::String => format!("{} == \"{}\"", name, ["A", "B", "C"][rng.random_range(0..3)]),
    }
}

fn generate_terminator(index: usize) -> Node {
    let mut output = Payload::new();
    output.insert("quality".to_string(), format!("Q{}", index).into());
    output.insert("priority".to_string(), (index as u64 + 1).into());
    Node::terminator(output)
}
