use clap::{Parser, Subcommand};
use itertools::Itertools;
use nagare::layout::assign_rows;
use nagare::prelude::*;
use std::fs;

/// Lay out, route and reformat decision flowcharts
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a flowchart and verify its start node and acyclicity
    Check {
        /// Path to the flowchart YAML file
        path: String,
    },
    /// Rewrite a flowchart in canonical form
    Fmt {
        /// Path to the flowchart YAML file
        path: String,
        /// Overwrite the file instead of printing to stdout
        #[arg(short, long)]
        write: bool,
    },
    /// Print the level and position of every node
    Layout {
        /// Path to the flowchart YAML file
        path: String,
        /// Optional layout configuration JSON file
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Print the routed connector of every resolved branch
    Route {
        /// Path to the flowchart YAML file
        path: String,
        /// Optional layout configuration JSON file
        #[arg(short, long)]
        config: Option<String>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Check { path } => run_check(&path),
        Command::Fmt { path, write } => run_fmt(&path, write),
        Command::Layout { path, config } => run_layout(&path, config.as_deref()),
        Command::Route { path, config } => run_route(&path, config.as_deref()),
    }
}

fn run_check(path: &str) {
    let graph = load_graph(path);
    let levels = assign_levels(&graph)
        .unwrap_or_else(|e| exit_with_error(&format!("Layout failed: {}", e)));

    println!("'{}' is a valid flowchart.", path);
    println!("  Nodes:        {}", graph.len());
    println!("  Inputs:       {}", graph.inputs().len());
    println!("  Start node:   {}", graph.start_node());
    println!("  Edges:        {}", graph.edges().count());
    let dangling = graph
        .edges()
        .filter(|edge| !edge.target.is_empty() && !graph.contains(edge.target))
        .map(|edge| format!("{} -({})-> {}", edge.source, edge.branch, edge.target))
        .collect::<Vec<_>>();
    if !dangling.is_empty() {
        println!("  Dangling:     {}", dangling.join(", "));
    }
    if !levels.unreachable().is_empty() {
        println!(
            "  Unreachable:  {}",
            levels.unreachable().iter().join(", ")
        );
    }
}

fn run_fmt(path: &str, write: bool) {
    let graph = load_graph(path);
    let text = encode(&graph)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to encode '{}': {}", path, e)));

    if write {
        fs::write(path, &text)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to write '{}': {}", path, e)));
        println!("Formatted '{}'", path);
    } else {
        print!("{}", text);
    }
}

fn run_layout(path: &str, config_path: Option<&str>) {
    let config = load_config(config_path);
    let graph = load_graph(path);
    let levels = assign_levels(&graph)
        .unwrap_or_else(|e| exit_with_error(&format!("Layout failed: {}", e)));
    let laid_out = layout_with(&graph, &config)
        .unwrap_or_else(|e| exit_with_error(&format!("Layout failed: {}", e)));
    let rows = assign_rows(&graph, &levels);

    println!("{:<24} {:>5} {:>5} {:>10} {:>10}", "NODE", "LEVEL", "ROW", "X", "Y");
    for (row, ids) in &rows {
        for id in ids {
            let Some(node) = laid_out.node(id) else {
                continue;
            };
            println!(
                "{:<24} {:>5} {:>5} {:>10.1} {:>10.1}",
                id,
                levels.get(id).unwrap_or(0),
                row,
                node.position.x,
                node.position.y
            );
        }
    }
}

fn run_route(path: &str, config_path: Option<&str>) {
    let config = load_config(config_path);
    let graph = load_graph(path);
    let laid_out = layout_with(&graph, &config)
        .unwrap_or_else(|e| exit_with_error(&format!("Layout failed: {}", e)));

    for connector in route_all(&laid_out, &config) {
        let points = connector
            .path
            .points
            .iter()
            .map(|p| format!("({:.1}, {:.1})", p.x, p.y))
            .join(" -> ");
        let marker = if connector.path.clear { "" } else { "  [crosses a node]" };
        println!(
            "{} -({})-> {}: {}{}",
            connector.source, connector.branch, connector.target, points, marker
        );
    }
}

/// Reads, decodes and reference-checks a flowchart file, exiting on any failure.
fn load_graph(path: &str) -> Graph {
    let text = fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read '{}': {}", path, e)));
    let graph = decode(&text)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to decode '{}': {}", path, e)));
    graph
        .check_start()
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid flowchart '{}': {}", path, e)));
    graph
}

fn load_config(path: Option<&str>) -> LayoutConfig {
    match path {
        Some(path) => LayoutConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("{}", e))),
        None => LayoutConfig::default(),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
