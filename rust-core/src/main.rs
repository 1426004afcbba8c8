use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{info, warn};
use periodic_nets::config::{DENSITY_SHELLS, KEY_VERSION, STATIONARY_STEP_BUDGET};
use periodic_nets::pgraph::{AnalyzedGraph, PeriodicGraph};
use periodic_nets::symmetries::StationaryOptions;
use periodic_nets::VertexId;
use serde::Deserialize;
use serde_json::json;

#[derive(Parser)]
#[command(name = "periodic-nets")]
#[command(about = "Symmetry groups and canonical keys for crystal nets")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical key of every net in the input
    Key {
        /// JSON file with a list of nets
        input: PathBuf,
    },
    /// Print group order and vertex/edge orbits
    Symmetry {
        input: PathBuf,
    },
    /// Print the minimal image of every net
    Minimal {
        input: PathBuf,
    },
    /// Search symmetries that fix the barycentric placement
    Stationary {
        input: PathBuf,

        /// Branches to try before giving up
        #[arg(short, long, default_value_t = STATIONARY_STEP_BUDGET)]
        budget: usize,
    },
    /// Print coordination sequences per vertex orbit and the topological density
    Coordination {
        input: PathBuf,

        /// Print the raw sequence of this vertex only
        #[arg(long)]
        vertex: Option<VertexId>,

        /// Number of shells
        #[arg(short, long, default_value_t = DENSITY_SHELLS)]
        dist: usize,
    },
}

/// One net as it appears in the input file.
#[derive(Debug, Deserialize)]
struct NetRecord {
    name: String,
    edges: Vec<(VertexId, VertexId, Vec<i64>)>,
}

fn read_nets(path: &Path) -> Result<Vec<(String, PeriodicGraph)>> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let records: Vec<NetRecord> =
        serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))?;

    records
        .into_iter()
        .map(|r| {
            let graph = PeriodicGraph::new(r.edges).with_context(|| format!("invalid net {}", r.name))?;
            Ok((r.name, graph))
        })
        .collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    info!("Starting periodic-nets v{} (key version {})", periodic_nets::VERSION, KEY_VERSION);

    match cli.command {
        Commands::Key { input } => print_keys(&input),
        Commands::Symmetry { input } => print_symmetries(&input),
        Commands::Minimal { input } => print_minimal_images(&input),
        Commands::Stationary { input, budget } => print_stationary(&input, budget),
        Commands::Coordination { input, vertex, dist } => print_coordination(&input, vertex, dist),
    }
}

fn print_keys(input: &Path) -> Result<()> {
    for (name, graph) in read_nets(input)? {
        let net = AnalyzedGraph::new(graph);
        match net.systre_key() {
            Ok(key) => println!("{name}\t{key}"),
            Err(e) => warn!("{name}: {e}"),
        }
    }
    Ok(())
}

fn print_symmetries(input: &Path) -> Result<()> {
    for (name, graph) in read_nets(input)? {
        let net = AnalyzedGraph::new(graph);
        let group = match net.symmetries() {
            Ok(group) => group,
            Err(e) => {
                warn!("{name}: {e}");
                continue;
            }
        };
        let report = json!({
            "name": name,
            "order": group.order(),
            "point_group_order": group.point_group_order(),
            "generators": group.generators().len(),
            "vertex_orbits": group.vertex_orbits(),
            "edge_orbits": group.edge_orbits(),
        });
        println!("{report}");
    }
    Ok(())
}

fn print_minimal_images(input: &Path) -> Result<()> {
    for (name, graph) in read_nets(input)? {
        let net = AnalyzedGraph::new(graph);
        match net.minimal_image() {
            Ok(image) => {
                let report = json!({
                    "name": name,
                    "minimal": net.is_minimal()?,
                    "edges": image.graph.edges(),
                    "orbits": image.orbits,
                });
                println!("{report}");
            }
            Err(e) => warn!("{name}: {e}"),
        }
    }
    Ok(())
}

fn print_stationary(input: &Path, budget: usize) -> Result<()> {
    let options = StationaryOptions { step_budget: budget };
    for (name, graph) in read_nets(input)? {
        let net = AnalyzedGraph::new(graph);
        let found = match net.stationary_symmetries(&options) {
            Ok(found) => found,
            Err(e) => {
                warn!("{name}: {e}");
                continue;
            }
        };
        let maps: Vec<_> = found.symmetries.iter().map(|a| a.src2img()).collect();
        let report = json!({
            "name": name,
            "complete": found.is_complete(),
            "steps": found.steps,
            "symmetries": maps,
        });
        println!("{report}");
    }
    Ok(())
}

fn print_coordination(input: &Path, vertex: Option<VertexId>, dist: usize) -> Result<()> {
    for (name, graph) in read_nets(input)? {
        if let Some(v) = vertex {
            let shells = graph
                .coordination_sequence(v, dist)
                .with_context(|| format!("coordination sequence of {name}"))?;
            let shells: Vec<String> = shells.iter().map(|n| n.to_string()).collect();
            println!("{name}\t{v}\t{}", shells.join(" "));
            continue;
        }

        let net = AnalyzedGraph::new(graph);
        let report = match net.topological_density(dist) {
            Ok(report) => report,
            Err(e) => {
                warn!("{name}: {e}");
                continue;
            }
        };
        if !report.is_complete() {
            warn!("{name}: cumulative count too large, density not computed");
        }
        let report = json!({
            "name": name,
            "orbits": report.orbits,
            (format!("td{dist}")): report.density,
        });
        println!("{report}");
    }
    Ok(())
}
