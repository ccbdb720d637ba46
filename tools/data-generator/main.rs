use clap::Parser;
use flowstack::data::FlowDocument;
use flowstack::graph::{Link, Node, Stage};
use flowstack::highlight::HighlightStyle;
use flowstack::layout::LayoutConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;

const ORIGINS: &[&str] = &[
    "Germany", "United States", "Italy", "France", "United Kingdom", "Spain", "Netherlands",
    "Switzerland", "Japan", "China", "Poland", "Hungary",
];
const HUBS: &[&str] = &[
    "Vienna", "Salzburg", "Innsbruck", "Graz", "Linz", "Klagenfurt", "Bregenz", "Hallstatt",
];
const DESTINATIONS: &[&str] = &[
    "Museums", "Alpine Skiing", "Hiking", "Wine Tours", "Concerts", "Lakes", "Christmas Markets",
    "Spa Resorts", "Castles", "Cycling",
];
const PALETTE: &[&str] = &[
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948", "#b07aa1", "#ff9da7",
    "#9c755f", "#bab0ac",
];

/// A CLI tool to generate random three-stage tourist flow documents
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_flows.json")]
    output: String,

    /// Number of origin countries in the first stage
    #[arg(long, default_value_t = 6)]
    origins: usize,

    /// Number of hub cities in the second stage
    #[arg(long, default_value_t = 4)]
    hubs: usize,

    /// Number of destination activities in the third stage
    #[arg(long, default_value_t = 5)]
    destinations: usize,

    /// Seed for reproducible output. A random seed is used and printed when omitted
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    for (flag, count, max) in [
        ("--origins", cli.origins, ORIGINS.len()),
        ("--hubs", cli.hubs, HUBS.len()),
        ("--destinations", cli.destinations, DESTINATIONS.len()),
    ] {
        if count == 0 || count > max {
            eprintln!("Error: {} must be between 1 and {} (got {})", flag, max, count);
            std::process::exit(1);
        }
    }

    let seed = cli.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    println!(
        "Generating flows: {} origin(s) -> {} hub(s) -> {} destination(s) (seed {})...",
        cli.origins, cli.hubs, cli.destinations, seed
    );

    let origins = ids("o", &ORIGINS[..cli.origins]);
    let hubs = ids("h", &HUBS[..cli.hubs]);
    let destinations = ids("d", &DESTINATIONS[..cli.destinations]);

    let first = generate_origin_links(&mut rng, &origins, &hubs);
    let hub_totals = incoming_totals(&hubs, &first);
    let second = generate_hub_links(&mut rng, &hubs, &hub_totals, &destinations);
    println!("-> Generated {} origin link(s) and {} hub link(s).", first.len(), second.len());

    let stages = vec![
        build_stage("Origin", &origins, &outgoing_totals(&origins, &first)),
        build_stage("City", &hubs, &hub_totals),
        build_stage("Activity", &destinations, &incoming_totals(&destinations, &second)),
    ];

    let document = FlowDocument {
        title: Some("Tourist flows".to_string()),
        stages,
        links: vec![first, second],
        layout: LayoutConfig::default(),
        highlight: HighlightStyle::default(),
    };

    fs::write(&cli.output, document.to_json()?)?;
    println!("Successfully generated and saved flow document to '{}'", cli.output);

    Ok(())
}

/// Pairs each label with a short stable id and a palette color.
fn ids(prefix: &str, labels: &[&str]) -> Vec<(String, String, String)> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            (
                format!("{}{}", prefix, i),
                label.to_string(),
                PALETTE[i % PALETTE.len()].to_string(),
            )
        })
        .collect()
}

/// Every origin sends whole-number flows to a random subset of hubs, at least one.
fn generate_origin_links(
    rng: &mut StdRng,
    origins: &[(String, String, String)],
    hubs: &[(String, String, String)],
) -> Vec<Link> {
    let mut links = Vec::new();
    for (origin, _, color) in origins {
        let guaranteed = rng.random_range(0..hubs.len());
        for (h, (hub, _, _)) in hubs.iter().enumerate() {
            if h != guaranteed && !rng.random_bool(0.6) {
                continue;
            }
            let value = rng.random_range(5..=120) as f64;
            links.push(Link::new(origin.clone(), hub.clone(), value, color.clone()));
        }
    }
    links
}

/// Splits every hub's incoming total across destinations so that the hub
/// column conserves flow exactly.
fn generate_hub_links(
    rng: &mut StdRng,
    hubs: &[(String, String, String)],
    totals: &[f64],
    destinations: &[(String, String, String)],
) -> Vec<Link> {
    let mut links = Vec::new();
    for ((hub, _, color), &total) in hubs.iter().zip(totals) {
        let mut remaining = total as u64;
        if remaining == 0 {
            continue;
        }
        let weights: Vec<u64> = destinations.iter().map(|_| rng.random_range(1..=10)).collect();
        let weight_sum: u64 = weights.iter().sum();

        for (d, (destination, _, _)) in destinations.iter().enumerate() {
            let value = if d + 1 == destinations.len() {
                remaining
            } else {
                (total as u64 * weights[d] / weight_sum).min(remaining)
            };
            remaining -= value;
            if value > 0 {
                links.push(Link::new(hub.clone(), destination.clone(), value as f64, color.clone()));
            }
        }
    }
    links
}

fn outgoing_totals(nodes: &[(String, String, String)], links: &[Link]) -> Vec<f64> {
    nodes
        .iter()
        .map(|(id, _, _)| links.iter().filter(|l| &l.source == id).map(|l| l.value).sum())
        .collect()
}

fn incoming_totals(nodes: &[(String, String, String)], links: &[Link]) -> Vec<f64> {
    nodes
        .iter()
        .map(|(id, _, _)| links.iter().filter(|l| &l.target == id).map(|l| l.value).sum())
        .collect()
}

fn build_stage(name: &str, nodes: &[(String, String, String)], totals: &[f64]) -> Stage {
    Stage::new(
        name,
        nodes
            .iter()
            .zip(totals)
            .map(|((id, label, color), &value)| Node::new(id.clone(), label.clone(), value, color.clone()))
            .collect(),
    )
}
