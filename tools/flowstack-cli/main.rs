use clap::{Parser, ValueEnum};
use flowstack::prelude::*;
use std::fs;
use std::time::Instant;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// A standalone SVG document
    Svg,
    /// The positioned scene primitives as JSON
    Json,
}

/// Lays out a multi-stage flow document and renders it as a Sankey diagram
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the flow document JSON file
    document_path: String,

    /// Where to write the output. Prints to stdout when omitted
    #[arg(short, long)]
    output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
    format: OutputFormat,

    /// Canvas width, overrides the document's layout section
    #[arg(long)]
    width: Option<f64>,

    /// Canvas height, overrides the document's layout section
    #[arg(long)]
    height: Option<f64>,

    /// Gap between sibling nodes, overrides the document's layout section
    #[arg(long)]
    gap: Option<f64>,

    /// Node id to highlight
    #[arg(long)]
    focus: Option<String>,

    /// SVG background color
    #[arg(long)]
    background: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    let total_start = Instant::now();

    // --- 1. Document Loading ---
    let load_start = Instant::now();
    let document = FlowDocument::from_file(&cli.document_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to load flow document '{}': {}",
            &cli.document_path, e
        ))
    });
    let title = document.title.clone();
    let style = document.highlight;
    let config = resolve_config(&cli, document.layout.clone());
    let graph = document
        .into_flow_graph()
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid flow graph: {}", e)));
    let load_duration = load_start.elapsed();

    // --- 2. Layout ---
    eprintln!(
        "Laying out {} stage(s), {} node(s), {} link(s) at {}x{}...",
        graph.stage_count(),
        graph.node_count(),
        graph.link_count(),
        config.width,
        config.height
    );
    let layout_start = Instant::now();
    let mut diagram = Diagram::new(graph, LayoutEngine::new(config)).with_style(style);
    let layout_duration = layout_start.elapsed();

    for transition in 0..diagram.graph().stage_count().saturating_sub(1) {
        eprintln!(
            "  Transition {}: {} ribbon(s)",
            transition + 1,
            diagram.layout().links_for(transition).count()
        );
    }

    if diagram.diagnostics().is_empty() {
        eprintln!("Layout finished without warnings.");
    } else {
        eprintln!("\n--- Diagnostics ({}) ---", diagram.diagnostics().len());
        for diagnostic in diagram.diagnostics() {
            eprintln!("  -> {}", diagnostic);
        }
    }

    // --- 3. Highlight ---
    if let Some(focus) = cli.focus.as_deref() {
        diagram.set_focus(Some(focus));
        let highlighted = diagram
            .weights()
            .links
            .iter()
            .filter(|&&w| w >= style.full)
            .count();
        eprintln!(
            "Focused '{}': {} of {} ribbon(s) highlighted",
            focus,
            highlighted,
            diagram.weights().links.len()
        );
    }

    // --- 4. Rendering ---
    let render_start = Instant::now();
    let mut scene = diagram.scene();
    if let Some(title) = title {
        scene = scene.with_title(title);
    }
    let output = match cli.format {
        OutputFormat::Svg => {
            let mut renderer = SvgRenderer::default();
            if let Some(background) = cli.background.clone() {
                renderer = renderer.with_background(background);
            }
            renderer.render(&scene)
        }
        OutputFormat::Json => scene.to_json(),
    }
    .unwrap_or_else(|e| exit_with_error(&format!("Rendering failed: {}", e)));
    let render_duration = render_start.elapsed();

    match &cli.output {
        Some(path) => {
            fs::write(path, &output).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write output '{}': {}", path, e))
            });
            eprintln!("Wrote {:?} output to '{}'", cli.format, path);
        }
        None => print!("{}", output),
    }

    // --- 5. Summary ---
    let total_duration = total_start.elapsed();
    eprintln!("\n--- Performance Summary ---");
    eprintln!("Document Loading:     {:?}", load_duration);
    eprintln!("Layout & Routing:     {:?}", layout_duration);
    eprintln!("Rendering:            {:?}", render_duration);
    eprintln!("-----------------------------");
    eprintln!("Total Execution:      {:?}", total_duration);
    eprintln!();
}

/// Applies command line overrides on top of the document's layout section.
fn resolve_config(cli: &Cli, mut config: LayoutConfig) -> LayoutConfig {
    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    if let Some(gap) = cli.gap {
        config.gap = gap;
    }
    config
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
