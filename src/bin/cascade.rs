//! cascade: generate a random layered graph and print its cascade stages
//!
//! Examples:
//!   cascade --upper 5 --lower -5 --mode direct
//!   cascade --mode "All Predecessors" --seed 42 --format dot --out stages.dot
//!   cascade --root-seed span --format json

use anyhow::{Context, Result};
use cascade_core::render;
use cascade_core::{
    run, stages, CascadeReport, CascadeRequest, EntropySource, GeneratorConfig, Layout,
    LayoutConfig, RootSeed, Stage,
};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Simulate a cascade over a random layered DAG
#[derive(Parser, Debug)]
#[command(name = "cascade")]
#[command(version, about, long_about = None)]
struct Args {
    /// Upper limit of the states (must not be 0)
    #[arg(long, default_value = "5", allow_hyphen_values = true)]
    upper: String,

    /// Lower limit of the states (must not be 0)
    #[arg(long, default_value = "-5", allow_hyphen_values = true)]
    lower: String,

    /// How far back: "direct" or "all" predecessors
    #[arg(long, default_value = "direct")]
    mode: String,

    /// Root value policy
    #[arg(long, value_enum, default_value_t = RootSeedArg::Discrete)]
    root_seed: RootSeedArg,

    /// Graph shape preset
    #[arg(long, value_enum, default_value_t = ShapeArg::Default)]
    shape: ShapeArg,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Render only this stage
    #[arg(long)]
    stage: Option<usize>,

    /// Write output to a file instead of stdout
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RootSeedArg {
    /// One of {1, 2, -1, -2}
    Discrete,
    /// Any non-zero value in [lower, upper)
    Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ShapeArg {
    Default,
    Compact,
    Dense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Dot,
    Json,
}

fn build_request(args: &Args) -> Result<CascadeRequest> {
    let request = CascadeRequest::parse(&args.upper, &args.lower, &args.mode)
        .context("Input Error")?;
    let root_seed = match args.root_seed {
        RootSeedArg::Discrete => RootSeed::default(),
        RootSeedArg::Span => RootSeed::span_of(&request.value_range().context("Input Error")?),
    };
    let generator = match args.shape {
        ShapeArg::Default => GeneratorConfig::default(),
        ShapeArg::Compact => GeneratorConfig::compact(),
        ShapeArg::Dense => GeneratorConfig::dense(),
    };
    Ok(request.with_root_seed(root_seed).with_generator(generator))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .init();

    let request = build_request(&args)?;
    let mut rng = match args.seed {
        Some(seed) => EntropySource::seeded(seed),
        None => EntropySource::from_entropy(),
    };
    let graph = run(&request, &mut rng).context("Failed to generate cascade")?;

    let selected: Vec<Stage> = match args.stage {
        Some(index) if index < graph.layers().len() => vec![Stage::build(&graph, index)],
        Some(index) => anyhow::bail!(
            "stage {} does not exist, graph has stages 0..={}",
            index,
            graph.layers().len() - 1
        ),
        None => stages(&graph),
    };

    let output = match args.format {
        Format::Text => {
            let mut out = String::new();
            for stage in &selected {
                out.push_str(&render::text(stage, &graph));
                out.push('\n');
            }
            out.push_str(&render::legend());
            out.push_str(&format!("\n{}\nfingerprint: {}\n", graph.summary(), graph.fingerprint()));
            out
        }
        Format::Dot => {
            let layout = Layout::compute(graph.skeleton(), &LayoutConfig::default());
            selected
                .iter()
                .map(|stage| render::dot(stage, &graph, &layout))
                .collect::<Vec<_>>()
                .join("\n")
        }
        Format::Json => CascadeReport::new(&request, &graph, args.seed)
            .with_stages(selected)
            .to_json()?,
    };

    match &args.out {
        Some(path) => {
            std::fs::write(path, output)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("  Saved to {}", path.display());
        }
        None => print!("{}", output),
    }

    Ok(())
}
