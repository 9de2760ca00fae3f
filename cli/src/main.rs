use anyhow::{bail, Context, Result};
use chromatic::graph::connected_components;
use chromatic::io::dimacs;
use chromatic::ooc::{self, GraphAdaptor, LoadOptions, LogProgress, OocReport, DEFAULT_NEIGHBOUR_CAPACITY};
use chromatic::{solve, solve_by_components, Algorithm, Graph, Outcome, SolveOptions};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chromatic")]
#[command(version, about = "DSatur graph coloring", long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Color a DIMACS instance in memory
    Color {
        /// DIMACS `p edge` file
        file: PathBuf,

        /// Algorithm name, e.g. DSATUR or BNB_DSATUR_SEWELL
        #[arg(short, long, default_value = "DSATUR")]
        algorithm: Algorithm,

        /// Wall-clock budget in seconds
        #[arg(short, long, value_parser = parse_seconds)]
        time_limit: Option<Duration>,

        /// Print a JSON report instead of text
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Start exact search without a heuristic incumbent
        #[arg(long, default_value_t = false)]
        no_seed: bool,

        /// Solve every connected component separately
        #[arg(long, default_value_t = false)]
        components: bool,
    },

    /// Color a DSHUV1.0 file through a memory map
    RamFree {
        /// Binary graph file
        file: PathBuf,

        /// Vertices per parallel load chunk
        #[arg(long, default_value_t = LoadOptions::default().chunk_size)]
        chunk_size: usize,

        /// Print a JSON report instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Write a king-move grid instance in DSHUV1.0 format
    Grid {
        /// Output file
        out: PathBuf,

        #[arg(long)]
        width: u32,

        #[arg(long)]
        height: u32,
    },

    /// Convert a DIMACS instance to DSHUV1.0
    Convert {
        /// DIMACS input
        dimacs: PathBuf,

        /// Binary output
        out: PathBuf,
    },

    /// Print connected-component sizes of a DIMACS instance
    Components {
        /// DIMACS input
        file: PathBuf,
    },
}

#[derive(Serialize)]
struct ColorReport<'a> {
    file: &'a Path,
    algorithm: Algorithm,
    vertices: usize,
    edges: usize,
    colors: Option<usize>,
    timed_out: bool,
    valid: bool,
    elapsed_ms: u128,
}

#[derive(Serialize)]
struct RamFreeReport<'a> {
    file: &'a Path,
    #[serde(flatten)]
    report: &'a OocReport,
    elapsed_ms: u128,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Color {
            file,
            algorithm,
            time_limit,
            json,
            no_seed,
            components,
        } => {
            let options = SolveOptions {
                time_limit,
                seed_incumbent: !no_seed,
            };
            run_color(&file, algorithm, &options, json, components)?;
        }
        Commands::RamFree { file, chunk_size, json } => run_ram_free(&file, chunk_size, json)?,
        Commands::Grid { out, width, height } => {
            let writer = BufWriter::new(File::create(&out).with_context(|| format!("creating {}", out.display()))?);
            ooc::write_king_grid(width, height, writer).context("writing grid")?;
            info!(path = %out.display(), width, height, "grid written");
        }
        Commands::Convert { dimacs, out } => {
            let graph = read_dimacs(&dimacs)?;
            ooc::write_to_path(&graph, &out).with_context(|| format!("writing {}", out.display()))?;
            info!(
                path = %out.display(),
                vertices = graph.vertex_count(),
                edges = graph.edge_count(),
                "converted"
            );
        }
        Commands::Components { file } => {
            let graph = read_dimacs(&file)?;
            let mut sizes: Vec<usize> = connected_components(&graph).iter().map(Vec::len).collect();
            sizes.sort_unstable_by(|a, b| b.cmp(a));
            println!("{} components", sizes.len());
            for (i, size) in sizes.iter().enumerate() {
                println!("{i:>6}  {size}");
            }
        }
    }

    Ok(())
}

/// Parses a non-negative, finite number of seconds.
fn parse_seconds(arg: &str) -> std::result::Result<Duration, String> {
    let seconds: f64 = arg.parse().map_err(|err| format!("{arg:?} is not a number: {err}"))?;
    Duration::try_from_secs_f64(seconds).map_err(|err| format!("{arg:?} is not a valid duration: {err}"))
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_dimacs(path: &Path) -> Result<Graph> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    dimacs::read(BufReader::new(file)).with_context(|| format!("parsing {}", path.display()))
}

fn run_color(path: &Path, algorithm: Algorithm, options: &SolveOptions, json: bool, components: bool) -> Result<()> {
    let graph = read_dimacs(path)?;
    let start = Instant::now();
    let outcome = if components {
        solve_by_components(&graph, algorithm, options)
    } else {
        solve(&graph, algorithm, options)
    };
    let elapsed = start.elapsed();

    // A time-out still validates its incumbent; an absent one counts as valid.
    let valid = match &outcome {
        Outcome::Colored(coloring) | Outcome::TimedOut { incumbent: Some(coloring) } => {
            coloring.validate(&graph).is_ok()
        }
        Outcome::TimedOut { incumbent: None } => true,
    };
    let report = ColorReport {
        file: path,
        algorithm,
        vertices: graph.vertex_count(),
        edges: graph.edge_count(),
        colors: outcome.color_count(),
        timed_out: outcome.is_timed_out(),
        valid,
        elapsed_ms: elapsed.as_millis(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{}", path.display())?;
        writeln!(out, "  algorithm : {algorithm}")?;
        writeln!(out, "  vertices  : {}", report.vertices)?;
        writeln!(out, "  edges     : {}", report.edges)?;
        match &outcome {
            Outcome::Colored(coloring) => writeln!(out, "  colors    : {}", coloring.count())?,
            Outcome::TimedOut { incumbent: Some(best) } => {
                writeln!(out, "  colors    : time limit reached (best known {})", best.count())?;
            }
            Outcome::TimedOut { incumbent: None } => writeln!(out, "  colors    : time limit reached")?,
        }
        writeln!(out, "  time      : {elapsed:.2?}")?;
        writeln!(out, "  valid     : {valid}")?;
    }

    if !valid {
        bail!("{algorithm} produced an invalid coloring for {}", path.display());
    }
    Ok(())
}

fn run_ram_free(path: &Path, chunk_size: usize, json: bool) -> Result<()> {
    if chunk_size == 0 {
        bail!("--chunk-size must be positive");
    }
    let start = Instant::now();
    let adaptor = GraphAdaptor::open(path).with_context(|| format!("mapping {}", path.display()))?;
    info!(
        vertices = adaptor.vertex_count(),
        edges = adaptor.edge_count(),
        "graph mapped"
    );

    let options = LoadOptions { chunk_size };
    let progress = LogProgress::new();
    let report = match ooc::color::<DEFAULT_NEIGHBOUR_CAPACITY, _, _>(&adaptor, &options, &progress) {
        Ok(report) => report,
        Err(err) if err.is_unsupported_instance() => {
            warn!(%err, "instance exceeds the out-of-core representation");
            return Err(err).context("unsupported instance");
        }
        Err(err) => return Err(err).with_context(|| format!("coloring {}", path.display())),
    };
    let elapsed = start.elapsed();

    if json {
        let wrapped = RamFreeReport {
            file: path,
            report: &report,
            elapsed_ms: elapsed.as_millis(),
        };
        println!("{}", serde_json::to_string_pretty(&wrapped)?);
    } else {
        println!("{}", path.display());
        println!("  vertices  : {}", report.vertex_count);
        println!("  edges     : {}", report.edge_count);
        println!("  colors    : {}", report.colors);
        println!("  time      : {elapsed:.2?}");
        println!("  valid     : true");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seconds_accepts_fractions() {
        assert_eq!(parse_seconds("1.5"), Ok(Duration::from_millis(1500)));
        assert_eq!(parse_seconds("0"), Ok(Duration::ZERO));
    }

    #[test]
    fn test_parse_seconds_rejects_out_of_range() {
        for arg in ["-1", "NaN", "inf", "-inf", "1e30", "ten"] {
            assert!(parse_seconds(arg).is_err(), "{arg} accepted");
        }
    }

    #[test]
    fn test_negative_time_limit_is_a_usage_error() {
        let parsed = Cli::try_parse_from(["chromatic", "color", "g.col", "--time-limit", "-1"]);
        assert!(parsed.is_err());
        let parsed = Cli::try_parse_from(["chromatic", "color", "g.col", "--time-limit", "2.5"]).unwrap();
        match parsed.command {
            Commands::Color { time_limit, .. } => assert_eq!(time_limit, Some(Duration::from_millis(2500))),
            _ => panic!("expected the color command"),
        }
    }
}
