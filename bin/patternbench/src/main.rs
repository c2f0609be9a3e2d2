//! patternbench - translate LTL property patterns and benchmark a monitor tool
//!
//! `translate` turns the raw corpus into a record file, `run` drives the
//! external tool over a record file, `pipeline` does both in one go.

use std::env;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};

use patternbench::config::loader::ConfigLoader;
use patternbench::config::{AnalysisMode, Config, ExistingStatsPolicy, FailurePolicy};
use patternbench::models::InputMode;
use patternbench::pipeline;
use patternbench::translator::HeaderBinding;
use patternbench::RunSummary;

/// Default record file, next to the corpus download of the classic setup
const DEFAULT_RECORDS_PATH: &str = "specs.ltl";
/// Default statistics file
const DEFAULT_STATS_PATH: &str = "statistics.csv";

#[derive(Parser)]
#[command(name = "patternbench")]
#[command(about = "Translate LTL property patterns and run a monitor construction tool over them")]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a raw pattern corpus into a normalized record file
    Translate {
        /// Raw corpus, e.g. rv_properties.txt
        corpus: PathBuf,

        #[command(flatten)]
        translate: TranslateArgs,
    },

    /// Run the external tool once per line of a record file
    Run {
        /// Record file produced by `translate`, or one formula per line with --raw
        input: PathBuf,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Translate a corpus and run the tool over the result
    Pipeline {
        /// Raw corpus, e.g. rv_properties.txt
        corpus: PathBuf,

        #[command(flatten)]
        translate: TranslateArgs,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Write the default configuration to a file
    InitConfig {
        /// Destination; the extension picks TOML or JSON
        path: PathBuf,
    },
}

#[derive(Args)]
struct TranslateArgs {
    /// Record file to write
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_RECORDS_PATH)]
    output: PathBuf,

    /// How far a pattern header reaches: one-to-one or one-to-many
    #[arg(long, value_name = "BINDING")]
    header_binding: Option<HeaderBinding>,
}

#[derive(Args)]
struct RunArgs {
    /// Statistics file the tool appends to
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_STATS_PATH)]
    stats: PathBuf,

    /// Treat every input line as a bare formula
    #[arg(long)]
    raw: bool,

    /// Skip items whose statistics row is already complete
    #[arg(long)]
    resume: bool,

    /// What to do with an existing statistics file: append, clear or fail
    #[arg(long, value_name = "POLICY")]
    on_existing: Option<ExistingStatsPolicy>,

    /// Analysis mode passed to the tool: rltl, ltl or both
    #[arg(long, value_name = "MODE")]
    mode: Option<AnalysisMode>,

    /// Stop the run when the tool exits non-zero
    #[arg(long)]
    abort_on_failure: bool,

    /// Print a progress line every N items
    #[arg(long, value_name = "N")]
    progress_every: Option<usize>,
}

impl TranslateArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(binding) = self.header_binding {
            config.translator.header_binding = binding;
        }
    }
}

impl RunArgs {
    fn apply(&self, config: &mut Config) {
        if self.raw {
            config.driver.input_mode = InputMode::Raw;
        }
        if self.resume {
            config.driver.resume = true;
        }
        if let Some(policy) = self.on_existing {
            config.driver.existing_stats = policy;
        }
        if let Some(mode) = self.mode {
            config.tool.mode = mode;
        }
        if self.abort_on_failure {
            config.tool.on_failure = FailurePolicy::Abort;
        }
        if let Some(every) = self.progress_every {
            config.driver.progress_interval = every;
        }
    }
}

/// Install the tracing subscriber; logs go to stderr so progress stays on stdout
fn init_logging(debug: bool) {
    let log_level = if debug
        || env::var("PATTERNBENCH_DEBUG").map_or(false, |v| v == "1" || v.to_lowercase() == "true")
    {
        "debug"
    } else {
        "info"
    };

    let env_filter = env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

fn translate(corpus: &Path, args: &TranslateArgs, config: &Config) -> anyhow::Result<()> {
    let summary = pipeline::translate_file(corpus, &args.output, &config.translator)
        .with_context(|| format!("translating {}", corpus.display()))?;
    println!(
        "Translated {} properties into {}.",
        summary.records_emitted,
        args.output.display()
    );
    Ok(())
}

fn run(input: &Path, args: &RunArgs, config: &Config) -> anyhow::Result<RunSummary> {
    println!("Reading LTL formulas from {}.", input.display());
    let summary = pipeline::run_file(input, &args.stats, config)
        .with_context(|| format!("running the tool over {}", input.display()))?;
    info!(
        "{} of {} items processed in {}s",
        summary.invoked,
        summary.total,
        summary.elapsed().num_seconds()
    );
    Ok(summary)
}

fn execute(cli: Cli) -> anyhow::Result<()> {
    let mut config = patternbench::init(cli.config.as_deref())?;

    match &cli.command {
        Commands::Translate { corpus, translate: args } => {
            args.apply(&mut config);
            config.validate()?;
            translate(corpus, args, &config)?;
        }
        Commands::Run { input, run: args } => {
            args.apply(&mut config);
            config.validate()?;
            run(input, args, &config)?;
            println!("All formulas processed. Good bye!");
        }
        Commands::Pipeline {
            corpus,
            translate: translate_args,
            run: run_args,
        } => {
            translate_args.apply(&mut config);
            run_args.apply(&mut config);
            // The freshly written record file is always in record form
            config.driver.input_mode = InputMode::Records;
            config.validate()?;
            translate(corpus, translate_args, &config)?;
            run(&translate_args.output, run_args, &config)?;
            println!("All formulas processed. Good bye!");
        }
        Commands::InitConfig { path } => {
            ConfigLoader::with_search_paths(Vec::new())
                .save_to_path(&Config::default(), path)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Default configuration written to {}.", path.display());
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);
    debug!("Debug mode enabled");

    if let Err(e) = execute(cli) {
        eprintln!("patternbench: {:#}", e);
        process::exit(1);
    }
}
