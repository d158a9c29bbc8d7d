//! Cache hierarchy simulator CLI.
//!
//! This binary replays a memory trace through a configured two-level cache
//! hierarchy and prints the configuration dump and statistics report. It
//! performs:
//! 1. **Config loading:** JSON file via `--config`, plus flag overrides.
//! 2. **Replay:** Trace from a file argument or stdin.
//! 3. **Reporting:** Configuration dump, hit/miss report, cycle totals.

use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::process;

use cachesim_core::config::{HierarchyConfig, ReplacementPolicy, StoreAllocation};
use cachesim_core::replay::RunReport;
use cachesim_core::run_trace;

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Two-level cache hierarchy simulator",
    long_about = "Replay a memory trace through a two-level set-associative cache \
                  hierarchy and report hit/miss statistics and cycle costs.\n\n\
                  Trace format: one access per line, `L <hexaddr>` for loads and \
                  `S <hexaddr>` for stores (`r`/`w` also accepted). Lines starting \
                  with `#` are comments.\n\nExamples:\n  \
                  cachesim traces/qsort.trace\n  \
                  cachesim --policy SRRIP --l2-size 1048576 traces/qsort.trace\n  \
                  generator | cachesim --config hierarchy.json"
)]
struct Cli {
    /// Trace file to replay; stdin when omitted.
    trace: Option<String>,

    /// JSON hierarchy configuration file.
    #[arg(short, long)]
    config: Option<String>,

    /// Replacement policy: LRU, RANDOM, LFU, LIP, or SRRIP.
    #[arg(short, long)]
    policy: Option<String>,

    /// L1 cache size in bytes.
    #[arg(long)]
    l1_size: Option<usize>,

    /// L1 block size in bytes.
    #[arg(long)]
    l1_block: Option<usize>,

    /// L1 associativity.
    #[arg(long)]
    l1_ways: Option<usize>,

    /// L2 cache size in bytes.
    #[arg(long)]
    l2_size: Option<usize>,

    /// L2 block size in bytes.
    #[arg(long)]
    l2_block: Option<usize>,

    /// L2 associativity.
    #[arg(long)]
    l2_ways: Option<usize>,

    /// Disable the L2 inclusion invariant.
    #[arg(long)]
    no_inclusive: bool,

    /// Stores that miss L1 do not allocate into it.
    #[arg(long)]
    store_no_allocate: bool,

    /// Label printed in the configuration dump.
    #[arg(long)]
    label: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli);

    let report = match cli.trace.as_deref() {
        Some(path) if path != "-" => {
            let file = File::open(path).unwrap_or_else(|e| {
                eprintln!("Error: cannot open trace '{path}': {e}");
                process::exit(1);
            });
            run(&config, BufReader::new(file))
        }
        _ => run(&config, BufReader::new(io::stdin().lock())),
    };

    print!("{}", report.configuration);
    println!();
    print!("{}", report.statistics);
    println!(
        "Replayed {} accesses in {} simulated cycles",
        report.summary.events, report.summary.cycles
    );
}

/// Replays the trace, exiting with a message on any engine failure.
fn run(config: &HierarchyConfig, reader: impl io::BufRead) -> RunReport {
    run_trace(config, reader).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    })
}

/// Builds the hierarchy configuration from the JSON file (if given) and the
/// individual flag overrides.
fn build_config(cli: &Cli) -> HierarchyConfig {
    let mut config = match cli.config.as_deref() {
        Some(path) => {
            let mut text = String::new();
            let mut file = File::open(path).unwrap_or_else(|e| {
                eprintln!("Error: cannot open config '{path}': {e}");
                process::exit(1);
            });
            if let Err(e) = file.read_to_string(&mut text) {
                eprintln!("Error: cannot read config '{path}': {e}");
                process::exit(1);
            }
            serde_json::from_str(&text).unwrap_or_else(|e| {
                eprintln!("Error: bad config '{path}': {e}");
                process::exit(1);
            })
        }
        None => HierarchyConfig::default(),
    };

    if let Some(policy) = cli.policy.as_deref() {
        config.policy = parse_policy(policy);
    }
    if let Some(v) = cli.l1_size {
        config.l1.size_bytes = v;
    }
    if let Some(v) = cli.l1_block {
        config.l1.line_bytes = v;
    }
    if let Some(v) = cli.l1_ways {
        config.l1.ways = v;
    }
    if let Some(v) = cli.l2_size {
        config.l2.size_bytes = v;
    }
    if let Some(v) = cli.l2_block {
        config.l2.line_bytes = v;
    }
    if let Some(v) = cli.l2_ways {
        config.l2.ways = v;
    }
    if cli.no_inclusive {
        config.inclusive = false;
    }
    if cli.store_no_allocate {
        config.store_allocation = StoreAllocation::NoAllocate;
    }
    if let Some(label) = cli.label.clone() {
        config.label = label;
    }

    config
}

/// Maps a policy name to its enum variant, exiting on unknown names.
fn parse_policy(name: &str) -> ReplacementPolicy {
    match name.to_ascii_uppercase().as_str() {
        "LRU" => ReplacementPolicy::Lru,
        "RANDOM" => ReplacementPolicy::Random,
        "LFU" => ReplacementPolicy::Lfu,
        "LIP" => ReplacementPolicy::Lip,
        "SRRIP" => ReplacementPolicy::Srrip,
        _ => {
            eprintln!("Error: unknown policy '{name}' (expected LRU, RANDOM, LFU, LIP, SRRIP)");
            process::exit(1);
        }
    }
}
