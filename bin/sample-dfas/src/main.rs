use clap::Parser;
use dfa_samplers::{prelude::*, show_duration};
use itertools::{Itertools, MinMaxResult};
use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info, trace};
use tracing_subscriber::{filter, prelude::*};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum Kind {
    Reach,
    ReachAvoid,
    Rad,
}

/// Samples random reach, reach-avoid and mutated reach-avoid automata.
#[derive(Debug, Clone, clap::Parser)]
struct Cli {
    #[clap(short = 'k', long, value_enum, default_value = "rad")]
    kind: Kind,
    #[clap(short = 't', long, default_value = "10")]
    tokens: usize,
    #[clap(short = 's', long, default_value = "6")]
    max_size: usize,
    #[clap(short = 'p', long)]
    skew: Option<f64>,
    #[clap(long, default_value = "0.9")]
    stutter: f64,
    #[clap(short = 'm', long, default_value = "5")]
    max_mutations: usize,
    #[clap(short = 'n', long, default_value = "1")]
    count: usize,
    #[clap(long)]
    seed: Option<u64>,
    /// Only print the number of digits needed for encoding any sampled automaton.
    #[clap(long)]
    bound: bool,
    #[clap(short = 'v', action = clap::ArgAction::Count)]
    verbosity: u8,
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => filter::LevelFilter::WARN,
        1 => filter::LevelFilter::INFO,
        2 => filter::LevelFilter::DEBUG,
        _ => filter::LevelFilter::TRACE,
    };

    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

fn run<S: Sampler<Automaton = Dfa>>(sampler: S, cli: &Cli) {
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let start = std::time::Instant::now();
    let mut samples = sampler.samples(rng);
    let mut sizes = vec![];
    for (i, dfa) in samples.by_ref().take(cli.count).enumerate() {
        debug!("sample {i} accepts {}", dfa.give_word().show());
        println!("# sample {i} ({} states)\n{}", dfa.size(), dfa.show());
        sizes.push(dfa.size());
    }

    let mean_size = sizes.iter().sum::<usize>() as f64 / sizes.len().max(1) as f64;
    let mean_attempts = samples.attempts() as f64 / samples.drawn().max(1) as f64;
    let range = match sizes.iter().minmax() {
        MinMaxResult::NoElements => "-".to_string(),
        MinMaxResult::OneElement(size) => size.to_string(),
        MinMaxResult::MinMax(min, max) => format!("{min}..={max}"),
    };
    println!(
        "# {} samples, sizes {range}, mean size {mean_size:.2}, mean attempts {mean_attempts:.2}",
        samples.drawn()
    );
    info!("sampling took {}", show_duration(start.elapsed()));
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbosity);

    let config = match SamplerConfig::builder()
        .n_tokens(cli.tokens)
        .max_size(cli.max_size)
        .maybe_skew(cli.skew)
        .prob_stutter(cli.stutter)
        .max_mutations(cli.max_mutations)
        .build()
    {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            std::process::exit(2);
        }
    };

    if cli.bound {
        println!("{}", config.size_bound());
        return;
    }

    debug!("sampling {} automata with {config:?}", cli.count);
    match cli.kind {
        Kind::Reach => run(ReachSampler::<Dfa>::new(config), &cli),
        Kind::ReachAvoid => run(ReachAvoidSampler::<Dfa>::new(config), &cli),
        Kind::Rad => match RadSampler::<Dfa>::new(config) {
            Ok(sampler) => run(sampler, &cli),
            Err(err) => {
                eprintln!("invalid configuration: {err}");
                std::process::exit(2);
            }
        },
    }
}
