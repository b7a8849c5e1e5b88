use std::path::PathBuf;
use std::thread;

use swarm_pso::prelude::*;
use tracing_subscriber::EnvFilter;

fn usage() -> ! {
    eprintln!(
        "Usage: swarm_pso_run <run_file> [steps] [--seed N] [--particles N] [--json] [--realtime]"
    );
    eprintln!();
    eprintln!("Loads <run_file> when it exists, otherwise starts a fresh run,");
    eprintln!("performs [steps] iterations (default 1) and saves back to <run_file>.");
    eprintln!();
    eprintln!("Example:");
    eprintln!("  swarm_pso_run cycles.csv 50 --seed 7");
    std::process::exit(2);
}

struct Options {
    run_file: PathBuf,
    steps: usize,
    seed: Option<u64>,
    particles: Option<usize>,
    json: bool,
    realtime: bool,
}

fn parse_args() -> Options {
    let mut args = std::env::args().skip(1);
    let mut options = Options {
        run_file: PathBuf::new(),
        steps: 1,
        seed: None,
        particles: None,
        json: false,
        realtime: false,
    };
    let mut positional = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => options.seed = Some(parse_or_usage(args.next())),
            "--particles" => options.particles = Some(parse_or_usage(args.next())),
            "--json" => options.json = true,
            "--realtime" => options.realtime = true,
            "-h" | "--help" => usage(),
            _ if arg.starts_with("--") => usage(),
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    match positional.next() {
        Some(path) => options.run_file = PathBuf::from(path),
        None => usage(),
    }
    if let Some(steps) = positional.next() {
        options.steps = parse_or_usage(Some(steps));
    }
    if positional.next().is_some() {
        usage();
    }

    options
}

fn parse_or_usage<T: std::str::FromStr>(value: Option<String>) -> T {
    match value.as_deref().map(|s| s.parse::<T>()) {
        Some(Ok(v)) => v,
        _ => usage(),
    }
}

fn run(options: &Options) -> Result<StatusSummary, RunError> {
    let mut optimiser =
        build_optimiser(AlgorithmKind::default(), RunConfig::default(), options.seed)?;

    if options.run_file.exists() {
        let report = optimiser.load(&options.run_file)?;
        for skipped in &report.skipped {
            eprintln!("warning: {skipped}");
        }
    }

    if let Some(count) = options.particles {
        optimiser.reconfigure(count)?;
    }

    let mut timer = StepTimer::new(SystemClock::new());
    for _ in 0..options.steps {
        if options.realtime {
            let interval = optimiser.current_state().1.step_interval_seconds;
            while !timer.poll(interval) {
                thread::sleep(timer.remaining(interval));
            }
        }
        if !optimiser.step().advanced() {
            break;
        }
    }

    optimiser.save(&options.run_file)?;
    Ok(optimiser.status())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let options = parse_args();

    let status = match run(&options) {
        Ok(status) => status,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    if options.json {
        match serde_json::to_string(&status) {
            Ok(line) => println!("{line}"),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
    } else {
        println!("{status}");
    }
}
