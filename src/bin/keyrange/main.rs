//! keyrange CLI - resolve range specs and count keyframes inside them.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use keyrange::anim::{KeyframeQuery, KeyframeStore, KeyframeTrack, QueryMode, QueryOutput, RangeArg};
use keyrange::core::{RangeSpec, SampleSequence, TimeSampling};
use keyrange::{Chrono, Error, Result};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (built ",
    env!("KEYRANGE_BUILD_DATE"),
    " ",
    env!("KEYRANGE_BUILD_TIME"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "keyrange", version, long_version = LONG_VERSION)]
#[command(about = "Resolve keyframe range specs and count the keys inside them")]
struct Cli {
    /// Show debug output (-vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only report errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the canonical lower:upper form of a range
    #[command(alias = "p")]
    Parse {
        /// Range: "a:b", "a:", ":b", ":" or a single position
        #[arg(allow_hyphen_values = true)]
        range: String,
        #[arg(short, long, default_value = "time", value_parser = parse_mode)]
        mode: QueryMode,
        /// Print {"lower": .., "upper": ..} JSON
        #[arg(long)]
        json: bool,
    },
    /// Count the keys inside a range
    #[command(alias = "c")]
    Count(RangeArgs),
    /// List the keys inside a range
    #[command(alias = "s")]
    Select(RangeArgs),
    /// Run a keyframe query against a JSON keyframe file
    #[command(alias = "q")]
    Query {
        /// Keyframe file: {"attr": [{"time": t, "value": v}, ...]}
        #[arg(short, long)]
        file: PathBuf,
        /// Attribute to query (all attributes when omitted)
        #[arg(short, long)]
        attr: Option<String>,
        /// Time range
        #[arg(short, long, allow_hyphen_values = true, conflicts_with = "index")]
        time: Option<String>,
        /// Index range
        #[arg(short, long, allow_hyphen_values = true)]
        index: Option<String>,
        /// keyframeCount|kc, timeChange|tc, valueChange|vc, indexValue|iv
        #[arg(short, long, default_value = "keyframeCount", value_parser = parse_output)]
        output: QueryOutput,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct RangeArgs {
    #[arg(allow_hyphen_values = true)]
    range: String,
    #[arg(short, long, default_value = "time", value_parser = parse_mode)]
    mode: QueryMode,
    /// Key times, comma separated
    #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true, required_unless_present = "uniform")]
    keys: Vec<Chrono>,
    /// Uniform key layout start:step:count
    #[arg(short, long, conflicts_with = "keys")]
    uniform: Option<String>,
    #[arg(long)]
    json: bool,
}

fn parse_mode(s: &str) -> std::result::Result<QueryMode, String> {
    s.parse().map_err(|e: Error| e.to_string())
}

fn parse_output(s: &str) -> std::result::Result<QueryOutput, String> {
    s.parse().map_err(|e: Error| e.to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// `KEYRANGE_LOG` wins over the verbosity flags.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_env("KEYRANGE_LOG").unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Parse { range, mode, json } => cmd_parse(&range, mode, json),
        Command::Count(args) => cmd_range(&args, false),
        Command::Select(args) => cmd_range(&args, true),
        Command::Query {
            file,
            attr,
            time,
            index,
            output,
            json,
        } => {
            let range = match (time, index) {
                (Some(t), _) => RangeArg::from_text(QueryMode::Time, &t),
                (None, Some(i)) => RangeArg::from_text(QueryMode::Index, &i),
                (None, None) => RangeArg::all(),
            };
            let store = KeyframeStore::load(&file)?;
            let query = KeyframeQuery {
                attribute: attr,
                range,
                output,
            };
            let result = query.run(&store)?;
            if json {
                println!("{}", serde_json::to_string(&result)?);
            } else {
                println!("{result}");
            }
            Ok(())
        }
    }
}

fn cmd_parse(text: &str, mode: QueryMode, json: bool) -> Result<()> {
    let (rendered, value) = match RangeArg::from_text(mode, text) {
        RangeArg::Time(spec) => {
            let range = spec.resolve()?;
            (range.to_string(), serde_json::to_value(range)?)
        }
        RangeArg::Index(spec) => {
            let range = spec.resolve()?;
            (range.to_string(), serde_json::to_value(range)?)
        }
    };
    if json {
        println!("{value}");
    } else {
        println!("{rendered}");
    }
    Ok(())
}

fn load_track(args: &RangeArgs) -> Result<KeyframeTrack> {
    match &args.uniform {
        Some(layout) => {
            let (start, step, count) = parse_uniform(layout)?;
            KeyframeTrack::from_sampling(&TimeSampling::uniform(step, start), count, |t| t)
        }
        None => {
            let sampling = TimeSampling::acyclic(args.keys.clone());
            KeyframeTrack::from_sampling(&sampling, args.keys.len(), |t| t)
        }
    }
}

/// Upper bound on keys generated by `--uniform`.
const MAX_UNIFORM_KEYS: usize = 10_000_000;

fn parse_uniform(layout: &str) -> Result<(Chrono, Chrono, usize)> {
    let bad = || Error::other(format!("--uniform expects start:step:count, got {layout:?}"));
    let parts: Vec<&str> = layout.split(':').map(str::trim).collect();
    let [start, step, count] = parts.as_slice() else {
        return Err(bad());
    };
    let start = start.parse::<Chrono>().map_err(|_| bad())?;
    let step = step.parse::<Chrono>().map_err(|_| bad())?;
    let count = count.parse::<usize>().map_err(|_| bad())?;
    if count > MAX_UNIFORM_KEYS {
        return Err(Error::other(format!(
            "--uniform count {count} exceeds the limit of {MAX_UNIFORM_KEYS} keys"
        )));
    }
    Ok((start, step, count))
}

fn cmd_range(args: &RangeArgs, select: bool) -> Result<()> {
    let track = load_track(args)?;
    tracing::debug!(keys = track.len(), mode = %args.mode, "counting {}", args.range);

    let value = match RangeArg::from_text(args.mode, &args.range) {
        RangeArg::Time(spec) => report(&track.times(), &spec, select)?,
        RangeArg::Index(spec) => report(&track.indices(), &spec, select)?,
    };
    if args.json {
        println!("{value}");
    } else if let serde_json::Value::Array(items) = &value {
        let line: Vec<String> = items.iter().map(|v| v.to_string()).collect();
        println!("{}", line.join(" "));
    } else {
        println!("{value}");
    }
    Ok(())
}

fn report<T>(samples: &[T], spec: &RangeSpec<T>, select: bool) -> Result<serde_json::Value>
where
    T: keyrange::SamplePosition + serde::Serialize,
{
    let range = spec.resolve()?;
    let seq = SampleSequence::new(samples)?;
    if select {
        Ok(serde_json::to_value(seq.select(&range))?)
    } else {
        Ok(serde_json::Value::from(seq.count(&range)))
    }
}
