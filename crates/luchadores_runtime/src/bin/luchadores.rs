//! Luchadores CLI entry point.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use luchadores_debug::{EventFilter, FormatConfig, OutputFormat};
use luchadores_engine::{EngineConfig, MAX_COMBO_DEPTH};
use luchadores_runtime::{Session, SessionConfig, error_report};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    files: Vec<PathBuf>,
    show_help: bool,
    show_version: bool,
    check_only: bool,
    print_pretty: bool,
    json: bool,
    quiet: bool,
    stats: bool,
    verbosity: u8,
    events: Option<EventFilter>,
    max_combo_depth: Option<u32>,
    max_combos_per_turn: Option<u32>,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-c" | "--check" => config.check_only = true,
            "-j" | "--json" => config.json = true,
            "-q" | "--quiet" => config.quiet = true,
            "-s" | "--stats" => config.stats = true,
            "-v" | "--verbose" => config.verbosity = config.verbosity.saturating_add(1),
            "-vv" => config.verbosity = config.verbosity.saturating_add(2),
            "--pretty" => config.print_pretty = true,
            "--events" => {
                i += 1;
                if i >= args.len() {
                    return Err("--events requires a value".into());
                }
                config.events = Some(EventFilter::parse_types(&args[i])?);
            }
            "--max-combo-depth" => {
                i += 1;
                if i >= args.len() {
                    return Err("--max-combo-depth requires a value".into());
                }
                config.max_combo_depth = Some(parse_depth(&args[i])?);
            }
            "--max-combos-per-turn" => {
                i += 1;
                if i >= args.len() {
                    return Err("--max-combos-per-turn requires a value".into());
                }
                config.max_combos_per_turn = Some(
                    args[i]
                        .parse()
                        .map_err(|_| format!("invalid --max-combos-per-turn value: {}", args[i]))?,
                );
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            path => config.files.push(PathBuf::from(path)),
        }
        i += 1;
    }

    Ok(config)
}

fn parse_depth(value: &str) -> Result<u32, String> {
    match value.parse::<u32>() {
        Ok(depth) if depth <= MAX_COMBO_DEPTH => Ok(depth),
        Ok(_) => Err(format!(
            "--max-combo-depth must be at most {MAX_COMBO_DEPTH}, got {value}"
        )),
        Err(_) => Err(format!("invalid --max-combo-depth value: {value}")),
    }
}

fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn session_config(config: &CliConfig) -> SessionConfig {
    let mut engine = EngineConfig::new();
    if let Some(depth) = config.max_combo_depth {
        engine = engine.with_max_combo_depth(depth);
    }
    if let Some(budget) = config.max_combos_per_turn {
        engine = engine.with_max_combos_per_turn(budget);
    }

    let format = FormatConfig::new()
        .with_format(if config.json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        })
        .with_filter(config.events.clone().unwrap_or_default())
        .with_quiet(config.quiet)
        .with_stats(config.stats);

    SessionConfig::new().with_engine(engine).with_format(format)
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("luchadores {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if config.files.is_empty() {
        return Err("no input files (see --help)".into());
    }

    init_logging(config.verbosity);
    let session = Session::new(session_config(&config));
    let many = config.files.len() > 1;

    for path in &config.files {
        let origin = path.display().to_string();
        let loaded = session
            .load_file(path)
            .map_err(|e| error_report(&origin, &e))?;

        if many && !config.json {
            println!("\x1b[1;36m=== {origin} ===\x1b[0m");
        }

        if config.check_only {
            println!("{}", Session::check_report(&loaded));
            continue;
        }

        if config.print_pretty {
            print!("{}", Session::canonical_source(&loaded));
            continue;
        }

        let combat = session.run(&loaded).map_err(|e| error_report(&origin, &e))?;
        for line in session.render(&combat) {
            println!("{line}");
        }
    }

    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mLuchadores\x1b[0m - Scripted turn-based combat

\x1b[1mUSAGE:\x1b[0m
    luchadores [OPTIONS] FILES...

\x1b[1mARGUMENTS:\x1b[0m
    FILES...    Combat programs to run, in order

\x1b[1mOPTIONS:\x1b[0m
    -h, --help         Print help information
    -V, --version      Print version information
    -c, --check        Parse and validate only, print a summary
    --pretty           Print the program as canonical source, do not run

\x1b[1mOUTPUT OPTIONS:\x1b[0m
    -j, --json         Print events and result as JSON lines
    -q, --quiet        Print only the final result
    -s, --stats        Append per-fighter statistics (text output)
    --events a,b       Only show these event types

\x1b[1mENGINE OPTIONS:\x1b[0m
    --max-combo-depth N      Abort combos nested deeper than N (default 32, at most 256)
    --max-combos-per-turn N  End a turn after it enters N combos (default 1024)

\x1b[1mDEBUG OPTIONS:\x1b[0m
    -v, --verbose      Log engine progress to stderr (repeat for more)
                       Without -v, RUST_LOG selects the log filter

\x1b[1mEVENT TYPES:\x1b[0m
    turn-start, action-applied, action-failed, combo-executed,
    combo-fallback, block-used, unknown-action, combo-aborted, combat-end

\x1b[1mEXAMPLES:\x1b[0m
    luchadores pelea.txt                  Run a combat
    luchadores -c pelea.txt               Check a program without running it
    luchadores -j pelea.txt               Machine-readable output
    luchadores --events combo-fallback,combo-aborted pelea.txt
    luchadores -q demos/*.txt             Results only, several programs"
    );
}
