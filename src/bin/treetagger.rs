//! Command-line interface for treetagger
//! Runs the TreeTagger scripts, or rebuilds saved chunker output, and prints the result.
//!
//! Usage:
//!   treetagger tag [TEXT]...                 - Tag text (arguments, or stdin when none)
//!   treetagger chunk [TEXT]...               - Chunk text into a parse tree
//!   treetagger parse-output [PATH]           - Rebuild a tree from saved chunker output ('-' for stdin)
//!
//! Global options: --language, --home, --config, --timeout, --format, --verbose

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;
use treetagger::chunking::formats::serialize;
use treetagger::chunking::{parse_chunker_output, OutputFormat, TaggedToken};
use treetagger::config::{Loader, TreeTaggerConfig};
use treetagger::{Error, Language, TreeTagger, TreeTaggerChunker};

fn main() {
    let matches = build_cli().get_matches();
    init_logging(matches.get_flag("verbose"));

    if let Err(err) = run(&matches) {
        eprintln!("Error: {}", err);
        if let Error::ProcessLaunch { searched, .. } = &err {
            for path in searched {
                eprintln!("  searched: {}", path.display());
            }
        }
        process::exit(1);
    }
}

fn build_cli() -> Command {
    let text_arg = Arg::new("text")
        .help("Text to process; read from stdin when omitted")
        .num_args(0..)
        .index(1);

    Command::new("treetagger")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Run TreeTagger and rebuild its chunker output into parse trees")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("language")
                .long("language")
                .short('l')
                .help("TreeTagger language (default: english)")
                .value_parser(value_parser!(Language))
                .global(true),
        )
        .arg(
            Arg::new("home")
                .long("home")
                .help("Directory holding the TreeTagger cmd scripts")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the built-in defaults")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .help("Seconds to wait for TreeTagger before giving up")
                .value_parser(value_parser!(i64).range(1..))
                .global(true),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (default: bracketed)")
                .value_parser(value_parser!(OutputFormat))
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log debug output to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("tag")
                .about("Tag text with part-of-speech tags and lemmas")
                .arg(text_arg.clone()),
        )
        .subcommand(
            Command::new("chunk")
                .about("Chunk text and print the parse tree")
                .arg(text_arg),
        )
        .subcommand(
            Command::new("parse-output")
                .about("Rebuild a parse tree from saved chunker output")
                .arg(
                    Arg::new("path")
                        .help("File with chunker output, or '-' for stdin")
                        .default_value("-")
                        .index(1),
                ),
        )
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<TreeTaggerConfig, Error> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<PathBuf>("config") {
        loader = loader.with_file(path);
    }
    if let Some(language) = matches.get_one::<Language>("language") {
        loader = loader.set_override("tagger.language", language.name())?;
    }
    if let Some(home) = matches.get_one::<PathBuf>("home") {
        loader = loader.set_override("tagger.home", home.display().to_string())?;
    }
    if let Some(timeout) = matches.get_one::<i64>("timeout") {
        loader = loader.set_override("tagger.timeout_secs", *timeout)?;
    }
    if let Some(format) = matches.get_one::<OutputFormat>("format") {
        loader = loader.set_override("output.format", format.to_string())?;
    }
    Ok(loader.build()?)
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let config = load_config(matches)?;
    let format = config.output.format;

    match matches.subcommand() {
        Some(("tag", sub)) => {
            let text = text_input(sub)?;
            let tagger = TreeTagger::from_config(&config.tagger)?;
            let tokens = tagger.tag(&text)?;
            print!("{}", format_tokens(&tokens, format)?);
        }
        Some(("chunk", sub)) => {
            let text = text_input(sub)?;
            let chunker = TreeTaggerChunker::from_config(&config.tagger)?;
            let tree = chunker.parse_text(&text)?;
            println!("{}", serialize(&tree, format)?.trim_end());
        }
        Some(("parse-output", sub)) => {
            let path = sub
                .get_one::<String>("path")
                .map(String::as_str)
                .unwrap_or("-");
            let output = if path == "-" {
                read_stdin()?
            } else {
                std::fs::read_to_string(path)?
            };
            let tree = parse_chunker_output(&output)?;
            println!("{}", serialize(&tree, format)?.trim_end());
        }
        _ => unreachable!("clap requires a subcommand"),
    }
    Ok(())
}

fn text_input(matches: &ArgMatches) -> Result<String, Error> {
    match matches.get_many::<String>("text") {
        Some(words) => Ok(words.map(String::as_str).collect::<Vec<_>>().join(" ")),
        None => read_stdin(),
    }
}

fn read_stdin() -> Result<String, Error> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// Tokens print one per line in TreeTagger's own layout, or as a serde document.
fn format_tokens(tokens: &[TaggedToken], format: OutputFormat) -> Result<String, Error> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(tokens)
            .map(|json| format!("{json}\n"))
            .map_err(|e| Error::Serialization(e.to_string())),
        OutputFormat::Yaml => {
            serde_yaml::to_string(tokens).map_err(|e| Error::Serialization(e.to_string()))
        }
        OutputFormat::Bracketed | OutputFormat::Treeviz => Ok(tokens
            .iter()
            .map(|token| match &token.lemma {
                Some(lemma) => format!("{}\t{}\t{}\n", token.surface, token.tag, lemma),
                None => format!("{}\t{}\n", token.surface, token.tag),
            })
            .collect()),
    }
}
