// Command-line interface for tlmd
//
// This binary converts between the markdown authors type and the platform's rich-text
// representation: plain text plus message entities, exchanged as JSON.
//
// Usage:
//  tlmd parse [<input>] [--output <file>] [--compact]   - Markdown → {"text", "entities"} JSON
//  tlmd unparse [<input>] [--output <file>]             - {"text", "entities"} JSON → markdown
//
// Input defaults to stdin (also selected with "-"), output to stdout.
//
// Configuration:
//
// Settings are read from the embedded defaults, then ./tlmd.toml if present, then the file given
// with --config. --no-delimiters disables the marker table for a single run.
// Logging goes to stderr and is controlled with RUST_LOG (defaults to warnings only).

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use std::fs;
use std::io::{self, Read};
use tlmd_babel::{Format, MarkdownFormat, ParsedMessage};
use tlmd_config::{Loader, TlmdConfig};

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Input file path (defaults to stdin)")
        .long_help(
            "Path to read from.\n\n\
            If omitted or '-', input is read from stdin.",
        )
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .help("Output file path (defaults to stdout)")
        .value_hint(ValueHint::FilePath)
}

fn build_cli() -> Command {
    Command::new("tlmd")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert between markdown and message entities")
        .long_about(
            "tlmd converts the markdown authors type into plain text plus message entities\n\
            (offset/length annotations counted in UTF-16 code units), and back.\n\n\
            Commands:\n  \
            - parse:   markdown → JSON {\"text\", \"entities\"}\n  \
            - unparse: JSON {\"text\", \"entities\"} → markdown\n\n\
            Examples:\n  \
            tlmd parse message.md                   # Print entities as JSON\n  \
            echo '**hi**' | tlmd parse --compact    # Read from stdin\n  \
            tlmd unparse message.json -o out.md     # Write markdown to a file",
        )
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a tlmd.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("no-delimiters")
                .long("no-delimiters")
                .help("Disable marker parsing and rendering")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("parse")
                .about("Convert markdown to text and entities")
                .long_about(
                    "Parse markdown into plain text and message entities.\n\n\
                    Output is a JSON document: {\"text\": ..., \"entities\": [...]}.\n\
                    Entity offsets and lengths count UTF-16 code units.",
                )
                .arg(input_arg())
                .arg(output_arg())
                .arg(
                    Arg::new("compact")
                        .long("compact")
                        .help("Write single-line JSON regardless of configuration")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("unparse")
                .about("Convert text and entities back to markdown")
                .long_about(
                    "Render a JSON document {\"text\": ..., \"entities\": [...]} as markdown.\n\n\
                    Entities without a marker are skipped; links and mentions become\n\
                    [label](url).",
                )
                .arg(input_arg())
                .arg(output_arg()),
        )
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = build_cli().get_matches();

    let config = load_cli_config(
        matches.get_one::<String>("config").map(|s| s.as_str()),
        matches.get_flag("no-delimiters"),
    );
    let format = MarkdownFormat::try_from(&config.markdown).unwrap_or_else(|e| {
        eprintln!("Invalid markdown configuration: {e}");
        std::process::exit(1);
    });

    match matches.subcommand() {
        Some(("parse", sub_matches)) => {
            let pretty = config.output.pretty && !sub_matches.get_flag("compact");
            handle_parse_command(sub_matches, &format, pretty);
        }
        Some(("unparse", sub_matches)) => {
            handle_unparse_command(sub_matches, &format);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Handle the parse command
fn handle_parse_command(matches: &ArgMatches, format: &MarkdownFormat, pretty: bool) {
    let source = read_input(input_path(matches));
    let output = render_parsed(format, &source, pretty).unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });
    write_output(output_path(matches), &output);
}

/// Handle the unparse command
fn handle_unparse_command(matches: &ArgMatches, format: &MarkdownFormat) {
    let source = read_input(input_path(matches));
    let output = render_unparsed(format, &source).unwrap_or_else(|e| {
        eprintln!("Error reading entities document: {e}");
        std::process::exit(1);
    });
    write_output(output_path(matches), &output);
}

fn render_parsed(
    format: &MarkdownFormat,
    source: &str,
    pretty: bool,
) -> Result<String, serde_json::Error> {
    let message = ParsedMessage::from(format.parse(source));
    log::debug!(
        "{} produced {} entities",
        format.name(),
        message.entities.len()
    );
    let mut json = if pretty {
        serde_json::to_string_pretty(&message)?
    } else {
        serde_json::to_string(&message)?
    };
    json.push('\n');
    Ok(json)
}

fn render_unparsed(format: &MarkdownFormat, document: &str) -> Result<String, serde_json::Error> {
    let message: ParsedMessage = serde_json::from_str(document)?;
    Ok(format.unparse(&message.text, &message.entities))
}

fn input_path(matches: &ArgMatches) -> Option<&str> {
    matches
        .get_one::<String>("input")
        .map(|s| s.as_str())
        .filter(|path| *path != "-")
}

fn output_path(matches: &ArgMatches) -> Option<&str> {
    matches.get_one::<String>("output").map(|s| s.as_str())
}

fn read_input(path: Option<&str>) -> String {
    match path {
        Some(path) => fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Error reading file '{path}': {e}");
            std::process::exit(1);
        }),
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source).unwrap_or_else(|e| {
                eprintln!("Error reading stdin: {e}");
                std::process::exit(1);
            });
            source
        }
    }
}

fn write_output(path: Option<&str>, data: &str) {
    match path {
        Some(path) => {
            fs::write(path, data).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{data}"),
    }
}

fn load_cli_config(explicit_path: Option<&str>, no_delimiters: bool) -> TlmdConfig {
    let loader = Loader::new().with_optional_file("tlmd.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };
    let loader = if no_delimiters {
        loader
            .set_override("markdown.delimiters_enabled", false)
            .unwrap_or_else(|err| {
                eprintln!("Failed to apply --no-delimiters: {err}");
                std::process::exit(1);
            })
    } else {
        loader
    };
    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}
