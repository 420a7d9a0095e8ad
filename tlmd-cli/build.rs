use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the command tree from src/main.rs
// We need to duplicate this here since build scripts can't access src/ modules
fn build_cli() -> Command {
    let input = || {
        Arg::new("input")
            .help("Input file path (defaults to stdin)")
            .index(1)
            .value_hint(ValueHint::FilePath)
    };
    let output = || {
        Arg::new("output")
            .long("output")
            .short('o')
            .help("Output file path (defaults to stdout)")
            .value_hint(ValueHint::FilePath)
    };

    Command::new("tlmd")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert between markdown and message entities")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("no-delimiters")
                .long("no-delimiters")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("parse").arg(input()).arg(output()).arg(
                Arg::new("compact")
                    .long("compact")
                    .action(ArgAction::SetTrue),
            ),
        )
        .subcommand(Command::new("unparse").arg(input()).arg(output()))
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = build_cli();

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "tlmd", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "tlmd", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "tlmd", &outdir)?;

    Ok(())
}
