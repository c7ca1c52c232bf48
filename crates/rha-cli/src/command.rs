//! Command-line definition

use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

/// Build the `rha` command
#[must_use]
pub fn command() -> Command {
    Command::new("rha")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Read, write, and route versioned pipeline artifacts")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Artifact config file (default: ./rhachet.toml when present)"),
        )
        .arg(
            Arg::new("cwd")
                .long("cwd")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Directory to resolve @gitroot/ and the default config from"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v, -vv, -vvv)"),
        )
        .subcommand(
            Command::new("get")
                .about("Print an artifact as JSON; exits 1 when absent")
                .arg(uri_arg()),
        )
        .subcommand(
            Command::new("set")
                .about("Write an artifact from --content or stdin")
                .arg(uri_arg())
                .arg(
                    Arg::new("content")
                        .long("content")
                        .help("Content to write; stdin is read when omitted"),
                )
                .arg(
                    Arg::new("versions")
                        .long("versions")
                        .action(ArgAction::SetTrue)
                        .help("Keep a historical copy on the default route"),
                )
                .arg(
                    Arg::new("readonly")
                        .long("readonly")
                        .action(ArgAction::SetTrue)
                        .help("Open the artifact readonly (the write is refused)"),
                ),
        )
        .subcommand(
            Command::new("del")
                .about("Delete an artifact; absent is success")
                .arg(uri_arg()),
        )
        .subcommand(
            Command::new("decode")
                .about("Decode a doctype-versioned path into JSON")
                .arg(Arg::new("path").required(true)),
        )
        .subcommand(
            Command::new("translate")
                .about("Apply a @translate(...) directive to a source path")
                .arg(Arg::new("directive").required(true))
                .arg(Arg::new("source").required(true)),
        )
        .subcommand(
            Command::new("resolve-output")
                .about("Resolve a step configuration's @translate output")
                .arg(
                    Arg::new("config-json")
                        .value_name("JSON")
                        .required(true)
                        .help("Step configuration as a JSON object"),
                ),
        )
}

fn uri_arg() -> Arg {
    Arg::new("uri")
        .required(true)
        .help("File path or @gitroot/<relative> uri")
}
