//! Subcommand dispatch

use crate::config::load_config;
use anyhow::{bail, Context};
use clap::ArgMatches;
use rha_artifact::{gen_artifact_git_file, Artifact, GitFileArtifact};
use rha_output::{resolve_output_path, StepOutputConfig};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// How a command finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// `get` found nothing
    NotFound,
}

impl Outcome {
    #[must_use]
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Success => ExitCode::SUCCESS,
            Self::NotFound => ExitCode::from(1),
        }
    }
}

/// Run the parsed command, writing results to `out`
///
/// # Errors
/// Any artifact, path, config, or output failure
pub async fn run(matches: &ArgMatches, out: &mut impl Write) -> anyhow::Result<Outcome> {
    let Some((name, args)) = matches.subcommand() else {
        bail!("no subcommand given");
    };
    let cwd = match args.get_one::<PathBuf>("cwd") {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("could not determine working directory")?,
    };

    match name {
        "get" => {
            let artifact = open_artifact(args, &cwd, Overrides::default())?;
            match artifact.get().await? {
                Some(file) => {
                    print_json(out, &file)?;
                    Ok(Outcome::Success)
                }
                None => {
                    tracing::info!(uri = %artifact.reference().uri, "artifact not found");
                    Ok(Outcome::NotFound)
                }
            }
        }
        "set" => {
            let overrides = Overrides {
                readonly: args.get_flag("readonly"),
                versions: args.get_flag("versions"),
            };
            let artifact = open_artifact(args, &cwd, overrides)?;
            let content = match args.get_one::<String>("content") {
                Some(content) => content.clone(),
                None => read_stdin()?,
            };
            let written = artifact.set(content.into()).await?;
            tracing::info!(uri = %written.uri, hash = %written.hash, "artifact written");
            print_json(out, &written)?;
            Ok(Outcome::Success)
        }
        "del" => {
            let artifact = open_artifact(args, &cwd, Overrides::default())?;
            artifact.del().await?;
            tracing::info!(uri = %artifact.reference().uri, "artifact deleted");
            Ok(Outcome::Success)
        }
        "decode" => {
            let path = required(args, "path")?;
            print_json(out, &rha_path::decode(path)?)?;
            Ok(Outcome::Success)
        }
        "translate" => {
            let directive = required(args, "directive")?;
            let translated = rha_path::translate(directive, required(args, "source")?)?;
            writeln!(out, "{translated}")?;
            Ok(Outcome::Success)
        }
        "resolve-output" => {
            let raw = required(args, "config-json")?;
            let config: StepOutputConfig =
                serde_json::from_str(raw).context("step configuration must be a JSON object")?;
            print_json(out, &resolve_output_path(config)?)?;
            Ok(Outcome::Success)
        }
        other => bail!("unknown subcommand '{other}'"),
    }
}

/// Command-line flags that tighten or extend the loaded config
#[derive(Debug, Clone, Copy, Default)]
struct Overrides {
    readonly: bool,
    versions: bool,
}

/// Build the artifact for `<uri>`, applying config first and flags on top
fn open_artifact(
    args: &ArgMatches,
    cwd: &Path,
    overrides: Overrides,
) -> anyhow::Result<GitFileArtifact> {
    let uri = required(args, "uri")?;
    let config = load_config(args.get_one::<PathBuf>("config").map(PathBuf::as_path), cwd)?;

    let mut options = config.into_options().with_cwd(cwd);
    if overrides.readonly {
        options = options.readonly();
    }
    if overrides.versions {
        options = options.with_versions(true);
    }
    Ok(gen_artifact_git_file(uri, options))
}

fn required<'a>(args: &'a ArgMatches, name: &str) -> anyhow::Result<&'a str> {
    args.get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("missing argument <{name}>"))
}

fn read_stdin() -> anyhow::Result<String> {
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .context("failed to read content from stdin")?;
    Ok(content)
}

fn print_json(out: &mut impl Write, value: &impl serde::Serialize) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
