//! Minimal CLI: service IR (JSON) → one Markdown document per interface
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use service_docs::{Options, Service, generate, write_files};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// render reference documentation for every interface of a service
#[derive(Parser, Debug)]
#[command(version)]
pub struct CommandLineInterface {
    /// log progress (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// render Markdown documents from service IR files
    Render(RenderOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more service IR files. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct RenderOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output directory; documents land in <out>/v<major>/<interface>.md
    #[arg(short, long, default_value = "docs")]
    out: PathBuf,

    /// print documents to stdout instead of writing files
    #[arg(long)]
    stdout: bool,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_services(&self) -> Result<Vec<(PathBuf, Service)>> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        source_paths
            .into_iter()
            .map(|path| {
                let service = Service::load(&path)
                    .with_context(|| format!("failed to load {}", path.display()))?;
                Ok((path, service))
            })
            .collect()
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Render(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }

                let command = std::env::args().collect::<Vec<_>>().join(" ");
                let options = Options { output_dir: target.out.clone(), command: Some(command) };

                for (source_path, service) in target.input_settings.load_services()? {
                    tracing::info!(
                        source = %source_path.display(),
                        interfaces = service.interfaces.len(),
                        "rendering service"
                    );
                    let files = generate(&service, &options);
                    if target.stdout {
                        for file in &files {
                            println!("{}", file.contents);
                        }
                        continue;
                    }
                    write_files(&files)?;
                    for file in &files {
                        eprintln!("{} {}", "wrote".green().bold(), file.path.display());
                    }
                }
                Ok(())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_paths_pass_through() {
        let paths = resolve_file_path_patterns(["a.json", "dir/b.json"]).unwrap();
        assert_eq!(paths, [PathBuf::from("a.json"), PathBuf::from("dir/b.json")]);
    }

    #[test]
    fn empty_glob_is_an_error() {
        let err = resolve_file_path_patterns(["/definitely/not/here/*.json"]).unwrap_err();
        assert!(err.to_string().contains("matched no files"));
    }

    #[test]
    fn parses_render_command() {
        let cli = CommandLineInterface::try_parse_from([
            "service-docs", "render", "-i", "a.json", "b.json", "-o", "out", "--stdout",
        ])
        .unwrap();
        let Command::Render(target) = cli.cmd;
        assert_eq!(target.input_settings.input, ["a.json", "b.json"]);
        assert_eq!(target.out, PathBuf::from("out"));
        assert!(target.stdout);
        assert!(!cli.verbose);
    }
}
