//! Minimal CLI: (DDL | JSON) → Go struct
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use rayon::prelude::*;

use crate::codegen::GenerateOptions;
use crate::settings::Settings;
use crate::typemap::Dialect;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// turn CREATE TABLE statements (MySQL, PostgreSQL, SQLite) or example JSON into Go structs
#[derive(Parser, Debug)]
#[command(name = "structgen", version)]
pub struct CommandLineInterface {
    /// more logging (-v debug, -vv trace); RUST_LOG wins when set
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// convert each input into a Go struct
    Generate(GenerateOut),
    /// print the detected input dialect of each input
    Detect(DetectOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more inputs. May be literal paths, quoted glob patterns, or '-' for stdin
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DialectArg {
    #[default]
    Auto,
    Mysql,
    Postgresql,
    Sqlite,
    Json,
}

#[derive(clap::Parser, Debug)]
struct GenerateOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// input dialect
    #[arg(long, value_enum, default_value_t = DialectArg::Auto)]
    dialect: DialectArg,

    /// Go type name (defaults to the camel-cased table name, or `Response` for JSON)
    #[arg(long)]
    struct_name: Option<String>,

    /// Go package name for written files
    #[arg(long)]
    package: Option<String>,

    /// do not emit the `TableName()` method
    #[arg(long)]
    no_table_name: bool,

    /// emit nested JSON objects as separate named structs instead of inline
    #[arg(long)]
    separate_nested: bool,

    /// JSON settings file (structName, packageName, emitStorageAccessor, inlineNestedTypes)
    #[arg(long)]
    config: Option<PathBuf>,

    /// write the effective settings to this file
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// output .go file (single input only)
    #[arg(short, long, conflicts_with = "out_dir")]
    out: Option<PathBuf>,

    /// directory for generated .go files, named after each struct
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct DetectOut {
    #[command(flatten)]
    input_settings: InputSettings,
}

/// One loaded input.
#[derive(Debug)]
struct Source {
    label: String,
    text: String,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl DialectArg {
    fn dialect(self) -> Option<Dialect> {
        match self {
            DialectArg::Auto => None,
            DialectArg::Mysql => Some(Dialect::MySql),
            DialectArg::Postgresql => Some(Dialect::PostgreSql),
            DialectArg::Sqlite => Some(Dialect::Sqlite),
            DialectArg::Json => Some(Dialect::Json),
        }
    }
}

impl InputSettings {
    fn load(&self) -> Result<Vec<Source>> {
        let mut sources = Vec::new();
        for raw in &self.input {
            if raw == "-" {
                let text = std::io::read_to_string(std::io::stdin()).context("failed to read stdin")?;
                sources.push(Source { label: "<stdin>".to_string(), text });
                continue;
            }
            for path in resolve_file_path_patterns([raw])? {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read source file {}", path.display()))?;
                sources.push(Source { label: path.to_string_lossy().to_string(), text });
            }
        }
        Ok(sources)
    }
}

impl GenerateOut {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        if let Some(name) = &self.struct_name {
            settings.struct_name = Some(name.clone());
        }
        if let Some(package) = &self.package {
            settings.package_name = package.clone();
        }
        if self.no_table_name {
            settings.emit_storage_accessor = false;
        }
        if self.separate_nested {
            settings.inline_nested_types = false;
        }
        Ok(settings)
    }

    fn run(&self) -> Result<()> {
        let settings = self.settings()?;
        if let Some(path) = &self.save_config {
            settings.save(path)?;
            eprintln!("{} {}", "saved settings".green(), path.display());
        }
        let options = GenerateOptions::from(settings);

        let sources = self.input_settings.load()?;
        if self.out.is_some() && sources.len() > 1 {
            bail!("--out takes a single input; use --out-dir for {} inputs", sources.len());
        }

        let dialect = self.dialect.dialect();
        let results = sources
            .par_iter()
            .map(|source| {
                crate::convert(&source.text, dialect, &options)
                    .with_context(|| format!("failed to convert {}", source.label))
            })
            .collect::<Vec<_>>();

        let mut failures = 0usize;
        let mut first_stdout = true;
        for (source, result) in sources.iter().zip(results) {
            let conversion = match result {
                Ok(x) => x,
                Err(error) => {
                    failures += 1;
                    eprintln!("{} {error:#}", "error:".red().bold());
                    continue;
                }
            };
            tracing::debug!(input = %source.label, dialect = %conversion.dialect, "converted");

            if let Some(dir) = &self.out_dir {
                let file = conversion.file(&options);
                write_output(&dir.join(&file.file_name), &file.contents)?;
            } else if let Some(out) = &self.out {
                write_output(out, &conversion.file(&options).contents)?;
            } else {
                if !first_stdout {
                    println!();
                }
                first_stdout = false;
                print!("{}", conversion.code);
            }
        }

        if failures > 0 {
            bail!("{failures} of {} inputs failed", sources.len());
        }
        Ok(())
    }
}

impl DetectOut {
    fn run(&self) -> Result<()> {
        for source in self.input_settings.load()? {
            let detected = crate::detect(&source.text);
            println!("{}: {}", source.label, detected.to_string().bold());
        }
        Ok(())
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn verbosity(&self) -> u8 {
        self.verbose
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Generate(target) => target.run(),
            Command::Detect(target) => target.run(),
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    eprintln!("{} {}", "wrote".green(), path.display());
    Ok(())
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern).with_context(|| format!("invalid glob pattern: {pattern}"))? {
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

// ------------------------------- Tests ------------------------------------ //
