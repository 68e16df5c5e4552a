use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;

use csvline::{
    FileSource, LineCollection, LineSource, MemorySource, NumericRecord, ReaderSource, Record,
    StringRecord,
};

#[derive(Parser)]
#[command(name = "csvline")]
#[command(about = "Parse comma-separated lines into numbers or trimmed strings")]
struct Args {
    /// Input file; omit or pass "-" to read standard input
    file: Option<PathBuf>,

    /// How each line is parsed
    #[arg(short, long, value_enum, default_value_t = Mode::String)]
    mode: Mode,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Load the built-in sample inputs instead of reading a file
    #[arg(long, conflicts_with = "file")]
    demo: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Comma-separated floating-point numbers; any bad line fails the load
    Numeric,
    /// Comma-separated fields with spaces and tabs trimmed
    String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

const DEMO_NUMERIC: &str = "123, 456, 789, 526.234\n10, 20, 30, 4.05e1\n3.14159\n";
const DEMO_STRINGS: &str = "samples,\t mean, standard deviation , chi squared\n, ,test,";

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let mut out = io::stdout().lock();
    let result = if args.demo {
        run_demo(args.format, &mut out)
    } else {
        run(&args, &mut out)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("csvline: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run<W: Write>(args: &Args, out: &mut W) -> Result<()> {
    let mut source = open_source(args.file.as_deref())?;

    match args.mode {
        Mode::Numeric => {
            let data = LineCollection::<NumericRecord>::from_source(&mut source)
                .with_context(|| format!("loading numeric data from {}", source.name()))?;
            emit(&data, args.format, out)
        }
        Mode::String => {
            let data = LineCollection::<StringRecord>::from_source(&mut source)
                .with_context(|| format!("loading string data from {}", source.name()))?;
            emit(&data, args.format, out)
        }
    }
}

fn open_source(path: Option<&Path>) -> Result<Box<dyn LineSource>> {
    match path {
        Some(p) if p != Path::new("-") => {
            let file =
                FileSource::open(p).with_context(|| format!("opening {}", p.display()))?;
            Ok(Box::new(file))
        }
        _ => Ok(Box::new(ReaderSource::stdin())),
    }
}

fn emit<T, W>(data: &LineCollection<T>, format: Format, out: &mut W) -> Result<()>
where
    T: Record + Serialize,
    W: Write,
{
    match format {
        Format::Text => data.display_to(out).context("writing output")?,
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, data).context("serializing output")?;
            writeln!(out).context("writing output")?;
        }
    }
    Ok(())
}

/// Load the two fixed sample inputs and print them. A numeric failure is
/// reported and the string sample still runs.
fn run_demo<W: Write>(format: Format, out: &mut W) -> Result<()> {
    let mut numeric = MemorySource::with_name(DEMO_NUMERIC, "demo numeric");
    match LineCollection::<NumericRecord>::from_source(&mut numeric) {
        Ok(data) => emit(&data, format, out)?,
        Err(e) => log::error!("could not load numeric data: {:#}", anyhow::Error::new(e)),
    }

    let mut strings = MemorySource::with_name(DEMO_STRINGS, "demo strings");
    let data = LineCollection::<StringRecord>::from_source(&mut strings)?;
    emit(&data, format, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let args = Args::try_parse_from(["csvline"]).unwrap();
        assert_eq!(args.mode, Mode::String);
        assert_eq!(args.format, Format::Text);
        assert!(args.file.is_none());
        assert!(!args.demo);

        let args = Args::try_parse_from(["csvline", "-m", "numeric", "-f", "json", "in.csv"])
            .unwrap();
        assert_eq!(args.mode, Mode::Numeric);
        assert_eq!(args.format, Format::Json);
        assert_eq!(args.file.as_deref(), Some(Path::new("in.csv")));

        assert!(Args::try_parse_from(["csvline", "--demo", "in.csv"]).is_err());
    }

    #[test]
    fn test_demo_text_output() {
        let mut out = Vec::new();
        run_demo(Format::Text, &mut out).unwrap();
        let expected = "\
File has 3 line(s):
  Line 0 has 4 item(s):
    123
    456
    789
    526.234
  Line 1 has 4 item(s):
    10
    20
    30
    40.5
  Line 2 has 1 item(s):
    3.14159
File has 2 line(s):
  Line 0 has 4 item(s):
    \"samples\"
    \"mean\"
    \"standard deviation\"
    \"chi squared\"
  Line 1 has 4 item(s):
    \"\"
    \"\"
    \"test\"
    \"\"
";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn test_demo_json_output() {
        let mut out = Vec::new();
        run_demo(Format::Json, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let docs: Vec<serde_json::Value> = serde_json::Deserializer::from_str(&text)
            .into_iter()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0][1][3], serde_json::json!(40.5));
        assert_eq!(docs[1][1], serde_json::json!(["", "", "test", ""]));
    }

    #[test]
    fn test_run_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "1, 2\n3, oops\n").unwrap();

        let args = Args::try_parse_from(["csvline", "-m", "numeric"])
            .map(|mut a| {
                a.file = Some(path.clone());
                a
            })
            .unwrap();
        let err = run(&args, &mut Vec::new()).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("loading numeric data"), "{msg}");
        assert!(msg.contains("expected a number at column 3"), "{msg}");
    }
}
