use std::{
  fs::File,
  path::{Path, PathBuf},
  str::FromStr,
  sync::Mutex,
};

use anyhow::{Context, Result};
use clap::Parser;
use plotfile::{DEFAULT_PATH, Marker, PlotFile};
use tracing_subscriber::EnvFilter;

/// Plots two columns of a delimited text file as a line with markers.
#[derive(Parser, Debug)]
#[command(name = "plotfile", version)]
struct Args {
  /// File to read
  #[arg(default_value = DEFAULT_PATH)]
  path: PathBuf,

  /// Field delimiter, a single ASCII character
  #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
  delimiter: u8,

  /// Zero-based x and y columns, as `X,Y`
  #[arg(short, long, default_value = "0,1", value_parser = parse_pair::<usize>)]
  columns: (usize, usize),

  /// Axis labels for the x and y columns, as `T,S`
  #[arg(short, long, default_value = "t,s", value_parser = parse_pair::<String>)]
  names: (String, String),

  #[arg(long)]
  title: Option<String>,

  /// Marker drawn at every sample (o, +, x, *, s, ^, d, h, 8)
  #[arg(short, long, default_value = "o")]
  marker: Marker,

  /// Draw the line without markers
  #[arg(long, conflicts_with = "marker")]
  no_marker: bool,

  /// Write a PNG instead of opening a window
  #[arg(long)]
  save: Option<PathBuf>,

  /// Write logs to this file instead of stderr
  #[arg(long)]
  log: Option<PathBuf>,
}

fn main() -> Result<()> {
  let args = Args::parse();
  init_logging(args.log.as_deref())?;

  let mut runner = PlotFile::new(&args.path)
    .delimiter(args.delimiter)
    .columns(args.columns.0, args.columns.1)
    .names(args.names.0, args.names.1)
    .marker(if args.no_marker { None } else { Some(args.marker) });
  if let Some(title) = args.title {
    runner = runner.title(title);
  }

  match &args.save {
    Some(out) => runner.save(out).with_context(|| format!("could not plot {}", args.path.display())),
    None => runner.show().with_context(|| format!("could not plot {}", args.path.display())),
  }
}

fn init_logging(log: Option<&Path>) -> Result<()> {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
  let builder = tracing_subscriber::fmt().with_env_filter(filter);

  match log {
    Some(path) => {
      let file =
        File::create(path).with_context(|| format!("could not create {}", path.display()))?;
      builder.with_ansi(false).with_writer(Mutex::new(file)).init();
    }
    None => builder.with_writer(std::io::stderr).init(),
  }
  Ok(())
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
  match s.as_bytes() {
    [b] if b.is_ascii() => Ok(*b),
    _ if s == "\\t" => Ok(b'\t'),
    _ => Err(format!("`{s}` is not a single ASCII character")),
  }
}

fn parse_pair<T: FromStr>(s: &str) -> Result<(T, T), String>
where
  T::Err: std::fmt::Display,
{
  let (a, b) = s.split_once(',').ok_or_else(|| format!("expected two values, got `{s}`"))?;
  let a = a.trim().parse().map_err(|e| format!("`{a}`: {e}"))?;
  let b = b.trim().parse().map_err(|e| format!("`{b}`: {e}"))?;
  Ok((a, b))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn no_arguments_keep_the_defaults() {
    let args = Args::try_parse_from(["plotfile"]).unwrap();
    assert_eq!(args.path, PathBuf::from("debug/data.txt"));
    assert_eq!(args.delimiter, b',');
    assert_eq!(args.columns, (0, 1));
    assert_eq!(args.names, ("t".to_string(), "s".to_string()));
    assert_eq!(args.marker, Marker::Circle);
    assert!(args.save.is_none());
  }

  #[test]
  fn overrides() {
    let args = Args::try_parse_from([
      "plotfile", "runs.csv", "-d", ";", "-c", "2,0", "-n", "step,reward", "--no-marker",
    ])
    .unwrap();
    assert_eq!(args.path, PathBuf::from("runs.csv"));
    assert_eq!(args.delimiter, b';');
    assert_eq!(args.columns, (2, 0));
    assert_eq!(args.names.1, "reward");
    assert!(args.no_marker);
  }

  #[test]
  fn bad_values_are_rejected() {
    assert!(parse_delimiter("ab").is_err());
    assert_eq!(parse_delimiter("\\t"), Ok(b'\t'));
    assert!(parse_pair::<usize>("1").is_err());
    assert!(parse_pair::<usize>("a,1").is_err());
  }
}
