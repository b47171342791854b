use std::{num::ParseFloatError, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlotError>;

#[derive(Debug, Error)]
pub enum PlotError {
  #[error("failed to open {}", path.display())]
  FileOpen {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to read input: {0}")]
  Io(#[from] std::io::Error),

  #[error("malformed input: {0}")]
  Csv(#[from] csv::Error),

  /// A line did not have the number of fields the selected columns need.
  #[error("line {line}: expected {expected} fields, found {found}")]
  ColumnCount { line: u64, expected: usize, found: usize },

  #[error("line {line}, column {column}: `{token}` is not a number")]
  ParseNumber {
    line:   u64,
    column: usize,
    token:  String,
    #[source]
    source: ParseFloatError,
  },

  #[error("line {line}, column {column}: `{token}` is not a finite number")]
  NonFinite { line: u64, column: usize, token: String },

  #[error("x and y must read different columns, both are {x}")]
  InvalidColumns { x: usize, y: usize },

  #[error("no display available: {0}")]
  Display(#[from] winit::error::EventLoopError),

  #[error("failed to open window: {0}")]
  Window(#[from] winit::error::OsError),

  #[error("gpu error: {0}")]
  Gpu(String),

  #[error("failed to write image: {0}")]
  Image(#[from] image::ImageError),
}

impl PlotError {
  pub(crate) fn file_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    PlotError::FileOpen { path: path.into(), source }
  }

  pub(crate) fn gpu(err: impl std::fmt::Display) -> Self { PlotError::Gpu(err.to_string()) }
}

impl From<vello::Error> for PlotError {
  fn from(err: vello::Error) -> Self { PlotError::gpu(err) }
}

impl From<vello::wgpu::CreateSurfaceError> for PlotError {
  fn from(err: vello::wgpu::CreateSurfaceError) -> Self { PlotError::gpu(err) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn messages_name_the_line() {
    let err = PlotError::ColumnCount { line: 3, expected: 2, found: 1 };
    assert_eq!(err.to_string(), "line 3: expected 2 fields, found 1");

    let source = "abc".parse::<f64>().unwrap_err();
    let err = PlotError::ParseNumber { line: 1, column: 0, token: "abc".into(), source };
    assert_eq!(err.to_string(), "line 1, column 0: `abc` is not a number");
  }

  #[test]
  fn file_open_keeps_source() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let err = PlotError::file_open("debug/data.txt", io);
    assert_eq!(err.to_string(), "failed to open debug/data.txt");
    assert!(std::error::Error::source(&err).is_some());
  }
}
