use std::{
  fs::File,
  io::BufReader,
  path::{Path, PathBuf},
};

use crate::{
  Marker, Plot, Series,
  data::Format,
  error::{PlotError, Result},
};

pub const DEFAULT_PATH: &str = "debug/data.txt";

/// Plots two columns of a delimited text file.
///
/// The defaults read `debug/data.txt`, split on `,`, and plot column 0 (`t`)
/// against column 1 (`s`) with circle markers.
#[derive(Clone, Debug)]
pub struct PlotFile {
  path:   PathBuf,
  format: Format,
  names:  (String, String),
  marker: Option<Marker>,
  title:  Option<String>,
}

impl Default for PlotFile {
  fn default() -> Self { PlotFile::new(DEFAULT_PATH) }
}

impl PlotFile {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    PlotFile {
      path:   path.into(),
      format: Format::default(),
      names:  ("t".to_string(), "s".to_string()),
      marker: Some(Marker::Circle),
      title:  None,
    }
  }

  pub fn path(&self) -> &Path { &self.path }
  pub fn format(&self) -> &Format { &self.format }

  pub fn delimiter(mut self, delimiter: u8) -> Self {
    self.format.delimiter = delimiter;
    self
  }

  /// Zero-based indices of the independent and dependent columns.
  pub fn columns(mut self, x: usize, y: usize) -> Self {
    self.format.x = x;
    self.format.y = y;
    self
  }

  /// Axis labels for the two columns.
  pub fn names(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
    self.names = (x.into(), y.into());
    self
  }

  /// `None` draws the line without markers.
  pub fn marker(mut self, marker: Option<Marker>) -> Self {
    self.marker = marker;
    self
  }

  pub fn title(mut self, title: impl Into<String>) -> Self {
    self.title = Some(title.into());
    self
  }

  /// Reads and parses the whole file. Nothing is drawn.
  pub fn load(&self) -> Result<Series> {
    self.format.validate()?;

    let file = File::open(&self.path).map_err(|e| PlotError::file_open(&self.path, e))?;
    let series = Series::read_from(BufReader::new(file), &self.format)?;

    tracing::info!(path = %self.path.display(), samples = series.len(), "loaded series");
    Ok(series)
  }

  pub fn plot<'a>(&self, series: &'a Series) -> Plot<'a> {
    let mut plot = Plot::new();
    if let Some(title) = &self.title {
      plot.title(title);
    }
    plot.x.title(&self.names.0);
    plot.y.title(&self.names.1);

    let line = plot.line(series);
    if let Some(marker) = self.marker {
      line.points(marker);
    }

    plot
  }

  /// Loads the file and shows it in a window, blocking until the window is
  /// closed. The file is fully parsed before the window opens.
  pub fn show(&self) -> Result<()> {
    let series = self.load()?;
    self.plot(&series).show()
  }

  /// Loads the file and writes the plot to a PNG instead of opening a window.
  pub fn save(&self, out: impl AsRef<Path>) -> Result<()> {
    let series = self.load()?;
    self.plot(&series).save(out)
  }
}

#[cfg(test)]
mod tests {
  use std::io::Write;

  use super::*;
  use crate::Sample;

  fn write_input(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
  }

  #[test]
  fn defaults_match_fixed_constants() {
    let runner = PlotFile::default();
    assert_eq!(runner.path(), Path::new("debug/data.txt"));
    assert_eq!(runner.format(), &Format { delimiter: b',', x: 0, y: 1 });
  }

  #[test]
  fn load_reads_whole_file() {
    let file = write_input("0,1\n1,2\n2,4\n");
    let series = PlotFile::new(file.path()).load().unwrap();
    assert_eq!(
      series.samples(),
      &[Sample::new(0.0, 1.0), Sample::new(1.0, 2.0), Sample::new(2.0, 4.0)]
    );
  }

  #[test]
  fn load_twice_is_identical() {
    let file = write_input("0,1\n1,2\n2,4\n");
    let runner = PlotFile::new(file.path());
    assert_eq!(runner.load().unwrap(), runner.load().unwrap());
  }

  #[test]
  fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = PlotFile::new(dir.path().join("data.txt")).load().unwrap_err();
    assert!(matches!(err, PlotError::FileOpen { .. }), "unexpected error: {err}");
  }

  #[test]
  fn equal_columns_fail_before_opening() {
    let err = PlotFile::new("does/not/exist.txt").columns(0, 0).load().unwrap_err();
    assert!(matches!(err, PlotError::InvalidColumns { .. }));
  }

  #[test]
  fn plot_is_labeled_line_with_circles() {
    let file = write_input("0,1\n1,2\n2,4\n");
    let runner = PlotFile::new(file.path());
    let series = runner.load().unwrap();
    let plot = runner.plot(&series);

    assert_eq!(plot.x.label(), Some("t"));
    assert_eq!(plot.y.label(), Some("s"));
    assert_eq!(plot.axes().len(), 1);

    let axes = &plot.axes()[0];
    assert_eq!(axes.series().len(), 3);
    assert!(axes.line_options().is_some());
    assert_eq!(axes.point_options().map(|p| p.marker), Some(Marker::Circle));
  }

  #[test]
  fn custom_names_and_no_marker() {
    let series = Series::new();
    let plot = PlotFile::default().names("time", "steps").marker(None).title("run").plot(&series);

    assert_eq!(plot.x.label(), Some("time"));
    assert_eq!(plot.y.label(), Some("steps"));
    assert_eq!(plot.title_text(), "run");
    assert!(plot.axes()[0].point_options().is_none());
  }
}
