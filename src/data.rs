use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};
use kurbo::Point;

use crate::{
  Bounds, Range,
  error::{PlotError, Result},
};

/// One `(t, s)` sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
  pub t: f64,
  pub s: f64,
}

/// Samples in the order they appeared in the input. `t` is not required to be
/// monotonic.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Series {
  samples: Vec<Sample>,
}

/// How a delimited file maps onto a [`Series`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Format {
  pub delimiter: u8,
  pub x:         usize,
  pub y:         usize,
}

impl Default for Format {
  fn default() -> Self { Format { delimiter: b',', x: 0, y: 1 } }
}

impl Format {
  /// Every line must have exactly this many fields.
  pub fn width(&self) -> usize { self.x.max(self.y) + 1 }

  pub(crate) fn validate(&self) -> Result<()> {
    if self.x == self.y {
      return Err(PlotError::InvalidColumns { x: self.x, y: self.y });
    }
    Ok(())
  }
}

impl Sample {
  pub const fn new(t: f64, s: f64) -> Self { Sample { t, s } }
}

impl From<(f64, f64)> for Sample {
  fn from((t, s): (f64, f64)) -> Self { Sample { t, s } }
}

impl From<Sample> for Point {
  fn from(sample: Sample) -> Self { Point::new(sample.t, sample.s) }
}

impl Series {
  pub fn new() -> Self { Series::default() }

  pub fn from_samples(samples: Vec<Sample>) -> Self { Series { samples } }

  /// Parses every line of `reader`. The first malformed line aborts the read,
  /// so a returned series is always complete. Blank and whitespace-only lines
  /// are skipped; `\n` and `\r\n` endings are both accepted.
  pub fn read_from(mut reader: impl Read, format: &Format) -> Result<Series> {
    format.validate()?;

    let mut input = vec![];
    reader.read_to_end(&mut input)?;
    let mut lines = LineCounter::new(&input);

    let mut reader = ReaderBuilder::new()
      .has_headers(false)
      .delimiter(format.delimiter)
      .flexible(true)
      .trim(Trim::All)
      .from_reader(input.as_slice());

    let mut samples = vec![];
    let mut record = StringRecord::new();
    while reader.read_record(&mut record)? {
      let byte = record.position().map_or(0, |p| p.byte() as usize);
      let line = lines.line_at(byte);
      if lines.is_blank() {
        continue;
      }

      if record.len() != format.width() {
        return Err(PlotError::ColumnCount {
          line,
          expected: format.width(),
          found: record.len(),
        });
      }

      let t = parse_field(&record, line, format.x)?;
      let s = parse_field(&record, line, format.y)?;
      samples.push(Sample { t, s });
    }

    tracing::debug!(samples = samples.len(), "parsed series");
    Ok(Series { samples })
  }

  pub fn len(&self) -> usize { self.samples.len() }
  pub fn is_empty(&self) -> bool { self.samples.is_empty() }

  pub fn samples(&self) -> &[Sample] { &self.samples }
  pub fn iter(&self) -> impl Iterator<Item = Sample> + '_ { self.samples.iter().copied() }

  pub fn t_values(&self) -> impl Iterator<Item = f64> + '_ { self.iter().map(|p| p.t) }
  pub fn s_values(&self) -> impl Iterator<Item = f64> + '_ { self.iter().map(|p| p.s) }

  /// The extent of both columns, or `None` for an empty series.
  pub fn bounds(&self) -> Option<Bounds> {
    let first = self.samples.first()?;
    let init = Bounds::new(Range::new(first.t, first.t), Range::new(first.s, first.s));

    Some(self.iter().fold(init, |b, p| {
      b.union(Bounds::new(Range::new(p.t, p.t), Range::new(p.s, p.s)))
    }))
  }
}

impl FromIterator<Sample> for Series {
  fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
    Series { samples: iter.into_iter().collect() }
  }
}

/// Maps record offsets back to physical, 1-based line numbers. The reader
/// reports a record's offset before any blank lines it skipped, so those are
/// stepped over here.
struct LineCounter<'a> {
  input:  &'a [u8],
  offset: usize,
  line:   u64,
}

impl<'a> LineCounter<'a> {
  fn new(input: &'a [u8]) -> Self { LineCounter { input, offset: 0, line: 1 } }

  /// Offsets must not go backwards.
  fn line_at(&mut self, byte: usize) -> u64 {
    let mut start = byte.clamp(self.offset, self.input.len());
    while matches!(self.input.get(start), Some(b'\n' | b'\r')) {
      start += 1;
    }

    self.line += self.input[self.offset..start].iter().filter(|&&b| b == b'\n').count() as u64;
    self.offset = start;
    self.line
  }

  /// Whether the line at the current offset holds nothing but whitespace.
  fn is_blank(&self) -> bool {
    self.input[self.offset..].iter().take_while(|&&b| b != b'\n').all(u8::is_ascii_whitespace)
  }
}

fn parse_field(record: &StringRecord, line: u64, column: usize) -> Result<f64> {
  let token = record.get(column).unwrap_or_default();
  let value = token.parse::<f64>().map_err(|source| PlotError::ParseNumber {
    line,
    column,
    token: token.to_string(),
    source,
  })?;

  if !value.is_finite() {
    return Err(PlotError::NonFinite { line, column, token: token.to_string() });
  }
  Ok(value)
}
