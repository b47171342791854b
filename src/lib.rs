//! Reads two numeric columns from a delimited text file and shows them as a
//! line plot with markers.
//!
//! ```no_run
//! use plotfile::PlotFile;
//!
//! fn main() -> plotfile::Result<()> {
//!   // `debug/data.txt`, comma separated, columns 0 and 1 labeled `t` and `s`.
//!   PlotFile::default().show()
//! }
//! ```

use std::fmt::Display;

use kurbo::{Cap, Line, Point, Stroke};
use parley::FontWeight;

use crate::render::{Align, DrawText, Render};

mod axes;
mod bounds;
mod data;
mod error;
mod marker;
mod render;
mod runner;
mod theme;

pub use axes::{LineAxes, LineOptions, PointOptions};
pub use bounds::{Bounds, NiceTicksIter, Range};
pub use data::{Format, Sample, Series};
pub use error::{PlotError, Result};
pub use marker::Marker;
pub use runner::{DEFAULT_PATH, PlotFile};

/// Everything needed to draw one figure. Nothing is shared between plots, so a
/// `Plot` can be built, inspected, and rendered without any global state.
#[derive(Default)]
pub struct Plot<'a> {
  title: Option<String>,

  pub x: Axis,
  pub y: Axis,

  axes: Vec<LineAxes<'a>>,
}

#[derive(Default)]
pub struct Axis {
  title: Option<String>,
  min:   Option<f64>,
  max:   Option<f64>,
}

pub(crate) trait ResultExt<T> {
  /// Logs the error and discards it.
  fn log_err(self) -> Option<T>;
}

impl<T, E: Display> ResultExt<T> for std::result::Result<T, E> {
  fn log_err(self) -> Option<T> {
    match self {
      Ok(v) => Some(v),
      Err(e) => {
        tracing::error!("{e}");
        None
      }
    }
  }
}

const TICKS: u32 = 10;

impl<'a> Plot<'a> {
  pub fn new() -> Plot<'a> { Plot::default() }

  pub fn title(&mut self, title: &str) -> &mut Self {
    self.title = Some(title.to_string());
    self
  }

  pub(crate) fn title_text(&self) -> &str { self.title.as_deref().unwrap_or("plotfile") }

  pub fn axes(&self) -> &[LineAxes<'a>] { &self.axes }

  /// The data range shown, including margins and any axis overrides.
  pub fn data_bounds(&self) -> Bounds {
    let extent = self.axes.iter().filter_map(|ax| ax.data_bounds()).reduce(|a, b| a.union(b));

    let bounds = match extent {
      Some(b) => Bounds::new(pad(b.x), pad(b.y)),
      None => Bounds::new(Range::new(0.0, 1.0), Range::new(0.0, 1.0)),
    };

    Bounds::new(self.x.apply(bounds.x), self.y.apply(bounds.y))
  }

  pub(crate) fn draw(&self, render: &mut Render, width: f64, height: f64) {
    let margin = (width.min(height) * 0.1).clamp(20.0, 80.0);
    let viewport = Bounds::new(Range::new(0.0, width), Range::new(height, 0.0)).shrink(margin);

    if let Some(title) = &self.title {
      render.draw_text(DrawText {
        text: title,
        size: 32.0,
        weight: FontWeight::BOLD,
        position: Point { x: width / 2.0, y: viewport.y.max - 20.0 },
        horizontal_align: Align::Center,
        vertical_align: Align::End,
        ..Default::default()
      });
    }

    if let Some(x_label) = &self.x.title {
      render.draw_text(DrawText {
        text: x_label,
        size: 24.0,
        position: Point { x: (viewport.x.min + viewport.x.max) / 2.0, y: viewport.y.min + 35.0 },
        horizontal_align: Align::Center,
        vertical_align: Align::Start,
        ..Default::default()
      });
    }

    if let Some(y_label) = &self.y.title {
      render.draw_text(DrawText {
        text: y_label,
        size: 24.0,
        position: Point { x: viewport.x.min - 45.0, y: (viewport.y.min + viewport.y.max) / 2.0 },
        transform: kurbo::Affine::rotate(-std::f64::consts::FRAC_PI_2),
        horizontal_align: Align::Center,
        vertical_align: Align::End,
        ..Default::default()
      });
    }

    let border_stroke = Stroke::new(2.0);
    let tick_stroke = border_stroke.clone().with_start_cap(Cap::Butt);
    let spine = theme::SPINE;
    render.stroke(
      &Line::new(
        Point::new(viewport.x.min, viewport.y.min),
        Point::new(viewport.x.max, viewport.y.min),
      ),
      kurbo::Affine::IDENTITY,
      spine,
      &border_stroke,
    );
    render.stroke(
      &Line::new(
        Point::new(viewport.x.min, viewport.y.min),
        Point::new(viewport.x.min, viewport.y.max),
      ),
      kurbo::Affine::IDENTITY,
      spine,
      &border_stroke,
    );

    let data_bounds = self.data_bounds();
    let transform = data_bounds.transform_to(viewport);

    let iter = ascending(data_bounds.y).nice_ticks(TICKS);
    let decimals = iter.decimals();
    for (y, vy) in iter
      .map(|v| (v, (transform * Point::new(0.0, v)).y))
      .filter(|(_, vy)| viewport.y.contains(vy))
    {
      render.stroke(
        &Line::new(Point::new(viewport.x.min, vy), Point::new(viewport.x.min - 10.0, vy)),
        kurbo::Affine::IDENTITY,
        spine,
        &tick_stroke,
      );
      render.draw_text(DrawText {
        text: &format!("{y:.decimals$}"),
        size: 12.0,
        position: Point { x: viewport.x.min - 15.0, y: vy },
        horizontal_align: Align::End,
        vertical_align: Align::Center,
        ..Default::default()
      });
    }

    let iter = ascending(data_bounds.x).nice_ticks(TICKS);
    let decimals = iter.decimals();
    for (x, vx) in iter
      .map(|v| (v, (transform * Point::new(v, 0.0)).x))
      .filter(|(_, vx)| viewport.x.contains(vx))
    {
      render.stroke(
        &Line::new(Point::new(vx, viewport.y.min), Point::new(vx, viewport.y.min + 10.0)),
        kurbo::Affine::IDENTITY,
        spine,
        &tick_stroke,
      );
      render.draw_text(DrawText {
        text: &format!("{x:.decimals$}"),
        size: 12.0,
        position: Point { x: vx, y: viewport.y.min + 15.0 },
        horizontal_align: Align::Center,
        vertical_align: Align::Start,
        ..Default::default()
      });
    }

    let count = self.axes.len();
    for (i, ax) in self.axes.iter().enumerate() {
      ax.draw(render, transform, theme::ROCKET.series_color(i, count));
    }
  }
}

impl Axis {
  pub fn title(&mut self, title: &str) -> &mut Self {
    self.title = Some(title.to_string());
    self
  }
  pub fn min(&mut self, min: f64) -> &mut Self {
    self.min = Some(min);
    self
  }
  pub fn max(&mut self, max: f64) -> &mut Self {
    self.max = Some(max);
    self
  }

  pub fn label(&self) -> Option<&str> { self.title.as_deref() }

  fn apply(&self, range: Range) -> Range {
    let range = Range::new(self.min.unwrap_or(range.min), self.max.unwrap_or(range.max));
    range.widen_degenerate()
  }
}

fn pad(range: Range) -> Range {
  if range.size() == 0.0 { range.widen_degenerate() } else { range.expand_by(0.1) }
}

fn ascending(range: Range) -> Range {
  if range.min <= range.max { range } else { Range::new(range.max, range.min) }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn close(a: Range, b: Range) -> bool { (a.min - b.min).abs() < 1e-9 && (a.max - b.max).abs() < 1e-9 }

  #[test]
  fn bounds_include_margin() {
    let series = Series::from_samples(vec![
      Sample::new(0.0, 1.0),
      Sample::new(1.0, 2.0),
      Sample::new(2.0, 4.0),
    ]);
    let mut plot = Plot::new();
    plot.line(&series);

    let bounds = plot.data_bounds();
    assert!(close(bounds.x, Range::new(-0.2, 2.2)), "{:?}", bounds.x);
    assert!(close(bounds.y, Range::new(0.7, 4.3)), "{:?}", bounds.y);
  }

  #[test]
  fn empty_plot_has_unit_bounds() {
    let series = Series::new();
    let mut plot = Plot::new();
    plot.line(&series);

    let bounds = plot.data_bounds();
    assert_eq!(bounds, Bounds::new(Range::new(0.0, 1.0), Range::new(0.0, 1.0)));
  }

  #[test]
  fn single_sample_is_widened() {
    let series = Series::from_samples(vec![Sample::new(3.0, -2.0)]);
    let mut plot = Plot::new();
    plot.line(&series);

    let bounds = plot.data_bounds();
    assert_eq!(bounds, Bounds::new(Range::new(2.5, 3.5), Range::new(-2.5, -1.5)));
  }

  #[test]
  fn multiple_series_union() {
    let a = Series::from_samples(vec![Sample::new(0.0, 0.0), Sample::new(1.0, 1.0)]);
    let b = Series::from_samples(vec![Sample::new(5.0, 5.0)]);
    let mut plot = Plot::new();
    plot.line(&a);
    plot.line(&b);

    let bounds = plot.data_bounds();
    assert!(close(bounds.x, Range::new(-0.5, 5.5)), "{:?}", bounds.x);
  }

  #[test]
  fn ticks_finish_for_large_magnitudes() {
    let series = Series::from_samples(vec![Sample::new(1e16, 0.0), Sample::new(1e16 + 2.0, 1.0)]);
    let mut plot = Plot::new();
    plot.line(&series);

    let bounds = plot.data_bounds();
    assert!(bounds.x.nice_ticks(TICKS).take(100_000).count() < 1000);
    assert!(bounds.y.nice_ticks(TICKS).take(100_000).count() < 1000);
  }

  #[test]
  fn axis_overrides() {
    let series = Series::from_samples(vec![Sample::new(0.0, 1.0), Sample::new(10.0, 3.0)]);
    let mut plot = Plot::new();
    plot.line(&series);
    plot.y.min(0.0).max(5.0);
    plot.x.title("t");

    let bounds = plot.data_bounds();
    assert_eq!(bounds.y, Range::new(0.0, 5.0));
    assert_eq!(plot.x.label(), Some("t"));
    assert_eq!(plot.y.label(), None);
  }

  #[test]
  fn log_err_discards() {
    let ok: std::result::Result<u8, String> = Ok(1);
    let err: std::result::Result<u8, String> = Err("nope".into());
    assert_eq!(ok.log_err(), Some(1));
    assert_eq!(err.log_err(), None);
  }
}
