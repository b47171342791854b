use kurbo::{Affine, BezPath, Point, Stroke};
use peniko::{Brush, Color};

use crate::{Bounds, Marker, Series, render::Render};

pub struct LineAxes<'a> {
  series: &'a Series,
  color:  Option<Brush>,
  line:   Option<LineOptions>,
  points: Option<PointOptions>,
}

pub struct LineOptions {
  pub width: f64,
  pub dash:  Option<Vec<f64>>,
}

pub struct PointOptions {
  pub marker: Marker,
  /// Diameter in pixels.
  pub size:   f64,
}

impl Default for LineOptions {
  fn default() -> Self { LineOptions { width: 2.0, dash: None } }
}

impl Default for PointOptions {
  fn default() -> Self { PointOptions { marker: Marker::Circle, size: 10.0 } }
}

impl<'a> LineAxes<'a> {
  pub(crate) fn new(series: &'a Series) -> Self {
    LineAxes { series, color: None, line: Some(LineOptions::default()), points: None }
  }

  pub fn series(&self) -> &'a Series { self.series }
  pub fn line_options(&self) -> Option<&LineOptions> { self.line.as_ref() }
  pub fn point_options(&self) -> Option<&PointOptions> { self.points.as_ref() }

  /// Draws `marker` at every sample.
  pub fn points(&mut self, marker: Marker) -> &mut Self {
    self.points = Some(PointOptions { marker, ..Default::default() });
    self
  }

  pub fn point_size(&mut self, size: f64) -> &mut Self {
    self.points.get_or_insert_with(PointOptions::default).size = size;
    self
  }

  /// Only draws the markers.
  pub fn no_line(&mut self) -> &mut Self {
    self.line = None;
    self
  }

  pub fn width(&mut self, width: f64) -> &mut Self {
    self.line.get_or_insert_with(LineOptions::default).width = width;
    self
  }

  pub fn dash(&mut self, dash: Vec<f64>) -> &mut Self {
    self.line.get_or_insert_with(LineOptions::default).dash = Some(dash);
    self
  }

  pub fn color(&mut self, color: Color) -> &mut Self {
    self.color = Some(Brush::Solid(color));
    self
  }

  pub(crate) fn data_bounds(&self) -> Option<Bounds> { self.series.bounds() }

  fn iter(&self) -> impl Iterator<Item = Point> + '_ { self.series.iter().map(Point::from) }

  /// The polyline through every sample, in file order.
  pub(crate) fn path(&self, transform: Affine) -> BezPath {
    let mut shape = BezPath::new();

    for (i, point) in self.iter().map(|p| transform * p).enumerate() {
      if i == 0 {
        shape.move_to(point);
      } else {
        shape.line_to(point);
      }
    }

    shape
  }

  pub(crate) fn draw(&self, render: &mut Render, transform: Affine, default_color: Color) {
    let color = self.color.clone().unwrap_or(Brush::Solid(default_color));

    if let Some(line) = &self.line {
      let mut stroke = Stroke::new(line.width);
      if let Some(dash) = &line.dash {
        stroke = stroke.with_dashes(0.0, dash.clone());
      }

      render.stroke(&self.path(transform), Affine::IDENTITY, &color, &stroke);
    }

    if let Some(points) = &self.points {
      let marker = points.marker.to_path(0.1 / points.size);
      for point in self.iter().map(|p| transform * p) {
        let at = Affine::translate(point.to_vec2()) * Affine::scale(points.size);
        render.fill(&marker, at, &color);
      }
    }
  }
}
