use std::{f64::consts::TAU, str::FromStr};

use kurbo::{BezPath, Circle, Point, Rect, Shape};

/// Shape drawn at every sample. Paths are unit sized and centered on the origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Marker {
  #[default]
  Circle,
  Plus,
  Cross,
  Star,

  Square,
  Triangle,
  Diamond,
  Hexagon,
  Octagon,
}

// sqrt(3) / 4.0, using the unstable SQRT_3 constant.
const SQRT_3_4: f64 = 1.732050807568877293527446341505872367_f64 / 4.0;

impl Marker {
  pub const ALL: [Marker; 9] = [
    Marker::Circle,
    Marker::Plus,
    Marker::Cross,
    Marker::Star,
    Marker::Square,
    Marker::Triangle,
    Marker::Diamond,
    Marker::Hexagon,
    Marker::Octagon,
  ];

  pub(crate) fn to_path(&self, tolerance: f64) -> BezPath {
    match self {
      Marker::Circle => Circle::new(Point::new(0.0, 0.0), 0.5).to_path(tolerance),
      Marker::Plus => {
        const INSET: f64 = 0.15;

        polygon(&[
          (-INSET, -0.5),
          (INSET, -0.5),
          (INSET, -INSET),
          (0.5, -INSET),
          (0.5, INSET),
          (INSET, INSET),
          (INSET, 0.5),
          (-INSET, 0.5),
          (-INSET, INSET),
          (-0.5, INSET),
          (-0.5, -INSET),
          (-INSET, -INSET),
        ])
      }
      Marker::Cross => {
        const INSET: f64 = 0.15;

        polygon(&[
          (-0.5 + INSET, -0.5),
          (0.0, -INSET),
          (0.5 - INSET, -0.5),
          (0.5, -0.5 + INSET),
          (INSET, 0.0),
          (0.5, 0.5 - INSET),
          (0.5 - INSET, 0.5),
          (0.0, INSET),
          (-0.5 + INSET, 0.5),
          (-0.5, 0.5 - INSET),
          (-INSET, 0.0),
          (-0.5, -0.5 + INSET),
        ])
      }
      Marker::Star => {
        const INNER: f64 = 0.5 * 0.381966;

        let points: Vec<_> = (0..10)
          .map(|i| {
            let r = if i % 2 == 0 { 0.5 } else { INNER };
            let angle = TAU * f64::from(i) / 10.0 - TAU / 4.0;
            (r * angle.cos(), r * angle.sin())
          })
          .collect();
        polygon(&points)
      }
      Marker::Square => Rect::new(-0.5, -0.5, 0.5, 0.5).to_path(tolerance),
      Marker::Triangle => polygon(&[(0.0, -SQRT_3_4), (0.5, SQRT_3_4), (-0.5, SQRT_3_4)]),
      Marker::Diamond => polygon(&[(0.0, -0.5), (0.5, 0.0), (0.0, 0.5), (-0.5, 0.0)]),
      Marker::Hexagon => polygon(&[
        (-0.25, -SQRT_3_4),
        (0.25, -SQRT_3_4),
        (0.5, 0.0),
        (0.25, SQRT_3_4),
        (-0.25, SQRT_3_4),
        (-0.5, 0.0),
      ]),
      Marker::Octagon => {
        let points: Vec<_> = (0..8)
          .map(|i| {
            let angle = TAU * (f64::from(i) + 0.5) / 8.0;
            (0.5 * angle.cos(), 0.5 * angle.sin())
          })
          .collect();
        polygon(&points)
      }
    }
  }
}

fn polygon(points: &[(f64, f64)]) -> BezPath {
  let mut path = BezPath::new();
  for (i, &(x, y)) in points.iter().enumerate() {
    if i == 0 {
      path.move_to(Point::new(x, y));
    } else {
      path.line_to(Point::new(x, y));
    }
  }
  path.close_path();
  path
}

/// Accepts the usual one-character marker codes as well as the variant names.
impl FromStr for Marker {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(match s.to_ascii_lowercase().as_str() {
      "o" | "circle" => Marker::Circle,
      "+" | "plus" => Marker::Plus,
      "x" | "cross" => Marker::Cross,
      "*" | "star" => Marker::Star,
      "s" | "square" => Marker::Square,
      "^" | "triangle" => Marker::Triangle,
      "d" | "diamond" => Marker::Diamond,
      "h" | "hexagon" => Marker::Hexagon,
      "8" | "octagon" => Marker::Octagon,
      _ => return Err(format!("unknown marker `{s}`")),
    })
  }
}
