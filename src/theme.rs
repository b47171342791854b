use color::{Oklch, OpaqueColor, Srgb};
use peniko::Color;

pub struct LinearPalette {
  start: OpaqueColor<Oklch>,
  end:   OpaqueColor<Oklch>,
}

pub const ROCKET: LinearPalette =
  LinearPalette::new(OpaqueColor::new([0.7, 0.13, 250.0]), OpaqueColor::new([0.7, 0.13, 50.0]));

pub const TEXT: Color = Color::from_rgb8(32, 32, 32);
pub const SPINE: Color = Color::from_rgb8(128, 128, 128);
pub const BACKGROUND: Color = Color::WHITE;

impl LinearPalette {
  pub const fn new(start: OpaqueColor<Oklch>, end: OpaqueColor<Oklch>) -> Self {
    Self { start, end }
  }

  pub fn sample(&self, t: f32) -> OpaqueColor<Oklch> {
    let t = t.clamp(0.0, 1.0);
    self.start.lerp(self.end, t, color::HueDirection::Shorter)
  }

  /// Color for series `index` out of `count`, spread evenly over the palette.
  pub fn series_color(&self, index: usize, count: usize) -> Color {
    let t = if count > 1 { index as f32 / (count - 1) as f32 } else { 0.0 };
    self.sample(t).convert::<Srgb>().with_alpha(1.0)
  }
}
