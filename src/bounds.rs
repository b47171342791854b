use kurbo::Affine;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
  pub x: Range,
  pub y: Range,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
  pub min: f64,
  pub max: f64,
}

impl Bounds {
  pub const fn new(x: Range, y: Range) -> Self { Bounds { x, y } }

  pub const fn shrink(self, amount: f64) -> Self {
    Bounds { x: self.x.shrink(amount), y: self.y.shrink(amount) }
  }

  pub fn union(&self, other: Bounds) -> Bounds {
    Bounds { x: self.x.union(other.x), y: self.y.union(other.y) }
  }

  /// Maps data coordinates onto `viewport`. Both ranges must be non-empty.
  pub(crate) fn transform_to(&self, viewport: Bounds) -> Affine {
    let scale_x = viewport.x.size() / self.x.size();
    let scale_y = viewport.y.size() / self.y.size();
    let translate_x = viewport.x.min - self.x.min * scale_x;
    let translate_y = viewport.y.min - self.y.min * scale_y;

    Affine::new([scale_x, 0.0, 0.0, scale_y, translate_x, translate_y])
  }
}

impl Range {
  pub const fn new(min: f64, max: f64) -> Self { Range { min, max } }
  pub const fn size(&self) -> f64 { self.max - self.min }

  pub const fn shrink(self, amount: f64) -> Self { self.expand(-amount) }
  pub const fn expand(self, amount: f64) -> Self {
    Range {
      min: self.min - amount * self.size().signum(),
      max: self.max + amount * self.size().signum(),
    }
  }
  pub const fn expand_by(self, fract: f64) -> Self { self.expand(self.size() * fract) }

  pub const fn contains(&self, value: &f64) -> bool {
    (*value >= self.min && *value <= self.max) || (*value <= self.min && *value >= self.max)
  }

  /// Smallest range covering both. A zero-sized range still counts, so a
  /// single point widens the union.
  pub fn union(&self, other: Range) -> Range {
    Range { min: self.min.min(other.min), max: self.max.max(other.max) }
  }

  /// Widens a zero-sized range by half a unit on each side, so a single point
  /// or a constant column still has something to scale against.
  pub fn widen_degenerate(self) -> Range {
    if self.size() == 0.0 { Range::new(self.min - 0.5, self.max + 0.5) } else { self }
  }

  pub fn nice_ticks(&self, count: u32) -> NiceTicksIter {
    let step = (self.max - self.min) / f64::from(count);
    let k = step.log10().floor();
    let base = step / 10f64.powf(k);

    let nice_base = match base {
      b if b < 1.0 => 1.0,
      b if b < 2.0 => 2.0,
      b if b < 2.5 => 2.5,
      b if b < 5.0 => 5.0,
      _ => 10.0,
    };

    let step = nice_base * 10f64.powf(k);
    let lo = (self.min / step).floor() * step;
    let hi = (self.max / step).ceil() * step;

    // 2.5 needs one more digit than its exponent suggests.
    let extra = if nice_base == 2.5 { 1 } else { 0 };
    let decimals = (-k as i32).saturating_add(extra).clamp(0, 17) as usize;
    NiceTicksIter::new(lo, hi, step, decimals)
  }
}

/// Upper bound on ticks per axis. Steps below the data's float resolution
/// would otherwise produce an unbounded run of identical ticks.
const MAX_TICKS: usize = 100;

pub struct NiceTicksIter {
  lo:       f64,
  step:     f64,
  index:    usize,
  count:    usize,
  decimals: usize,
}

impl NiceTicksIter {
  fn new(lo: f64, hi: f64, step: f64, decimals: usize) -> Self {
    let intervals = ((hi - lo) / step).round();
    let count = if step > 0.0 && intervals.is_finite() && intervals >= 0.0 {
      (intervals as usize).min(MAX_TICKS - 1) + 1
    } else {
      0
    };
    NiceTicksIter { lo, step, index: 0, count, decimals }
  }

  /// Number of decimals a tick label needs to tell neighbouring ticks apart.
  pub fn decimals(&self) -> usize { self.decimals }
}

impl Iterator for NiceTicksIter {
  type Item = f64;
  fn next(&mut self) -> Option<Self::Item> {
    if self.index >= self.count {
      return None;
    }

    let value = self.lo + self.index as f64 * self.step;
    self.index += 1;

    let p = 10f64.powi(self.decimals as i32 + 4);
    let rounded = (value * p).round() / p;
    Some(if rounded.is_finite() { rounded } else { value })
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    let left = self.count - self.index;
    (left, Some(left))
  }
}

#[cfg(test)]
mod tests {
  use kurbo::Point;

  use super::*;

  #[test]
  fn expand_keeps_direction() {
    assert_eq!(Range::new(0.0, 10.0).expand_by(0.1), Range::new(-1.0, 11.0));
    assert_eq!(Range::new(10.0, 0.0).expand(1.0), Range::new(11.0, -1.0));
    assert_eq!(Range::new(0.0, 100.0).shrink(10.0), Range::new(10.0, 90.0));
  }

  #[test]
  fn union_keeps_single_points() {
    let a = Range::new(1.0, 2.0);
    assert_eq!(a.union(Range::new(-3.0, 1.5)), Range::new(-3.0, 2.0));
    assert_eq!(a.union(Range::new(5.0, 5.0)), Range::new(1.0, 5.0));
    assert_eq!(Range::new(0.0, 0.0).union(Range::new(4.0, 4.0)), Range::new(0.0, 4.0));

    let b = Bounds::new(Range::new(0.0, 0.0), Range::new(7.0, 7.0));
    let c = Bounds::new(Range::new(1.0, 1.0), Range::new(-1.0, -1.0));
    assert_eq!(b.union(c), Bounds::new(Range::new(0.0, 1.0), Range::new(-1.0, 7.0)));
  }

  #[test]
  fn widen_degenerate() {
    assert_eq!(Range::new(2.0, 2.0).widen_degenerate(), Range::new(1.5, 2.5));
    assert_eq!(Range::new(0.0, 3.0).widen_degenerate(), Range::new(0.0, 3.0));
  }

  #[test]
  fn contains_either_direction() {
    assert!(Range::new(0.0, 1.0).contains(&0.5));
    assert!(Range::new(1.0, 0.0).contains(&0.5));
    assert!(!Range::new(0.0, 1.0).contains(&1.5));
  }

  #[test]
  fn transform_maps_corners() {
    let data = Bounds::new(Range::new(0.0, 2.0), Range::new(1.0, 4.0));
    let viewport = Bounds::new(Range::new(80.0, 920.0), Range::new(920.0, 80.0));
    let transform = data.transform_to(viewport);

    let lo = transform * Point::new(0.0, 1.0);
    let hi = transform * Point::new(2.0, 4.0);
    assert!((lo.x - 80.0).abs() < 1e-9 && (lo.y - 920.0).abs() < 1e-9);
    assert!((hi.x - 920.0).abs() < 1e-9 && (hi.y - 80.0).abs() < 1e-9);
  }

  #[test]
  fn ticks_cover_range() {
    let ticks: Vec<f64> = Range::new(0.0, 4.0).nice_ticks(10).collect();
    assert_eq!(ticks.first(), Some(&0.0));
    assert_eq!(ticks.last(), Some(&4.0));
    assert_eq!(ticks.len(), 9);
    assert!(ticks.windows(2).all(|w| (w[1] - w[0] - 0.5).abs() < 1e-9));
  }

  #[test]
  fn ticks_snap_outwards() {
    let ticks: Vec<f64> = Range::new(-0.3, 9.3).nice_ticks(10).collect();
    assert_eq!(ticks.first(), Some(&-1.0));
    assert_eq!(ticks.last(), Some(&10.0));
  }

  #[test]
  fn ticks_end_below_float_resolution() {
    // Steps of 0.5 cannot be represented around 1e16.
    let ticks: Vec<f64> = Range::new(1e16, 1e16 + 4.0).nice_ticks(10).collect();
    assert!(!ticks.is_empty() && ticks.len() <= MAX_TICKS);

    let ticks = Range::new(1e16 - 0.2, 1e16 + 2.2).nice_ticks(10);
    assert!(ticks.count() <= MAX_TICKS);
  }

  #[test]
  fn tick_count_is_capped() {
    let ticks = Range::new(0.0, 1.0).nice_ticks(100_000);
    assert_eq!(ticks.size_hint(), (MAX_TICKS, Some(MAX_TICKS)));
  }

  #[test]
  fn zero_sized_range_has_no_ticks() {
    assert_eq!(Range::new(3.0, 3.0).nice_ticks(10).count(), 0);
  }

  #[test]
  fn tick_decimals() {
    assert_eq!(Range::new(0.0, 1000.0).nice_ticks(10).decimals(), 0);
    assert_eq!(Range::new(0.0, 4.0).nice_ticks(10).decimals(), 1);
    assert_eq!(Range::new(0.0, 0.03).nice_ticks(10).decimals(), 3);
    assert_eq!(Range::new(0.0, 0.22).nice_ticks(10).decimals(), 3);
  }
}
