mod line;

pub use line::{LineAxes, LineOptions, PointOptions};

use crate::{Plot, Series};

impl<'a> Plot<'a> {
  /// Adds `series` as a connected line. Markers are off until
  /// [`LineAxes::points`] is called.
  pub fn line(&mut self, series: &'a Series) -> &mut LineAxes<'a> {
    self.axes.push(LineAxes::new(series));
    let index = self.axes.len() - 1;
    &mut self.axes[index]
  }
}
