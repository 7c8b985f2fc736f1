use std::ops::Mul;

use crate::quantity::time::Years;

quantity!(
    /// Money in euros.
    Cost,
    suffix: "€",
    precision: 2
);

/// Annual cost accumulated over the given number of years.
impl Mul<Years> for Cost {
    type Output = Self;

    fn mul(self, years: Years) -> Self::Output {
        Self(self.0 * years.0)
    }
}
