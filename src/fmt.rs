use std::fmt::{Debug, Display, Formatter};

use crate::quantity::time::Years;

/// Ratio formatted as a percentage.
pub struct FormattedPercentage(pub f64);

impl Debug for FormattedPercentage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for FormattedPercentage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}%", self.0 * 100.0)
    }
}

/// Payback period, or `never` when there is none.
pub struct FormattedBreakEven(pub Option<Years>);

impl Display for FormattedBreakEven {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(years) => Display::fmt(&years, f),
            None => write!(f, "never"),
        }
    }
}
