use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::{prelude::*, quantity::cost::Cost};

const MONTHS_PER_YEAR: u32 = 12;

/// Billing period spanning a whole number of months.
///
/// This is the only place where the monthly standing charge gets converted to other periods.
#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct BillingPeriod {
    months: u32,
}

impl BillingPeriod {
    pub const MONTHLY: Self = Self { months: 1 };
    #[allow(dead_code)]
    pub const ANNUAL: Self = Self { months: MONTHS_PER_YEAR };

    pub fn try_from_months(months: u32) -> Result<Self> {
        ensure!(months != 0, "billing period must span at least one month");
        Ok(Self { months })
    }

    /// Number of such periods in a year, may be fractional.
    #[must_use]
    pub fn per_year(self) -> f64 {
        f64::from(MONTHS_PER_YEAR) / f64::from(self.months)
    }

    /// Scale the monthly standing charge to this period.
    pub fn standing_charge(self, per_month: Cost) -> Cost {
        per_month * f64::from(self.months)
    }

    /// Scale a cost incurred over this period to a year.
    pub fn annualize(self, cost: Cost) -> Cost {
        cost * self.per_year()
    }
}

impl Display for BillingPeriod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.months {
            1 => write!(f, "1 month"),
            MONTHS_PER_YEAR => write!(f, "1 year"),
            months => write!(f, "{months} months"),
        }
    }
}
