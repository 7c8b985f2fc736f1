use std::ops::Mul;

use crate::quantity::{energy::KilowattHours, time::Hours};

quantity!(Kilowatts, suffix: "kW", precision: 2);

impl Mul<Hours> for Kilowatts {
    type Output = KilowattHours;

    fn mul(self, hours: Hours) -> Self::Output {
        KilowattHours(self.0 * hours.0)
    }
}
