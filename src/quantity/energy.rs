use std::ops::Mul;

use crate::quantity::{cost::Cost, rate::KilowattHourRate};

quantity!(KilowattHours, suffix: "kWh", precision: 1);

impl Mul<KilowattHourRate> for KilowattHours {
    type Output = Cost;

    fn mul(self, rate: KilowattHourRate) -> Self::Output {
        Cost(self.0 * rate.0)
    }
}
