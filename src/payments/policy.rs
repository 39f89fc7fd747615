use rust_decimal::Decimal;

use crate::config::AmortizationPolicy;
use crate::decimal::Money;

impl AmortizationPolicy {
    /// periods 1, 1 + cadency, 1 + 2 * cadency, ...
    pub fn is_due(&self, period: u32) -> bool {
        self.cadency > 0 && period > 0 && (period - 1) % self.cadency == 0
    }

    /// extra amount to pay in `period`, if any
    ///
    /// In accumulated mode the amount is topped up by how much the regular
    /// installment has dropped since the first period, scaled by the cadency.
    pub fn extra_payment_for(
        &self,
        period: u32,
        first_regular: Money,
        current_regular: Money,
    ) -> Option<Money> {
        if !self.is_enabled() || !self.is_due(period) {
            return None;
        }

        let amount = if self.accumulated {
            let drop = first_regular - current_regular;
            self.value + drop * Decimal::from(self.cadency)
        } else {
            self.value
        };

        Some(amount).filter(Money::is_positive)
    }
}
