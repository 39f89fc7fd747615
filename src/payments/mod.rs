pub mod installment;
pub mod policy;

use serde::{Deserialize, Serialize};

use crate::decimal::Money;

pub use installment::InstallmentRecord;

/// a single payment made in one period
///
/// `amount` is the cash collected, `interest` the part of it that does not
/// reduce the debt (interest for a regular installment, fee for an extra payment)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Payment {
    pub amount: Money,
    pub interest: Money,
}

impl Payment {
    /// no payment made this period
    pub const ZERO: Payment = Payment {
        amount: Money::ZERO,
        interest: Money::ZERO,
    };

    pub fn new(amount: Money, interest: Money) -> Self {
        Self { amount, interest }
    }

    /// part of the payment that reduced the debt
    pub fn principal(&self) -> Money {
        self.amount - self.interest
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}
