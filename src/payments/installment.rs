use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::loan::Loan;

use super::Payment;

/// snapshot of one period: both payments and the loan state right after them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallmentRecord {
    /// 1-based period index
    pub period: u32,
    pub due_date: Option<NaiveDate>,
    pub debt: Money,
    pub regular: Payment,
    pub amortization: Payment,
    pub total_installment_interest: Money,
    pub total_amortization_interest: Money,
}

impl InstallmentRecord {
    pub fn new(period: u32, loan: &Loan, regular: Payment, amortization: Payment) -> Self {
        Self {
            period,
            due_date: None,
            debt: loan.debt(),
            regular,
            amortization,
            total_installment_interest: loan.total_installment_interest(),
            total_amortization_interest: loan.total_amortization_interest(),
        }
    }

    pub fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }

    /// cash paid this period across both payments
    pub fn total_paid(&self) -> Money {
        self.regular.amount + self.amortization.amount
    }

    /// interest and fees paid this period
    pub fn total_interest(&self) -> Money {
        self.regular.interest + self.amortization.interest
    }

    /// debt retired this period
    pub fn total_principal(&self) -> Money {
        self.regular.principal() + self.amortization.principal()
    }

    /// running interest and fees up to and including this period
    pub fn cumulative_interest(&self) -> Money {
        self.total_installment_interest + self.total_amortization_interest
    }

    pub fn has_extra_payment(&self) -> bool {
        !self.amortization.is_zero()
    }
}
