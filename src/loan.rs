use log::debug;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::config::LoanTerms;
use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::payments::Payment;
use crate::types::LoanId;

/// fixed-rate installment loan, mutated once per period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Loan {
    id: LoanId,
    monthly_rate: Rate,
    debt: Money,
    remaining_installments: u32,
    other_charges: Money,
    total_installment_interest: Money,
    total_amortization_interest: Money,
}

impl Loan {
    /// create a loan, rejecting terms the annuity formula cannot handle
    pub fn new(terms: &LoanTerms, other_charges: Money) -> Result<Self> {
        terms.validate()?;
        if other_charges.is_negative() {
            return Err(LoanError::InvalidCharges {
                amount: other_charges,
            });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            monthly_rate: terms.interest_rate.monthly_rate(),
            debt: terms.debt,
            remaining_installments: terms.installments,
            other_charges,
            total_installment_interest: Money::ZERO,
            total_amortization_interest: Money::ZERO,
        })
    }

    pub fn id(&self) -> LoanId {
        self.id
    }

    pub fn monthly_rate(&self) -> Rate {
        self.monthly_rate
    }

    pub fn debt(&self) -> Money {
        self.debt
    }

    pub fn remaining_installments(&self) -> u32 {
        self.remaining_installments
    }

    pub fn other_charges(&self) -> Money {
        self.other_charges
    }

    pub fn total_installment_interest(&self) -> Money {
        self.total_installment_interest
    }

    pub fn total_amortization_interest(&self) -> Money {
        self.total_amortization_interest
    }

    pub fn is_settled(&self) -> bool {
        !self.debt.is_positive()
    }

    /// level installment for the current debt over the remaining term
    ///
    /// payment = debt / ((1 - (1 + r)^-n) / r)
    pub fn regular_payment(&self) -> Money {
        if self.remaining_installments <= 1 {
            return self.debt + self.debt.interest_for_period(self.monthly_rate);
        }

        let r = self.monthly_rate.as_decimal();
        // beyond the decimal range (1 + r)^-n is indistinguishable from zero
        let discount = self
            .monthly_rate
            .compound_factor(self.remaining_installments)
            .map(|compound| Decimal::ONE / compound)
            .unwrap_or(Decimal::ZERO);
        let annuity_factor = (Decimal::ONE - discount) / r;

        self.debt / annuity_factor
    }

    /// pay this period's regular installment
    ///
    /// Must not be called once the loan is settled.
    pub fn pay(&mut self) -> Payment {
        let payment = self.regular_payment();
        let interest = self.debt.interest_for_period(self.monthly_rate);

        // the last installment retires whatever is left
        let principal = if self.remaining_installments <= 1 {
            self.debt
        } else {
            (payment - interest).min(self.debt)
        };

        self.remaining_installments = self.remaining_installments.saturating_sub(1);
        self.debt -= principal;
        self.total_installment_interest += interest + self.other_charges;

        Payment::new(principal + interest, interest)
    }

    /// pay `value` towards principal, `fee` being the markup on the principal part
    ///
    /// The returned `amount` is the whole `value`, fee included; the debt drops by
    /// `principal()` only, i.e. `value / (1 + fee)`. An amount larger than the
    /// remaining debt is clipped to an exact payoff.
    pub fn amortize(&mut self, value: Money, fee: Rate) -> Payment {
        let principal = value / fee.gross_up();

        if principal > self.debt {
            let remaining = self.debt;
            let fee_amount = remaining.fee_at(fee);
            debug!(
                "loan {}: extra payment {} clipped to payoff of {} (fee {})",
                self.id, value, remaining, fee_amount
            );

            self.debt = Money::ZERO;
            self.total_amortization_interest += fee_amount;
            return Payment::new(remaining + fee_amount, fee_amount);
        }

        let fee_amount = value - principal;
        self.debt -= principal;
        self.total_amortization_interest += fee_amount;
        debug!(
            "loan {}: extra payment {} reduced debt by {} to {}",
            self.id, value, principal, self.debt
        );

        Payment::new(value, fee_amount)
    }
}
