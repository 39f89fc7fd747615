use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};

/// fixed-rate loan terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// annual rate as a fraction (0.01602 for 1.602%)
    pub interest_rate: Rate,
    pub debt: Money,
    pub installments: u32,
}

impl LoanTerms {
    pub fn new(interest_rate: Rate, debt: Money, installments: u32) -> Self {
        Self {
            interest_rate,
            debt,
            installments,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.interest_rate.as_decimal() <= Decimal::ZERO {
            return Err(LoanError::InvalidInterestRate {
                rate: self.interest_rate,
            });
        }

        if self.installments == 0 {
            return Err(LoanError::InvalidTerm {
                installments: self.installments,
            });
        }

        if !self.debt.is_positive() {
            return Err(LoanError::InvalidDebt { debt: self.debt });
        }

        // the first period carries the largest compound factor of the run
        let monthly = self.interest_rate.monthly_rate();
        if monthly.compound_factor(self.installments).is_none() {
            return Err(LoanError::InvalidTerm {
                installments: self.installments,
            });
        }

        // no installment can exceed debt * (1 + r), nor the interest accrued over the term
        let ceiling = self
            .debt
            .as_decimal()
            .checked_mul(monthly.gross_up())
            .and_then(|payment| payment.checked_mul(Decimal::from(self.installments)));
        if ceiling.is_none() {
            return Err(LoanError::InvalidInterestRate {
                rate: self.interest_rate,
            });
        }

        Ok(())
    }
}

/// extra principal payment policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmortizationPolicy {
    /// extra amount paid on each eligible period, zero disables the policy
    pub value: Money,
    /// top up the extra amount with the drop of the regular payment since period 1
    pub accumulated: bool,
    /// apply every nth period, starting with period 1
    pub cadency: u32,
    /// markup charged on the extra amount
    pub fee: Rate,
}

impl Default for AmortizationPolicy {
    fn default() -> Self {
        Self {
            value: Money::ZERO,
            accumulated: false,
            cadency: 1,
            fee: Rate::from_decimal(dec!(0.02)),
        }
    }
}

impl AmortizationPolicy {
    pub fn new(value: Money, fee: Rate) -> Self {
        Self {
            value,
            fee,
            ..Self::default()
        }
    }

    pub fn accumulated(mut self, accumulated: bool) -> Self {
        self.accumulated = accumulated;
        self
    }

    pub fn cadency(mut self, cadency: u32) -> Self {
        self.cadency = cadency;
        self
    }

    /// whether any extra payment can ever be made
    pub fn is_enabled(&self) -> bool {
        self.value.is_positive()
    }

    pub fn validate(&self) -> Result<()> {
        if self.cadency == 0 {
            return Err(LoanError::InvalidAmortizationPolicy {
                message: "cadency must be at least one period".to_string(),
            });
        }

        if self.fee.as_decimal() < Decimal::ZERO {
            return Err(LoanError::InvalidAmortizationPolicy {
                message: format!("fee must not be negative, got {}", self.fee.as_decimal()),
            });
        }

        Ok(())
    }
}

/// everything needed for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub terms: LoanTerms,
    #[serde(default)]
    pub amortization: Option<AmortizationPolicy>,
    /// fixed charge added to the installment interest every period
    #[serde(default)]
    pub other_charges: Money,
    #[serde(default)]
    pub first_payment_date: Option<NaiveDate>,
}

impl SimulationConfig {
    pub fn new(terms: LoanTerms) -> Self {
        Self {
            terms,
            amortization: None,
            other_charges: Money::ZERO,
            first_payment_date: None,
        }
    }

    /// reference mortgage: 168,483.15 at 1.602% over 331 months
    pub fn reference() -> Self {
        Self::new(LoanTerms::new(
            Rate::from_decimal(dec!(0.01602)),
            Money::from_decimal(dec!(168483.15)),
            331,
        ))
    }

    /// parse and validate a json document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SimulationConfig =
            serde_json::from_str(json).map_err(|e| LoanError::InvalidConfiguration {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_amortization(mut self, policy: AmortizationPolicy) -> Self {
        self.amortization = Some(policy);
        self
    }

    pub fn with_other_charges(mut self, charges: Money) -> Self {
        self.other_charges = charges;
        self
    }

    pub fn with_first_payment_date(mut self, date: NaiveDate) -> Self {
        self.first_payment_date = Some(date);
        self
    }

    /// same loan with no extra payments, used as the comparison baseline
    pub fn without_amortization(&self) -> Self {
        Self {
            amortization: None,
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.terms.validate()?;

        if self.other_charges.is_negative() {
            return Err(LoanError::InvalidCharges {
                amount: self.other_charges,
            });
        }

        if let Some(policy) = &self.amortization {
            policy.validate()?;
        }

        Ok(())
    }
}
