use thiserror::Error;

use crate::decimal::{Money, Rate};

#[derive(Error, Debug)]
pub enum LoanError {
    #[error("invalid interest rate: {rate}")]
    InvalidInterestRate {
        rate: Rate,
    },

    #[error("invalid term: {installments} installments")]
    InvalidTerm {
        installments: u32,
    },

    #[error("invalid debt: {debt}")]
    InvalidDebt {
        debt: Money,
    },

    #[error("invalid amortization policy: {message}")]
    InvalidAmortizationPolicy {
        message: String,
    },

    #[error("invalid fixed charges: {amount}")]
    InvalidCharges {
        amount: Money,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, LoanError>;
