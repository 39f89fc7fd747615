use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tabled::{builder::Builder, Table};

use crate::decimal::Money;
use crate::payments::InstallmentRecord;
use crate::simulation::Schedule;

/// what extra payments saved compared to the plain schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleComparison {
    pub baseline_periods: u32,
    pub accelerated_periods: u32,
    pub baseline_interest: Money,
    pub accelerated_interest: Money,
    pub interest_saved: Money,
    pub periods_saved: i64,
}

impl ScheduleComparison {
    /// compare a schedule with extra payments against its baseline
    ///
    /// The baseline side only counts installment interest, the accelerated
    /// side counts installment interest plus extra payment fees.
    pub fn between(baseline: &Schedule, accelerated: &Schedule) -> Self {
        let baseline_periods = baseline.len() as u32;
        let accelerated_periods = accelerated.len() as u32;
        let baseline_interest = baseline.total_installment_interest();
        let accelerated_interest = accelerated.total_interest();

        Self {
            baseline_periods,
            accelerated_periods,
            baseline_interest,
            accelerated_interest,
            interest_saved: baseline_interest - accelerated_interest,
            periods_saved: baseline_periods as i64 - accelerated_periods as i64,
        }
    }

    pub fn years_saved(&self) -> Decimal {
        Decimal::from(self.periods_saved) / Decimal::from(12)
    }
}

impl fmt::Display for ScheduleComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Money saved:  {}", self.interest_saved.to_display())?;
        write!(
            f,
            "Period saved: {} ({:.2} years)",
            self.periods_saved,
            self.years_saved()
        )
    }
}

/// display row for one record, monetary fields rounded to two decimals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentRow {
    pub period: u32,
    pub due_date: String,
    pub debt: String,
    pub payment: String,
    pub interest: String,
    pub installment_payment: String,
    pub installment_interest: String,
    /// cash for the extra payment, fee included; principal is `amortization_principal`
    pub amortization_payment: String,
    pub amortization_principal: String,
    pub amortization_interest: String,
    pub total_installment_interest: String,
    pub total_amortization_interest: String,
}

impl InstallmentRow {
    pub const HEADERS: [&'static str; 12] = [
        "period",
        "due date",
        "debt",
        "payment",
        "interest",
        "installment",
        "inst. interest",
        "amortization",
        "amort. principal",
        "amort. interest",
        "total inst. interest",
        "total amort. interest",
    ];

    pub fn from_record(record: &InstallmentRecord) -> Self {
        Self {
            period: record.period,
            due_date: record
                .due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            debt: record.debt.to_display(),
            payment: record.total_paid().to_display(),
            interest: record.total_interest().to_display(),
            installment_payment: record.regular.amount.to_display(),
            installment_interest: record.regular.interest.to_display(),
            amortization_payment: record.amortization.amount.to_display(),
            amortization_principal: record.amortization.principal().to_display(),
            amortization_interest: record.amortization.interest.to_display(),
            total_installment_interest: record.total_installment_interest.to_display(),
            total_amortization_interest: record.total_amortization_interest.to_display(),
        }
    }

    pub fn cells(&self) -> [String; 12] {
        [
            self.period.to_string(),
            self.due_date.clone(),
            self.debt.clone(),
            self.payment.clone(),
            self.interest.clone(),
            self.installment_payment.clone(),
            self.installment_interest.clone(),
            self.amortization_payment.clone(),
            self.amortization_principal.clone(),
            self.amortization_interest.clone(),
            self.total_installment_interest.clone(),
            self.total_amortization_interest.clone(),
        ]
    }
}

/// text table of a whole schedule, one row per period
pub fn render_table(schedule: &Schedule) -> String {
    let mut builder = Builder::default();
    builder.push_record(InstallmentRow::HEADERS);
    for record in schedule {
        builder.push_record(InstallmentRow::from_record(record).cells());
    }

    Table::from(builder).to_string()
}
