use chrono::{Months, NaiveDate};
use log::{info, trace};
use serde::{Deserialize, Serialize};

use crate::config::{AmortizationPolicy, SimulationConfig};
use crate::decimal::Money;
use crate::errors::Result;
use crate::loan::Loan;
use crate::payments::{InstallmentRecord, Payment};
use crate::types::{LoanId, LoanStatus};

/// drives a loan period by period until its debt is retired
///
/// Each call to `next` pays one regular installment, applies the extra
/// payment policy and yields the resulting record. Once the debt reaches
/// zero the simulation is settled and yields nothing more.
#[derive(Debug)]
pub struct Simulation {
    loan: Loan,
    policy: Option<AmortizationPolicy>,
    first_payment_date: Option<NaiveDate>,
    period: u32,
    first_regular: Option<Money>,
    status: LoanStatus,
}

impl Simulation {
    pub fn new(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;
        let loan = Loan::new(&config.terms, config.other_charges)?;

        Ok(Self {
            loan,
            policy: config.amortization.clone(),
            first_payment_date: config.first_payment_date,
            period: 0,
            first_regular: None,
            status: LoanStatus::Running,
        })
    }

    /// run a configuration to completion
    pub fn run(config: &SimulationConfig) -> Result<Schedule> {
        let mut simulation = Self::new(config)?;
        let loan_id = simulation.loan.id();
        let records: Vec<InstallmentRecord> = simulation.by_ref().collect();

        Ok(Schedule { loan_id, records })
    }

    pub fn loan(&self) -> &Loan {
        &self.loan
    }

    pub fn status(&self) -> LoanStatus {
        self.status
    }

    pub fn period(&self) -> u32 {
        self.period
    }

    fn extra_payment(&mut self, regular: &Payment) -> Payment {
        let first_regular = *self.first_regular.get_or_insert(regular.amount);

        let amount = self
            .policy
            .as_ref()
            .and_then(|policy| {
                policy
                    .extra_payment_for(self.period, first_regular, regular.amount)
                    .map(|amount| (amount, policy.fee))
            });

        match amount {
            Some((amount, fee)) => self.loan.amortize(amount, fee),
            None => Payment::ZERO,
        }
    }

    fn due_date(&self) -> Option<NaiveDate> {
        self.first_payment_date
            .and_then(|first| first.checked_add_months(Months::new(self.period - 1)))
    }
}

impl Iterator for Simulation {
    type Item = InstallmentRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.status == LoanStatus::Settled {
            return None;
        }

        if self.loan.is_settled() {
            self.status = LoanStatus::Settled;
            info!(
                "loan {} settled after {} periods, interest {} + fees {}",
                self.loan.id(),
                self.period,
                self.loan.total_installment_interest(),
                self.loan.total_amortization_interest()
            );
            return None;
        }

        self.period += 1;
        let regular = self.loan.pay();
        let amortization = self.extra_payment(&regular);

        trace!(
            "loan {} period {}: paid {} + extra {}, debt {}",
            self.loan.id(),
            self.period,
            regular.amount,
            amortization.amount,
            self.loan.debt()
        );

        let record = InstallmentRecord::new(self.period, &self.loan, regular, amortization)
            .with_due_date(self.due_date());
        Some(record)
    }
}

/// finished run: the ordered installment records of one loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub loan_id: LoanId,
    pub records: Vec<InstallmentRecord>,
}

impl Schedule {
    /// number of periods until payoff
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&InstallmentRecord> {
        self.records.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InstallmentRecord> {
        self.records.iter()
    }

    pub fn final_debt(&self) -> Money {
        self.last().map(|r| r.debt).unwrap_or(Money::ZERO)
    }

    pub fn total_installment_interest(&self) -> Money {
        self.last()
            .map(|r| r.total_installment_interest)
            .unwrap_or(Money::ZERO)
    }

    pub fn total_amortization_interest(&self) -> Money {
        self.last()
            .map(|r| r.total_amortization_interest)
            .unwrap_or(Money::ZERO)
    }

    /// interest plus extra payment fees over the whole run
    pub fn total_interest(&self) -> Money {
        self.total_installment_interest() + self.total_amortization_interest()
    }

    /// everything paid over the whole run
    pub fn total_paid(&self) -> Money {
        self.iter().map(InstallmentRecord::total_paid).sum()
    }

    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a InstallmentRecord;
    type IntoIter = std::slice::Iter<'a, InstallmentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoanTerms;
    use crate::decimal::Rate;
    use crate::errors::LoanError;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use test_log::test;

    fn reference_with_extra(cadency: u32, accumulated: bool) -> SimulationConfig {
        SimulationConfig::reference().with_amortization(
            AmortizationPolicy::new(Money::from_major(500), Rate::from_decimal(dec!(0.005)))
                .cadency(cadency)
                .accumulated(accumulated),
        )
    }

    fn assert_close(actual: Money, expected: Decimal, tolerance: Decimal) {
        let diff = (actual.as_decimal() - expected).abs();
        assert!(diff <= tolerance, "{} != {}", actual, expected);
    }

    #[test]
    fn test_reference_baseline() {
        let schedule = Simulation::run(&SimulationConfig::reference()).unwrap();

        assert_eq!(schedule.len(), 331);
        assert_eq!(schedule.final_debt(), Money::ZERO);
        assert_eq!(schedule.total_amortization_interest(), Money::ZERO);
        assert!(schedule.iter().all(|r| !r.has_extra_payment()));
        assert_close(schedule.records[0].regular.amount, dec!(630.07), dec!(0.01));
        assert_close(schedule.total_installment_interest(), dec!(40068.37), dec!(0.01));

        let principal: Money = schedule.iter().map(|r| r.regular.principal()).sum();
        assert_close(principal, dec!(168483.15), dec!(0.000001));
    }

    #[test]
    fn test_periods_are_sequential_and_debt_declines() {
        let schedule = Simulation::run(&reference_with_extra(1, false)).unwrap();

        let mut previous = Money::from_decimal(dec!(168483.15));
        for (i, record) in schedule.iter().enumerate() {
            assert_eq!(record.period as usize, i + 1);
            assert!(record.debt < previous);
            assert!(!record.debt.is_negative());
            previous = record.debt;
        }
    }

    #[test]
    fn test_reference_with_extra_payments() {
        let baseline = Simulation::run(&SimulationConfig::reference()).unwrap();
        let schedule = Simulation::run(&reference_with_extra(1, false)).unwrap();

        assert_eq!(schedule.len(), 222);
        assert!(schedule.len() < baseline.len());
        assert!(schedule.total_installment_interest() < baseline.total_installment_interest());
        assert!(schedule.total_interest() < baseline.total_interest());
        assert_eq!(schedule.final_debt(), Money::ZERO);

        // every period carries an extra payment, the last one clipped
        assert!(schedule.iter().all(InstallmentRecord::has_extra_payment));
        let last = schedule.last().unwrap();
        assert!(last.amortization.amount < Money::from_major(500));
    }

    #[test]
    fn test_cadency_gate_in_run() {
        let schedule = Simulation::run(&reference_with_extra(3, false)).unwrap();
        let last_period = schedule.len() as u32;

        for record in &schedule {
            let due = (record.period - 1) % 3 == 0;
            if record.period == last_period && !due {
                // paid off by the regular installment
                continue;
            }
            assert_eq!(record.has_extra_payment(), due, "period {}", record.period);
        }
    }

    #[test]
    fn test_accumulated_amount_in_run() {
        let schedule = Simulation::run(&reference_with_extra(3, true)).unwrap();
        let first = schedule.records[0].regular.amount;
        let fee = Rate::from_decimal(dec!(0.005));

        // period 1 has no drop to top up
        assert_eq!(schedule.records[0].amortization.amount, Money::from_major(500));

        // period 4, well before payoff
        let record = &schedule.records[3];
        let expected = Money::from_major(500) + (first - record.regular.amount) * dec!(3);
        assert_eq!(record.amortization.amount, expected);
        assert_close(
            record.amortization.principal(),
            (expected / fee.gross_up()).as_decimal(),
            dec!(0.000001),
        );

        let plain = Simulation::run(&reference_with_extra(3, false)).unwrap();
        assert!(schedule.len() < plain.len());
    }

    #[test]
    fn test_running_totals_are_monotonic() {
        let schedule = Simulation::run(&reference_with_extra(2, true)).unwrap();

        for pair in schedule.records.windows(2) {
            assert!(pair[1].total_installment_interest > pair[0].total_installment_interest);
            assert!(pair[1].total_amortization_interest >= pair[0].total_amortization_interest);
        }
    }

    #[test]
    fn test_iterator_is_not_restartable() {
        let terms = LoanTerms::new(Rate::from_percentage(12), Money::from_major(1000), 12);
        let mut simulation = Simulation::new(&SimulationConfig::new(terms)).unwrap();

        assert_eq!(simulation.status(), LoanStatus::Running);
        assert_eq!(simulation.by_ref().count(), 12);
        assert_eq!(simulation.status(), LoanStatus::Settled);
        assert_eq!(simulation.period(), 12);
        assert!(simulation.next().is_none());
        assert!(simulation.loan().is_settled());
    }

    #[test]
    fn test_single_extra_payment_can_settle_first_period() {
        let terms = LoanTerms::new(Rate::from_percentage(12), Money::from_major(1000), 12);
        let config = SimulationConfig::new(terms).with_amortization(AmortizationPolicy::new(
            Money::from_major(10_000),
            Rate::from_decimal(dec!(0.01)),
        ));

        let schedule = Simulation::run(&config).unwrap();
        assert_eq!(schedule.len(), 1);

        let record = schedule.last().unwrap();
        assert_eq!(record.debt, Money::ZERO);
        assert_close(
            record.amortization.principal() + record.regular.principal(),
            dec!(1000),
            dec!(0.000001),
        );
        assert_close(
            record.amortization.interest,
            record.amortization.principal().fee_at(Rate::from_decimal(dec!(0.01))).as_decimal(),
            dec!(0.000001),
        );
    }

    #[test]
    fn test_due_dates() {
        let terms = LoanTerms::new(Rate::from_percentage(12), Money::from_major(1000), 3);
        let config = SimulationConfig::new(terms)
            .with_first_payment_date(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());

        let schedule = Simulation::run(&config).unwrap();
        let dates: Vec<Option<NaiveDate>> = schedule.iter().map(|r| r.due_date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 1, 31),
                NaiveDate::from_ymd_opt(2024, 2, 29),
                NaiveDate::from_ymd_opt(2024, 3, 31),
            ]
        );
    }

    #[test]
    fn test_other_charges_raise_interest() {
        let plain = Simulation::run(&SimulationConfig::reference()).unwrap();
        let charged = Simulation::run(
            &SimulationConfig::reference().with_other_charges(Money::from_major(10)),
        )
        .unwrap();

        assert_eq!(plain.len(), charged.len());
        assert_close(
            charged.total_installment_interest() - plain.total_installment_interest(),
            dec!(3310),
            dec!(0.000001),
        );
    }

    #[test]
    fn test_invalid_config_fails_before_running() {
        let terms = LoanTerms::new(Rate::from_percentage(5), Money::from_major(1000), 12);
        let config = SimulationConfig::new(terms)
            .with_amortization(AmortizationPolicy::new(Money::from_major(100), Rate::ZERO).cadency(0));

        assert!(matches!(
            Simulation::run(&config),
            Err(LoanError::InvalidAmortizationPolicy { .. })
        ));
    }

    #[test]
    fn test_terms_beyond_decimal_range_fail_before_running() {
        let terms = LoanTerms::new(Rate::from_decimal(dec!(3.0)), Money::from_major(10_000), 300);
        let config = SimulationConfig::new(terms);

        assert!(matches!(
            Simulation::run(&config),
            Err(LoanError::InvalidTerm { installments: 300 })
        ));
    }

    #[test]
    fn test_steep_rate_on_short_term_runs() {
        let terms = LoanTerms::new(Rate::from_decimal(dec!(3.0)), Money::from_major(10_000), 24);
        let schedule = Simulation::run(&SimulationConfig::new(terms)).unwrap();

        assert_eq!(schedule.len(), 24);
        assert_eq!(schedule.final_debt(), Money::ZERO);
    }

    #[test]
    fn test_schedule_json() {
        let terms = LoanTerms::new(Rate::from_percentage(12), Money::from_major(1000), 2);
        let schedule = Simulation::run(&SimulationConfig::new(terms)).unwrap();

        let json = schedule.to_json_pretty().unwrap();
        let parsed: Schedule = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.loan_id, schedule.loan_id);
        assert_eq!(parsed.final_debt(), Money::ZERO);
    }
}
