/// accumulated extra payments every third month, compared with plain ones
use chrono::NaiveDate;
use loan_amortization_rs::{
    AmortizationPolicy, InstallmentRow, Money, Rate, ScheduleComparison, Simulation,
    SimulationConfig,
};
use rust_decimal_macros::dec;
use simple_logger::SimpleLogger;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()?;

    let first_payment = NaiveDate::from_ymd_opt(2024, 2, 1).ok_or("invalid date")?;
    let policy = AmortizationPolicy::new(Money::from_major(1_500), Rate::from_decimal(dec!(0.005)))
        .cadency(3);

    let plain = SimulationConfig::reference()
        .with_first_payment_date(first_payment)
        .with_amortization(policy.clone());
    let accumulated = SimulationConfig::reference()
        .with_first_payment_date(first_payment)
        .with_amortization(policy.accumulated(true));

    let baseline = Simulation::run(&plain.without_amortization())?;

    for (label, config) in [("plain", &plain), ("accumulated", &accumulated)] {
        let schedule = Simulation::run(config)?;
        println!("=== {} ===", label);

        // first year of extra payments
        for record in schedule.iter().filter(|r| r.has_extra_payment()).take(4) {
            let row = InstallmentRow::from_record(record);
            println!(
                "{} #{:>3}: installment {} + extra {} (fee {}), debt {}",
                row.due_date,
                row.period,
                row.installment_payment,
                row.amortization_payment,
                row.amortization_interest,
                row.debt
            );
        }

        println!("{}\n", ScheduleComparison::between(&baseline, &schedule));
    }

    Ok(())
}
