/// quick start - reference mortgage with monthly extra payments
use loan_amortization_rs::{
    render_table, AmortizationPolicy, Money, Rate, ScheduleComparison, Simulation,
    SimulationConfig,
};
use rust_decimal_macros::dec;
use simple_logger::SimpleLogger;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()?;

    // 168,483.15 at 1.602% over 331 months, 500 extra every month at 0.5% fee
    let config = SimulationConfig::reference().with_amortization(AmortizationPolicy::new(
        Money::from_major(500),
        Rate::from_decimal(dec!(0.005)),
    ));

    let accelerated = Simulation::run(&config)?;
    let baseline = Simulation::run(&config.without_amortization())?;

    println!("{}", render_table(&accelerated));
    println!("{}", ScheduleComparison::between(&baseline, &accelerated));

    Ok(())
}
