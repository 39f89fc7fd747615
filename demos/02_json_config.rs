/// json config - load a simulation from json, print the outcome as json
use loan_amortization_rs::{ScheduleComparison, Simulation, SimulationConfig};

const CONFIG: &str = r#"{
    "terms": {
        "interest_rate": "0.035",
        "debt": "25000",
        "installments": 48
    },
    "amortization": {
        "value": "250",
        "accumulated": false,
        "cadency": 6,
        "fee": "0.01"
    },
    "other_charges": "4.50",
    "first_payment_date": "2024-06-01"
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => SimulationConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => SimulationConfig::from_json(CONFIG)?,
    };

    let schedule = Simulation::run(&config)?;
    let baseline = Simulation::run(&config.without_amortization())?;
    let comparison = ScheduleComparison::between(&baseline, &schedule);

    println!("{}", schedule.to_json_pretty()?);
    println!("{}", serde_json::to_string_pretty(&comparison)?);

    Ok(())
}
