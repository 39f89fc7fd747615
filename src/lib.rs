pub mod config;
pub mod decimal;
pub mod errors;
pub mod loan;
pub mod payments;
pub mod report;
pub mod simulation;
pub mod types;

// re-export key types
pub use config::{AmortizationPolicy, LoanTerms, SimulationConfig};
pub use decimal::{Money, Rate};
pub use errors::{LoanError, Result};
pub use loan::Loan;
pub use payments::{InstallmentRecord, Payment};
pub use report::{render_table, InstallmentRow, ScheduleComparison};
pub use simulation::{Schedule, Simulation};
pub use types::{LoanId, LoanStatus};

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
