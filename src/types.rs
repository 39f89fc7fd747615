use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// unique identifier for a simulated loan
pub type LoanId = Uuid;

/// simulation run status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStatus {
    /// debt outstanding, more installments to come
    Running,
    /// debt fully retired
    Settled,
}
