pub mod allocation;
pub mod config;
pub mod dates;
pub mod decimal;
pub mod delinquency;
pub mod engine;
pub mod errors;
pub mod events;
pub mod loan;
pub mod summary;
pub mod types;

// re-export key types
pub use allocation::{replay, AllocationOutcome};
pub use config::EngineConfig;
pub use decimal::{round_currency, Money, Rate};
pub use delinquency::DelinquencyStatus;
pub use engine::LedgerEngine;
pub use errors::{LedgerError, Result};
pub use events::{EventStore, LedgerEvent};
pub use loan::{Accrual, Loan};
pub use summary::{report_order, ClientBalanceSummary};
pub use types::{Frequency, LoanId, PaymentApplication, Transaction, TransactionKind};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
