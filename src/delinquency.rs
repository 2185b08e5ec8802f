use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::decimal::Money;
use crate::types::{Frequency, Transaction, TransactionKind};

/// delinquency verdict for one client as of a given date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelinquencyStatus {
    pub is_delinquent: bool,
    pub days_overdue: u32,
    /// cadence the verdict was measured against
    pub frequency: Frequency,
    /// when the next payment was expected; None when the stream holds no
    /// disbursement
    pub next_due_date: Option<NaiveDate>,
}

impl DelinquencyStatus {
    fn current(frequency: Frequency, next_due_date: Option<NaiveDate>) -> Self {
        Self {
            is_delinquent: false,
            days_overdue: 0,
            frequency,
            next_due_date,
        }
    }
}

/// derive the repayment clock from the stream and compare it to `as_of`.
///
/// the clock starts at the most recent disbursement (a fresh loan restarts
/// it) and advances with every payment made on or after that disbursement.
/// the next payment falls due one frequency interval later; a client owing
/// nothing is never delinquent.
pub fn evaluate(
    config: &EngineConfig,
    transactions: &[Transaction],
    total_owed: Money,
    as_of: NaiveDate,
) -> DelinquencyStatus {
    let mut frequency: Option<Frequency> = None;
    let mut last_event: Option<NaiveDate> = None;

    for tx in transactions {
        match tx.kind {
            TransactionKind::Disbursement { frequency: freq, .. } => {
                // the most recent disbursement governs, even if it names
                // no cadence
                frequency = freq;
                last_event = Some(tx.date);
            }
            TransactionKind::Payment => {
                // a payment only keeps the current loan current; with no
                // disbursement yet there is no clock to advance
                if last_event.is_some() {
                    last_event = last_event.max(Some(tx.date));
                }
            }
        }
    }

    let frequency = frequency.unwrap_or(config.default_frequency);
    let next_due_date =
        last_event.map(|date| date + Duration::days(frequency.due_in_days()));

    if !total_owed.is_positive() {
        return DelinquencyStatus::current(frequency, next_due_date);
    }

    match next_due_date {
        Some(due) if as_of > due => DelinquencyStatus {
            is_delinquent: true,
            days_overdue: (as_of - due).num_days() as u32,
            frequency,
            next_due_date,
        },
        _ => DelinquencyStatus::current(frequency, next_due_date),
    }
}
