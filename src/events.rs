use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::types::{Frequency, LoanId, PaymentApplication};

/// everything the engine records while replaying a client's ledger.
///
/// the trail lets the back office reconcile every payment to a specific
/// debt after the fact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LedgerEvent {
    LoanOpened {
        loan_id: LoanId,
        date: NaiveDate,
        principal: Money,
        rate: Rate,
        frequency: Option<Frequency>,
    },
    /// the disbursement carried no usable rate and the configured
    /// fallback was applied
    DefaultRateApplied {
        loan_id: LoanId,
        date: NaiveDate,
        rate: Rate,
    },
    InterestAccrued {
        loan_id: LoanId,
        date: NaiveDate,
        months: u32,
        amount: Money,
    },
    PaymentApplied {
        date: NaiveDate,
        amount: Money,
        application: PaymentApplication,
    },
}

/// in-memory event log for one replay
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventStore {
    events: Vec<LedgerEvent>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: LedgerEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// events touching one loan, in emission order
    pub fn for_loan(&self, loan_id: LoanId) -> impl Iterator<Item = &LedgerEvent> {
        self.events.iter().filter(move |e| match e {
            LedgerEvent::LoanOpened { loan_id: id, .. }
            | LedgerEvent::DefaultRateApplied { loan_id: id, .. }
            | LedgerEvent::InterestAccrued { loan_id: id, .. } => *id == loan_id,
            LedgerEvent::PaymentApplied { .. } => false,
        })
    }
}
