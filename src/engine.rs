use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;

use crate::allocation::{self, AllocationOutcome};
use crate::config::EngineConfig;
use crate::decimal::Money;
use crate::delinquency;
use crate::errors::Result;
use crate::events::LedgerEvent;
use crate::summary::ClientBalanceSummary;
use crate::types::{Frequency, Transaction, TransactionKind};

/// stateless balance engine.
///
/// a pure function of (transactions, as-of date): every call recomputes
/// the client's position from the full stream and nothing survives
/// between calls. safe to share across threads for different clients.
pub struct LedgerEngine {
    config: EngineConfig,
}

impl LedgerEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// compute a client's balance and delinquency status as of `as_of`.
    ///
    /// PRECONDITION: `transactions` must already be sorted by date
    /// ascending, ties in original insertion order. allocation is
    /// order-sensitive and the engine will not re-sort; feeding an
    /// unsorted stream changes FIFO outcomes silently.
    pub fn compute_balance(
        &self,
        transactions: &[Transaction],
        as_of: NaiveDate,
    ) -> Result<ClientBalanceSummary> {
        let mut outcome = allocation::replay(&self.config, transactions)?;

        // bring interest current to the valuation date; replay alone only
        // accrues up to the last payment
        for loan in outcome.loans.iter_mut() {
            if let Some(accrual) = loan.accrue_until(as_of)? {
                outcome.events.emit(LedgerEvent::InterestAccrued {
                    loan_id: loan.id,
                    date: as_of,
                    months: accrual.months,
                    amount: accrual.interest,
                });
            }
        }

        Ok(self.summarize(transactions, &outcome, as_of))
    }

    /// same computation with "today" taken from the time provider
    pub fn compute_balance_now(
        &self,
        transactions: &[Transaction],
        time: &SafeTimeProvider,
    ) -> Result<ClientBalanceSummary> {
        self.compute_balance(transactions, time.now().date_naive())
    }

    /// full replay: loan end-states, client credit and the event trail,
    /// for callers that need to reconcile individual payments
    pub fn replay(&self, transactions: &[Transaction]) -> Result<AllocationOutcome> {
        allocation::replay(&self.config, transactions)
    }

    fn summarize(
        &self,
        transactions: &[Transaction],
        outcome: &AllocationOutcome,
        as_of: NaiveDate,
    ) -> ClientBalanceSummary {
        let total_principal = outcome.total_principal();
        let total_interest = outcome.total_interest();
        let total_owed = outcome.total_owed();
        let status = delinquency::evaluate(&self.config, transactions, total_owed, as_of);

        ClientBalanceSummary {
            total_principal,
            total_interest,
            total_owed,
            credit_balance: outcome.credit_balance,
            is_delinquent: status.is_delinquent,
            days_overdue: status.days_overdue,
            frequency: status.frequency,
            next_due_date: status.next_due_date,
            suggested_installment: self.suggested_installment(transactions),
            default_rate_applied: outcome.default_rate_applied,
        }
    }

    /// installment hint for the most recent disbursement; only daily and
    /// weekly collection books carry a suggested quota
    fn suggested_installment(&self, transactions: &[Transaction]) -> Option<Money> {
        let (amount, frequency) = transactions.iter().rev().find_map(|tx| match tx.kind {
            TransactionKind::Disbursement { frequency, .. } => Some((
                tx.amount,
                frequency.unwrap_or(self.config.default_frequency),
            )),
            TransactionKind::Payment => None,
        })?;

        match frequency {
            Frequency::Daily if self.config.daily_term_days > 0 => {
                Some(amount / Decimal::from(self.config.daily_term_days))
            }
            Frequency::Weekly if self.config.weekly_term_weeks > 0 => {
                Some(amount / Decimal::from(self.config.weekly_term_weeks))
            }
            _ => None,
        }
    }
}
