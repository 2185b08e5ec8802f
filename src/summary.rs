use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::decimal::Money;
use crate::types::Frequency;

/// per-client balance snapshot.
///
/// recomputed from the full transaction log on every request; the ledger
/// is the single source of truth and nothing here is persisted by the
/// engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientBalanceSummary {
    pub total_principal: Money,
    pub total_interest: Money,
    /// principal plus interest, clamped at zero
    pub total_owed: Money,
    /// money the client has paid beyond everything owed
    pub credit_balance: Money,
    pub is_delinquent: bool,
    pub days_overdue: u32,
    pub frequency: Frequency,
    pub next_due_date: Option<NaiveDate>,
    /// installment hint for daily/weekly collection books
    pub suggested_installment: Option<Money>,
    /// a disbursement carried no usable rate and the configured default
    /// was applied; surface this as a data-quality warning
    pub default_rate_applied: bool,
}

/// ordering for multi-client reports: delinquent clients first, then by
/// amount owed, largest first
pub fn report_order(a: &ClientBalanceSummary, b: &ClientBalanceSummary) -> Ordering {
    b.is_delinquent
        .cmp(&a.is_delinquent)
        .then(b.total_owed.cmp(&a.total_owed))
}
