use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};

/// unique identifier for a loan opened during ledger replay
pub type LoanId = Uuid;

/// expected payment cadence attached to a disbursement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
}

impl Frequency {
    /// days until the next payment falls due
    pub fn due_in_days(&self) -> i64 {
        match self {
            Frequency::Daily => 1,
            Frequency::Weekly => 7,
            Frequency::Biweekly => 15,
            Frequency::Monthly => 30,
        }
    }
}

/// what a ledger entry records
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// principal advanced to the client; rate and frequency may be absent
    /// in legacy data and fall back to the engine configuration
    Disbursement {
        rate: Option<Rate>,
        frequency: Option<Frequency>,
    },
    /// amount the client paid against existing debt
    Payment,
}

/// immutable ledger entry for one client
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub amount: Money,
    pub kind: TransactionKind,
}

impl Transaction {
    /// a new loan: principal advanced on `date`
    pub fn disbursement(
        date: NaiveDate,
        amount: Money,
        rate: Option<Rate>,
        frequency: Option<Frequency>,
    ) -> Self {
        Self {
            date,
            amount,
            kind: TransactionKind::Disbursement { rate, frequency },
        }
    }

    /// a repayment (abono) received on `date`
    pub fn payment(date: NaiveDate, amount: Money) -> Self {
        Self {
            date,
            amount,
            kind: TransactionKind::Payment,
        }
    }

    pub fn is_payment(&self) -> bool {
        matches!(self.kind, TransactionKind::Payment)
    }
}

/// how a single payment was split across the ledger
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PaymentApplication {
    pub to_interest: Money,
    pub to_principal: Money,
    pub excess: Money,
}

impl PaymentApplication {
    pub fn total_applied(&self) -> Money {
        self.to_interest + self.to_principal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_due_days() {
        assert_eq!(Frequency::Daily.due_in_days(), 1);
        assert_eq!(Frequency::Weekly.due_in_days(), 7);
        assert_eq!(Frequency::Biweekly.due_in_days(), 15);
        assert_eq!(Frequency::Monthly.due_in_days(), 30);
    }

    #[test]
    fn test_application_total() {
        let app = PaymentApplication {
            to_interest: Money::from_major(20),
            to_principal: Money::from_major(5),
            excess: Money::from_major(3),
        };
        assert_eq!(app.total_applied(), Money::from_major(25));
    }

    #[test]
    fn test_transaction_serde_round_trip() {
        let tx = Transaction::disbursement(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            Money::from_major(100_000),
            Some(Rate::from_percentage(20)),
            Some(Frequency::Monthly),
        );
        let json = serde_json::to_string(&tx).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tx);
    }
}
