use crate::config::EngineConfig;
use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::events::{EventStore, LedgerEvent};
use crate::loan::Loan;
use crate::types::{PaymentApplication, Transaction, TransactionKind};

/// end state of replaying one client's transaction stream
#[derive(Debug, Clone)]
pub struct AllocationOutcome {
    /// loan end-states, oldest first (creation order is FIFO priority)
    pub loans: Vec<Loan>,
    /// money paid beyond everything owed, held for the client ("a favor")
    pub credit_balance: Money,
    /// at least one disbursement fell back to the configured default rate
    pub default_rate_applied: bool,
    /// audit trail of the replay
    pub events: EventStore,
}

impl AllocationOutcome {
    pub fn total_principal(&self) -> Money {
        self.loans
            .iter()
            .fold(Money::ZERO, |acc, loan| acc + loan.principal)
    }

    pub fn total_interest(&self) -> Money {
        self.loans
            .iter()
            .fold(Money::ZERO, |acc, loan| acc + loan.interest_due)
    }

    pub fn total_owed(&self) -> Money {
        (self.total_principal() + self.total_interest()).max(Money::ZERO)
    }
}

/// replay a client's transaction stream into loan end-states.
///
/// transactions MUST already be sorted by date ascending with ties in
/// insertion order; allocation is order-sensitive and the stream is not
/// re-sorted here, so an unsorted stream yields meaningless balances.
///
/// each disbursement opens a loan. each payment first accrues every open
/// loan to the payment date, then pays interest oldest-loan-first, then
/// principal oldest-loan-first; whatever is left over becomes client
/// credit rather than driving any loan negative.
pub fn replay(config: &EngineConfig, transactions: &[Transaction]) -> Result<AllocationOutcome> {
    let mut loans: Vec<Loan> = Vec::new();
    let mut credit_balance = Money::ZERO;
    let mut default_rate_applied = false;
    let mut events = EventStore::new();

    for tx in transactions {
        if tx.amount.is_negative() {
            return Err(LedgerError::NegativeAmount {
                date: tx.date,
                amount: tx.amount,
            });
        }

        match tx.kind {
            TransactionKind::Disbursement { rate, frequency } => {
                let (rate, defaulted) = match rate {
                    Some(r) if r.as_decimal() > rust_decimal::Decimal::ZERO => (r, false),
                    _ => (config.default_monthly_rate, true),
                };

                let loan = Loan::open(tx.amount, tx.date, rate, frequency);
                events.emit(LedgerEvent::LoanOpened {
                    loan_id: loan.id,
                    date: tx.date,
                    principal: loan.principal,
                    rate,
                    frequency,
                });
                if defaulted {
                    default_rate_applied = true;
                    events.emit(LedgerEvent::DefaultRateApplied {
                        loan_id: loan.id,
                        date: tx.date,
                        rate,
                    });
                }
                loans.push(loan);
            }
            TransactionKind::Payment => {
                if !tx.amount.is_positive() {
                    return Err(LedgerError::InvalidPaymentAmount {
                        date: tx.date,
                        amount: tx.amount,
                    });
                }

                // interest must be current before any of the payment lands
                for loan in loans.iter_mut() {
                    if let Some(accrual) = loan.accrue_until(tx.date)? {
                        events.emit(LedgerEvent::InterestAccrued {
                            loan_id: loan.id,
                            date: tx.date,
                            months: accrual.months,
                            amount: accrual.interest,
                        });
                    }
                }

                let mut remaining = tx.amount;
                let mut application = PaymentApplication::default();

                // interest pass, oldest loan first
                for loan in loans.iter_mut() {
                    if remaining.is_zero() {
                        break;
                    }
                    if loan.interest_due.is_positive() {
                        let applied = remaining.min(loan.interest_due);
                        loan.interest_due -= applied;
                        application.to_interest += applied;
                        remaining -= applied;
                    }
                }

                // then principal, oldest loan first
                for loan in loans.iter_mut() {
                    if remaining.is_zero() {
                        break;
                    }
                    if loan.principal.is_positive() {
                        let applied = remaining.min(loan.principal);
                        loan.principal -= applied;
                        application.to_principal += applied;
                        remaining -= applied;
                    }
                }

                // both passes exhausted: the rest is held for the client
                if remaining.is_positive() {
                    application.excess = remaining;
                    credit_balance += remaining;
                }

                events.emit(LedgerEvent::PaymentApplied {
                    date: tx.date,
                    amount: tx.amount,
                    application,
                });
            }
        }
    }

    Ok(AllocationOutcome {
        loans,
        credit_balance,
        default_rate_applied,
        events,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::types::Frequency;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn disb(date: NaiveDate, major: i64) -> Transaction {
        Transaction::disbursement(
            date,
            Money::from_major(major),
            Some(Rate::from_percentage(20)),
            Some(Frequency::Monthly),
        )
    }

    #[test]
    fn test_interest_then_principal() {
        // scenario B: $100k at 20%/month, one month of interest, $25k payment
        let txs = vec![
            disb(d(2024, 1, 1), 100_000),
            Transaction::payment(d(2024, 2, 1), Money::from_major(25_000)),
        ];
        let outcome = replay(&EngineConfig::default(), &txs).unwrap();

        assert_eq!(outcome.total_interest(), Money::ZERO);
        assert_eq!(outcome.total_principal(), Money::from_major(95_000));
        assert_eq!(outcome.total_owed(), Money::from_major(95_000));
        assert_eq!(outcome.credit_balance, Money::ZERO);

        let payment = outcome
            .events
            .events()
            .iter()
            .find_map(|e| match e {
                LedgerEvent::PaymentApplied { application, .. } => Some(*application),
                _ => None,
            })
            .unwrap();
        assert_eq!(payment.to_interest, Money::from_major(20_000));
        assert_eq!(payment.to_principal, Money::from_major(5_000));
        assert_eq!(payment.excess, Money::ZERO);
    }

    #[test]
    fn test_fifo_across_two_loans() {
        // scenario C: $50k on day 1, $30k on day 10, $50k payment after
        // both accrued one month
        let txs = vec![
            disb(d(2024, 1, 1), 50_000),
            disb(d(2024, 1, 10), 30_000),
            Transaction::payment(d(2024, 2, 15), Money::from_major(50_000)),
        ];
        let outcome = replay(&EngineConfig::default(), &txs).unwrap();

        // $10k + $6k interest paid in full, then $34k against loan 1
        assert_eq!(outcome.loans[0].principal, Money::from_major(16_000));
        assert_eq!(outcome.loans[0].interest_due, Money::ZERO);
        assert_eq!(outcome.loans[1].principal, Money::from_major(30_000));
        assert_eq!(outcome.loans[1].interest_due, Money::ZERO);
        assert_eq!(outcome.total_owed(), Money::from_major(46_000));
    }

    #[test]
    fn test_small_payment_never_touches_newer_loan() {
        let txs = vec![
            disb(d(2024, 1, 1), 50_000),
            disb(d(2024, 1, 10), 30_000),
            // less than loan 1's $10k interest due
            Transaction::payment(d(2024, 2, 15), Money::from_major(4_000)),
        ];
        let outcome = replay(&EngineConfig::default(), &txs).unwrap();

        assert_eq!(outcome.loans[0].interest_due, Money::from_major(6_000));
        assert_eq!(outcome.loans[1].interest_due, Money::from_major(6_000));
        assert_eq!(outcome.loans[1].principal, Money::from_major(30_000));
    }

    #[test]
    fn test_overpayment_becomes_credit() {
        // scenario E: fully settled book, further payment is pure credit
        let txs = vec![
            disb(d(2024, 1, 1), 10_000),
            Transaction::payment(d(2024, 1, 15), Money::from_major(10_000)),
            Transaction::payment(d(2024, 1, 20), Money::from_major(10_000)),
        ];
        let outcome = replay(&EngineConfig::default(), &txs).unwrap();

        assert_eq!(outcome.total_owed(), Money::ZERO);
        assert_eq!(outcome.credit_balance, Money::from_major(10_000));
        assert!(outcome.loans[0].is_settled());
    }

    #[test]
    fn test_payment_with_no_loans_is_credit() {
        let txs = vec![Transaction::payment(d(2024, 1, 5), Money::from_major(500))];
        let outcome = replay(&EngineConfig::default(), &txs).unwrap();

        assert!(outcome.loans.is_empty());
        assert_eq!(outcome.credit_balance, Money::from_major(500));
    }

    #[test]
    fn test_same_date_disbursements_keep_insertion_order() {
        let txs = vec![
            disb(d(2024, 1, 1), 1_000),
            disb(d(2024, 1, 1), 2_000),
            Transaction::payment(d(2024, 1, 10), Money::from_major(600)),
        ];
        let outcome = replay(&EngineConfig::default(), &txs).unwrap();

        // no interest yet; principal pass hits the first-inserted loan
        assert_eq!(outcome.loans[0].principal, Money::from_major(400));
        assert_eq!(outcome.loans[1].principal, Money::from_major(2_000));
    }

    #[test]
    fn test_missing_rate_falls_back_to_default() {
        let txs = vec![
            Transaction::disbursement(d(2024, 1, 1), Money::from_major(1_000), None, None),
            Transaction::payment(d(2024, 2, 1), Money::from_major(100)),
        ];
        let outcome = replay(&EngineConfig::default(), &txs).unwrap();

        assert!(outcome.default_rate_applied);
        assert_eq!(outcome.loans[0].rate, Rate::from_percentage(20));
        // one month at the 20% fallback, fully consumed by the payment
        assert_eq!(outcome.loans[0].interest_due, Money::from_major(100));
        assert!(outcome
            .events
            .events()
            .iter()
            .any(|e| matches!(e, LedgerEvent::DefaultRateApplied { .. })));
    }

    #[test]
    fn test_zero_rate_also_falls_back() {
        let txs = vec![Transaction::disbursement(
            d(2024, 1, 1),
            Money::from_major(1_000),
            Some(Rate::ZERO),
            None,
        )];
        let outcome = replay(&EngineConfig::default(), &txs).unwrap();
        assert!(outcome.default_rate_applied);
    }

    #[test]
    fn test_negative_amount_rejected() {
        let txs = vec![Transaction::payment(
            d(2024, 1, 1),
            Money::from_major(-5),
        )];
        assert!(matches!(
            replay(&EngineConfig::default(), &txs),
            Err(LedgerError::NegativeAmount { .. })
        ));
    }

    #[test]
    fn test_zero_payment_rejected() {
        let txs = vec![Transaction::payment(d(2024, 1, 1), Money::ZERO)];
        assert!(matches!(
            replay(&EngineConfig::default(), &txs),
            Err(LedgerError::InvalidPaymentAmount { .. })
        ));
    }
}
