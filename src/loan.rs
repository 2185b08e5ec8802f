use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dates;
use crate::decimal::{Money, Rate};
use crate::errors::{LedgerError, Result};
use crate::types::{Frequency, LoanId};

/// running state for one disbursement.
///
/// created and owned by the allocation engine while it replays a single
/// client's stream. a settled loan (zero principal, zero interest) stays
/// in the working set; it simply stops receiving allocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: LoanId,
    /// remaining unpaid principal, never negative
    pub principal: Money,
    /// interest accrued but not yet paid, never negative
    pub interest_due: Money,
    /// date interest has been fully accrued to; never ahead of the
    /// transaction currently being processed
    pub last_accrual_date: NaiveDate,
    pub rate: Rate,
    pub frequency: Option<Frequency>,
}

impl Loan {
    pub fn open(
        principal: Money,
        start_date: NaiveDate,
        rate: Rate,
        frequency: Option<Frequency>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            principal,
            interest_due: Money::ZERO,
            last_accrual_date: start_date,
            rate,
            frequency,
        }
    }

    /// accrue simple (non-compounding) interest for the whole calendar
    /// months elapsed since the last accrual date.
    ///
    /// partial months do not accrue; the accrual date advances by exactly
    /// the months charged, so a second call with the same `as_of` is a
    /// no-op.
    pub fn accrue_until(&mut self, as_of: NaiveDate) -> Result<Option<Accrual>> {
        let months = dates::full_months_between(self.last_accrual_date, as_of);
        if months == 0 || !self.principal.is_positive() {
            return Ok(None);
        }

        let interest = Money::from_decimal(
            self.principal.as_decimal() * self.rate.as_decimal() * Decimal::from(months),
        );
        self.interest_due += interest;
        self.last_accrual_date = dates::add_months(self.last_accrual_date, months).ok_or(
            LedgerError::DateOutOfRange {
                from: self.last_accrual_date,
                months,
            },
        )?;

        Ok(Some(Accrual { months, interest }))
    }

    pub fn total_due(&self) -> Money {
        self.principal + self.interest_due
    }

    pub fn is_settled(&self) -> bool {
        self.principal.is_zero() && self.interest_due.is_zero()
    }
}

/// one accrual step: months charged and the interest they produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accrual {
    pub months: u32,
    pub interest: Money,
}
