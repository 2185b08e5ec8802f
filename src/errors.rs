use chrono::NaiveDate;
use thiserror::Error;

use crate::decimal::{Money, Rate};

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("negative amount {amount} on {date}")]
    NegativeAmount { date: NaiveDate, amount: Money },

    #[error("invalid payment amount {amount} on {date}")]
    InvalidPaymentAmount { date: NaiveDate, amount: Money },

    #[error("invalid interest rate: {rate}")]
    InvalidInterestRate { rate: Rate },

    #[error("date out of range stepping {months} months from {from}")]
    DateOutOfRange { from: NaiveDate, months: u32 },
}

pub type Result<T> = std::result::Result<T, LedgerError>;
