//! minimal walkthrough: one loan, one payment, balance as of today
//!
//! run with: cargo run --example quick_start

use chrono::NaiveDate;
use loan_ledger::{
    EngineConfig, Frequency, LedgerEngine, Money, Rate, Transaction,
};

fn main() -> loan_ledger::Result<()> {
    let engine = LedgerEngine::new(EngineConfig::default())?;

    let txs = vec![
        Transaction::disbursement(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            Money::from_major(100_000),
            Some(Rate::from_percentage(20)),
            Some(Frequency::Monthly),
        ),
        Transaction::payment(
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            Money::from_major(25_000),
        ),
    ];

    let as_of = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    let summary = engine.compute_balance(&txs, as_of)?;

    println!("balance as of {as_of}");
    println!("  principal:  {}", summary.total_principal);
    println!("  interest:   {}", summary.total_interest);
    println!("  total owed: {}", summary.total_owed);
    println!("  credit:     {}", summary.credit_balance);
    if summary.is_delinquent {
        println!("  DELINQUENT, {} days overdue", summary.days_overdue);
    }

    // the event trail reconciles the payment to the loan
    let outcome = engine.replay(&txs)?;
    for event in outcome.events.events() {
        println!("{event:?}");
    }

    Ok(())
}
