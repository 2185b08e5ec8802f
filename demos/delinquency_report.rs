//! multi-client report: delinquent clients first, then largest owed
//!
//! run with: cargo run --example delinquency_report

use chrono::{TimeZone, Utc};
use hourglass_rs::{SafeTimeProvider, TimeSource};
use loan_ledger::{
    report_order, EngineConfig, Frequency, LedgerEngine, Money, Rate, Transaction,
};

fn main() -> loan_ledger::Result<()> {
    let engine = LedgerEngine::new(EngineConfig::default())?;

    // a frozen "today" so the report is reproducible
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 3, 15, 8, 0, 0).unwrap(),
    ));

    let d = |y, m, day| chrono::NaiveDate::from_ymd_opt(y, m, day).unwrap();
    let clients = vec![
        (
            "ana",
            vec![
                Transaction::disbursement(
                    d(2024, 1, 1),
                    Money::from_major(50_000),
                    Some(Rate::from_percentage(20)),
                    Some(Frequency::Monthly),
                ),
                Transaction::payment(d(2024, 2, 1), Money::from_major(10_000)),
            ],
        ),
        (
            "carlos",
            vec![Transaction::disbursement(
                d(2024, 2, 20),
                Money::from_major(30_000),
                Some(Rate::from_percentage(20)),
                Some(Frequency::Weekly),
            )],
        ),
        (
            "maria",
            vec![
                Transaction::disbursement(
                    d(2024, 1, 10),
                    Money::from_major(20_000),
                    None, // legacy row without a rate: the default applies
                    Some(Frequency::Biweekly),
                ),
                Transaction::payment(d(2024, 3, 12), Money::from_major(24_000)),
            ],
        ),
    ];

    let mut rows = Vec::new();
    for (name, txs) in &clients {
        let summary = engine.compute_balance_now(txs, &time)?;
        rows.push((*name, summary));
    }
    rows.sort_by(|a, b| report_order(&a.1, &b.1));

    println!("{:<10} {:>12} {:>12} {:>12}  status", "client", "principal", "interest", "owed");
    for (name, s) in &rows {
        let status = if s.is_delinquent {
            format!("overdue {}d", s.days_overdue)
        } else {
            "current".to_string()
        };
        println!(
            "{:<10} {:>12} {:>12} {:>12}  {}{}",
            name,
            s.total_principal.to_string(),
            s.total_interest.to_string(),
            s.total_owed.to_string(),
            status,
            if s.default_rate_applied { " (default rate)" } else { "" },
        );
    }

    Ok(())
}
