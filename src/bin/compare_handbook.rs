//! Compare engine output with employee-handbook worked examples
//! Reference balances are hand-computed from the published accrual rules

use accrual_engine::policy::{AccrualFrequency, LedgerEntry, NormalizedPolicy};
use accrual_engine::simulation::simulate;
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn weekly(rate: f64, start: NaiveDate) -> NormalizedPolicy {
    NormalizedPolicy {
        accrual_rate: rate,
        frequency: Some(AccrualFrequency::Weekly),
        start_date: Some(start),
        ..Default::default()
    }
}

fn main() {
    // (label, policy, ledger, target, handbook balance)
    let cases: Vec<(&str, NormalizedPolicy, Vec<LedgerEntry>, NaiveDate, f64)> = vec![
        (
            "Weekly 2.0/wk, four Sundays",
            weekly(2.0, date(2024, 1, 1)),
            vec![],
            date(2024, 1, 28),
            8.0,
        ),
        (
            "Biweekly 3.0, three periods",
            NormalizedPolicy {
                accrual_rate: 3.0,
                frequency: Some(AccrualFrequency::Biweekly),
                start_date: Some(date(2024, 1, 1)),
                ..Default::default()
            },
            vec![],
            date(2024, 2, 12),
            9.0,
        ),
        (
            "Monthly 6.0, Feb through Jul",
            NormalizedPolicy {
                accrual_rate: 6.0,
                frequency: Some(AccrualFrequency::Monthly),
                start_date: Some(date(2024, 1, 1)),
                ..Default::default()
            },
            vec![],
            date(2024, 7, 1),
            36.0,
        ),
        (
            "Flex grant, suppressed week",
            NormalizedPolicy {
                annual_grant_amount: 10.0,
                ..weekly(1.85, date(2023, 12, 25))
            },
            vec![],
            date(2024, 1, 7),
            11.85,
        ),
        (
            "Flex Dec start through Jan 1",
            NormalizedPolicy {
                annual_grant_amount: 10.0,
                starting_balance: 5.0,
                ..weekly(1.85, date(2023, 12, 1))
            },
            vec![],
            date(2024, 1, 1),
            24.25,
        ),
        (
            "Flex yearly cap by end of June",
            NormalizedPolicy {
                yearly_accrual_cap: Some(38.0),
                max_balance: Some(48.0),
                ..weekly(1.85, date(2024, 1, 1))
            },
            vec![],
            date(2024, 6, 30),
            38.0,
        ),
        (
            "Capped 40/yr across two years",
            NormalizedPolicy {
                yearly_accrual_cap: Some(40.0),
                ..weekly(2.0, date(2023, 1, 1))
            },
            vec![],
            date(2024, 6, 30),
            80.0,
        ),
        (
            "UPT 10h x 4 with a callout",
            NormalizedPolicy {
                max_balance: Some(80.0),
                starting_balance: 20.0,
                ..weekly(3.333, date(2024, 1, 1))
            },
            vec![LedgerEntry::dated(date(2024, 2, 15), -10.0)],
            date(2024, 3, 24),
            49.996,
        ),
    ];

    println!("Engine vs handbook worked examples");
    println!(
        "{:<32} {:>12} {:>12} {:>12}",
        "Case", "Engine", "Handbook", "Diff"
    );

    for (label, policy, ledger, target, expected) in &cases {
        let actual = simulate(policy, ledger, *target);
        let diff = actual - expected;
        println!(
            "{:<32} {:>12.4} {:>12.4} {:>12.2e}",
            label, actual, expected, diff
        );
    }
}
