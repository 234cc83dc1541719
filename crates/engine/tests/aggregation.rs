use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Asia::Kolkata;
use uuid::Uuid;

use engine::{
    Aggregator, Category, CategoryResolver, DEFAULT_EXPENSE_CATEGORY_ID, EngineError, IncomeEntry,
    MoneyCents, MonthlySnapshot, ThresholdClassifier, Transaction, YearMonth, balance,
    default_keyword_rules, merge_time_series,
};

struct Fixture {
    resolver: CategoryResolver,
    food: Uuid,
    rent: Uuid,
    education: Uuid,
    user: Uuid,
}

fn fixture() -> Fixture {
    let food = Uuid::new_v4();
    let rent = Uuid::new_v4();
    let education = Uuid::new_v4();
    let resolver = CategoryResolver::new(vec![
        Category {
            id: food,
            name: "Food".to_string(),
        },
        Category {
            id: rent,
            name: "Rent".to_string(),
        },
        Category {
            id: education,
            name: "Education".to_string(),
        },
    ]);
    Fixture {
        resolver,
        food,
        rent,
        education,
        user: Uuid::new_v4(),
    }
}

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, day, hour, 0, 0).unwrap()
}

fn spend(f: &Fixture, category: Uuid, cents: i64, when: DateTime<Utc>) -> Transaction {
    Transaction::new(
        Uuid::new_v4(),
        f.user,
        MoneyCents::new(cents),
        category,
        when,
        "merchant",
    )
    .unwrap()
}

#[test]
fn category_totals_conserve_the_overall_sum() {
    let f = fixture();
    let unknown = Uuid::new_v4();
    let amounts = [1, 99, 12_345, 7, 50_000, 333, 1_001, 42];
    let categories = [f.food, f.rent, f.education, unknown];
    let txs: Vec<Transaction> = amounts
        .iter()
        .enumerate()
        .map(|(i, cents)| spend(&f, categories[i % categories.len()], *cents, at(1, 0)))
        .collect();

    let breakdown = Aggregator::new(&f.resolver)
        .aggregate_by_category(&txs, MoneyCents::from_major(2_000))
        .unwrap();

    let expected: MoneyCents = txs.iter().map(|tx| tx.amount).sum();
    assert_eq!(breakdown.total(), expected);
    assert_eq!(breakdown.buckets.len(), 4);
}

#[test]
fn classification_never_divides_by_zero_income() {
    let f = fixture();
    let txs = vec![spend(&f, f.food, 100, at(1, 0))];
    let err = ThresholdClassifier::default()
        .classify_spending(&Aggregator::new(&f.resolver), &txs, MoneyCents::ZERO)
        .unwrap_err();
    assert_eq!(err, EngineError::IncomeNotSet);
}

#[test]
fn overspending_and_encouraged_categories() {
    let f = fixture();
    let txs = vec![
        spend(&f, f.rent, 400_00, at(1, 0)),
        spend(&f, f.food, 150_00, at(2, 0)),
        spend(&f, f.education, 50_00, at(3, 0)),
    ];
    let result = ThresholdClassifier::default()
        .classify_spending(
            &Aggregator::new(&f.resolver),
            &txs,
            MoneyCents::from_major(1_000),
        )
        .unwrap();

    let flagged: Vec<_> = result.flagged.iter().map(|s| s.category.as_str()).collect();
    let encouraged: Vec<_> = result.encouraged.iter().map(|s| s.category.as_str()).collect();
    assert_eq!(flagged, vec!["Rent"]);
    assert_eq!(encouraged, vec!["Education"]);
    assert_eq!(result.flagged[0].percentage.to_string(), "40.00");
}

#[test]
fn resolver_falls_back_for_unknown_ids() {
    let f = fixture();
    assert_eq!(f.resolver.resolve(&Uuid::new_v4()), "Other");
    assert_eq!(f.resolver.resolve(&f.food), "Food");
}

#[test]
fn merchant_classification_uses_keyword_order_and_default() {
    let resolver = CategoryResolver::default().with_rules(default_keyword_rules());
    let dining = resolver.classify_merchant("Blue Bar & Cafe").unwrap();
    assert_eq!(
        resolver
            .rules()
            .iter()
            .find(|r| r.category_id == dining)
            .map(|r| r.name.as_str()),
        Some("DiningOut")
    );
    assert_eq!(
        resolver.classify_merchant_or("Acme Holdings", DEFAULT_EXPENSE_CATEGORY_ID),
        DEFAULT_EXPENSE_CATEGORY_ID
    );
}

#[test]
fn time_series_uses_local_calendar_days() {
    let f = fixture();
    let income = vec![
        IncomeEntry::new(
            Uuid::new_v4(),
            f.user,
            "Salary",
            MoneyCents::from_major(500),
            at(1, 2),
        )
        .unwrap(),
    ];
    // 19:00 UTC on the 1st is 00:30 on the 2nd in Kolkata.
    let txs = vec![
        spend(&f, f.food, 100, at(1, 19)),
        spend(&f, f.food, 200, at(1, 19) + Duration::hours(5)),
    ];

    let series = merge_time_series(&income, &txs, &Kolkata);
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    assert_eq!(series[0].expense, MoneyCents::ZERO);
    assert_eq!(series[1].date, NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
    assert_eq!(series[1].expense, MoneyCents::new(300));
    assert!(merge_time_series(&[], &[], &Kolkata).is_empty());
}

#[test]
fn snapshot_converges_regardless_of_submission_order() {
    let f = fixture();
    let mut txs = vec![
        spend(&f, f.food, 100, at(3, 0)),
        spend(&f, f.rent, 900, at(4, 0)),
        spend(&f, f.food, 300, at(5, 0)),
    ];
    let period = YearMonth::new(2025, 6).unwrap();
    let forward = MonthlySnapshot::compute(f.user, period, &txs, &[], &Kolkata);
    txs.reverse();
    let backward = MonthlySnapshot::compute(f.user, period, &txs, &[], &Kolkata);

    assert_eq!(forward, backward);
    assert_eq!(forward.total_spent, MoneyCents::new(1_300));
    assert_eq!(forward.top_category, Some(f.rent));
    assert_eq!(balance(&[], &txs), MoneyCents::new(-1_300));
}
