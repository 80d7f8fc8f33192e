use application::search::{filter_and_rank, relevance_score, tokenize};
use domain::session::{
    PaymentStatus, SessionData, SessionId, WeighingItem, WeighingSession,
};

fn session(
    id: &str,
    buyer: &str,
    driver: &str,
    date: &str,
    time: &str,
    total_amount: f64,
    total_net_weight: f64,
) -> WeighingSession {
    WeighingSession::new(
        SessionId::parse(id).unwrap(),
        SessionData {
            date: date.to_string(),
            time: time.to_string(),
            buyer: buyer.to_string(),
            driver: driver.to_string(),
            base_price: 1000.0,
            cn_amount: 0.0,
            final_price: 1000.0,
            items: vec![WeighingItem::new(1, total_net_weight)],
            total_net_weight,
            total_amount,
            total_coli: 1,
            amount_paid: 0.0,
            payment_status: PaymentStatus::BelumLunas,
            notes: String::new(),
            created_by: "kasir@example.com".to_string(),
            created_at: 0,
        },
    )
}

fn ids(results: &[WeighingSession]) -> Vec<&str> {
    results.iter().map(|s| s.id.as_str()).collect()
}

#[test]
fn test_empty_query_is_identity() {
    let sessions = vec![
        session("a", "Budi", "B1", "2024-12-01", "08:00", 100.0, 10.0),
        session("b", "Agus", "B2", "2024-11-01", "09:00", 200.0, 20.0),
    ];

    assert_eq!(ids(&filter_and_rank(&sessions, "")), vec!["a", "b"]);
    assert_eq!(ids(&filter_and_rank(&sessions, "   ")), vec!["a", "b"]);
}

#[test]
fn test_and_across_tokens() {
    // "budi desember": buyer must contain budi AND the date must fall in December
    let sessions = vec![
        session("hit", "Budi", "B1", "2024-12-05", "08:00", 100.0, 10.0),
        session("wrong-month", "Budi", "B1", "2024-11-05", "08:00", 100.0, 10.0),
        session("wrong-buyer", "Agus", "B1", "2024-12-05", "08:00", 100.0, 10.0),
    ];

    assert_eq!(ids(&filter_and_rank(&sessions, "budi desember")), vec!["hit"]);
}

#[test]
fn test_or_across_fields_per_token() {
    // A single token may hit on the buyer of one session and the date of another
    let sessions = vec![
        session("by-buyer", "Desi", "B1", "2024-03-01", "08:00", 100.0, 10.0),
        session("by-month", "Agus", "B1", "2024-12-01", "08:00", 100.0, 10.0),
        session("miss", "Budi", "B1", "2024-03-01", "08:00", 100.0, 10.0),
    ];

    let results = filter_and_rank(&sessions, "des");
    let mut found = ids(&results);
    found.sort();
    assert_eq!(found, vec!["by-buyer", "by-month"]);
}

#[test]
fn test_amount_substring_semantics() {
    // "2000000" is a substring of 2000000 and 12000000, never of 2500000
    let sessions = vec![
        session("exact", "A", "B", "2024-01-01", "08:00", 2_000_000.0, 10.0),
        session("prefixed", "B", "B", "2024-01-02", "08:00", 12_000_000.0, 10.0),
        session("close-but-no", "C", "B", "2024-01-03", "08:00", 2_500_000.0, 10.0),
    ];

    let results = filter_and_rank(&sessions, "2000000");
    let mut found = ids(&results);
    found.sort();
    assert_eq!(found, vec!["exact", "prefixed"]);
}

#[test]
fn test_amount_token_punctuation_stripped() {
    let sessions = vec![session(
        "a",
        "Budi",
        "B1",
        "2024-01-01",
        "08:00",
        2_000_000.0,
        10.0,
    )];

    assert_eq!(filter_and_rank(&sessions, "2.000.000").len(), 1);
    assert_eq!(filter_and_rank(&sessions, "2,000,000").len(), 1);
}

#[test]
fn test_amount_comparison_operators() {
    let sessions = vec![
        session("small", "A", "B", "2024-01-01", "08:00", 1_500_000.0, 10.0),
        session("big", "B", "B", "2024-01-02", "08:00", 2_500_000.0, 10.0),
    ];

    assert_eq!(ids(&filter_and_rank(&sessions, ">2000000")), vec!["big"]);
    assert_eq!(ids(&filter_and_rank(&sessions, "<2000000")), vec!["small"]);
}

#[test]
fn test_weight_comparison_operators() {
    let sessions = vec![
        session("light", "A", "B", "2024-01-01", "08:00", 100.0, 80.0),
        session("heavy", "B", "B", "2024-01-02", "08:00", 100.0, 150.0),
    ];

    assert_eq!(ids(&filter_and_rank(&sessions, "berat<100")), vec!["light"]);
    assert_eq!(ids(&filter_and_rank(&sessions, "berat>100")), vec!["heavy"]);
    // comma-decimal operand
    assert_eq!(ids(&filter_and_rank(&sessions, "berat>80,5")), vec!["heavy"]);
}

#[test]
fn test_date_range_operators() {
    let sessions = vec![
        session("early", "A", "B", "2024-12-05", "08:00", 100.0, 10.0),
        session("late", "B", "B", "2024-12-20", "08:00", 100.0, 10.0),
    ];

    assert_eq!(ids(&filter_and_rank(&sessions, ">2024-12-15")), vec!["late"]);
    assert_eq!(ids(&filter_and_rank(&sessions, "<2024-12-15")), vec!["early"]);
}

#[test]
fn test_date_shaped_operand_never_compares_amounts() {
    // Amount 30,000,000 > 20,241,201, so an amount reading of ">2024-12-01"
    // would match. The date reading must win: 2024-11-30 is before the bound.
    let sessions = vec![session(
        "nov",
        "Budi",
        "B1",
        "2024-11-30",
        "08:00",
        30_000_000.0,
        10.0,
    )];

    assert!(filter_and_rank(&sessions, ">2024-12-01").is_empty());
}

#[test]
fn test_driver_and_time_fields_match() {
    let sessions = vec![
        session("a", "Budi", "B1234XY", "2024-01-01", "08:30", 100.0, 10.0),
        session("b", "Agus", "D5678Z", "2024-01-01", "14:00", 100.0, 10.0),
    ];

    assert_eq!(ids(&filter_and_rank(&sessions, "b1234")), vec!["a"]);
    assert_eq!(ids(&filter_and_rank(&sessions, "14:00")), vec!["b"]);
}

#[test]
fn test_date_variant_separators() {
    let sessions = vec![session(
        "a",
        "Budi",
        "B1",
        "2024-12-05",
        "08:00",
        100.0,
        10.0,
    )];

    for query in ["12-2024", "2024/12", "05/12", "5/12/2024"] {
        assert_eq!(filter_and_rank(&sessions, query).len(), 1, "query {query}");
    }
}

#[test]
fn test_ranking_prefers_exact_buyer_then_recency() {
    let sessions = vec![
        session("partial", "Budiman", "B1", "2024-12-01", "08:00", 100.0, 10.0),
        session("exact-old", "Budi", "B1", "2024-12-01", "08:00", 100.0, 10.0),
        session("exact-new", "Budi", "B1", "2024-12-02", "09:00", 100.0, 10.0),
    ];

    let results = filter_and_rank(&sessions, "budi");
    assert_eq!(ids(&results), vec!["exact-new", "exact-old", "partial"]);
}

#[test]
fn test_scores_accumulate_across_fields() {
    // One token hitting buyer and date scores both contributions
    let s = session("a", "2024", "B1", "2024-12-01", "08:00", 100.0, 10.0);
    let tokens = tokenize("2024");
    // buyer exact (10) + date substring (3)
    assert_eq!(relevance_score(&s, &tokens), 13);
}

#[test]
fn test_weight_with_comma_decimal_matches() {
    let sessions = vec![session(
        "a",
        "Budi",
        "B1",
        "2024-01-01",
        "08:00",
        100.0,
        12.5,
    )];

    assert_eq!(filter_and_rank(&sessions, "12,5").len(), 1);
}
