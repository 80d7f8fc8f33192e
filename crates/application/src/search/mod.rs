//! Multi-term search over an in-memory session snapshot.
//!
//! Pure, synchronous, recomputed per query: every call filters and fully
//! re-ranks the given snapshot. Cost is linear in records × tokens, which is
//! fine for single-site, human-entered volumes.
//!
//! Query grammar: terms separated by whitespace, comma or semicolon; ALL
//! terms must match (each against at least one field). Terms may be
//! comparison operators: `>2000000` / `<2000000` against the total amount,
//! `>2024-12-01` / `<2024-12-31` against the date, `berat>100` / `berat<50`
//! against the total net weight (comma decimals).

use domain::session::WeighingSession;

/// Indonesian month names, lowercase, for month-name term matching.
const MONTH_NAMES: [&str; 12] = [
    "januari",
    "februari",
    "maret",
    "april",
    "mei",
    "juni",
    "juli",
    "agustus",
    "september",
    "oktober",
    "november",
    "desember",
];

/// Split a raw query into lowercase search terms.
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Filter a snapshot by the query and rank the survivors by relevance.
///
/// An empty or whitespace-only query is the identity: the input is returned
/// unfiltered, original order preserved.
pub fn filter_and_rank(sessions: &[WeighingSession], query: &str) -> Vec<WeighingSession> {
    let tokens = tokenize(query);
    if tokens.is_empty() {
        return sessions.to_vec();
    }

    let mut hits: Vec<WeighingSession> = sessions
        .iter()
        .filter(|s| tokens.iter().all(|t| matches_token(s, t)))
        .cloned()
        .collect();

    hits.sort_by(|a, b| {
        relevance_score(b, &tokens)
            .cmp(&relevance_score(a, &tokens))
            .then_with(|| b.recency_key().cmp(&a.recency_key()))
    });

    hits
}

/// Additive relevance heuristic, summed over tokens; a token can score on
/// several fields at once.
pub fn relevance_score(session: &WeighingSession, tokens: &[String]) -> i64 {
    let data = &session.data;
    let buyer = data.buyer.to_lowercase();
    let driver = data.driver.to_lowercase();
    let amount = number_string(data.total_amount);

    let mut score = 0;
    for token in tokens {
        if buyer == *token {
            score += 10;
        } else if buyer.contains(token.as_str()) {
            score += 5;
        }

        if driver == *token {
            score += 8;
        } else if driver.contains(token.as_str()) {
            score += 4;
        }

        if data.date.contains(token.as_str()) {
            score += 3;
        }

        if data.total_amount != 0.0 && amount.contains(token.as_str()) {
            score += 2;
        }
    }
    score
}

/// One term against one session: substring fields OR operator comparisons.
fn matches_token(session: &WeighingSession, token: &str) -> bool {
    text_match(session, token) || operator_match(session, token).unwrap_or(false)
}

fn text_match(session: &WeighingSession, token: &str) -> bool {
    let data = &session.data;

    if data.buyer.to_lowercase().contains(token) || data.driver.to_lowercase().contains(token) {
        return true;
    }
    if data.date.contains(token) || data.time.contains(token) {
        return true;
    }
    if date_variants(&data.date)
        .iter()
        .any(|v| v.contains(token))
    {
        return true;
    }
    if month_name(&data.date).is_some_and(|name| name.contains(token)) {
        return true;
    }

    // Amounts compare digits-only: "2.000.000" finds 2000000
    if data.total_amount != 0.0
        && number_string(data.total_amount).contains(&strip_separators(token))
    {
        return true;
    }

    // Weights display with comma decimals: "12,5" finds 12.5
    if data.total_net_weight != 0.0
        && number_string(data.total_net_weight)
            .replace('.', ",")
            .contains(token)
    {
        return true;
    }

    false
}

/// Evaluate a comparison-operator term. `None` means the term is not
/// operator-shaped (or its operand does not parse) and should fall back to
/// plain text matching.
///
/// A `>`/`<` operand that looks like an ISO date is always a date
/// comparison, never an amount comparison: one term, one interpretation.
fn operator_match(session: &WeighingSession, token: &str) -> Option<bool> {
    let data = &session.data;

    if let Some(rest) = token.strip_prefix("berat>") {
        let value = parse_comma_decimal(rest)?;
        return Some(data.total_net_weight > value);
    }
    if let Some(rest) = token.strip_prefix("berat<") {
        let value = parse_comma_decimal(rest)?;
        return Some(data.total_net_weight < value);
    }

    let (greater, operand) = match (token.strip_prefix('>'), token.strip_prefix('<')) {
        (Some(rest), _) => (true, rest),
        (None, Some(rest)) => (false, rest),
        _ => return None,
    };

    if is_iso_date(operand) {
        // YYYY-MM-DD compares lexicographically
        return Some(if greater {
            data.date.as_str() > operand
        } else {
            data.date.as_str() < operand
        });
    }

    let value: f64 = strip_separators(operand).parse().ok()?;
    Some(if greater {
        data.total_amount > value
    } else {
        data.total_amount < value
    })
}

/// Alternate spellings of the session date a user might type:
/// month-year and day-month pairs in both separators, plus the short
/// id-ID rendering (`1/12/2024`, no zero padding).
fn date_variants(date: &str) -> Vec<String> {
    let mut parts = date.splitn(3, '-');
    let (Some(year), Some(month), Some(day)) = (parts.next(), parts.next(), parts.next()) else {
        return Vec::new();
    };

    let mut variants = vec![
        format!("{month}-{year}"),
        format!("{year}-{month}"),
        format!("{month}/{year}"),
        format!("{year}/{month}"),
        format!("{day}/{month}"),
        format!("{day}-{month}"),
    ];

    if let (Ok(d), Ok(m)) = (day.parse::<u32>(), month.parse::<u32>()) {
        variants.push(format!("{d}/{m}/{year}"));
    }

    variants
}

/// Lowercase Indonesian month name for the session's month, if the date parses.
fn month_name(date: &str) -> Option<&'static str> {
    let month: usize = date.split('-').nth(1)?.parse().ok()?;
    MONTH_NAMES.get(month.checked_sub(1)?).copied()
}

/// Render a number the way it displays: no decimal point when integral.
fn number_string(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn strip_separators(token: &str) -> String {
    token.replace(['.', ','], "")
}

fn parse_comma_decimal(raw: &str) -> Option<f64> {
    raw.replace(',', ".").parse().ok()
}

fn is_iso_date(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && [0, 1, 2, 3, 5, 6, 8, 9]
            .iter()
            .all(|&i| bytes[i].is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_separators() {
        assert_eq!(tokenize("budi desember"), vec!["budi", "desember"]);
        assert_eq!(tokenize("Budi,Desember;  jan"), vec!["budi", "desember", "jan"]);
        assert_eq!(tokenize("   "), Vec::<String>::new());
    }

    #[test]
    fn test_number_string_drops_integral_decimals() {
        assert_eq!(number_string(2_000_000.0), "2000000");
        assert_eq!(number_string(12.5), "12.5");
    }

    #[test]
    fn test_is_iso_date() {
        assert!(is_iso_date("2024-12-01"));
        assert!(!is_iso_date("2024-12-1"));
        assert!(!is_iso_date("5000000"));
        assert!(!is_iso_date("2024/12/01"));
    }

    #[test]
    fn test_date_variants() {
        let variants = date_variants("2024-12-01");
        assert!(variants.contains(&"12-2024".to_string()));
        assert!(variants.contains(&"2024/12".to_string()));
        assert!(variants.contains(&"01/12".to_string()));
        assert!(variants.contains(&"1/12/2024".to_string()));
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name("2024-12-01"), Some("desember"));
        assert_eq!(month_name("2024-01-15"), Some("januari"));
        assert_eq!(month_name("garbage"), None);
    }

    #[test]
    fn test_parse_comma_decimal() {
        assert_eq!(parse_comma_decimal("12,5"), Some(12.5));
        assert_eq!(parse_comma_decimal("100"), Some(100.0));
        assert_eq!(parse_comma_decimal("abc"), None);
    }
}
