use serde::{Deserialize, Serialize};

use crate::session::{PaymentStatus, SessionId, WeighingItem};

/// The persisted body of a weighing session document.
///
/// Field names follow the remote document schema (camelCase), so documents
/// written by earlier clients stay readable. The identity lives outside this
/// struct: the remote store never receives an id inside a document body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub date: String,
    pub time: String,
    pub buyer: String,
    pub driver: String,
    pub base_price: f64,
    pub cn_amount: f64,
    /// Snapshot of `max(0, base_price - cn_amount)` taken at save time.
    /// Frozen thereafter, even if base/cn are shown next to it after a re-edit.
    pub final_price: f64,
    pub items: Vec<WeighingItem>,
    pub total_net_weight: f64,
    pub total_amount: f64,
    pub total_coli: usize,
    pub amount_paid: f64,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub notes: String,
    pub created_by: String,
    pub created_at: i64,
}

/// A weighing session with its identity attached.
///
/// Exclusively owned by either the offline queue (pending, or synced but
/// edited offline) or the remote store; the reconciler moves ownership one
/// record at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeighingSession {
    pub id: SessionId,
    #[serde(flatten)]
    pub data: SessionData,
}

impl WeighingSession {
    pub fn new(id: SessionId, data: SessionData) -> Self {
        Self { id, data }
    }

    /// Sort key for most-recent-first ordering: `date` + `time` compare
    /// lexicographically because both are fixed-width (`YYYY-MM-DD`, `HH:MM`).
    pub fn recency_key(&self) -> String {
        format!("{}T{}", self.data.date, self.data.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data() -> SessionData {
        SessionData {
            date: "2024-12-01".to_string(),
            time: "08:30".to_string(),
            buyer: "Budi".to_string(),
            driver: "B1234".to_string(),
            base_price: 1000.0,
            cn_amount: 0.0,
            final_price: 1000.0,
            items: vec![WeighingItem::new(1, 50.0)],
            total_net_weight: 50.0,
            total_amount: 50_000.0,
            total_coli: 1,
            amount_paid: 50_000.0,
            payment_status: PaymentStatus::Lunas,
            notes: String::new(),
            created_by: "kasir@example.com".to_string(),
            created_at: 1_733_000_000_000,
        }
    }

    #[test]
    fn test_document_shape() {
        let session =
            WeighingSession::new(SessionId::parse("abc123").unwrap(), sample_data());
        let doc = serde_json::to_value(&session).unwrap();

        // id flattened next to the camelCase body fields
        assert_eq!(doc["id"], "abc123");
        assert_eq!(doc["basePrice"], 1000.0);
        assert_eq!(doc["totalNetWeight"], 50.0);
        assert_eq!(doc["paymentStatus"], "Lunas");
    }

    #[test]
    fn test_round_trip_recovers_sync_state() {
        let session =
            WeighingSession::new(SessionId::pending(1712, 7), sample_data());
        let json = serde_json::to_string(&session).unwrap();
        let back: WeighingSession = serde_json::from_str(&json).unwrap();
        assert!(back.id.is_pending());
        assert_eq!(back.data, session.data);
    }

    #[test]
    fn test_missing_notes_defaults_empty() {
        let mut doc = serde_json::to_value(WeighingSession::new(
            SessionId::parse("abc").unwrap(),
            sample_data(),
        ))
        .unwrap();
        doc.as_object_mut().unwrap().remove("notes");
        let back: WeighingSession = serde_json::from_value(doc).unwrap();
        assert_eq!(back.data.notes, "");
    }

    #[test]
    fn test_final_price_is_a_stored_snapshot() {
        // A document whose finalPrice no longer equals base - cn (the price
        // was re-edited later) keeps the frozen value on read.
        let mut doc = serde_json::to_value(WeighingSession::new(
            SessionId::parse("abc").unwrap(),
            sample_data(),
        ))
        .unwrap();
        doc["basePrice"] = serde_json::json!(2000.0);

        let back: WeighingSession = serde_json::from_value(doc).unwrap();
        assert_eq!(back.data.base_price, 2000.0);
        assert_eq!(back.data.final_price, 1000.0);
    }

    #[test]
    fn test_recency_key_ordering() {
        let mut a = sample_data();
        a.time = "08:30".to_string();
        let mut b = sample_data();
        b.time = "14:05".to_string();

        let sa = WeighingSession::new(SessionId::parse("a").unwrap(), a);
        let sb = WeighingSession::new(SessionId::parse("b").unwrap(), b);
        assert!(sb.recency_key() > sa.recency_key());
    }
}
