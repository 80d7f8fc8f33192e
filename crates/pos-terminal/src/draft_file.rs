use anyhow::{Context, Result};
use chrono::Local;
use domain::session::{EditContext, SessionDraft, WeighingItem};
use serde::Deserialize;
use std::path::Path;

/// On-disk form of a session draft, the `record` command's stand-in for the
/// entry form. Date and time default to the device clock when omitted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftFile {
    pub buyer: String,
    #[serde(default)]
    pub driver: String,
    pub base_price: f64,
    #[serde(default)]
    pub cn_amount: f64,
    /// Gross weights in entry order; zero rows are scratch space
    pub weights: Vec<f64>,
    #[serde(default)]
    pub amount_paid: f64,
    #[serde(default)]
    pub notes: String,
    pub date: Option<String>,
    pub time: Option<String>,
    /// Re-edit an existing record (queued or already synced) by id
    pub edit_id: Option<String>,
}

impl DraftFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read draft file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("draft file {} is not valid JSON", path.display()))
    }

    pub fn into_draft(self, editing: Option<EditContext>) -> SessionDraft {
        let now = Local::now();
        SessionDraft {
            date: self
                .date
                .unwrap_or_else(|| now.format("%Y-%m-%d").to_string()),
            time: self.time.unwrap_or_else(|| now.format("%H:%M").to_string()),
            buyer: self.buyer,
            driver: self.driver,
            base_price: self.base_price,
            cn_amount: self.cn_amount,
            items: self
                .weights
                .iter()
                .enumerate()
                .map(|(i, &w)| WeighingItem::new(i as u32 + 1, w))
                .collect(),
            amount_paid: self.amount_paid,
            notes: self.notes,
            editing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_draft_parses() {
        let raw = r#"{"buyer": "Budi", "basePrice": 1000, "weights": [0, 12.5]}"#;
        let file: DraftFile = serde_json::from_str(raw).unwrap();
        assert_eq!(file.buyer, "Budi");
        assert_eq!(file.cn_amount, 0.0);

        let draft = file.into_draft(None);
        assert_eq!(draft.items.len(), 2);
        assert_eq!(draft.items[1].index, 2);
        assert_eq!(draft.items[1].gross_weight, 12.5);
        // device clock filled in
        assert_eq!(draft.date.len(), 10);
        assert_eq!(draft.time.len(), 5);
    }

    #[test]
    fn test_explicit_date_time_kept() {
        let raw = r#"{
            "buyer": "Budi",
            "basePrice": 1000,
            "weights": [10],
            "date": "2024-12-01",
            "time": "08:30"
        }"#;
        let draft: SessionDraft = serde_json::from_str::<DraftFile>(raw)
            .unwrap()
            .into_draft(None);
        assert_eq!(draft.date, "2024-12-01");
        assert_eq!(draft.time, "08:30");
    }
}
