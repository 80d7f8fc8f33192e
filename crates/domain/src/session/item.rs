use serde::{Deserialize, Serialize};

/// One load placed on the scale during a session.
///
/// Rows with a zero weight are form scratch space; they are filtered out
/// when the session is built for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeighingItem {
    pub id: String,
    pub index: u32,
    pub gross_weight: f64,
}

impl WeighingItem {
    pub fn new(index: u32, gross_weight: f64) -> Self {
        Self {
            id: index.to_string(),
            index,
            gross_weight,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.gross_weight <= 0.0
    }
}
