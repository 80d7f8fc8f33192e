use serde::{Deserialize, Serialize};

/// Farm identity printed on the receipt header.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmSettings {
    pub farm_name: String,
    pub farm_address: String,
}

impl Default for FarmSettings {
    fn default() -> Self {
        Self {
            farm_name: "HARAPAN BROILER".to_string(),
            farm_address: "Jln Sawang Ujung, Perum Griya Azna Indah No 73".to_string(),
        }
    }
}
