//! Store Info Model

use serde::{Deserialize, Serialize};

/// Store identity printed at the top of every receipt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
}

impl Default for StoreInfo {
    fn default() -> Self {
        Self {
            name: "Toko Saya".to_string(),
            address: String::new(),
            phone: String::new(),
        }
    }
}
