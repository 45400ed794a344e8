//! Settings singleton and PIN hashes

use shared::models::{AppSettings, Role};

use super::{SETTINGS_TABLE, Store, StoreResult};

const APP_SETTINGS_KEY: &str = "app";

fn pin_key(role: Role) -> String {
    format!("pin:{}", role.key())
}

impl Store {
    /// Current settings; defaults when nothing was saved yet
    pub fn get_settings(&self) -> StoreResult<AppSettings> {
        Ok(self
            .read_one(SETTINGS_TABLE, APP_SETTINGS_KEY)?
            .unwrap_or_default())
    }

    /// Validate and persist settings, returning what was stored
    pub fn save_settings(&self, settings: &AppSettings) -> StoreResult<AppSettings> {
        settings.validate()?;
        self.write_one(SETTINGS_TABLE, APP_SETTINGS_KEY, settings)?;
        self.get_settings()
    }

    pub fn get_pin_hash(&self, role: Role) -> StoreResult<Option<String>> {
        self.read_one(SETTINGS_TABLE, &pin_key(role))
    }

    pub fn set_pin_hash(&self, role: Role, hash: &str) -> StoreResult<()> {
        self.write_one(SETTINGS_TABLE, &pin_key(role), &hash)
    }
}
