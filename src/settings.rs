//! Runtime filter toggles.
//!
//! Settings are owned by an outside storage collaborator. The engine only
//! consults the current value before each scan.

use serde::Deserialize;

use crate::Result;

/// The three user-facing toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Settings {
    /// Master switch. When false a scan does nothing.
    #[serde(rename = "filterEnabled", default = "enabled_by_default")]
    pub enabled: bool,

    /// Check the blocked-airline keyword set.
    #[serde(rename = "airIndiaBlocked", default = "enabled_by_default")]
    pub block_airline: bool,

    /// Check the blocked-aircraft keyword set.
    #[serde(rename = "boeing737Blocked", default = "enabled_by_default")]
    pub block_aircraft: bool,
}

const fn enabled_by_default() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            block_airline: true,
            block_aircraft: true,
        }
    }
}

impl Settings {
    /// Read settings from the storage snapshot written by the settings UI.
    ///
    /// Missing keys default to `true`. Unrelated keys such as the removal
    /// total are ignored.
    ///
    /// ```rust
    /// use flight_filter::Settings;
    ///
    /// let s = Settings::from_storage_json(r#"{"airIndiaBlocked": false, "totalFiltered": 12}"#)?;
    /// assert!(s.enabled);
    /// assert!(!s.block_airline);
    /// # Ok::<(), flight_filter::Error>(())
    /// ```
    pub fn from_storage_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// True when a scan would check at least one keyword set.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.enabled && (self.block_airline || self.block_aircraft)
    }
}
