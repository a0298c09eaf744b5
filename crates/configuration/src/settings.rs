use core_types::StoreId;
use serde::Deserialize;

/// Store whose type is surfaced beside the top-store headline metric when no
/// override is configured.
pub const DEFAULT_REFERENCE_STORE_ID: StoreId = 20;

/// Label shown on the most-selling-holiday tile when no override is
/// configured. This value is presentation configuration, not derived from
/// the sales data.
pub const DEFAULT_HOLIDAY_LABEL: &str = "Thanksgiving";

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub summary: SummarySettings,
}

/// Settings for the headline summary metrics.
#[derive(Debug, Clone, Deserialize)]
pub struct SummarySettings {
    /// The store whose type is reported alongside the top-store metric.
    #[serde(default = "default_reference_store_id")]
    pub reference_store_id: StoreId,

    /// The fixed label for the most-selling-holiday tile.
    #[serde(default = "default_holiday_label")]
    pub holiday_label: String,
}

impl Default for SummarySettings {
    fn default() -> Self {
        Self {
            reference_store_id: DEFAULT_REFERENCE_STORE_ID,
            holiday_label: DEFAULT_HOLIDAY_LABEL.to_string(),
        }
    }
}

fn default_reference_store_id() -> StoreId {
    DEFAULT_REFERENCE_STORE_ID
}

fn default_holiday_label() -> String {
    DEFAULT_HOLIDAY_LABEL.to_string()
}
