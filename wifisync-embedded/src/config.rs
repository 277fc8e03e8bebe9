use serde::{Deserialize, Serialize};

const DEFAULT_AP_CHANNEL: u8 = 1;

/// Tunables applied when the soft AP is configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadioConfig {
    pub ap_channel: u8,
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            ap_channel: DEFAULT_AP_CHANNEL,
        }
    }
}
