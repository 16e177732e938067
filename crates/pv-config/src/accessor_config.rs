use crate::DEFAULT_LENIENT_LOOKUP;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AccessorConfig {
    /// Accept legacy shorthand field names such as `pass` for `password`.
    pub lenient_lookup: bool,
}

impl Default for AccessorConfig {
    fn default() -> Self {
        Self {
            lenient_lookup: DEFAULT_LENIENT_LOOKUP,
        }
    }
}
