use crate::{Catalog, Preference};

use serde::{Deserialize, Serialize};

/// Leading decorations legacy callers put in front of a field name.
const DECORATIONS: [&str; 3] = ["get", "set", "is"];

/// How a caller-supplied name is matched against catalog field ids.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FieldLookup {
    /// Case-insensitive exact match on the field id.
    #[default]
    Exact,
    /// Legacy shorthand: `"pass"` and `"getPassword"` both resolve to `password`.
    Lenient,
}

impl FieldLookup {
    pub fn from_lenient_flag(lenient: bool) -> Self {
        if lenient { Self::Lenient } else { Self::Exact }
    }

    pub fn resolve<'c>(&self, catalog: &'c Catalog, name: &str) -> Option<&'c Preference> {
        let wanted = name.trim().to_lowercase();
        if wanted.is_empty() {
            return None;
        }

        let exact = find_equal(catalog, &wanted);
        match self {
            Self::Exact => exact,
            Self::Lenient => exact.or_else(|| {
                let cleaned = strip_decoration(&wanted);
                find_equal(catalog, cleaned).or_else(|| {
                    catalog
                        .entries()
                        .iter()
                        .find(|entry| entry.id.to_lowercase().contains(cleaned))
                })
            }),
        }
    }
}

fn find_equal<'c>(catalog: &'c Catalog, wanted: &str) -> Option<&'c Preference> {
    catalog
        .entries()
        .iter()
        .find(|entry| entry.id.eq_ignore_ascii_case(wanted))
}

fn strip_decoration(name: &str) -> &str {
    DECORATIONS
        .iter()
        .find_map(|prefix| name.strip_prefix(prefix).filter(|rest| !rest.is_empty()))
        .unwrap_or(name)
}
