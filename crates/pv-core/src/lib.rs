pub mod catalog;
pub mod error;
pub mod field_accessor;
pub mod field_kind;
pub mod field_lookup;
pub mod preference;
pub mod record;
pub mod user_id;

#[cfg(test)]
mod tests;

pub use catalog::Catalog;
pub use error::{CoreError, Result as CoreResult};
pub use field_accessor::FieldAccessor;
pub use field_kind::FieldKind;
pub use field_lookup::FieldLookup;
pub use preference::Preference;
pub use record::{Record, is_null_like};
pub use user_id::UserId;

/// Identity field holding the user's display name.
pub const NAME_FIELD: &str = "name";
/// Identity field holding the user's hashed password.
pub const PASSWORD_FIELD: &str = "password";
/// Preference tracking whether the user has an active session.
pub const LOGGED_IN_FIELD: &str = "loggedin";

pub const TOGGLE_ON: &str = "1";
pub const TOGGLE_OFF: &str = "0";
