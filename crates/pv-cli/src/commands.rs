use clap::Subcommand;

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// List users with a readable record
    List,

    /// Create a user with a fresh id and a record built from catalog defaults
    Create {
        /// Display name, unique among users (case-insensitive)
        #[arg(long)]
        name: String,

        /// Stored as given
        #[arg(long)]
        password: String,
    },

    /// Read one field of a user's record
    Get {
        /// User id (directory name)
        user: String,
        /// Field name
        field: String,
    },

    /// Write one field of a user's record
    Set {
        /// User id (directory name)
        user: String,
        /// Field name
        field: String,
        /// New value
        value: String,
    },

    /// Print a user's full record after migration
    Show {
        /// User id (directory name)
        user: String,
    },

    /// Migrate one user, or every user when none is given
    Migrate {
        /// User id (directory name)
        user: Option<String>,
    },

    /// Remove placeholder and half-created user directories
    Cleanup,

    /// Turn off the logged-in flag for every user
    LogoutAll,

    /// Print the preference catalog
    Catalog,
}
