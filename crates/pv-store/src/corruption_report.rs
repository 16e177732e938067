use serde::Serialize;

use std::path::PathBuf;

const REPORT_TITLE: &str = "Corrupted User";

/// What is left of a user after its record was quarantined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorruptionReport {
    pub user_id: String,
    pub user_dir: PathBuf,
    /// Paths relative to `user_dir`, one level deep, sorted.
    pub remaining_files: Vec<String>,
    pub reason: String,
    /// Zip of the remaining files, when archiving is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive: Option<PathBuf>,
}

impl CorruptionReport {
    pub fn title(&self) -> &'static str {
        REPORT_TITLE
    }

    pub fn message(&self) -> String {
        let mut message = format!(
            "A user's data file was corrupted and had to be removed ({}). \
             The following files still exist and belong to the user at {}\nFiles:",
            self.reason,
            self.user_dir.display()
        );
        for file in &self.remaining_files {
            message.push_str("\n  ");
            message.push_str(file);
        }
        if let Some(archive) = &self.archive {
            message.push_str(&format!("\nA copy was archived to {}", archive.display()));
        }
        message
    }
}
