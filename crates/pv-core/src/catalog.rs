//! The preference catalog: the schema every stored record is validated against.
//!
//! The standard catalog is built once per process. Tests and embedders that
//! need a newer schema derive one with [`Catalog::with_entry`].

use crate::{CoreError, CoreResult, NAME_FIELD, PASSWORD_FIELD, Preference};

use std::collections::HashSet;
use std::sync::OnceLock;

static STANDARD: OnceLock<Catalog> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<Preference>,
}

impl Catalog {
    /// Builds a catalog, rejecting empty or duplicate (case-insensitive) ids.
    pub fn new(entries: Vec<Preference>) -> CoreResult<Self> {
        let mut seen = HashSet::with_capacity(entries.len());

        for entry in &entries {
            if entry.id.trim().is_empty() {
                return Err(CoreError::invalid_catalog("field id cannot be empty"));
            }
            if !seen.insert(entry.id.to_lowercase()) {
                return Err(CoreError::invalid_catalog(format!(
                    "duplicate field id {:?}",
                    entry.id
                )));
            }
            if !entry.is_identity() {
                entry.kind.check_value(&entry.id, &entry.default_value)?;
            }
        }

        Ok(Self { entries })
    }

    /// The catalog shipped with the application.
    pub fn standard() -> &'static Catalog {
        STANDARD.get_or_init(|| Self {
            entries: standard_entries(),
        })
    }

    /// Returns a copy of this catalog with `preference` appended.
    pub fn with_entry(&self, preference: Preference) -> CoreResult<Self> {
        let mut entries = self.entries.clone();
        entries.push(preference);
        Self::new(entries)
    }

    pub fn entries(&self) -> &[Preference] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every field id in catalog order. Call again to restart.
    pub fn all_field_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|entry| entry.id.as_str())
    }

    /// Exact lookup by field id.
    pub fn get(&self, field_id: &str) -> Option<&Preference> {
        self.entries.iter().find(|entry| entry.id == field_id)
    }

    #[track_caller]
    pub fn default_of(&self, field_id: &str) -> CoreResult<&str> {
        self.get(field_id)
            .map(|entry| entry.default_value.as_str())
            .ok_or_else(|| CoreError::unknown_field(field_id))
    }

    /// Fields whose invalid value makes a whole record unrecoverable.
    pub fn identity_fields(&self) -> impl Iterator<Item = &Preference> + '_ {
        self.entries
            .iter()
            .filter(|entry| entry.kind.is_fatal_when_invalid())
    }
}

fn standard_entries() -> Vec<Preference> {
    let last_start = chrono::Utc::now().timestamp_millis().to_string();

    vec![
        Preference::identity(NAME_FIELD),
        Preference::identity(PASSWORD_FIELD),
        Preference::text("font", "Agency FB"),
        Preference::text("foreground", "f0f0f0"),
        Preference::text("background", "101010"),
        Preference::toggle("intromusic", "0", "Intro Music", "Play intro music on start"),
        Preference::toggle(
            "debugwindows",
            "0",
            "Debug Windows",
            "Show debug menus on startup",
        ),
        Preference::toggle(
            "randombackground",
            "0",
            "Random Background",
            "Choose a random background on startup",
        ),
        Preference::toggle(
            "outputborder",
            "0",
            "Output Border",
            "Draw a border around the output area",
        ),
        Preference::toggle(
            "inputborder",
            "0",
            "Input Border",
            "Draw a border around the input area",
        ),
        Preference::toggle("hourlychimes", "1", "Hourly Chimes", "Chime every hour"),
        Preference::toggle(
            "silenceerrors",
            "1",
            "Silence Errors",
            "Don't open errors externally",
        ),
        Preference::toggle(
            "fullscreen",
            "0",
            "Fullscreen",
            "Fullscreen the console (this also covers the taskbar)",
        ),
        Preference::toggle(
            "outputfill",
            "0",
            "Output Fill",
            "Fill the output area with the background color",
        ),
        Preference::toggle(
            "inputfill",
            "0",
            "Input Fill",
            "Fill the input area with the background color",
        ),
        Preference::toggle(
            "clockonconsole",
            "1",
            "Clock On Console",
            "Show a clock at the top of the console",
        ),
        Preference::toggle(
            "showseconds",
            "1",
            "Show Seconds",
            "Show seconds on the console clock if enabled",
        ),
        Preference::toggle("filterchat", "1", "Filter Chat", "Filter foul language"),
        Preference::text("laststart", last_start),
        Preference::toggle(
            "minimizeonclose",
            "0",
            "Minimize On Close",
            "Minimize instead of exiting whenever a close action is requested",
        ),
        Preference::toggle(
            "typinganimation",
            "1",
            "Typing Animation",
            "Typing animation on console for non-vital outputs",
        ),
        Preference::toggle(
            "typingsound",
            "1",
            "Typing Animation Sound",
            "Typing animation sound effect to play if typing animation is enabled",
        ),
        Preference::toggle(
            "showbusyicon",
            "1",
            "Show Busy Animation",
            "Show when the application is busy by changing the tray icon",
        ),
        Preference::toggle(
            "roundedwindows",
            "0",
            "Rounded Windows",
            "Make certain windows rounded",
        ),
        Preference::text("windowcolor", "1A2033"),
        Preference::text("consoleclockformat", "EEEEEEEEE h:mmaa"),
        Preference::text("youtubeuuid", "aaaaaaaaaaa"),
        Preference::toggle(
            "capsmode",
            "0",
            "Capital Letters Mode",
            "Capitalize all console output",
        ),
        Preference::text("loggedin", "0"),
        Preference::toggle(
            "audiolength",
            "1",
            "Show Audio Total Length",
            "Show the total audio time instead of the time remaining",
        ),
        Preference::toggle(
            "persistentnotifications",
            "0",
            "Persistent Notifications",
            "Notifications stay on screen until manually dismissed",
        ),
        Preference::toggle(
            "doanimations",
            "1",
            "Do Animations",
            "Use animations for frame movement and notifications",
        ),
        Preference::toggle(
            "compacttextmode",
            "0",
            "Compact Text",
            "Compact the text and components in supported text panes",
        ),
        Preference::text("fontsize", "30"),
        Preference::toggle(
            "wrapshell",
            "0",
            "Wrap Shell",
            "Pass unrecognized commands to the native shell",
        ),
        Preference::toggle("darkmode", "0", "Dark Mode", "Activate dark mode"),
        Preference::toggle(
            "weathermap",
            "1",
            "Weather Map",
            "Show a map of the location's area in the weather widget background",
        ),
        Preference::toggle(
            "paintclocklabels",
            "1",
            "Paint Clock Labels",
            "Paint the hour labels on the clock widget",
        ),
        Preference::toggle(
            "showsecondhand",
            "1",
            "Show Second Hand",
            "Show the second hand on the clock widget",
        ),
    ]
}
