use std::path::{Path, PathBuf};

use crate::data::loader::{self, RejectedEntry};
use crate::data::model::{GradeScale, Roster};

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Everything a query needs, independent of how results are displayed.
///
/// The roster is loaded once and only ever lent out by shared reference.
#[derive(Debug, Clone)]
pub struct Session {
    roster: Roster,

    /// Grading range used to validate thresholds and format averages.
    pub scale: GradeScale,

    /// Where the roster was read from.
    pub source: PathBuf,

    /// Entries skipped while loading.
    pub rejected: Vec<RejectedEntry>,

    /// Load failure shown to the user; the roster is empty when set.
    pub status_message: Option<String>,
}

impl Session {
    /// Wrap an already-built roster.
    pub fn new(roster: Roster, scale: GradeScale) -> Self {
        Self {
            roster,
            scale,
            source: PathBuf::new(),
            rejected: Vec::new(),
            status_message: None,
        }
    }

    /// Load the roster at `path`. A source that cannot be read leaves the
    /// session with an empty roster and a status message instead of failing.
    pub fn load(path: &Path, scale: GradeScale) -> Self {
        let mut session = Self::new(Roster::empty(), scale);
        session.source = path.to_path_buf();

        match loader::load_file(path) {
            Ok(outcome) => {
                log::info!(
                    "Loaded {} students from {} ({} rejected)",
                    outcome.roster.len(),
                    path.display(),
                    outcome.rejected.len()
                );
                session.roster = outcome.roster;
                session.rejected = outcome.rejected;
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                session.status_message = Some(format!("Error loading {}: {e:#}", path.display()));
            }
        }
        session
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }
}
