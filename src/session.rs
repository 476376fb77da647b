//! Session state
//!
//! Owns the current profile and the append-only log for one session. The
//! engine stays stateless: every derived figure is recomputed here from the
//! profile as it is now, so editing the profile shifts historical balances.

use crate::db::{Database, DbResult};
use crate::engine::{self, AnnotatedEntry, Statistics};
use crate::models::{LogEntry, LogEntryCreate, Profile};

pub struct Session {
    profile: Profile,
    database: Database,
}

impl Session {
    /// Start a session with an empty log
    pub fn new(profile: Profile) -> DbResult<Self> {
        Ok(Self {
            profile,
            database: Database::open_in_memory()?,
        })
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Replace the profile. Logged entries are kept.
    pub fn set_profile(&mut self, profile: Profile) {
        self.profile = profile;
    }

    /// Append one entry to the log
    pub fn add_entry(&self, data: &LogEntryCreate) -> DbResult<LogEntry> {
        let entry = self.database.with_conn(|conn| LogEntry::append(conn, data))?;
        tracing::info!(id = entry.id, date = %entry.date, "Log entry added");
        Ok(entry)
    }

    /// The whole log in insertion order
    pub fn entries(&self) -> DbResult<Vec<LogEntry>> {
        self.database.with_conn(LogEntry::list)
    }

    pub fn is_empty(&self) -> DbResult<bool> {
        Ok(self.database.with_conn(LogEntry::count)? == 0)
    }

    pub fn bmr(&self) -> f64 {
        engine::compute_bmr(&self.profile)
    }

    pub fn maintenance(&self) -> f64 {
        engine::compute_maintenance(self.bmr(), self.profile.activity_factor())
    }

    pub fn target_calories(&self) -> f64 {
        engine::compute_target_calories(self.maintenance(), self.profile.goal)
    }

    /// Every entry with burn, net calories and balance against today's maintenance
    pub fn annotated_entries(&self) -> DbResult<Vec<AnnotatedEntry>> {
        let maintenance = self.maintenance();
        Ok(self
            .entries()?
            .iter()
            .map(|e| engine::annotate_entry(e, maintenance))
            .collect())
    }

    /// Statistics over the log, None while it is empty
    pub fn statistics(&self) -> DbResult<Option<Statistics>> {
        let annotated = self.annotated_entries()?;
        Ok(engine::aggregate(&annotated, self.maintenance(), &self.profile))
    }
}
