//! Activity records and their seed-file representation.

use serde::{Deserialize, Serialize};

/// An extracurricular activity as reported by the directory.
///
/// The name is the key in the directory and is not repeated here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Free-text description.
    pub description: String,
    /// Human-readable meeting times.
    pub schedule: String,
    /// Capacity; informational unless enforcement is enabled on the store.
    pub max_participants: u32,
    /// Participant emails in signup order.
    #[serde(default)]
    pub participants: Vec<String>,
}

impl Activity {
    /// Create an activity with no participants.
    pub fn new(
        description: impl Into<String>,
        schedule: impl Into<String>,
        max_participants: u32,
    ) -> Self {
        Self {
            description: description.into(),
            schedule: schedule.into(),
            max_participants,
            participants: Vec::new(),
        }
    }

    /// Builder-style helper for seeding participants.
    pub fn with_participants<I, S>(mut self, participants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.participants = participants.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `email` is currently signed up.
    pub fn has_participant(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p == email)
    }

    /// Number of free spots, zero once capacity is reached or exceeded.
    pub fn spots_left(&self) -> u32 {
        let taken = u32::try_from(self.participants.len()).unwrap_or(u32::MAX);
        self.max_participants.saturating_sub(taken)
    }

    /// Whether the participant count has reached capacity.
    pub fn is_full(&self) -> bool {
        self.spots_left() == 0
    }
}

/// One `[[activity]]` table of a seed file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySeed {
    /// Unique activity name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Human-readable meeting times.
    pub schedule: String,
    /// Capacity.
    pub max_participants: u32,
    /// Participants present at startup.
    #[serde(default)]
    pub participants: Vec<String>,
}

impl ActivitySeed {
    fn new(name: String, activity: Activity) -> Self {
        Self {
            name,
            description: activity.description,
            schedule: activity.schedule,
            max_participants: activity.max_participants,
            participants: activity.participants,
        }
    }

    fn into_entry(self) -> (String, Activity) {
        let activity = Activity {
            description: self.description,
            schedule: self.schedule,
            max_participants: self.max_participants,
            participants: self.participants,
        };
        (self.name, activity)
    }
}

/// A seed catalog file: an ordered list of activities.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedFile {
    /// Activities in listing order.
    #[serde(rename = "activity", default)]
    pub activities: Vec<ActivitySeed>,
}

impl SeedFile {
    /// Parse a seed file from TOML text.
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        toml::from_str(content)
            .map_err(|e| crate::Error::config(format!("Invalid seed catalog: {e}")))
    }

    /// Render as TOML text.
    pub fn to_toml_string(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::config(e.to_string()))
    }

    /// Consume into `(name, activity)` pairs.
    pub fn into_entries(self) -> Vec<(String, Activity)> {
        self.activities
            .into_iter()
            .map(ActivitySeed::into_entry)
            .collect()
    }
}

impl FromIterator<(String, Activity)> for SeedFile {
    fn from_iter<T: IntoIterator<Item = (String, Activity)>>(iter: T) -> Self {
        Self {
            activities: iter
                .into_iter()
                .map(|(name, activity)| ActivitySeed::new(name, activity))
                .collect(),
        }
    }
}
