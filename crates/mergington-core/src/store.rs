//! In-memory activity directory.
//!
//! [`ActivityStore`] owns the catalog for the lifetime of the process. The set
//! of activities is fixed at construction; only participant lists change.
//! Every activity sits behind its own mutex, so a signup or unregister is a
//! single check-and-mutate under one lock and concurrent requests for the
//! same activity cannot both pass the membership check.
//!
//! # Usage
//!
//! ```rust
//! use mergington_core::ActivityStore;
//!
//! let store = ActivityStore::with_default_catalog();
//! store.signup("Chess Club", "new@mergington.edu").unwrap();
//! assert!(store.get("Chess Club").unwrap().has_participant("new@mergington.edu"));
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::activity::{Activity, SeedFile};
use crate::{Error, Result};

// ============================================================================
// Catalog snapshot
// ============================================================================

/// Point-in-time copy of the directory, in seed order.
///
/// Serializes as a JSON object keyed by activity name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<(String, Activity)>,
}

impl Catalog {
    /// Look up an activity by name.
    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, activity)| activity)
    }

    /// Iterate entries in seed order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Activity)> {
        self.entries.iter().map(|(n, a)| (n.as_str(), a))
    }

    /// Number of activities.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no activities.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert to the seed-file representation.
    pub fn into_seed_file(self) -> SeedFile {
        self.entries.into_iter().collect()
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, activity) in &self.entries {
            map.serialize_entry(name, activity)?;
        }
        map.end()
    }
}

// ============================================================================
// ActivityStore
// ============================================================================

/// Shared, concurrently mutable activity directory.
#[derive(Debug)]
pub struct ActivityStore {
    slots: Vec<Slot>,
    index: HashMap<String, usize>,
    enforce_capacity: bool,
}

#[derive(Debug)]
struct Slot {
    name: String,
    activity: Mutex<Activity>,
}

impl ActivityStore {
    /// Build a store from `(name, activity)` pairs, validating the catalog.
    ///
    /// Rejects empty or repeated names, zero capacity, and repeated
    /// participants within one activity.
    pub fn new<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Activity)>,
    {
        let mut slots = Vec::new();
        let mut index = HashMap::new();

        for (name, activity) in entries {
            validate_entry(&name, &activity)?;
            if index.contains_key(&name) {
                return Err(Error::DuplicateActivity { name });
            }
            index.insert(name.clone(), slots.len());
            slots.push(Slot {
                name,
                activity: Mutex::new(activity),
            });
        }

        log::debug!("Activity store initialized with {} activities", slots.len());
        Ok(Self {
            slots,
            index,
            enforce_capacity: false,
        })
    }

    /// Store seeded with the built-in Mergington catalog.
    pub fn with_default_catalog() -> Self {
        let slots: Vec<Slot> = crate::seed::default_catalog()
            .into_iter()
            .map(|(name, activity)| Slot {
                name,
                activity: Mutex::new(activity),
            })
            .collect();
        let index = slots
            .iter()
            .enumerate()
            .map(|(i, slot)| (slot.name.clone(), i))
            .collect();
        Self {
            slots,
            index,
            enforce_capacity: false,
        }
    }

    /// Reject signups once an activity reaches `max_participants`.
    pub fn with_capacity_enforced(mut self, enforce: bool) -> Self {
        self.enforce_capacity = enforce;
        self
    }

    /// Whether capacity is enforced on signup.
    pub fn enforces_capacity(&self) -> bool {
        self.enforce_capacity
    }

    /// Number of activities.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the store has no activities.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Activity names in seed order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|slot| slot.name.as_str())
    }

    /// Snapshot of every activity. Each activity is copied under its own lock.
    pub fn list(&self) -> Catalog {
        let entries = self
            .slots
            .iter()
            .map(|slot| (slot.name.clone(), lock(&slot.activity).clone()))
            .collect();
        Catalog { entries }
    }

    /// Snapshot of a single activity.
    pub fn get(&self, name: &str) -> Result<Activity> {
        Ok(lock(&self.slot(name)?.activity).clone())
    }

    /// Append `email` to the activity's participants.
    pub fn signup(&self, name: &str, email: &str) -> Result<()> {
        let slot = self.slot(name)?;
        let mut activity = lock(&slot.activity);

        if activity.has_participant(email) {
            return Err(Error::AlreadySignedUp {
                email: email.to_string(),
                activity: slot.name.clone(),
            });
        }
        if self.enforce_capacity && activity.is_full() {
            return Err(Error::ActivityFull {
                activity: slot.name.clone(),
                max_participants: activity.max_participants,
            });
        }

        activity.participants.push(email.to_string());
        log::info!(
            "Signed up {email} for {name} ({}/{})",
            activity.participants.len(),
            activity.max_participants
        );
        Ok(())
    }

    /// Remove `email` from the activity's participants.
    pub fn unregister(&self, name: &str, email: &str) -> Result<()> {
        let slot = self.slot(name)?;
        let mut activity = lock(&slot.activity);

        let Some(position) = activity.participants.iter().position(|p| p == email) else {
            return Err(Error::NotRegistered {
                email: email.to_string(),
                activity: slot.name.clone(),
            });
        };

        activity.participants.remove(position);
        log::info!("Unregistered {email} from {name}");
        Ok(())
    }

    fn slot(&self, name: &str) -> Result<&Slot> {
        self.index
            .get(name)
            .map(|&i| &self.slots[i])
            .ok_or_else(|| Error::ActivityNotFound {
                name: name.to_string(),
            })
    }
}

impl Default for ActivityStore {
    fn default() -> Self {
        Self::with_default_catalog()
    }
}

// A panic while holding the lock cannot leave a participant list half-written
// (every mutation is a single push or remove), so a poisoned lock is still usable.
fn lock(activity: &Mutex<Activity>) -> MutexGuard<'_, Activity> {
    activity.lock().unwrap_or_else(PoisonError::into_inner)
}

fn validate_entry(name: &str, activity: &Activity) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::validation("activity name must not be empty"));
    }
    if activity.max_participants == 0 {
        return Err(Error::validation(format!(
            "activity '{name}' must allow at least one participant"
        )));
    }
    let mut seen = HashSet::new();
    for email in &activity.participants {
        if !seen.insert(email.as_str()) {
            return Err(Error::validation(format!(
                "activity '{name}' lists participant {email} more than once"
            )));
        }
    }
    Ok(())
}
