use std::collections::BTreeMap;

use tokio::sync::RwLock;

use crate::database::seed;
use crate::models::Activity;

/// In-memory activity registry, keyed by activity name.
///
/// Constructed once at startup and shared through [`crate::web::AppState`].
/// Nothing is persisted; rosters reset when the process restarts.
#[derive(Debug, Default)]
pub struct ActivityRegistry {
    activities: RwLock<BTreeMap<String, Activity>>,
}

/// Result of a roster mutation, analogous to a rows-affected count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterChange {
    Applied,
    /// The activity exists but the roster already had (insert) or lacked
    /// (delete) the email.
    Unchanged,
    ActivityMissing,
}

impl ActivityRegistry {
    pub fn from_activities<I, S>(activities: I) -> Self
    where
        I: IntoIterator<Item = (S, Activity)>,
        S: Into<String>,
    {
        Self {
            activities: RwLock::new(
                activities
                    .into_iter()
                    .map(|(name, activity)| (name.into(), activity))
                    .collect(),
            ),
        }
    }

    pub fn seeded() -> Self {
        Self::from_activities(seed::seed_activities())
    }
}

pub async fn list_activities(registry: &ActivityRegistry) -> BTreeMap<String, Activity> {
    registry.activities.read().await.clone()
}

pub async fn load_activity(registry: &ActivityRegistry, name: &str) -> Option<Activity> {
    registry.activities.read().await.get(name).cloned()
}

pub async fn insert_participant(
    registry: &ActivityRegistry,
    name: &str,
    email: &str,
) -> RosterChange {
    let mut activities = registry.activities.write().await;
    let Some(activity) = activities.get_mut(name) else {
        return RosterChange::ActivityMissing;
    };
    if activity.has_participant(email) {
        return RosterChange::Unchanged;
    }
    activity.participants.push(email.to_string());
    RosterChange::Applied
}

pub async fn delete_participant(
    registry: &ActivityRegistry,
    name: &str,
    email: &str,
) -> RosterChange {
    let mut activities = registry.activities.write().await;
    let Some(activity) = activities.get_mut(name) else {
        return RosterChange::ActivityMissing;
    };
    let Some(idx) = activity.participants.iter().position(|p| p == email) else {
        return RosterChange::Unchanged;
    };
    // `remove` keeps the remaining signup order intact.
    activity.participants.remove(idx);
    RosterChange::Applied
}

/// Appends straight to the roster without the duplicate check. Used to stage
/// fixtures; returns false when the activity does not exist.
pub async fn append_participant_unchecked(
    registry: &ActivityRegistry,
    name: &str,
    email: &str,
) -> bool {
    match registry.activities.write().await.get_mut(name) {
        Some(activity) => {
            activity.participants.push(email.to_string());
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ActivityRegistry {
        ActivityRegistry::from_activities([(
            "Chess Club",
            Activity::new("Chess", "Fridays", 12).with_participants(["a@x.edu", "b@x.edu"]),
        )])
    }

    #[tokio::test]
    async fn insert_appends_in_signup_order() {
        let reg = registry();
        assert_eq!(
            insert_participant(&reg, "Chess Club", "c@x.edu").await,
            RosterChange::Applied
        );
        let chess = load_activity(&reg, "Chess Club").await.unwrap();
        assert_eq!(chess.participants, vec!["a@x.edu", "b@x.edu", "c@x.edu"]);
    }

    #[tokio::test]
    async fn insert_leaves_roster_alone_for_existing_email() {
        let reg = registry();
        assert_eq!(
            insert_participant(&reg, "Chess Club", "a@x.edu").await,
            RosterChange::Unchanged
        );
        assert_eq!(
            load_activity(&reg, "Chess Club").await.unwrap().participants.len(),
            2
        );
    }

    #[tokio::test]
    async fn delete_keeps_remaining_order() {
        let reg = registry();
        insert_participant(&reg, "Chess Club", "c@x.edu").await;
        assert_eq!(
            delete_participant(&reg, "Chess Club", "b@x.edu").await,
            RosterChange::Applied
        );
        let chess = load_activity(&reg, "Chess Club").await.unwrap();
        assert_eq!(chess.participants, vec!["a@x.edu", "c@x.edu"]);
    }

    #[tokio::test]
    async fn mutations_on_unknown_activity_report_missing() {
        let reg = registry();
        assert_eq!(
            insert_participant(&reg, "Knitting", "a@x.edu").await,
            RosterChange::ActivityMissing
        );
        assert_eq!(
            delete_participant(&reg, "Knitting", "a@x.edu").await,
            RosterChange::ActivityMissing
        );
        assert!(!append_participant_unchecked(&reg, "Knitting", "a@x.edu").await);
        assert_eq!(list_activities(&reg).await.len(), 1);
    }

    #[tokio::test]
    async fn email_match_is_exact() {
        let reg = registry();
        assert_eq!(
            delete_participant(&reg, "Chess Club", "A@x.edu").await,
            RosterChange::Unchanged
        );
    }
}
