use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::database::activities_repo::{self, ActivityRegistry, RosterChange};
use crate::models::Activity;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActivityError {
    #[error("Activity not found")]
    ActivityNotFound,
    #[error("Participant not found in this activity")]
    ParticipantNotFound,
    #[error("Student already signed up")]
    AlreadySignedUp,
}

#[derive(Debug, Clone, Serialize)]
pub struct Confirmation {
    pub message: String,
}

pub async fn list_activities(registry: &ActivityRegistry) -> BTreeMap<String, Activity> {
    activities_repo::list_activities(registry).await
}

pub async fn signup(
    registry: &ActivityRegistry,
    activity_name: &str,
    email: &str,
) -> Result<Confirmation, ActivityError> {
    match activities_repo::insert_participant(registry, activity_name, email).await {
        RosterChange::Applied => {
            info!(activity = %activity_name, email = %email, "participant signed up");
            Ok(Confirmation {
                message: format!("Signed up {} for {}", email, activity_name),
            })
        }
        RosterChange::Unchanged => {
            warn!(activity = %activity_name, email = %email, "duplicate signup rejected");
            Err(ActivityError::AlreadySignedUp)
        }
        RosterChange::ActivityMissing => {
            warn!(activity = %activity_name, "signup for unknown activity");
            Err(ActivityError::ActivityNotFound)
        }
    }
}

pub async fn unregister(
    registry: &ActivityRegistry,
    activity_name: &str,
    email: &str,
) -> Result<Confirmation, ActivityError> {
    match activities_repo::delete_participant(registry, activity_name, email).await {
        RosterChange::Applied => {
            info!(activity = %activity_name, email = %email, "participant unregistered");
            Ok(Confirmation {
                message: format!("Unregistered {} from {}", email, activity_name),
            })
        }
        RosterChange::Unchanged => {
            warn!(activity = %activity_name, email = %email, "unregister for absent participant");
            Err(ActivityError::ParticipantNotFound)
        }
        RosterChange::ActivityMissing => {
            warn!(activity = %activity_name, "unregister from unknown activity");
            Err(ActivityError::ActivityNotFound)
        }
    }
}
