use dashmap::mapref::entry::Entry;

use beacon_core::errors::{BeaconResult, EntityKind, StoreError};
use beacon_core::ids::ProjectId;
use beacon_core::models::Subscriber;
use beacon_core::traits::ISubscriberStore;
use beacon_core::BeaconError;

use super::MemoryStore;

fn email_key(project_id: &ProjectId, email: &str) -> (ProjectId, String) {
    (project_id.clone(), email.trim().to_lowercase())
}

impl ISubscriberStore for MemoryStore {
    fn find_subscriber(&self, project_id: &ProjectId, email: &str) -> BeaconResult<Option<Subscriber>> {
        Ok(self
            .subscriber_emails
            .get(&email_key(project_id, email))
            .and_then(|id| self.subscribers.get(id.value()).map(|s| s.clone())))
    }

    fn find_by_token(&self, token: &str) -> BeaconResult<Option<Subscriber>> {
        Ok(self
            .subscribers
            .iter()
            .find(|s| s.verify_token == token)
            .map(|s| s.clone()))
    }

    fn insert_subscriber(&self, subscriber: &Subscriber) -> BeaconResult<()> {
        if self.subscribers.contains_key(&subscriber.id) {
            return Err(StoreError::Duplicate {
                entity: EntityKind::Subscriber.to_string(),
                id: subscriber.id.to_string(),
            }
            .into());
        }
        // Index entry stays locked until the record is in place.
        match self
            .subscriber_emails
            .entry(email_key(&subscriber.project_id, &subscriber.email))
        {
            Entry::Occupied(_) => Err(StoreError::Duplicate {
                entity: EntityKind::Subscriber.to_string(),
                id: format!("{} in project {}", subscriber.email, subscriber.project_id),
            }
            .into()),
            Entry::Vacant(slot) => {
                self.subscribers.insert(subscriber.id.clone(), subscriber.clone());
                slot.insert(subscriber.id.clone());
                Ok(())
            }
        }
    }

    fn save_subscriber(&self, subscriber: &Subscriber) -> BeaconResult<()> {
        match self.subscribers.get_mut(&subscriber.id) {
            Some(mut entry) => {
                if email_key(&entry.project_id, &entry.email) != email_key(&subscriber.project_id, &subscriber.email) {
                    return Err(StoreError::WriteRejected {
                        reason: format!("subscriber {} cannot change address", subscriber.id),
                    }
                    .into());
                }
                *entry = subscriber.clone();
                Ok(())
            }
            None => Err(BeaconError::not_found(EntityKind::Subscriber, &subscriber.id)),
        }
    }

    fn list_verified(&self, project_id: &ProjectId) -> BeaconResult<Vec<Subscriber>> {
        let mut verified: Vec<Subscriber> = self
            .subscribers
            .iter()
            .filter(|s| s.verified && &s.project_id == project_id)
            .map(|s| s.clone())
            .collect();
        verified.sort_by_key(|s| s.created_at);
        Ok(verified)
    }
}
