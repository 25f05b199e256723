//! Email subscriptions to a project's incident notices.

use std::sync::{Arc, LazyLock};

use chrono::Utc;
use regex::Regex;

use beacon_core::constants::VERIFY_TOKEN_LEN;
use beacon_core::errors::{BeaconResult, EntityKind, SubscriptionError};
use beacon_core::ids::{ProjectId, SubscriberId};
use beacon_core::models::Subscriber;
use beacon_core::traits::ISubscriberStore;
use beacon_core::BeaconError;

static EMAIL: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.as_ref().is_some_and(|re| re.is_match(email))
}

pub struct SubscriptionService {
    subscribers: Arc<dyn ISubscriberStore>,
}

impl SubscriptionService {
    pub fn new(subscribers: Arc<dyn ISubscriberStore>) -> Self {
        Self { subscribers }
    }

    /// Register `email` for `project_id`.
    ///
    /// A repeat for an unverified address returns the pending record; a
    /// repeat for a verified one is rejected.
    pub fn subscribe(&self, project_id: &ProjectId, email: &str) -> BeaconResult<Subscriber> {
        let email = email.trim();
        if !is_valid_email(email) {
            return Err(SubscriptionError::InvalidEmail {
                email: email.to_string(),
            }
            .into());
        }

        if let Some(existing) = self.subscribers.find_subscriber(project_id, email)? {
            return repeat_subscription(existing, email);
        }

        let subscriber = Subscriber {
            id: SubscriberId::generate(),
            project_id: project_id.clone(),
            email: email.to_string(),
            verify_token: verify_token(),
            verified: false,
            created_at: Utc::now(),
        };
        match self.subscribers.insert_subscriber(&subscriber) {
            Ok(()) => {}
            // Lost a race with another subscribe for the same address.
            Err(e) if e.is_duplicate() => {
                if let Some(existing) = self.subscribers.find_subscriber(project_id, email)? {
                    return repeat_subscription(existing, email);
                }
                return Err(e);
            }
            Err(e) => return Err(e),
        }
        tracing::info!(subscriber_id = %subscriber.id, project_id = %project_id, "subscriber registered");
        Ok(subscriber)
    }

    /// Confirm the address holding `token`. Verifying twice is harmless.
    pub fn verify(&self, token: &str) -> BeaconResult<Subscriber> {
        let mut subscriber = self
            .subscribers
            .find_by_token(token)?
            .ok_or_else(|| BeaconError::not_found(EntityKind::Subscriber, token))?;
        if !subscriber.verified {
            subscriber.verified = true;
            self.subscribers.save_subscriber(&subscriber)?;
            tracing::info!(subscriber_id = %subscriber.id, "subscriber verified");
        }
        Ok(subscriber)
    }
}

fn repeat_subscription(existing: Subscriber, email: &str) -> BeaconResult<Subscriber> {
    if existing.verified {
        return Err(SubscriptionError::AlreadySubscribed {
            email: email.to_string(),
        }
        .into());
    }
    Ok(existing)
}

fn verify_token() -> String {
    let mut token = uuid::Uuid::new_v4().simple().to_string();
    token.truncate(VERIFY_TOKEN_LEN);
    token
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("ops@example.com"));
        assert!(is_valid_email("a.b+tag@sub.example.io"));
        assert!(!is_valid_email("ops@example"));
        assert!(!is_valid_email("ops example@x.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn token_length() {
        let token = verify_token();
        assert_eq!(token.len(), VERIFY_TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
