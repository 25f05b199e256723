use std::sync::Arc;

use crate::errors::BeaconResult;
use crate::ids::ProjectId;
use crate::models::Subscriber;

pub trait ISubscriberStore: Send + Sync {
    fn find_subscriber(&self, project_id: &ProjectId, email: &str) -> BeaconResult<Option<Subscriber>>;
    fn find_by_token(&self, token: &str) -> BeaconResult<Option<Subscriber>>;
    fn insert_subscriber(&self, subscriber: &Subscriber) -> BeaconResult<()>;
    fn save_subscriber(&self, subscriber: &Subscriber) -> BeaconResult<()>;
    fn list_verified(&self, project_id: &ProjectId) -> BeaconResult<Vec<Subscriber>>;
}

impl<T: ISubscriberStore> ISubscriberStore for Arc<T> {
    fn find_subscriber(&self, project_id: &ProjectId, email: &str) -> BeaconResult<Option<Subscriber>> { (**self).find_subscriber(project_id, email) }
    fn find_by_token(&self, token: &str) -> BeaconResult<Option<Subscriber>> { (**self).find_by_token(token) }
    fn insert_subscriber(&self, subscriber: &Subscriber) -> BeaconResult<()> { (**self).insert_subscriber(subscriber) }
    fn save_subscriber(&self, subscriber: &Subscriber) -> BeaconResult<()> { (**self).save_subscriber(subscriber) }
    fn list_verified(&self, project_id: &ProjectId) -> BeaconResult<Vec<Subscriber>> { (**self).list_verified(project_id) }
}
