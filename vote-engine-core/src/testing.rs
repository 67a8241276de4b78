//! In-memory doubles shared by the orchestrator and notifier tests.
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use vote_engine_repository::{
    NotificationsRepository, NotificationsRepositoryError, VoteStore, VoteStoreError, VoteUnit,
};
use vote_engine_shared::types::{
    NewNotification, Notification, UpsertOutcome, VoteRecord, VoteTarget, VoteValue,
};

/// Notifications repository that records what was created.
pub struct RecordingNotifications {
    created: Mutex<Vec<NewNotification>>,
    fail: bool,
}

impl RecordingNotifications {
    pub fn new() -> Self {
        Self {
            created: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    /// A repository whose `create` always fails, for post-commit error
    /// paths.
    pub fn failing() -> Self {
        Self {
            created: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn created(&self) -> Vec<NewNotification> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationsRepository for RecordingNotifications {
    async fn create(
        &self,
        notification: &NewNotification,
    ) -> Result<Notification, NotificationsRepositoryError> {
        if self.fail {
            return Err(NotificationsRepositoryError::Database(sqlx::Error::PoolClosed));
        }
        let mut created = self.created.lock().unwrap();
        created.push(notification.clone());
        Ok(Notification {
            id: created.len() as i64,
            recipient_id: notification.recipient_id,
            sender_id: notification.sender_id,
            post_id: notification.post_id,
            comment_id: notification.comment_id,
            kind: notification.kind,
            read: false,
            created_at: Utc::now(),
        })
    }

    async fn find_by_recipient(
        &self,
        _recipient_id: i64,
        _limit: i64,
        _offset: i64,
    ) -> Result<Vec<Notification>, NotificationsRepositoryError> {
        Ok(Vec::new())
    }

    async fn unread_count(&self, _recipient_id: i64) -> Result<i64, NotificationsRepositoryError> {
        Ok(self.created.lock().unwrap().len() as i64)
    }

    async fn mark_read(
        &self,
        _notification_id: i64,
        _recipient_id: i64,
    ) -> Result<Notification, NotificationsRepositoryError> {
        Err(NotificationsRepositoryError::NotFound)
    }
}

/// Shared backing state for the in-memory vote store.
#[derive(Default, Clone)]
pub struct MockState {
    pub votes: HashMap<(i64, VoteTarget), VoteValue>,
    pub owners: HashMap<VoteTarget, i64>,
    pub counts: HashMap<VoteTarget, i64>,
    pub karma: HashMap<i64, i64>,
}

/// In-memory `VoteStore` with transaction semantics: every unit works on a
/// snapshot and publishes it on commit, so a rollback leaves the shared
/// state untouched. Records the call sequence and can fail any named step.
pub struct MockStore {
    state: Arc<Mutex<MockState>>,
    calls: Arc<Mutex<Vec<&'static str>>>,
    fail_on: Option<&'static str>,
}

impl MockStore {
    pub fn new(state: MockState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_on: None,
        }
    }

    pub fn failing_on(state: MockState, step: &'static str) -> Self {
        Self {
            fail_on: Some(step),
            ..Self::new(state)
        }
    }

    pub fn state(&self) -> MockState {
        self.state.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl VoteStore for MockStore {
    async fn begin(&self) -> Result<Box<dyn VoteUnit>, VoteStoreError> {
        self.calls.lock().unwrap().push("begin");
        let working = self.state.lock().unwrap().clone();
        Ok(Box::new(MockUnit {
            shared: self.state.clone(),
            working,
            calls: self.calls.clone(),
            fail_on: self.fail_on,
        }))
    }

    async fn get_vote(
        &self,
        user_id: i64,
        target: &VoteTarget,
    ) -> Result<Option<VoteRecord>, VoteStoreError> {
        let state = self.state.lock().unwrap();
        Ok(state.votes.get(&(user_id, *target)).map(|value| VoteRecord {
            user_id,
            target: *target,
            value: *value,
            voted_at: Utc::now(),
        }))
    }
}

pub struct MockUnit {
    shared: Arc<Mutex<MockState>>,
    working: MockState,
    calls: Arc<Mutex<Vec<&'static str>>>,
    fail_on: Option<&'static str>,
}

impl MockUnit {
    fn step(&self, name: &'static str) -> Result<(), VoteStoreError> {
        self.calls.lock().unwrap().push(name);
        if self.fail_on == Some(name) {
            return Err(VoteStoreError::Database(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl VoteUnit for MockUnit {
    async fn get_vote(
        &mut self,
        user_id: i64,
        target: &VoteTarget,
    ) -> Result<Option<VoteRecord>, VoteStoreError> {
        self.step("get_vote")?;
        Ok(self
            .working
            .votes
            .get(&(user_id, *target))
            .map(|value| VoteRecord {
                user_id,
                target: *target,
                value: *value,
                voted_at: Utc::now(),
            }))
    }

    async fn upsert_vote(
        &mut self,
        user_id: i64,
        target: &VoteTarget,
        value: VoteValue,
    ) -> Result<UpsertOutcome, VoteStoreError> {
        self.step("upsert_vote")?;
        let was_new = self.working.votes.insert((user_id, *target), value).is_none();
        Ok(UpsertOutcome { was_new })
    }

    async fn delete_vote(
        &mut self,
        user_id: i64,
        target: &VoteTarget,
    ) -> Result<VoteValue, VoteStoreError> {
        self.step("delete_vote")?;
        self.working
            .votes
            .remove(&(user_id, *target))
            .ok_or(VoteStoreError::VoteNotFound)
    }

    async fn recompute_count(&mut self, target: &VoteTarget) -> Result<Option<i64>, VoteStoreError> {
        self.step("recompute_count")?;
        if !self.working.owners.contains_key(target) {
            return Ok(None);
        }
        let count = self
            .working
            .votes
            .iter()
            .filter(|((_, t), _)| t == target)
            .map(|(_, value)| value.value())
            .sum();
        self.working.counts.insert(*target, count);
        Ok(Some(count))
    }

    async fn find_owner(&mut self, target: &VoteTarget) -> Result<Option<i64>, VoteStoreError> {
        self.step("find_owner")?;
        Ok(self.working.owners.get(target).copied())
    }

    async fn increment_karma(&mut self, user_id: i64, delta: i64) -> Result<(), VoteStoreError> {
        self.step("increment_karma")?;
        *self.working.karma.entry(user_id).or_insert(0) += delta;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), VoteStoreError> {
        self.step("commit")?;
        *self.shared.lock().unwrap() = self.working;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), VoteStoreError> {
        self.step("rollback")?;
        Ok(())
    }
}
