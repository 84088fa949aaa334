use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use userhub_core::{AccountId, ProfileClient, ProfileClientError, ProfileDraft, ProfileId, ProfileRecord};

#[derive(Clone)]
enum Mode {
    Succeed,
    Reject(String),
    TimeOut,
}

/// Canned `ProfileClient` for tests and local wiring. Succeeding instances
/// hand out sequential profile ids.
#[derive(Clone)]
pub struct MockProfileClient {
    mode: Mode,
    next_id: Arc<AtomicUsize>,
}

impl Default for MockProfileClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProfileClient {
    pub fn new() -> Self {
        Self {
            mode: Mode::Succeed,
            next_id: Arc::new(AtomicUsize::new(1)),
        }
    }

    pub fn rejecting(message: &str) -> Self {
        Self {
            mode: Mode::Reject(message.to_string()),
            next_id: Arc::new(AtomicUsize::new(1)),
        }
    }

    pub fn timing_out() -> Self {
        Self {
            mode: Mode::TimeOut,
            next_id: Arc::new(AtomicUsize::new(1)),
        }
    }

    /// How many profiles this client has created.
    pub fn created_count(&self) -> usize {
        self.next_id.load(Ordering::SeqCst) - 1
    }
}

#[async_trait]
impl ProfileClient for MockProfileClient {
    async fn create_profile(
        &self,
        _account_id: &AccountId,
        _draft: &ProfileDraft,
    ) -> Result<ProfileRecord, ProfileClientError> {
        match &self.mode {
            Mode::Succeed => {
                let n = self.next_id.fetch_add(1, Ordering::SeqCst);
                let id = ProfileId::parse(format!("profile-{n}"))
                    .map_err(|e| ProfileClientError::Transport(e.to_string()))?;
                Ok(ProfileRecord { id })
            }
            Mode::Reject(message) => Err(ProfileClientError::Rejected(message.clone())),
            Mode::TimeOut => Err(ProfileClientError::Timeout),
        }
    }
}
