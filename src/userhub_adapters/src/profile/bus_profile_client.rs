use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use userhub_core::{AccountId, ProfileClient, ProfileClientError, ProfileDraft, ProfileId, ProfileRecord};

use super::PROFILE_CREATE;
use crate::messaging::{MessageBus, MessageBusError};

/// `ProfileClient` backed by a request/reply exchange with the profile
/// microservice over the message bus.
#[derive(Clone)]
pub struct BusProfileClient<B> {
    bus: B,
}

impl<B> BusProfileClient<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateProfileRequest<'a> {
    user_id: String,
    #[serde(flatten)]
    draft: &'a ProfileDraft,
}

#[derive(Deserialize)]
struct CreateProfileReply {
    status: u16,
    #[serde(default)]
    profile: Option<ProfileBody>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct ProfileBody {
    id: String,
}

#[async_trait]
impl<B: MessageBus + Clone + Send + Sync> ProfileClient for BusProfileClient<B> {
    #[tracing::instrument(name = "Requesting profile creation", skip_all)]
    async fn create_profile(
        &self,
        account_id: &AccountId,
        draft: &ProfileDraft,
    ) -> Result<ProfileRecord, ProfileClientError> {
        let request = CreateProfileRequest {
            user_id: account_id.to_string(),
            draft,
        };
        let payload = serde_json::to_value(&request)
            .map_err(|e| ProfileClientError::Transport(e.to_string()))?;

        let reply = self
            .bus
            .request(PROFILE_CREATE, payload)
            .await
            .map_err(|e| match e {
                MessageBusError::Timeout => ProfileClientError::Timeout,
                other => ProfileClientError::Transport(other.to_string()),
            })?;

        let reply: CreateProfileReply = serde_json::from_value(reply)
            .map_err(|e| ProfileClientError::Transport(e.to_string()))?;

        if !(200..300).contains(&reply.status) {
            return Err(ProfileClientError::Rejected(
                reply.error.unwrap_or_else(|| reply.status.to_string()),
            ));
        }

        let body = reply.profile.ok_or_else(|| {
            ProfileClientError::Transport("Reply carried no profile body".to_string())
        })?;
        let id = ProfileId::parse(body.id)
            .map_err(|e| ProfileClientError::Transport(e.to_string()))?;

        Ok(ProfileRecord { id })
    }
}
