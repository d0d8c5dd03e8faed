//! Friend relations and the messaging permission gate.

use shared::validation::normalize_email;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::models::{FriendRequest, Message, NewFriendRequest, NewMessage};
use crate::store::{FriendRequestStore, MessageStore, PlayerStore};

pub const MAX_MESSAGE_LENGTH: usize = 2000;

pub struct SocialGraph {
    friend_requests: Arc<dyn FriendRequestStore>,
    players: Arc<dyn PlayerStore>,
    messages: Arc<dyn MessageStore>,
}

impl SocialGraph {
    pub fn new(
        friend_requests: Arc<dyn FriendRequestStore>,
        players: Arc<dyn PlayerStore>,
        messages: Arc<dyn MessageStore>,
    ) -> Self {
        Self {
            friend_requests,
            players,
            messages,
        }
    }

    /// Sends a friend request to the player with `recipient_email`. Private
    /// players are reported as unknown.
    pub async fn request(
        &self,
        requester_id: Uuid,
        recipient_email: &str,
    ) -> DomainResult<FriendRequest> {
        let recipient = self
            .players
            .find_by_email(&normalize_email(recipient_email))
            .await?
            .filter(|p| p.is_visible)
            .ok_or_else(|| DomainError::NotFound("No player with that email".to_string()))?;

        if recipient.id == requester_id {
            return Err(DomainError::not_allowed("Cannot befriend yourself"));
        }
        if self
            .friend_requests
            .find_between(requester_id, recipient.id)
            .await?
            .is_some()
        {
            return Err(DomainError::conflict(
                "A relation already exists between these players",
            ));
        }

        let relation = self
            .friend_requests
            .insert(NewFriendRequest {
                requester_id,
                recipient_id: recipient.id,
            })
            .await?;

        info!(
            relation_id = %relation.id,
            requester_id = %requester_id,
            recipient_id = %recipient.id,
            "Friend request sent"
        );
        Ok(relation)
    }

    pub async fn accept(&self, relation_id: Uuid, acting_player_id: Uuid) -> DomainResult<FriendRequest> {
        let relation = self
            .friend_requests
            .find_by_id(relation_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Friend request", relation_id))?;
        if relation.recipient_id != acting_player_id {
            return Err(DomainError::not_allowed(
                "Only the recipient can accept a friend request",
            ));
        }

        let relation = self
            .friend_requests
            .accept(relation_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Friend request", relation_id))?;

        info!(relation_id = %relation.id, "Friend request accepted");
        Ok(relation)
    }

    pub async fn can_message(&self, a: Uuid, b: Uuid) -> DomainResult<bool> {
        Ok(self
            .friend_requests
            .find_between(a, b)
            .await?
            .is_some_and(|relation| relation.is_accepted()))
    }

    pub async fn send_message(
        &self,
        sender_id: Uuid,
        recipient_id: Uuid,
        body: &str,
    ) -> DomainResult<Message> {
        let body = body.trim();
        if body.is_empty() || body.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(DomainError::validation(format!(
                "Message must be between 1 and {} characters",
                MAX_MESSAGE_LENGTH
            )));
        }
        if self.players.find_by_id(recipient_id).await?.is_none() {
            return Err(DomainError::not_found("Player", recipient_id));
        }
        if !self.can_message(sender_id, recipient_id).await? {
            return Err(DomainError::not_allowed(
                "Messages require an accepted friend relation",
            ));
        }

        let message = self
            .messages
            .insert(NewMessage {
                sender_id,
                recipient_id,
                body: body.to_string(),
            })
            .await?;

        info!(message_id = %message.id, sender_id = %sender_id, "Message sent");
        Ok(message)
    }

    pub async fn conversation(&self, a: Uuid, b: Uuid) -> DomainResult<Vec<Message>> {
        self.messages.conversation(a, b).await
    }

    pub async fn list_relations(&self, player_id: Uuid) -> DomainResult<Vec<FriendRequest>> {
        self.friend_requests.list_for_player(player_id).await
    }
}
