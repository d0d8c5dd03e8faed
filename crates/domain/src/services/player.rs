//! Player accounts and profiles.

use shared::validation::{normalize_display_name, normalize_email, validate_display_name};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::models::{NewPlayer, Player, ProfileChanges};
use crate::store::PlayerStore;

pub struct PlayerService {
    players: Arc<dyn PlayerStore>,
}

impl PlayerService {
    pub fn new(players: Arc<dyn PlayerStore>) -> Self {
        Self { players }
    }

    /// Creates a player. The email is stored lower-cased and the display name
    /// with collapsed whitespace; either clashing yields `Conflict`.
    pub async fn register(&self, new_player: NewPlayer) -> DomainResult<Player> {
        let email = normalize_email(&new_player.email);
        let display_name = normalize_display_name(&new_player.display_name);
        validate_display_name(&display_name)
            .map_err(|_| DomainError::validation("Invalid display name"))?;

        if self.players.find_by_email(&email).await?.is_some() {
            return Err(DomainError::conflict("Email is already registered"));
        }
        if self
            .players
            .find_by_display_name(&display_name)
            .await?
            .is_some()
        {
            return Err(DomainError::conflict("Display name is already taken"));
        }

        let player = self
            .players
            .insert(NewPlayer {
                display_name,
                email,
                password_hash: new_player.password_hash,
            })
            .await?;

        info!(player_id = %player.id, "Player registered");
        Ok(player)
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<Player> {
        self.players
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Player", id))
    }

    pub async fn find_by_email(&self, email: &str) -> DomainResult<Option<Player>> {
        self.players.find_by_email(&normalize_email(email)).await
    }

    pub async fn update_profile(&self, id: Uuid, changes: ProfileChanges) -> DomainResult<Player> {
        if changes.is_empty() {
            return self.get(id).await;
        }

        let changes = ProfileChanges {
            display_name: changes.display_name.as_deref().map(normalize_display_name),
            is_visible: changes.is_visible,
        };
        if let Some(name) = &changes.display_name {
            validate_display_name(name)
                .map_err(|_| DomainError::validation("Invalid display name"))?;
        }

        let player = self
            .players
            .update_profile(id, changes)
            .await?
            .ok_or_else(|| DomainError::not_found("Player", id))?;

        info!(
            player_id = %player.id,
            is_visible = player.is_visible,
            "Player profile updated"
        );
        Ok(player)
    }

    pub async fn set_visibility(&self, id: Uuid, is_visible: bool) -> DomainResult<Player> {
        self.update_profile(
            id,
            ProfileChanges {
                display_name: None,
                is_visible: Some(is_visible),
            },
        )
        .await
    }
}
