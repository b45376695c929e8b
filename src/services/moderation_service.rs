//! Administrative reads, edits and deletions of explorer and entrepreneur
//! profiles. Every mutation writes its audit entry in the same transaction.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::MSG_DUPLICATE_TAX_ID;
use crate::domain::profile::diff_fields;
use crate::domain::{
    Account, EntrepreneurPatch, EntrepreneurProfile, ExplorerPatch, ExplorerProfile,
    NewAuditEntry, Profile, UserRole,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::with_transaction;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ModerationService: Send + Sync {
    async fn explorer(&self, id: i32) -> AppResult<ExplorerProfile>;

    async fn entrepreneur(&self, id: i32) -> AppResult<EntrepreneurProfile>;

    /// A user with whatever profile their role implies.
    async fn account(&self, user_id: i32) -> AppResult<Account>;

    /// Apply `patch`, audit the field-level diff and return the stored row.
    async fn edit_explorer(
        &self,
        id: i32,
        patch: ExplorerPatch,
        actor: Option<i32>,
    ) -> AppResult<ExplorerProfile>;

    async fn edit_entrepreneur(
        &self,
        id: i32,
        patch: EntrepreneurPatch,
        actor: Option<i32>,
    ) -> AppResult<EntrepreneurProfile>;

    /// Remove the profile and its owning user.
    async fn delete_explorer(&self, id: i32, actor: Option<i32>) -> AppResult<()>;

    async fn delete_entrepreneur(&self, id: i32, actor: Option<i32>) -> AppResult<()>;
}

pub struct Moderator<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Moderator<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ModerationService for Moderator<U> {
    async fn explorer(&self, id: i32) -> AppResult<ExplorerProfile> {
        self.uow.explorers().find_by_id(id).await?.ok_or_not_found()
    }

    async fn entrepreneur(&self, id: i32) -> AppResult<EntrepreneurProfile> {
        self.uow
            .entrepreneurs()
            .find_by_id(id)
            .await?
            .ok_or_not_found()
    }

    async fn account(&self, user_id: i32) -> AppResult<Account> {
        let user = self.uow.users().find_by_id(user_id).await?.ok_or_not_found()?;

        let profile = match &user.role {
            UserRole::Explorer => self
                .uow
                .explorers()
                .find_by_user(user.id)
                .await?
                .map(Profile::Explorer),
            UserRole::Entrepreneur => self
                .uow
                .entrepreneurs()
                .find_by_user(user.id)
                .await?
                .map(Profile::Entrepreneur),
            UserRole::Administrator => Some(Profile::Administrator),
            UserRole::Other(_) => None,
        };

        Ok(Account {
            user,
            profile: profile.unwrap_or(Profile::Unassigned),
        })
    }

    async fn edit_explorer(
        &self,
        id: i32,
        patch: ExplorerPatch,
        actor: Option<i32>,
    ) -> AppResult<ExplorerProfile> {
        let updated = with_transaction!(self.uow, |ctx| {
            let explorers = ctx.explorers();
            let mut profile = explorers.find_by_id(id).await?.ok_or_not_found()?;

            let before = profile.tracked_fields();
            patch.apply(&mut profile)?;
            let updated = explorers.update(&profile).await?;
            let changes = diff_fields(&before, &updated.tracked_fields());

            ctx.audit()
                .append(NewAuditEntry::explorer_edited(&updated, &changes).by(actor))
                .await?;
            Ok(updated)
        })?;

        tracing::info!(explorer_id = id, actor = ?actor, "Explorer updated");
        Ok(updated)
    }

    async fn edit_entrepreneur(
        &self,
        id: i32,
        patch: EntrepreneurPatch,
        actor: Option<i32>,
    ) -> AppResult<EntrepreneurProfile> {
        let updated = with_transaction!(self.uow, |ctx| {
            let entrepreneurs = ctx.entrepreneurs();
            let mut profile = entrepreneurs.find_by_id(id).await?.ok_or_not_found()?;

            let before = profile.tracked_fields();
            let previous_tax_id = profile.tax_id.clone();
            patch.apply(&mut profile)?;

            if profile.tax_id != previous_tax_id
                && entrepreneurs.tax_id_taken(&profile.tax_id).await?
            {
                return Err(AppError::conflict(MSG_DUPLICATE_TAX_ID));
            }

            let updated = entrepreneurs.update(&profile).await?;
            let changes = diff_fields(&before, &updated.tracked_fields());

            ctx.audit()
                .append(NewAuditEntry::entrepreneur_edited(&updated, &changes).by(actor))
                .await?;
            Ok(updated)
        })?;

        tracing::info!(entrepreneur_id = id, actor = ?actor, "Entrepreneur updated");
        Ok(updated)
    }

    async fn delete_explorer(&self, id: i32, actor: Option<i32>) -> AppResult<()> {
        let user_id = with_transaction!(self.uow, |ctx| {
            let explorers = ctx.explorers();
            let users = ctx.users();
            let profile = explorers.find_by_id(id).await?.ok_or_not_found()?;
            let user = users.find_by_id(profile.user_id).await?.ok_or_not_found()?;

            ctx.audit()
                .append(NewAuditEntry::explorer_deleted(&user, &profile).by(actor))
                .await?;
            explorers.delete(profile.id).await?;
            users.delete(user.id).await?;
            Ok(user.id)
        })?;

        tracing::info!(explorer_id = id, user_id, actor = ?actor, "Explorer deleted");
        Ok(())
    }

    async fn delete_entrepreneur(&self, id: i32, actor: Option<i32>) -> AppResult<()> {
        let user_id = with_transaction!(self.uow, |ctx| {
            let entrepreneurs = ctx.entrepreneurs();
            let users = ctx.users();
            let profile = entrepreneurs.find_by_id(id).await?.ok_or_not_found()?;
            let user = users.find_by_id(profile.user_id).await?.ok_or_not_found()?;

            ctx.audit()
                .append(NewAuditEntry::entrepreneur_deleted(&user, &profile).by(actor))
                .await?;
            entrepreneurs.delete(profile.id).await?;
            users.delete(user.id).await?;
            Ok(user.id)
        })?;

        tracing::info!(entrepreneur_id = id, user_id, actor = ?actor, "Entrepreneur deleted");
        Ok(())
    }
}
