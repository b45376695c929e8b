//! Explorer profile store.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::explorer::{self, ActiveModel, Entity as ExplorerEntity};
use crate::domain::{ExplorerProfile, NewExplorer};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ExplorerRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<ExplorerProfile>>;

    /// The profile owned by `user_id`, if any.
    async fn find_by_user(&self, user_id: i32) -> AppResult<Option<ExplorerProfile>>;

    /// All explorers, oldest first.
    async fn list(&self) -> AppResult<Vec<ExplorerProfile>>;
}

pub struct ExplorerStore {
    db: DatabaseConnection,
}

impl ExplorerStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ExplorerRepository for ExplorerStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<ExplorerProfile>> {
        find_by_id(&self.db, id).await
    }

    async fn find_by_user(&self, user_id: i32) -> AppResult<Option<ExplorerProfile>> {
        let result = ExplorerEntity::find()
            .filter(explorer::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;
        Ok(result.map(ExplorerProfile::from))
    }

    async fn list(&self) -> AppResult<Vec<ExplorerProfile>> {
        let models = ExplorerEntity::find()
            .order_by_asc(explorer::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(ExplorerProfile::from).collect())
    }
}

/// Transaction-aware explorer repository.
pub struct TxExplorerRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxExplorerRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<ExplorerProfile>> {
        find_by_id(self.txn, id).await
    }

    pub async fn create(&self, user_id: i32, new: &NewExplorer) -> AppResult<ExplorerProfile> {
        let personal = &new.personal;
        let active_model = ActiveModel {
            user_id: Set(user_id),
            first_name: Set(Some(personal.first_name.clone())),
            second_name: Set(Some(personal.second_name.clone())),
            first_surname: Set(Some(personal.first_surname.clone())),
            second_surname: Set(Some(personal.second_surname.clone())),
            birth_date: Set(personal.birth_date),
            phone: Set(Some(personal.phone.clone())),
            preference: Set(Some(new.preference.clone())),
            ..Default::default()
        };

        let model = active_model.insert(self.txn).await?;
        Ok(ExplorerProfile::from(model))
    }

    /// Persist every mutable field of `profile` and return the stored row.
    pub async fn update(&self, profile: &ExplorerProfile) -> AppResult<ExplorerProfile> {
        let active_model = ActiveModel {
            id: Unchanged(profile.id),
            user_id: Unchanged(profile.user_id),
            first_name: Set(Some(profile.first_name.clone())),
            second_name: Set(Some(profile.second_name.clone())),
            first_surname: Set(Some(profile.first_surname.clone())),
            second_surname: Set(Some(profile.second_surname.clone())),
            birth_date: Set(profile.birth_date),
            phone: Set(Some(profile.phone.clone())),
            preference: Set(Some(profile.preference.clone())),
        };

        let model = active_model.update(self.txn).await?;
        Ok(ExplorerProfile::from(model))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = ExplorerEntity::delete_by_id(id).exec(self.txn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

async fn find_by_id<C: ConnectionTrait>(db: &C, id: i32) -> AppResult<Option<ExplorerProfile>> {
    let result = ExplorerEntity::find_by_id(id).one(db).await?;
    Ok(result.map(ExplorerProfile::from))
}
