//! Entrepreneur profile store.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::entrepreneur::{self, ActiveModel, Entity as EntrepreneurEntity};
use crate::config::DEFAULT_PLAN;
use crate::domain::{EntrepreneurProfile, NewEntrepreneur};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EntrepreneurRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<EntrepreneurProfile>>;

    async fn find_by_user(&self, user_id: i32) -> AppResult<Option<EntrepreneurProfile>>;

    /// All entrepreneurs, oldest first.
    async fn list(&self) -> AppResult<Vec<EntrepreneurProfile>>;
}

pub struct EntrepreneurStore {
    db: DatabaseConnection,
}

impl EntrepreneurStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EntrepreneurRepository for EntrepreneurStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<EntrepreneurProfile>> {
        find_by_id(&self.db, id).await
    }

    async fn find_by_user(&self, user_id: i32) -> AppResult<Option<EntrepreneurProfile>> {
        let result = EntrepreneurEntity::find()
            .filter(entrepreneur::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;
        Ok(result.map(EntrepreneurProfile::from))
    }

    async fn list(&self) -> AppResult<Vec<EntrepreneurProfile>> {
        let models = EntrepreneurEntity::find()
            .order_by_asc(entrepreneur::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(EntrepreneurProfile::from).collect())
    }
}

/// Transaction-aware entrepreneur repository.
pub struct TxEntrepreneurRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxEntrepreneurRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<EntrepreneurProfile>> {
        find_by_id(self.txn, id).await
    }

    pub async fn tax_id_taken(&self, tax_id: &str) -> AppResult<bool> {
        let count = EntrepreneurEntity::find()
            .filter(entrepreneur::Column::TaxId.eq(tax_id))
            .count(self.txn)
            .await?;
        Ok(count > 0)
    }

    /// Insert a profile on the default plan.
    pub async fn create(
        &self,
        user_id: i32,
        new: &NewEntrepreneur,
    ) -> AppResult<EntrepreneurProfile> {
        let personal = &new.personal;
        let active_model = ActiveModel {
            user_id: Set(user_id),
            first_name: Set(Some(personal.first_name.clone())),
            second_name: Set(Some(personal.second_name.clone())),
            first_surname: Set(Some(personal.first_surname.clone())),
            second_surname: Set(Some(personal.second_surname.clone())),
            birth_date: Set(personal.birth_date),
            phone: Set(Some(personal.phone.clone())),
            business_name: Set(new.business_name.clone()),
            tax_id: Set(new.tax_id.clone()),
            category: Set(Some(new.category.clone())),
            zone: Set(Some(new.zone.clone())),
            location: Set(Some(new.location.clone())),
            plan: Set(Some(DEFAULT_PLAN.to_string())),
            ..Default::default()
        };

        let model = active_model.insert(self.txn).await?;
        Ok(EntrepreneurProfile::from(model))
    }

    /// Persist every mutable field of `profile` and return the stored row.
    pub async fn update(&self, profile: &EntrepreneurProfile) -> AppResult<EntrepreneurProfile> {
        let active_model = ActiveModel {
            id: Unchanged(profile.id),
            user_id: Unchanged(profile.user_id),
            first_name: Set(Some(profile.first_name.clone())),
            second_name: Set(Some(profile.second_name.clone())),
            first_surname: Set(Some(profile.first_surname.clone())),
            second_surname: Set(Some(profile.second_surname.clone())),
            birth_date: Set(profile.birth_date),
            phone: Set(Some(profile.phone.clone())),
            business_name: Set(profile.business_name.clone()),
            tax_id: Set(profile.tax_id.clone()),
            category: Set(Some(profile.category.clone())),
            zone: Set(Some(profile.zone.clone())),
            location: Set(Some(profile.location.clone())),
            plan: Set(Some(profile.plan.clone())),
        };

        let model = active_model.update(self.txn).await?;
        Ok(EntrepreneurProfile::from(model))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = EntrepreneurEntity::delete_by_id(id)
            .exec(self.txn)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

async fn find_by_id<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> AppResult<Option<EntrepreneurProfile>> {
    let result = EntrepreneurEntity::find_by_id(id).one(db).await?;
    Ok(result.map(EntrepreneurProfile::from))
}
