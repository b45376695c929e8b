//! Entrepreneur profile entity.

use sea_orm::entity::prelude::*;

use crate::domain::EntrepreneurProfile;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "entrepreneurs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub first_name: Option<String>,
    pub second_name: Option<String>,
    pub first_surname: Option<String>,
    pub second_surname: Option<String>,
    pub birth_date: Option<Date>,
    pub phone: Option<String>,
    pub business_name: String,
    #[sea_orm(unique)]
    pub tax_id: String,
    pub category: Option<String>,
    pub zone: Option<String>,
    pub location: Option<String>,
    pub plan: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for EntrepreneurProfile {
    fn from(model: Model) -> Self {
        EntrepreneurProfile {
            id: model.id,
            user_id: model.user_id,
            first_name: model.first_name.unwrap_or_default(),
            second_name: model.second_name.unwrap_or_default(),
            first_surname: model.first_surname.unwrap_or_default(),
            second_surname: model.second_surname.unwrap_or_default(),
            birth_date: model.birth_date,
            phone: model.phone.unwrap_or_default(),
            business_name: model.business_name,
            tax_id: model.tax_id,
            category: model.category.unwrap_or_default(),
            zone: model.zone.unwrap_or_default(),
            location: model.location.unwrap_or_default(),
            plan: model.plan.unwrap_or_default(),
        }
    }
}
