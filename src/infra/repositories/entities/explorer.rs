//! Explorer profile entity.

use sea_orm::entity::prelude::*;

use crate::domain::ExplorerProfile;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "explorers")]
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
    pub preference: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ExplorerProfile {
    fn from(model: Model) -> Self {
        ExplorerProfile {
            id: model.id,
            user_id: model.user_id,
            first_name: model.first_name.unwrap_or_default(),
            second_name: model.second_name.unwrap_or_default(),
            first_surname: model.first_surname.unwrap_or_default(),
            second_surname: model.second_surname.unwrap_or_default(),
            birth_date: model.birth_date,
            phone: model.phone.unwrap_or_default(),
            preference: model.preference.unwrap_or_default(),
        }
    }
}
