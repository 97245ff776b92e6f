use sea_orm::entity::prelude::*;

/// Inspection campaign run by a user at a customer site.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "campaigns")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: Option<i32>,
    pub society_name: String,
    pub location: String,
    pub kwh_price: f64,
    pub nbr_compressor_use_by_year: i32,
    pub electricity_price: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "SetNull"
    )]
    User,
    #[sea_orm(has_many = "super::leaks::Entity")]
    Leaks,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::leaks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Leaks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
