use sea_orm::entity::prelude::*;

/// Leak found during a campaign. Deleted together with its campaign.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "leaks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: Option<i32>,
    pub campaign_id: Option<i32>,
    pub lm_status_id: Option<i32>,
    pub severity_id: Option<i32>,
    pub leak_location: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub leak_description: Option<String>,
    pub leak_image_big: String,
    pub leak_image_small: String,
    pub leak_number: i32,
    pub measured_flow: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
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
    #[sea_orm(
        belongs_to = "super::campaigns::Entity",
        from = "Column::CampaignId",
        to = "super::campaigns::Column::Id",
        on_delete = "Cascade"
    )]
    Campaign,
    #[sea_orm(
        belongs_to = "super::leak_statuses::Entity",
        from = "Column::LmStatusId",
        to = "super::leak_statuses::Column::Id",
        on_delete = "SetNull"
    )]
    LmStatus,
    #[sea_orm(
        belongs_to = "super::severities::Entity",
        from = "Column::SeverityId",
        to = "super::severities::Column::Id",
        on_delete = "SetNull"
    )]
    Severity,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::campaigns::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Campaign.def()
    }
}

impl Related<super::leak_statuses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LmStatus.def()
    }
}

impl Related<super::severities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Severity.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
