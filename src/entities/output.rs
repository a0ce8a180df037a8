//! Output entity - an intermediate measurable deliverable (a PI) that feeds
//! one or more outcomes and is advanced by completed jobs.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Output database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "outputs")]
pub struct Model {
    /// Opaque identifier (UUID text)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Display name (e.g., "Sales calls made")
    pub name: String,
    /// Optional unit label
    pub unit: Option<String>,
    /// Value when tracking started
    pub beginning_value: f64,
    /// Value that counts as fully delivered
    pub target_value: f64,
    /// When the output was created
    pub created_at: DateTime,
    /// When the output was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Output and the mapping tables
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Outcomes this output contributes to
    #[sea_orm(has_many = "super::outcome_output_mapping::Entity")]
    OutcomeOutputMappings,
    /// Jobs that advance this output
    #[sea_orm(has_many = "super::job_output_mapping::Entity")]
    JobOutputMappings,
}

impl Related<super::outcome_output_mapping::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OutcomeOutputMappings.def()
    }
}

impl Related<super::job_output_mapping::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JobOutputMappings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
