//! Job entity - a unit of work that, once done, contributes progress to the
//! outputs it is mapped to.
//!
//! Jobs support both soft delete (`is_deleted`) and hard delete.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Job database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "jobs")]
pub struct Model {
    /// Opaque identifier (UUID text)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Short description of the work
    pub title: String,
    /// Whether the job has been completed
    pub is_done: bool,
    /// Optional due date, used by the dashboard time filter
    pub due_date: Option<Date>,
    /// Owner-assigned impact score
    pub impact: f64,
    /// Soft delete flag - if true, the job is hidden but data is preserved
    pub is_deleted: bool,
    /// When the job was created
    pub created_at: DateTime,
    /// When the job was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Job and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Outputs this job advances
    #[sea_orm(has_many = "super::job_output_mapping::Entity")]
    JobOutputMappings,
}

impl Related<super::job_output_mapping::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JobOutputMappings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
