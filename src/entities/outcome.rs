//! Outcome entity - a top-level business result being tracked (a QBO).
//!
//! Progress is measured directly from `beginning_value`, `current_value` and
//! `target_value`. A target equal to the beginning value is allowed and simply
//! reads as zero progress.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Outcome database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "outcomes")]
pub struct Model {
    /// Opaque identifier (UUID text)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Display name (e.g., "Monthly revenue")
    pub name: String,
    /// Optional unit label (e.g., "USD", "customers")
    pub unit: Option<String>,
    /// Value when tracking started
    pub beginning_value: f64,
    /// Latest measured value
    pub current_value: f64,
    /// Value that counts as 100%
    pub target_value: f64,
    /// Priority weight assigned by the owner
    pub points: f64,
    /// When the outcome was created
    pub created_at: DateTime,
    /// When the outcome was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Outcome and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One outcome is fed by many output mappings
    #[sea_orm(has_many = "super::outcome_output_mapping::Entity")]
    OutcomeOutputMappings,
}

impl Related<super::outcome_output_mapping::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OutcomeOutputMappings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
