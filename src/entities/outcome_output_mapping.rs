//! Outcome–output mapping entity - weighted, directional link output → outcome.
//!
//! `pi_target` and `qbo_target` are legacy snapshot columns. New rows leave them
//! empty; readers derive target figures from the current output/outcome rows.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Outcome–output mapping database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "outcome_output_mappings")]
pub struct Model {
    /// Opaque identifier (UUID text)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Output providing the contribution
    pub output_id: String,
    /// Outcome receiving the contribution
    pub outcome_id: String,
    /// Contribution weight of the output toward the outcome
    pub qbo_impact: f64,
    /// Legacy snapshot of the output target at mapping time
    pub pi_target: Option<f64>,
    /// Legacy snapshot of the outcome target at mapping time
    pub qbo_target: Option<f64>,
}

/// Defines relationships between the mapping and its endpoints
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The source output
    #[sea_orm(
        belongs_to = "super::output::Entity",
        from = "Column::OutputId",
        to = "super::output::Column::Id"
    )]
    Output,
    /// The target outcome
    #[sea_orm(
        belongs_to = "super::outcome::Entity",
        from = "Column::OutcomeId",
        to = "super::outcome::Column::Id"
    )]
    Outcome,
}

impl Related<super::output::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Output.def()
    }
}

impl Related<super::outcome::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Outcome.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
