//! Job–output mapping entity - weighted, directional link job → output.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Job–output mapping database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "job_output_mappings")]
pub struct Model {
    /// Opaque identifier (UUID text)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Job providing the contribution
    pub job_id: String,
    /// Output receiving the contribution
    pub output_id: String,
    /// Amount of the output's range delivered when the job is done
    pub pi_impact_value: f64,
    /// Legacy snapshot of the output target at mapping time
    pub pi_target: Option<f64>,
}

/// Defines relationships between the mapping and its endpoints
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The contributing job
    #[sea_orm(
        belongs_to = "super::job::Entity",
        from = "Column::JobId",
        to = "super::job::Column::Id"
    )]
    Job,
    /// The advanced output
    #[sea_orm(
        belongs_to = "super::output::Entity",
        from = "Column::OutputId",
        to = "super::output::Column::Id"
    )]
    Output,
}

impl Related<super::job::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Job.def()
    }
}

impl Related<super::output::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Output.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
