//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod job;
pub mod job_output_mapping;
pub mod outcome;
pub mod outcome_output_mapping;
pub mod output;

// Re-export specific types to avoid conflicts
pub use job::{Column as JobColumn, Entity as Job, Model as JobModel};
pub use job_output_mapping::{
    Column as JobOutputMappingColumn, Entity as JobOutputMapping, Model as JobOutputMappingModel,
};
pub use outcome::{Column as OutcomeColumn, Entity as Outcome, Model as OutcomeModel};
pub use outcome_output_mapping::{
    Column as OutcomeOutputMappingColumn, Entity as OutcomeOutputMapping,
    Model as OutcomeOutputMappingModel,
};
pub use output::{Column as OutputColumn, Entity as Output, Model as OutputModel};
