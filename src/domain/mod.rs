//! Solver-agnostic planning logic.
//!
//! Data flows strictly left to right:
//!
//! ```text
//! records -> normalize -> CostMatrix -> ModelBuilder -> (solver) -> extract_plan
//! ```

pub mod constraint;
pub mod cost_matrix;
pub mod error;
pub mod id;
pub mod model;
pub mod normalize;
pub mod plan;
pub mod problem;
pub mod record;
pub mod scenario;

pub use constraint::{
    Constraint, ConstraintSense, LinearExpr, VariableBounds, VariableDef, VariableKind,
};
pub use cost_matrix::CostMatrix;
pub use error::{DomainError, EntityKind, Infeasibility};
pub use id::{FacilityId, LaneId, WarehouseId};
pub use model::{ModelBuilder, ModelInstance};
pub use normalize::{
    normalize, normalize_facilities, normalize_warehouses, Facility, NormalizedData, Warehouse,
};
pub use plan::{extract_plan, Assignment, CostBreakdown, Plan, Shipment, SiteReport};
pub use problem::MilpProblem;
pub use record::{FacilityRecord, LaneRecord, RecordSet, WarehouseRecord};
pub use scenario::Scenario;
