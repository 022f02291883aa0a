//! Domain errors raised while turning raw records into a model and back.
//!
//! Every variant names the entity, lane or quantity that triggered it so the
//! input data can be fixed without inspecting internals.
//!
//! # Examples
//!
//! ```
//! use siteplan::domain::error::{DomainError, EntityKind};
//! use siteplan::domain::{normalize_facilities, FacilityRecord};
//! use siteplan::domain::FacilityId;
//!
//! let records = vec![FacilityRecord::new("DORM_A", 100.0)];
//! let targets = vec![FacilityId::from("LIBRARY")];
//!
//! let result = normalize_facilities(&records, &targets, 365);
//! assert!(matches!(
//!     result,
//!     Err(DomainError::MissingEntity { kind: EntityKind::Facility, .. })
//! ));
//! ```

use std::fmt;

use thiserror::Error;

use super::id::{FacilityId, WarehouseId};

/// Kind of record an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Facility,
    Warehouse,
    Lane,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Facility => "facility",
            Self::Warehouse => "warehouse",
            Self::Lane => "lane",
        };
        f.write_str(name)
    }
}

/// Why a configuration cannot be feasible, detected before solving.
#[derive(Debug, Clone, PartialEq)]
pub enum Infeasibility {
    /// More sites requested than there are candidates.
    SiteCountExceedsCandidates { site_count: usize, candidates: usize },
    /// Even the K largest candidate capacities cannot cover total demand.
    InsufficientCapacity {
        site_count: usize,
        total_demand: f64,
        best_capacity: f64,
    },
}

impl fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SiteCountExceedsCandidates {
                site_count,
                candidates,
            } => write!(
                f,
                "site_count {site_count} exceeds the {candidates} candidate warehouses"
            ),
            Self::InsufficientCapacity {
                site_count,
                total_demand,
                best_capacity,
            } => write!(
                f,
                "total annual demand {total_demand} exceeds the largest capacity \
                 reachable with {site_count} sites ({best_capacity})"
            ),
        }
    }
}

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A target id has no record in the raw data.
    #[error("{kind} '{id}' has no record in the input data")]
    MissingEntity { kind: EntityKind, id: String },

    /// A target id has more than one record in the raw data.
    #[error("{kind} '{id}' has {count} records, expected exactly one")]
    DuplicateEntity {
        kind: EntityKind,
        id: String,
        count: usize,
    },

    /// A quantity is negative, non-finite, or otherwise out of range.
    #[error("invalid {field} for {kind} '{id}': {value} ({requirement})")]
    InvalidQuantity {
        kind: EntityKind,
        id: String,
        field: &'static str,
        value: f64,
        requirement: &'static str,
    },

    /// The cost matrix is missing a lane from the target cross-product.
    #[error("no transport cost for lane {warehouse} -> {facility}")]
    MissingLane {
        warehouse: WarehouseId,
        facility: FacilityId,
    },

    /// A lane in the target cross-product appears more than once.
    #[error("lane {warehouse} -> {facility} has more than one cost record")]
    DuplicateLane {
        warehouse: WarehouseId,
        facility: FacilityId,
    },

    /// The model cannot have a feasible solution; caught before solving.
    #[error("infeasible by construction: {0}")]
    InfeasibleByConstruction(Infeasibility),

    /// Reported cost components do not sum to the solved objective.
    #[error(
        "cost reconciliation failed: fixed {fixed} + transport {transport} != total {total}"
    )]
    Reconciliation {
        total: f64,
        fixed: f64,
        transport: f64,
    },

    /// A solved assignment does not match the instance's variable layout.
    #[error("assignment has {actual} values, model declares {expected} variables")]
    AssignmentShape { expected: usize, actual: usize },
}
