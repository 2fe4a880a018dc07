//! Upload-driven operations over the priority engine, exposed as a service and an
//! HTTP router.

pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use router::operations_router;
pub use service::{
    Destinations, MergeInput, OperationsError, PriorityOperationsService, ReplacementRun,
};
