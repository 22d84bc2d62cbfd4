//! Jobs domain layer: entities, filters, claim state machine, errors

pub mod entities;
pub mod error;
pub mod filter;
pub mod state;
