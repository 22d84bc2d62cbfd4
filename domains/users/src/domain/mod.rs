//! Users domain layer: entities, validation

pub mod entities;
pub mod validation;
