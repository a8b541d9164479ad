//! Query functions over the clinic tables, one module per aggregate.

pub mod owners;
pub mod pet_types;
pub mod vets;
