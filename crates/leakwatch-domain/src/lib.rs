//! Domain primitives shared by the Leakwatch services.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod pagination;
pub mod patch;
pub mod reference;
pub mod validation;
