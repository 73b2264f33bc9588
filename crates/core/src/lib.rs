//! Domain rules for the Green Homes admin backend.
//!
//! This crate has no database or HTTP dependencies. It holds the pieces that
//! both the repository layer and the API layer lean on: shared types, the
//! error taxonomy, field validation, the lead workflow, bulk-action parsing,
//! list/pagination maths and the file storage abstraction.

pub mod bulk;
pub mod contact;
pub mod dashboard;
pub mod error;
pub mod lead;
pub mod listing;
pub mod project;
pub mod roles;
pub mod storage;
pub mod system;
pub mod testimonial;
pub mod types;
pub mod upload;
pub mod validation;
