//! Authorization Module
//!
//! Caller identity, the `Admin` role check, and the mutation gate.

mod gate;
mod principal;

pub use gate::{mutation_gate, ADMIN_MARKER, MARKER_PARAM};
pub use principal::{identity_middleware, Principal, RequireAdmin, ADMIN_ROLE, ROLES_HEADER, USER_HEADER};
