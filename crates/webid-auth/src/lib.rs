//! WebID delegated authentication.
//!
//! Orchestrates one authentication request end to end: extract the
//! client certificate's claimed identities, check each candidate's
//! published keys against the certificate modulus, and produce a
//! signed redirect the relying service can trust as "this visitor
//! controls identity X".

pub mod matcher;
pub mod redirect;
pub mod session;

pub use matcher::{find_matching_identity, CANDIDATE_LIMIT};
pub use redirect::{auth_timestamp, build_payload, build_signed_redirect};
pub use session::{rejection_location, AuthRequest, AuthenticationSession};
