pub mod identity_visit;
pub mod tracked_identity;
