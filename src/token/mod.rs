//! Token codec
//!
//! Stateless, self-verifying tracking tokens bound to an identity.
//! Pure functions only: no I/O and no shared state.

mod codec;
mod compare;
mod identity;

pub use codec::{SEPARATOR, SIGNATURE_HEX_LEN, TokenCodec, issue, issue_for, redeem};
pub use compare::{constant_time_eq, constant_time_str_eq};
pub use identity::{Identity, MAX_IDENTITY_LEN};
