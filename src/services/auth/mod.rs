pub mod access_jwt;
pub mod bearer;
pub mod clock;
pub mod error;
pub mod factory;
pub mod key;

pub use access_jwt::{AuthenticationRecord, Claims, TokenVerifier, VerifierOptions};
pub use bearer::extract_bearer;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{AuthError, MalformedReason, RejectReason};
pub use factory::build_auth_gate;
pub use key::{KeyError, KeyMaterial};
