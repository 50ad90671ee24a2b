/*!
 * Authentication context
 *
 * Responsibility:
 * - gate が検証した AuthenticationRecord を request extensions に載せる (publish)
 * - 後段の handler/stage がそれを型付きで取り出す (retrieve / Authenticated)
 *
 * Public API:
 * - retrieve, Authenticated
 * - ContextError
 */

mod core;
mod types;

pub(crate) use self::core::publish;
pub use self::core::{Authenticated, retrieve, retrieve_from};
pub use types::ContextError;
