//! Admin authentication: a single-claim JWT carried in the `auth_token` cookie

mod jwt;
mod session;

pub use jwt::{Claims, JwtService};
pub use session::{clear_cookie, password_matches, session_cookie, token_from_headers, AUTH_COOKIE};
