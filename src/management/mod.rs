mod auth;
mod session;

pub use auth::EXPIRY_BUFFER_SECS;
pub use auth::TokenManager;
pub use session::DEFAULT_DISPLAY_NAME;
pub use session::SESSION_COOKIE_NAME;
pub use session::Session;
pub use session::SessionManager;
pub use session::removal_cookie;
pub use session::session_cookie;
