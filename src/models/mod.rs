pub mod app_handle;
pub mod auth_result;
pub mod phase;
pub mod tenant;
pub mod token;

pub use app_handle::AppHandle;
pub use auth_result::AuthResult;
pub use phase::SessionPhase;
pub use tenant::TenantId;
pub use token::SessionToken;
