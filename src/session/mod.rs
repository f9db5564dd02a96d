//! The session-authentication lifecycle.
//!
//! [`SessionBootstrap`] drives one page load: auth check, initial token,
//! refresh loop, protected-resource fetch. The pieces it orchestrates are
//! usable on their own.

pub mod auth_checker;
pub mod bootstrap;
pub mod context;
pub mod redirect;
pub mod refresh;
pub mod token_cell;
pub mod token_provider;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth_checker::{authorization_url, AuthCheck, AuthChecker};
pub use bootstrap::{Session, SessionBootstrap};
pub use context::SessionContext;
pub use redirect::{RedirectDispatcher, RedirectKind};
pub use refresh::{RefreshHandle, RefreshStats, TokenRefreshLoop};
pub use token_cell::SessionTokenCell;
pub use token_provider::TokenProvider;
