use super::token_cell::SessionTokenCell;
use crate::backend::BackendClient;
use crate::models::AppHandle;

/// Everything one page load owns: the bridge handle, the backend client and
/// the token cell shared with the refresh loop.
#[derive(Clone, Debug)]
pub struct SessionContext {
    pub app: AppHandle,
    pub backend: BackendClient,
    pub token: SessionTokenCell,
}

impl SessionContext {
    pub fn new(app: AppHandle, backend: BackendClient) -> Self {
        Self {
            app,
            backend,
            token: SessionTokenCell::new(),
        }
    }
}
