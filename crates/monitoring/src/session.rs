use std::sync::{Arc, RwLock};

/// Explicit session state, injected into the client instead of living in
/// ambient storage. Lifecycle: set on login, cleared on logout or when the
/// backend answers 401.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: String);
    fn clear(&self);
}

/// In-memory token store. Wrap one instance in an `Arc` to let several
/// clients share a login.
#[derive(Debug, Default)]
pub struct MemorySession {
    token: RwLock<Option<String>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemorySession {
    fn get(&self) -> Option<String> {
        self.token.read().map(|token| token.clone()).unwrap_or(None)
    }

    fn set(&self, token: String) {
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token);
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }
    }
}

impl<S: TokenStore + ?Sized> TokenStore for Arc<S> {
    fn get(&self) -> Option<String> {
        (**self).get()
    }

    fn set(&self, token: String) {
        (**self).set(token)
    }

    fn clear(&self) {
        (**self).clear()
    }
}
