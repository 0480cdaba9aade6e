//! Request interception ("automock").
//!
//! # Responsibilities
//! - Hold the installed interception hook (or none)
//! - Build hooks from a factory that receives an [`ExecutorHandle`]
//! - Let hooks fall through to the real transport
//!
//! # Design Decisions
//! - The handle holds a weak reference, so a hook stored inside the client
//!   does not keep the client alive
//! - A call whose session sets `automock: false` bypasses the hook; the
//!   handle's `passthrough` does exactly that

use std::sync::{Arc, Weak};

use arc_swap::ArcSwapOption;
use futures_util::future::BoxFuture;

use crate::client::ClientInner;
use crate::error::{ClientError, ClientResult};
use crate::http::{RequestDescriptor, ResponseRecord};

/// Future returned by a hook.
pub type HookFuture = BoxFuture<'static, ClientResult<ResponseRecord>>;

/// An installed interception hook. Its result is returned to the caller
/// verbatim.
pub type AutomockHook = Arc<dyn Fn(RequestDescriptor) -> HookFuture + Send + Sync>;

/// Weak handle to the executor, handed to hook factories.
#[derive(Clone)]
pub struct ExecutorHandle {
    inner: Weak<ClientInner>,
}

impl ExecutorHandle {
    pub(crate) fn new(inner: &Arc<ClientInner>) -> Self {
        Self {
            inner: Arc::downgrade(inner),
        }
    }

    /// Run a call through the executor, hook included unless the session
    /// opts out.
    pub async fn execute(&self, descriptor: RequestDescriptor) -> ClientResult<ResponseRecord> {
        let inner = self
            .inner
            .upgrade()
            .ok_or_else(|| ClientError::invalid("client has been dropped"))?;
        inner.execute(descriptor).await
    }

    /// Run a call against the real transport, bypassing the hook.
    pub async fn passthrough(&self, mut descriptor: RequestDescriptor) -> ClientResult<ResponseRecord> {
        descriptor.session.automock = Some(false);
        self.execute(descriptor).await
    }
}

impl std::fmt::Debug for ExecutorHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutorHandle")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

struct Installed(AutomockHook);

/// Per-client hook slot.
#[derive(Default)]
pub struct HookRegistry {
    slot: ArcSwapOption<Installed>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, hook: AutomockHook) {
        self.slot.store(Some(Arc::new(Installed(hook))));
    }

    pub fn get(&self) -> Option<AutomockHook> {
        self.slot.load_full().map(|installed| Arc::clone(&installed.0))
    }

    pub fn clear(&self) {
        self.slot.store(None);
    }

    pub fn is_installed(&self) -> bool {
        self.slot.load().is_some()
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("installed", &self.is_installed())
            .finish()
    }
}
