//! Request executor.
//!
//! # Data Flow
//! ```text
//! get/post/put/delete/request/fetch
//!     → executor.rs (prepare → CallId → httpRequest event)
//!         → automock hook, if installed and not opted out
//!         → or transport round-trip → ResponseRecord::from_raw
//!     → httpResponse (detached) or httpRequestError event
//!     → caller
//! ```
//!
//! # Design Decisions
//! - Sink and hook registries live on the client instance, not in globals
//! - `HttpClient` is a cheap `Arc` clone; clones share registries
//! - `reset` clears both registries without affecting in-flight calls

mod executor;
mod methods;

use std::future::Future;
use std::sync::Arc;

use crate::automock::{AutomockHook, ExecutorHandle, HookFuture, HookRegistry};
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::http::ResponseRecord;
use crate::http::RequestDescriptor;
use crate::sink::{LogSink, SinkRegistry};
use crate::transport::{ReqwestTransport, Transport};

pub(crate) struct ClientInner {
    transport: Arc<dyn Transport>,
    sinks: SinkRegistry,
    hooks: HookRegistry,
}

/// Instrumented HTTP client.
#[derive(Clone)]
pub struct HttpClient {
    inner: Arc<ClientInner>,
}

impl HttpClient {
    /// Client over a default reqwest transport.
    pub fn new() -> Self {
        Self::with_transport(ReqwestTransport::default())
    }

    /// Client over a reqwest transport built from config.
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let transport = ReqwestTransport::new(&config.transport)?;
        Ok(Self::with_transport(transport))
    }

    /// Client over any transport.
    pub fn with_transport(transport: impl Transport) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                transport: Arc::new(transport),
                sinks: SinkRegistry::new(),
                hooks: HookRegistry::new(),
            }),
        }
    }

    /// Weak handle for use inside hooks.
    pub fn handle(&self) -> ExecutorHandle {
        ExecutorHandle::new(&self.inner)
    }

    /// Install a log sink, replacing any previous one.
    pub fn set_log_sink(&self, sink: impl LogSink + 'static) -> &Self {
        self.inner.sinks.set(Some(Arc::new(sink)));
        self
    }

    /// Remove the log sink; logging becomes a no-op.
    pub fn clear_log_sink(&self) -> &Self {
        self.inner.sinks.clear();
        self
    }

    pub fn log_sink(&self) -> Option<Arc<dyn LogSink>> {
        self.inner.sinks.get()
    }

    /// Install an interception hook.
    ///
    /// `factory` runs once with a handle to this client and returns the
    /// hook. The hook receives every call whose session does not set
    /// `automock: false`, and its result is returned to the caller as is.
    pub fn set_automock<F, H, Fut>(&self, factory: F) -> &Self
    where
        F: FnOnce(ExecutorHandle) -> H,
        H: Fn(RequestDescriptor) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ClientResult<ResponseRecord>> + Send + 'static,
    {
        let hook = factory(self.handle());
        let hook: AutomockHook = Arc::new(move |descriptor: RequestDescriptor| -> HookFuture { Box::pin(hook(descriptor)) });
        self.inner.hooks.set(hook);
        self
    }

    pub fn clear_automock(&self) -> &Self {
        self.inner.hooks.clear();
        self
    }

    pub fn automock(&self) -> Option<AutomockHook> {
        self.inner.hooks.get()
    }

    /// Clear both the hook and the sink.
    pub fn reset(&self) -> &Self {
        self.inner.hooks.clear();
        self.inner.sinks.clear();
        self
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("sinks", &self.inner.sinks)
            .field("hooks", &self.inner.hooks)
            .finish()
    }
}
