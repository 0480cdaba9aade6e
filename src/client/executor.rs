//! The call pipeline.

use crate::automock::AutomockHook;
use crate::client::{ClientInner, HttpClient};
use crate::error::ClientResult;
use crate::http::{CallId, PreparedRequest, RequestDescriptor, ResponseRecord};
use crate::observability::metrics;
use crate::sink::LogEvent;

impl HttpClient {
    /// Run one call.
    ///
    /// Validation failures return before any id, log event or transport
    /// activity. A call an installed automock hook answers skips transport
    /// validation. Non-2xx statuses come back as ordinary records.
    pub async fn execute(&self, descriptor: RequestDescriptor) -> ClientResult<ResponseRecord> {
        self.inner.execute(descriptor).await
    }
}

/// Where a call goes once it has been validated.
enum Dispatch {
    Automock(AutomockHook),
    Transport(PreparedRequest),
}

impl ClientInner {
    pub(crate) async fn execute(&self, descriptor: RequestDescriptor) -> ClientResult<ResponseRecord> {
        let hook = if descriptor.session.automock_enabled() {
            self.hooks.get()
        } else {
            None
        };
        // Intercepted calls never reach the transport, so URL, header and
        // body normalization only applies to the transport path.
        let dispatch = match hook {
            Some(hook) => Dispatch::Automock(hook),
            None => Dispatch::Transport(descriptor.prepare()?),
        };
        let call_id = CallId::new();
        let method = descriptor.options.effective_method();

        metrics::record_request(method.as_str());
        if self.sinks.is_installed() {
            self.sinks.emit(LogEvent::request(&call_id, &descriptor));
        }
        tracing::debug!(
            call_id = %call_id,
            method = %method,
            url = %descriptor.url,
            "http request"
        );

        let prepared = match dispatch {
            Dispatch::Automock(hook) => {
                metrics::record_automock_hit();
                tracing::debug!(call_id = %call_id, "http request intercepted by automock");
                return hook(descriptor).await;
            }
            Dispatch::Transport(prepared) => prepared,
        };

        let result = match self.transport.send(prepared.request).await {
            Ok(raw) => ResponseRecord::from_raw(raw, prepared.parse_mode),
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(record) => {
                metrics::record_response(record.status_code);
                tracing::debug!(call_id = %call_id, status = record.status_code, "http response");
                if self.sinks.is_installed() {
                    self.sinks.emit_detached(LogEvent::response(&call_id, &record));
                }
                Ok(record)
            }
            Err(err) => {
                metrics::record_error(err.kind());
                tracing::debug!(call_id = %call_id, error = %err, "http error");
                if self.sinks.is_installed() {
                    self.sinks.emit(LogEvent::error(&call_id, &err));
                }
                Err(err)
            }
        }
    }
}
