//! Request dispatch: normalize, resolve, invoke, classify.
//!
//! The dispatcher is a pure routing boundary. Every failure on the way to
//! a handler, and every failure a handler reports, is caught here and
//! collapsed into one fault envelope; nothing propagates to the host
//! layer as an error.

use crate::error::SoapError;
use crate::parser::parse_envelope;
use crate::registry::{HandlerResult, ServiceRegistry};
use crate::resolver::resolve_operation;
use crate::response::{build_fault, build_response};
use tracing::{debug, warn};

/// Terminal classification of one dispatched request.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// Serialized response envelope (HTTP 200).
    Response(String),
    /// One-way operation acknowledged, no body (HTTP 202).
    Acknowledged,
    /// Serialized fault envelope (HTTP 500).
    Fault(String),
}

/// Routes requests to registered services.
pub struct Dispatcher {
    registry: ServiceRegistry,
}

impl Dispatcher {
    pub fn new(registry: ServiceRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    /// Dispatch a raw request body to `service_name`.
    ///
    /// Never fails: error paths return a fault outcome.
    pub async fn dispatch(&self, service_name: &str, body: &[u8]) -> DispatchOutcome {
        match self.try_dispatch(service_name, body).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(service = service_name, error = %err, "SOAP request faulted");
                DispatchOutcome::Fault(build_fault(&err.to_string()))
            }
        }
    }

    async fn try_dispatch(
        &self,
        service_name: &str,
        body: &[u8],
    ) -> Result<DispatchOutcome, SoapError> {
        let envelope = parse_envelope(body)?;

        let handler = self
            .registry
            .lookup(service_name)
            .ok_or_else(|| SoapError::UnknownService(service_name.to_string()))?;
        let descriptor = handler.descriptor();

        let resolved = resolve_operation(descriptor, &envelope.body)?;
        debug!(
            service = service_name,
            operation = resolved.name,
            matched = ?resolved.matched,
            "Operation resolved"
        );

        let result = handler
            .handle(resolved.name, resolved.args, envelope.header.as_ref())
            .await?;

        match result {
            HandlerResult::Normal(fields) => Ok(DispatchOutcome::Response(build_response(
                descriptor,
                resolved.name,
                &fields,
            ))),
            HandlerResult::OneWay => {
                debug!(
                    service = service_name,
                    operation = resolved.name,
                    "One-way operation acknowledged"
                );
                Ok(DispatchOutcome::Acknowledged)
            }
        }
    }
}
