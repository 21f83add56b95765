//! Mock multi-service SOAP host.
//!
//! Accepts SOAP/XML envelopes over HTTP, identifies which registered
//! service and operation a request targets regardless of namespace
//! prefixes, invokes the service handler, and serializes the result back
//! into a SOAP envelope (or a SOAP fault on error).
//!
//! # Features
//!
//! - Prefix-tolerant envelope normalization (`soap:`, `soapenv:`, `env:`, none)
//! - Deterministic operation resolution with per-service fallback rules
//! - Unary, header-bearing, and one-way operation contracts
//! - Uniform SOAP 1.1 fault generation for every failure path
//! - WSDL/XSD document serving per registered service
//!
//! # Example
//!
//! ```ignore
//! use mocksoap::dispatcher::Dispatcher;
//! use mocksoap::services::{build_registry, BUILTIN_SERVICE_NAMES};
//!
//! let registry = build_registry(BUILTIN_SERVICE_NAMES)?;
//! let dispatcher = Dispatcher::new(registry);
//! let outcome = dispatcher.dispatch("calculator", request_bytes).await;
//! ```

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod parser;
pub mod registry;
pub mod resolver;
pub mod response;
pub mod server;
pub mod services;

pub use config::MockSoapConfig;
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use error::SoapError;
pub use parser::{NormalizedEnvelope, Subtree};
pub use registry::{HandlerResult, ServiceDescriptor, ServiceHandler, ServiceRegistry};
