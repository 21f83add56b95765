//! Service registry and the handler capability contract.
//!
//! The registry is built once at startup from the enabled service set and
//! is read-only afterward; concurrent requests share it behind an `Arc`
//! without further synchronization.

use crate::error::SoapError;
use crate::parser::Subtree;
use async_trait::async_trait;
use std::sync::Arc;

/// How a service's results are serialized back into an envelope.
///
/// A closed set of layout variants selected by descriptor data; the
/// response builder has no per-service code paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseLayout {
    /// `<{prefix}:{operation}Response>` in the service namespace, one child
    /// element per result field. List values render as repeated elements.
    WrappedFields { prefix: &'static str },
    /// Header echo alongside a body echo, in the fixed
    /// `echoHeader`/`echoResponse` record shape.
    HeaderBodyEcho {
        types_ns: &'static str,
        base_ns: &'static str,
    },
}

/// Service-declared resolution fallback, consulted only after exact and
/// local-name matching both fail.
///
/// Covers clients whose body shape diverges from the WSDL: any body key
/// whose local name contains `marker` resolves to the fixed `operation`.
/// With `whole_body_args` set, the entire body mapping stands in for the
/// argument subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackRule {
    pub marker: &'static str,
    pub operation: &'static str,
    pub whole_body_args: bool,
}

/// Static description of one registered service.
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    /// Unique registry key, also the `/soap/{name}` path segment.
    pub name: &'static str,
    /// WSDL document filename served by the artifact route.
    pub wsdl_file: &'static str,
    /// Target namespace for response serialization.
    pub namespace: &'static str,
    /// Declared operation names, in resolution order.
    pub operations: &'static [&'static str],
    /// Response serialization layout.
    pub layout: ResponseLayout,
    /// Optional structural fallback for resolution.
    pub fallback: Option<FallbackRule>,
}

/// A single output field of a service result.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Int(i64),
    List(Vec<String>),
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

/// Ordered output field mapping produced by a handler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseFields {
    fields: Vec<(String, FieldValue)>,
}

impl ResponseFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, builder style.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Outcome of a successful handler invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerResult {
    /// Output fields for the response builder.
    Normal(ResponseFields),
    /// One-way operation: acknowledge only, no response body.
    OneWay,
}

/// The capability each mock service implements.
///
/// Invocation is awaited by the dispatcher; handlers may suspend freely.
/// Errors are reported through `Result`, never panics.
#[async_trait]
pub trait ServiceHandler: Send + Sync {
    /// Static descriptor; stable for the life of the process.
    fn descriptor(&self) -> &ServiceDescriptor;

    /// Execute `operation` with the resolved argument subtree and the
    /// envelope header, when one was present.
    async fn handle(
        &self,
        operation: &str,
        args: &Subtree,
        header: Option<&Subtree>,
    ) -> Result<HandlerResult, SoapError>;
}

/// Immutable lookup table of registered services.
#[derive(Default)]
pub struct ServiceRegistry {
    services: Vec<Arc<dyn ServiceHandler>>,
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field(
                "services",
                &self
                    .services
                    .iter()
                    .map(|h| h.descriptor().name)
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a service. Duplicate names are a startup-time configuration
    /// error.
    pub fn register(&mut self, handler: Arc<dyn ServiceHandler>) -> Result<(), SoapError> {
        let name = handler.descriptor().name;
        if self.lookup(name).is_some() {
            return Err(SoapError::DuplicateService(name.to_string()));
        }
        self.services.push(handler);
        Ok(())
    }

    /// Find a service by exact name.
    pub fn lookup(&self, name: &str) -> Option<&Arc<dyn ServiceHandler>> {
        self.services.iter().find(|h| h.descriptor().name == name)
    }

    /// Registered services, in registration order.
    pub fn services(&self) -> impl Iterator<Item = &Arc<dyn ServiceHandler>> {
        self.services.iter()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubService(ServiceDescriptor);

    #[async_trait]
    impl ServiceHandler for StubService {
        fn descriptor(&self) -> &ServiceDescriptor {
            &self.0
        }

        async fn handle(
            &self,
            _operation: &str,
            _args: &Subtree,
            _header: Option<&Subtree>,
        ) -> Result<HandlerResult, SoapError> {
            Ok(HandlerResult::Normal(ResponseFields::new()))
        }
    }

    fn stub(name: &'static str) -> Arc<dyn ServiceHandler> {
        Arc::new(StubService(ServiceDescriptor {
            name,
            wsdl_file: "stub.wsdl",
            namespace: "http://example.org/stub",
            operations: &["ping"],
            layout: ResponseLayout::WrappedFields { prefix: "tns" },
            fallback: None,
        }))
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = ServiceRegistry::new();
        registry.register(stub("alpha")).unwrap();
        registry.register(stub("beta")).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.lookup("alpha").is_some());
        assert!(registry.lookup("gamma").is_none());
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = ServiceRegistry::new();
        registry.register(stub("alpha")).unwrap();

        let err = registry.register(stub("alpha")).unwrap_err();
        assert!(matches!(err, SoapError::DuplicateService(name) if name == "alpha"));
    }

    #[test]
    fn test_registration_order_preserved() {
        let mut registry = ServiceRegistry::new();
        for name in ["c", "a", "b"] {
            registry.register(stub(name)).unwrap();
        }
        let names: Vec<&str> = registry
            .services()
            .map(|h| h.descriptor().name)
            .collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_response_fields_accessors() {
        let fields = ResponseFields::new()
            .field("AddResult", 9)
            .field("note", "ok")
            .field("items", vec!["x".to_string(), "y".to_string()]);

        assert_eq!(fields.get("AddResult"), Some(&FieldValue::Int(9)));
        assert_eq!(fields.get("missing"), None);
        let names: Vec<&str> = fields.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["AddResult", "note", "items"]);
    }
}
