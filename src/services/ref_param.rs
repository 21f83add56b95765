//! RefParam mock services: request/response `echo` plus one-way
//! `echoOneway`.
//!
//! The SOAP 1.1 and SOAP 1.2 WSDL variants share one contract and
//! namespace; they register as two services with separate names and WSDL
//! documents.

use crate::error::SoapError;
use crate::parser::Subtree;
use crate::registry::{
    HandlerResult, ResponseFields, ResponseLayout, ServiceDescriptor, ServiceHandler,
};
use async_trait::async_trait;
use tracing::info;

static SOAP11_DESCRIPTOR: ServiceDescriptor = ServiceDescriptor {
    name: "RefParamSoap11",
    wsdl_file: "RefParamSoap11.wsdl",
    namespace: "http://wsa/refparam",
    operations: &["echo", "echoOneway"],
    layout: ResponseLayout::WrappedFields { prefix: "tns" },
    fallback: None,
};

static SOAP12_DESCRIPTOR: ServiceDescriptor = ServiceDescriptor {
    name: "RefParamSoap12",
    wsdl_file: "RefParamSoap12.wsdl",
    namespace: "http://wsa/refparam",
    operations: &["echo", "echoOneway"],
    layout: ResponseLayout::WrappedFields { prefix: "tns" },
    fallback: None,
};

pub struct RefParamService {
    descriptor: &'static ServiceDescriptor,
}

impl RefParamService {
    pub fn soap11() -> Self {
        Self {
            descriptor: &SOAP11_DESCRIPTOR,
        }
    }

    pub fn soap12() -> Self {
        Self {
            descriptor: &SOAP12_DESCRIPTOR,
        }
    }
}

#[async_trait]
impl ServiceHandler for RefParamService {
    fn descriptor(&self) -> &ServiceDescriptor {
        self.descriptor
    }

    async fn handle(
        &self,
        operation: &str,
        args: &Subtree,
        _header: Option<&Subtree>,
    ) -> Result<HandlerResult, SoapError> {
        match operation {
            "echo" => {
                let message = args.child_text("message").unwrap_or_default();
                Ok(HandlerResult::Normal(
                    ResponseFields::new().field("return", message),
                ))
            }
            "echoOneway" => {
                let msg = args.child_text("msg").unwrap_or_default();
                info!(service = self.descriptor.name, msg, "One-way message received");
                Ok(HandlerResult::OneWay)
            }
            other => Err(SoapError::handler(format!(
                "Unsupported {} operation: {other}",
                self.descriptor.name
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::FieldValue;

    fn args(key: &str, value: &str) -> Subtree {
        Subtree::Elements(vec![(key.to_string(), Subtree::Text(value.to_string()))])
    }

    #[tokio::test]
    async fn test_echo_returns_message() {
        let result = RefParamService::soap12()
            .handle("echo", &args("ref:message", "Hello World"), None)
            .await
            .unwrap();

        match result {
            HandlerResult::Normal(fields) => {
                assert_eq!(
                    fields.get("return"),
                    Some(&FieldValue::Text("Hello World".to_string()))
                );
            }
            HandlerResult::OneWay => panic!("unexpected one-way result"),
        }
    }

    #[tokio::test]
    async fn test_echo_oneway_produces_marker() {
        let result = RefParamService::soap12()
            .handle("echoOneway", &args("ref:msg", "hi"), None)
            .await
            .unwrap();
        assert_eq!(result, HandlerResult::OneWay);
    }

    #[tokio::test]
    async fn test_variants_share_contract_under_distinct_names() {
        let soap11 = RefParamService::soap11();
        let soap12 = RefParamService::soap12();
        assert_eq!(soap11.descriptor().name, "RefParamSoap11");
        assert_eq!(soap12.descriptor().name, "RefParamSoap12");
        assert_eq!(
            soap11.descriptor().operations,
            soap12.descriptor().operations
        );
        assert_eq!(
            soap11.descriptor().namespace,
            soap12.descriptor().namespace
        );
    }
}
