//! rpBasicAuth mock service: single `process` operation echoing its input.

use crate::error::SoapError;
use crate::parser::Subtree;
use crate::registry::{
    HandlerResult, ResponseFields, ResponseLayout, ServiceDescriptor, ServiceHandler,
};
use async_trait::async_trait;
use chrono::Utc;

static DESCRIPTOR: ServiceDescriptor = ServiceDescriptor {
    name: "rpBasicAuth",
    wsdl_file: "rpBasicAuth.wsdl",
    namespace: "http://xmlns.oracle.com/rp_WS_Basic_Authentication_APP/rp_WS_Basic_Authentication/rp_Basic_Authentication_WS",
    operations: &["process"],
    layout: ResponseLayout::WrappedFields { prefix: "client" },
    fallback: None,
};

pub struct BasicAuthService;

#[async_trait]
impl ServiceHandler for BasicAuthService {
    fn descriptor(&self) -> &ServiceDescriptor {
        &DESCRIPTOR
    }

    async fn handle(
        &self,
        operation: &str,
        args: &Subtree,
        _header: Option<&Subtree>,
    ) -> Result<HandlerResult, SoapError> {
        match operation {
            "process" => {
                let input = args
                    .child_text("input")
                    .filter(|t| !t.is_empty())
                    .unwrap_or("No input provided");
                let result = format!("Processed: {input} at {}", Utc::now().to_rfc3339());
                Ok(HandlerResult::Normal(
                    ResponseFields::new().field("result", result),
                ))
            }
            other => Err(SoapError::handler(format!(
                "Unsupported rpBasicAuth operation: {other}"
            ))),
        }
    }
}
