//! HeaderExtnAttribService mock: echoes a body record and a header record.
//!
//! The only service that consumes the envelope header, and the only one
//! declaring a resolution fallback: some clients wrap the payload in
//! shapes the WSDL does not describe, so any body key whose local name
//! contains `echo` dispatches here with the whole body as arguments.

use crate::error::SoapError;
use crate::parser::Subtree;
use crate::registry::{
    FallbackRule, HandlerResult, ResponseFields, ResponseLayout, ServiceDescriptor,
    ServiceHandler,
};
use async_trait::async_trait;

static DESCRIPTOR: ServiceDescriptor = ServiceDescriptor {
    name: "HeaderExtnAttribService",
    wsdl_file: "HeaderExtnAttribService.wsdl",
    namespace: "http://mock.service.com/",
    operations: &["echoHeaderExtnAttributes"],
    layout: ResponseLayout::HeaderBodyEcho {
        types_ns: "http://mock.service.com/types",
        base_ns: "http://mock.service.com/types/base",
    },
    fallback: Some(FallbackRule {
        marker: "echo",
        operation: "echoHeaderExtnAttributes",
        whole_body_args: true,
    }),
};

pub struct HeaderEchoService;

#[async_trait]
impl ServiceHandler for HeaderEchoService {
    fn descriptor(&self) -> &ServiceDescriptor {
        &DESCRIPTOR
    }

    async fn handle(
        &self,
        operation: &str,
        args: &Subtree,
        header: Option<&Subtree>,
    ) -> Result<HandlerResult, SoapError> {
        if operation != "echoHeaderExtnAttributes" {
            return Err(SoapError::handler(format!(
                "Unsupported HeaderExtnAttribService operation: {operation}"
            )));
        }

        let payload = record_value(args, &["echoRequest", "request", "record", "value"])
            .unwrap_or("Mock Response");
        let header_value = header
            .and_then(|h| record_value(h, &["echoHeader", "header", "record", "value"]))
            .unwrap_or("Mock Header Response");

        Ok(HandlerResult::Normal(
            ResponseFields::new()
                .field("response", payload)
                .field("header", header_value),
        ))
    }
}

/// Walk a chain of prefix-tolerant child names down to leaf text.
fn record_value<'a>(root: &'a Subtree, path: &[&str]) -> Option<&'a str> {
    let mut current = root;
    for step in path {
        current = current.get_local(step)?;
    }
    current.text().filter(|t| !t.is_empty())
}
