//! MeteringService mock: doubling echo.
//!
//! Step `i` of the output holds `2^i` copies of the input string joined
//! with `" - "`, for `i` in `0..counter`.

use crate::error::SoapError;
use crate::parser::Subtree;
use crate::registry::{
    HandlerResult, ResponseFields, ResponseLayout, ServiceDescriptor, ServiceHandler,
};
use async_trait::async_trait;

static DESCRIPTOR: ServiceDescriptor = ServiceDescriptor {
    name: "MeteringService",
    wsdl_file: "MeteringService.wsdl",
    namespace: "http://metering.mock.com/",
    operations: &["echo"],
    layout: ResponseLayout::WrappedFields { prefix: "tns" },
    fallback: None,
};

/// Counters above this would allocate gigabytes of repeated text.
const MAX_COUNTER: u32 = 20;

pub struct MeteringService;

#[async_trait]
impl ServiceHandler for MeteringService {
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
            "echo" => {
                let counter = args
                    .child_text("inputCounter")
                    .and_then(|t| t.trim().parse::<u32>().ok())
                    .filter(|c| *c >= 1)
                    .unwrap_or(1);
                if counter > MAX_COUNTER {
                    return Err(SoapError::handler(format!(
                        "inputCounter {counter} exceeds maximum {MAX_COUNTER}"
                    )));
                }
                let input = args.child_text("inputString").unwrap_or_default();

                let output: Vec<String> = (0..counter)
                    .map(|i| vec![input; 1 << i].join(" - "))
                    .collect();

                Ok(HandlerResult::Normal(
                    ResponseFields::new().field("outputString", output),
                ))
            }
            other => Err(SoapError::handler(format!(
                "Unsupported MeteringService operation: {other}"
            ))),
        }
    }
}
