//! Built-in mock services and registry construction.

pub mod basic_auth;
pub mod calculator;
pub mod header_echo;
pub mod metering;
pub mod ref_param;

use crate::error::SoapError;
use crate::registry::{ServiceHandler, ServiceRegistry};
use std::sync::Arc;

pub use basic_auth::BasicAuthService;
pub use calculator::CalculatorService;
pub use header_echo::HeaderEchoService;
pub use metering::MeteringService;
pub use ref_param::RefParamService;

/// Names of every built-in service, in default registration order.
pub const BUILTIN_SERVICE_NAMES: &[&str] = &[
    "calculator",
    "rpBasicAuth",
    "HeaderExtnAttribService",
    "RefParamSoap11",
    "RefParamSoap12",
    "MeteringService",
];

/// Build the registry for the named services.
///
/// Unknown names and duplicates are startup-time configuration errors.
pub fn build_registry<S: AsRef<str>>(enabled: &[S]) -> Result<ServiceRegistry, SoapError> {
    let mut registry = ServiceRegistry::new();
    for name in enabled {
        registry.register(instantiate(name.as_ref())?)?;
    }
    Ok(registry)
}

fn instantiate(name: &str) -> Result<Arc<dyn ServiceHandler>, SoapError> {
    match name {
        "calculator" => Ok(Arc::new(CalculatorService)),
        "rpBasicAuth" => Ok(Arc::new(BasicAuthService)),
        "HeaderExtnAttribService" => Ok(Arc::new(HeaderEchoService)),
        "RefParamSoap11" => Ok(Arc::new(RefParamService::soap11())),
        "RefParamSoap12" => Ok(Arc::new(RefParamService::soap12())),
        "MeteringService" => Ok(Arc::new(MeteringService)),
        other => Err(SoapError::Config(format!("unknown service: {other}"))),
    }
}
