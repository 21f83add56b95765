//! Operation resolution against a service's declared contract.
//!
//! A request body may name its operation bare (`Add`), prefixed
//! (`tns:Add`), or, for services that declare a fallback rule, under a
//! shape that only hints at the operation. Resolution order is fixed and
//! first-match-wins so duplicate keys dispatch deterministically.

use crate::error::SoapError;
use crate::parser::{local_name, Subtree};
use crate::registry::ServiceDescriptor;

/// How the operation was identified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Body key equals the declared name.
    Exact,
    /// Body key equals the declared name after prefix stripping.
    LocalName,
    /// The service's structural fallback rule fired.
    Fallback,
}

/// A resolved operation: its declared name, argument subtree, and how the
/// match was made. `name` is always one of the descriptor's declared
/// operations.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedOperation<'a> {
    pub name: &'a str,
    pub args: &'a Subtree,
    pub matched: MatchKind,
}

/// Resolve which declared operation a normalized body invokes.
///
/// Order: exact key match in declared-operation order, then body keys in
/// document order compared by local name, then the service's fallback rule
/// if it declares one.
pub fn resolve_operation<'a>(
    descriptor: &'a ServiceDescriptor,
    body: &'a Subtree,
) -> Result<ResolvedOperation<'a>, SoapError> {
    for op in descriptor.operations.iter().copied() {
        if let Some(args) = body.get(op) {
            return Ok(ResolvedOperation {
                name: op,
                args,
                matched: MatchKind::Exact,
            });
        }
    }

    for (key, args) in body.children() {
        let local = local_name(key);
        if let Some(op) = descriptor.operations.iter().copied().find(|op| *op == local) {
            return Ok(ResolvedOperation {
                name: op,
                args,
                matched: MatchKind::LocalName,
            });
        }
    }

    if let Some(rule) = &descriptor.fallback {
        for (key, args) in body.children() {
            if local_name(key).contains(rule.marker) {
                let args = if rule.whole_body_args { body } else { args };
                return Ok(ResolvedOperation {
                    name: rule.operation,
                    args,
                    matched: MatchKind::Fallback,
                });
            }
        }
    }

    Err(SoapError::NoOperationMatch)
}
