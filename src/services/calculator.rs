//! Calculator mock service: integer arithmetic over `intA`/`intB`.

use crate::error::SoapError;
use crate::parser::Subtree;
use crate::registry::{
    HandlerResult, ResponseFields, ResponseLayout, ServiceDescriptor, ServiceHandler,
};
use async_trait::async_trait;

static DESCRIPTOR: ServiceDescriptor = ServiceDescriptor {
    name: "calculator",
    wsdl_file: "calculator.wsdl",
    namespace: "http://tempuri.org/",
    operations: &["Add", "Subtract", "Multiply", "Divide"],
    layout: ResponseLayout::WrappedFields { prefix: "tns" },
    fallback: None,
};

pub struct CalculatorService;

#[async_trait]
impl ServiceHandler for CalculatorService {
    fn descriptor(&self) -> &ServiceDescriptor {
        &DESCRIPTOR
    }

    async fn handle(
        &self,
        operation: &str,
        args: &Subtree,
        _header: Option<&Subtree>,
    ) -> Result<HandlerResult, SoapError> {
        let a = int_arg(args, "intA");
        let b = int_arg(args, "intB");

        let result = match operation {
            "Add" => a + b,
            "Subtract" => a - b,
            "Multiply" => a * b,
            "Divide" => {
                if b == 0 {
                    return Err(SoapError::handler("Division by zero"));
                }
                floor_div(a, b)
            }
            other => {
                return Err(SoapError::handler(format!(
                    "Unsupported calculator operation: {other}"
                )))
            }
        };

        Ok(HandlerResult::Normal(
            ResponseFields::new().field(format!("{operation}Result"), result),
        ))
    }
}

/// Unparseable or missing arguments default to 0.
fn int_arg(args: &Subtree, name: &str) -> i64 {
    args.child_text(name)
        .and_then(|t| t.trim().parse::<i64>().ok())
        .unwrap_or(0)
}

/// Integer division rounding toward negative infinity.
fn floor_div(a: i64, b: i64) -> i64 {
    let q = a / b;
    if a % b != 0 && (a < 0) != (b < 0) {
        q - 1
    } else {
        q
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::FieldValue;

    fn args(a: &str, b: &str) -> Subtree {
        Subtree::Elements(vec![
            ("tns:intA".to_string(), Subtree::Text(a.to_string())),
            ("tns:intB".to_string(), Subtree::Text(b.to_string())),
        ])
    }

    async fn run(operation: &str, a: &str, b: &str) -> Result<HandlerResult, SoapError> {
        CalculatorService
            .handle(operation, &args(a, b), None)
            .await
    }

    fn result_of(result: HandlerResult, field: &str) -> FieldValue {
        match result {
            HandlerResult::Normal(fields) => fields.get(field).unwrap().clone(),
            HandlerResult::OneWay => panic!("unexpected one-way result"),
        }
    }

    #[tokio::test]
    async fn test_add() {
        let result = run("Add", "4", "5").await.unwrap();
        assert_eq!(result_of(result, "AddResult"), FieldValue::Int(9));
    }

    #[tokio::test]
    async fn test_subtract_and_multiply() {
        let result = run("Subtract", "10", "4").await.unwrap();
        assert_eq!(result_of(result, "SubtractResult"), FieldValue::Int(6));

        let result = run("Multiply", "6", "7").await.unwrap();
        assert_eq!(result_of(result, "MultiplyResult"), FieldValue::Int(42));
    }

    #[tokio::test]
    async fn test_divide_floors() {
        let result = run("Divide", "7", "2").await.unwrap();
        assert_eq!(result_of(result, "DivideResult"), FieldValue::Int(3));

        let result = run("Divide", "-7", "2").await.unwrap();
        assert_eq!(result_of(result, "DivideResult"), FieldValue::Int(-4));
    }

    #[tokio::test]
    async fn test_divide_by_zero() {
        let err = run("Divide", "4", "0").await.unwrap_err();
        assert_eq!(err.to_string(), "Division by zero");
    }

    #[tokio::test]
    async fn test_missing_args_default_to_zero() {
        let empty = Subtree::Text(String::new());
        let result = CalculatorService.handle("Add", &empty, None).await.unwrap();
        assert_eq!(result_of(result, "AddResult"), FieldValue::Int(0));
    }

    #[tokio::test]
    async fn test_non_numeric_args_default_to_zero() {
        let result = run("Add", "four", "5").await.unwrap();
        assert_eq!(result_of(result, "AddResult"), FieldValue::Int(5));
    }

    #[tokio::test]
    async fn test_unsupported_operation() {
        let err = run("Modulo", "4", "2").await.unwrap_err();
        assert!(err.to_string().contains("Unsupported calculator operation"));
    }
}
