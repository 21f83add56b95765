//! Response and fault envelope serialization.
//!
//! Layout is selected by descriptor data ([`ResponseLayout`]); the builder
//! itself has no per-service branches. Faults are one fixed shape across
//! all services.

use crate::parser::SOAP_11_NS;
use crate::registry::{FieldValue, ResponseFields, ResponseLayout, ServiceDescriptor};

/// Serialize a result mapping into a SOAP 1.1 response envelope.
pub fn build_response(
    descriptor: &ServiceDescriptor,
    operation: &str,
    fields: &ResponseFields,
) -> String {
    match descriptor.layout {
        ResponseLayout::WrappedFields { prefix } => {
            build_wrapped_fields(descriptor.namespace, prefix, operation, fields)
        }
        ResponseLayout::HeaderBodyEcho { types_ns, base_ns } => {
            build_header_body_echo(types_ns, base_ns, fields)
        }
    }
}

/// Serialize an error message into the uniform fault envelope.
///
/// Same shape regardless of which service or stage failed.
pub fn build_fault(message: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="{SOAP_11_NS}">
  <soap:Body>
    <soap:Fault>
      <faultcode>Server</faultcode>
      <faultstring>{}</faultstring>
    </soap:Fault>
  </soap:Body>
</soap:Envelope>"#,
        xml_escape(message)
    )
}

fn build_wrapped_fields(
    namespace: &str,
    prefix: &str,
    operation: &str,
    fields: &ResponseFields,
) -> String {
    let mut rendered = String::new();
    for (name, value) in fields.iter() {
        match value {
            FieldValue::Text(text) => push_element(&mut rendered, prefix, name, text),
            FieldValue::Int(n) => push_element(&mut rendered, prefix, name, &n.to_string()),
            FieldValue::List(items) => {
                for item in items {
                    push_element(&mut rendered, prefix, name, item);
                }
            }
        }
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="{SOAP_11_NS}" xmlns:{prefix}="{namespace}">
  <soap:Body>
    <{prefix}:{operation}Response>
{rendered}    </{prefix}:{operation}Response>
  </soap:Body>
</soap:Envelope>"#
    )
}

fn build_header_body_echo(types_ns: &str, base_ns: &str, fields: &ResponseFields) -> String {
    let header = echo_value(fields, "header", "Mock Header Response");
    let response = echo_value(fields, "response", "Mock Response");

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<S:Envelope xmlns:S="{SOAP_11_NS}">
  <S:Header>
    <ns0:echoHeader xmlns:ns0="{types_ns}" xmlns:ns1="{base_ns}">
      <ns1:header>
        <ns1:record>
          <ns1:value>{}</ns1:value>
        </ns1:record>
      </ns1:header>
    </ns0:echoHeader>
  </S:Header>
  <S:Body>
    <ns0:echoResponse xmlns:ns0="{types_ns}" xmlns:ns1="{base_ns}">
      <ns1:response>
        <ns1:record>
          <ns1:value>{}</ns1:value>
        </ns1:record>
      </ns1:response>
    </ns0:echoResponse>
  </S:Body>
</S:Envelope>"#,
        xml_escape(&header),
        xml_escape(&response)
    )
}

fn echo_value(fields: &ResponseFields, name: &str, default: &str) -> String {
    match fields.get(name) {
        Some(FieldValue::Text(text)) => text.clone(),
        Some(FieldValue::Int(n)) => n.to_string(),
        Some(FieldValue::List(items)) => items.join(" - "),
        None => default.to_string(),
    }
}

fn push_element(out: &mut String, prefix: &str, name: &str, value: &str) {
    out.push_str(&format!(
        "      <{prefix}:{name}>{}</{prefix}:{name}>\n",
        xml_escape(value)
    ));
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ResponseLayout;

    fn wrapped_descriptor() -> ServiceDescriptor {
        ServiceDescriptor {
            name: "calculator",
            wsdl_file: "calculator.wsdl",
            namespace: "http://tempuri.org/",
            operations: &["Add"],
            layout: ResponseLayout::WrappedFields { prefix: "tns" },
            fallback: None,
        }
    }

    #[test]
    fn test_wrapped_fields_response() {
        let fields = ResponseFields::new().field("AddResult", 9);
        let xml = build_response(&wrapped_descriptor(), "Add", &fields);

        assert!(xml.contains(r#"xmlns:tns="http://tempuri.org/""#));
        assert!(xml.contains("<tns:AddResponse>"));
        assert!(xml.contains("<tns:AddResult>9</tns:AddResult>"));
        assert!(xml.contains("</tns:AddResponse>"));
    }

    #[test]
    fn test_list_field_renders_repeated_elements() {
        let fields = ResponseFields::new().field(
            "outputString",
            vec!["x".to_string(), "x - x".to_string()],
        );
        let xml = build_response(&wrapped_descriptor(), "echo", &fields);

        assert_eq!(xml.matches("<tns:outputString>").count(), 2);
        assert!(xml.contains("<tns:outputString>x - x</tns:outputString>"));
    }

    #[test]
    fn test_text_values_escaped() {
        let fields = ResponseFields::new().field("result", "a < b & c");
        let xml = build_response(&wrapped_descriptor(), "process", &fields);

        assert!(xml.contains("a &lt; b &amp; c"));
        assert!(!xml.contains("a < b"));
    }

    #[test]
    fn test_header_body_echo_layout() {
        let descriptor = ServiceDescriptor {
            name: "HeaderExtnAttribService",
            wsdl_file: "HeaderExtnAttribService.wsdl",
            namespace: "http://mock.service.com/",
            operations: &["echoHeaderExtnAttributes"],
            layout: ResponseLayout::HeaderBodyEcho {
                types_ns: "http://mock.service.com/types",
                base_ns: "http://mock.service.com/types/base",
            },
            fallback: None,
        };
        let fields = ResponseFields::new()
            .field("response", "payload value")
            .field("header", "header value");

        let xml = build_response(&descriptor, "echoHeaderExtnAttributes", &fields);
        assert!(xml.contains("<S:Header>"));
        assert!(xml.contains("<ns1:value>header value</ns1:value>"));
        assert!(xml.contains("<ns0:echoResponse"));
        assert!(xml.contains("<ns1:value>payload value</ns1:value>"));
    }

    #[test]
    fn test_header_body_echo_defaults_when_fields_missing() {
        let descriptor = ServiceDescriptor {
            name: "HeaderExtnAttribService",
            wsdl_file: "HeaderExtnAttribService.wsdl",
            namespace: "http://mock.service.com/",
            operations: &["echoHeaderExtnAttributes"],
            layout: ResponseLayout::HeaderBodyEcho {
                types_ns: "http://mock.service.com/types",
                base_ns: "http://mock.service.com/types/base",
            },
            fallback: None,
        };
        let xml = build_response(
            &descriptor,
            "echoHeaderExtnAttributes",
            &ResponseFields::new(),
        );
        assert!(xml.contains("Mock Header Response"));
        assert!(xml.contains("Mock Response"));
    }

    #[test]
    fn test_fault_shape() {
        let xml = build_fault("Division by zero");
        assert!(xml.contains("<soap:Fault>"));
        assert!(xml.contains("<faultcode>Server</faultcode>"));
        assert!(xml.contains("<faultstring>Division by zero</faultstring>"));
    }

    #[test]
    fn test_fault_message_escaped() {
        let xml = build_fault(r#"bad <input> & "quotes""#);
        assert!(xml.contains("bad &lt;input&gt; &amp; &quot;quotes&quot;"));
    }
}
