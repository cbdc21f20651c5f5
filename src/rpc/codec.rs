//! `methodCall` encoding and `methodResponse` decoding on top of `quick-xml`.

use std::collections::BTreeMap;

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::RpcError;
use super::value::Value;

/// Serialize a method call into an XML-RPC request body.
pub fn encode_call(method: &str, params: &[Value]) -> Result<Vec<u8>, RpcError> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", None, None)))?;
    open(&mut writer, "methodCall")?;
    text_element(&mut writer, "methodName", method)?;
    open(&mut writer, "params")?;
    for param in params {
        open(&mut writer, "param")?;
        write_value(&mut writer, param)?;
        close(&mut writer, "param")?;
    }
    close(&mut writer, "params")?;
    close(&mut writer, "methodCall")?;
    Ok(writer.into_inner())
}

fn open(writer: &mut Writer<Vec<u8>>, tag: &str) -> Result<(), RpcError> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    Ok(())
}

fn close(writer: &mut Writer<Vec<u8>>, tag: &str) -> Result<(), RpcError> {
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn text_element(writer: &mut Writer<Vec<u8>>, tag: &str, text: &str) -> Result<(), RpcError> {
    open(writer, tag)?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    close(writer, tag)
}

fn write_value(writer: &mut Writer<Vec<u8>>, value: &Value) -> Result<(), RpcError> {
    open(writer, "value")?;
    match value {
        Value::Int(v) => {
            let tag = if i32::try_from(*v).is_ok() { "int" } else { "i8" };
            text_element(writer, tag, &v.to_string())?;
        }
        Value::Boolean(b) => text_element(writer, "boolean", if *b { "1" } else { "0" })?,
        Value::String(s) => text_element(writer, "string", s)?,
        Value::Double(d) => text_element(writer, "double", &d.to_string())?,
        Value::DateTime(s) => text_element(writer, "dateTime.iso8601", s)?,
        Value::Base64(s) => text_element(writer, "base64", s)?,
        Value::Struct(members) => {
            open(writer, "struct")?;
            for (name, member) in members {
                open(writer, "member")?;
                text_element(writer, "name", name)?;
                write_value(writer, member)?;
                close(writer, "member")?;
            }
            close(writer, "struct")?;
        }
        Value::Array(items) => {
            open(writer, "array")?;
            open(writer, "data")?;
            for item in items {
                write_value(writer, item)?;
            }
            close(writer, "data")?;
            close(writer, "array")?;
        }
        Value::Nil => {
            writer.write_event(Event::Empty(BytesStart::new("nil")))?;
        }
    }
    close(writer, "value")
}

/// Parse an XML-RPC response body.
///
/// A `<fault>` response is returned as [`RpcError::Fault`]; a `<params>` response yields its
/// single value, or [`Value::Nil`] when the server sends no parameter.
pub fn decode_response(body: &str) -> Result<Value, RpcError> {
    let root = parse_tree(body)?;
    if root.name != "methodResponse" {
        return Err(RpcError::Malformed(format!(
            "expected <methodResponse>, found <{}>",
            root.name
        )));
    }

    if let Some(fault) = root.child("fault") {
        let value = decode_value(fault.required_child("value")?)?;
        return Err(fault_from_value(&value)?);
    }

    let params = root.required_child("params")?;
    match params.child("param") {
        Some(param) => decode_value(param.required_child("value")?),
        None => Ok(Value::Nil),
    }
}

fn fault_from_value(value: &Value) -> Result<RpcError, RpcError> {
    let members = value
        .as_struct()
        .ok_or_else(|| RpcError::Malformed(format!("fault is a {}", value.type_name())))?;
    let code = members
        .get("faultCode")
        .and_then(Value::as_i64)
        .ok_or_else(|| RpcError::Malformed("fault without integer faultCode".to_string()))?;
    let message = members
        .get("faultString")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    Ok(RpcError::Fault { code, message })
}

fn decode_value(el: &Element) -> Result<Value, RpcError> {
    let Some(typed) = el.children.first() else {
        // untyped <value>text</value> is a string
        return Ok(Value::String(el.text.clone()));
    };

    let text = typed.text.as_str();
    let value = match typed.name.as_str() {
        "int" | "i4" | "i8" => Value::Int(
            text.trim()
                .parse()
                .map_err(|_| RpcError::Malformed(format!("bad integer `{text}`")))?,
        ),
        "boolean" => match text.trim() {
            "1" | "true" => Value::Boolean(true),
            "0" | "false" => Value::Boolean(false),
            other => return Err(RpcError::Malformed(format!("bad boolean `{other}`"))),
        },
        "string" => Value::String(text.to_string()),
        "double" => Value::Double(
            text.trim()
                .parse()
                .map_err(|_| RpcError::Malformed(format!("bad double `{text}`")))?,
        ),
        "dateTime.iso8601" => Value::DateTime(text.trim().to_string()),
        "base64" => Value::Base64(text.trim().to_string()),
        "nil" => Value::Nil,
        "struct" => {
            let mut members = BTreeMap::new();
            for member in typed.children.iter().filter(|c| c.name == "member") {
                let name = member.required_child("name")?.text.clone();
                let value = decode_value(member.required_child("value")?)?;
                members.insert(name, value);
            }
            Value::Struct(members)
        }
        "array" => {
            let items = match typed.child("data") {
                Some(data) => data
                    .children
                    .iter()
                    .filter(|c| c.name == "value")
                    .map(decode_value)
                    .collect::<Result<Vec<_>, _>>()?,
                None => Vec::new(),
            };
            Value::Array(items)
        }
        other => return Err(RpcError::Malformed(format!("unsupported type <{other}>"))),
    };
    Ok(value)
}

/// Minimal element tree; XML-RPC documents are small and fully nested.
#[derive(Debug, Default)]
struct Element {
    name: String,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn new(name: String) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    fn required_child(&self, name: &str) -> Result<&Element, RpcError> {
        self.child(name).ok_or_else(|| {
            RpcError::Malformed(format!("<{}> has no <{}> element", self.name, name))
        })
    }
}

fn parse_tree(body: &str) -> Result<Element, RpcError> {
    let mut reader = Reader::from_str(body);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                stack.push(Element::new(name));
            }
            Event::Empty(ref e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                attach(&mut stack, &mut root, Element::new(name))?;
            }
            Event::End(_) => {
                let el = stack
                    .pop()
                    .ok_or_else(|| RpcError::Malformed("unbalanced end tag".to_string()))?;
                attach(&mut stack, &mut root, el)?;
            }
            Event::Text(e) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(RpcError::Malformed(format!("unclosed <{}>", open.name)));
    }
    root.ok_or_else(|| RpcError::Malformed("empty response body".to_string()))
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    el: Element,
) -> Result<(), RpcError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(el),
        None if root.is_none() => *root = Some(el),
        None => return Err(RpcError::Malformed("multiple root elements".to_string())),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_str(method: &str, params: &[Value]) -> String {
        String::from_utf8(encode_call(method, params).unwrap()).unwrap()
    }

    #[test]
    fn encodes_login_call() {
        let xml = encode_str("auth.login", &[Value::from("admin"), Value::from("s3cret")]);
        assert_eq!(
            xml,
            "<?xml version=\"1.0\"?><methodCall><methodName>auth.login</methodName><params>\
             <param><value><string>admin</string></value></param>\
             <param><value><string>s3cret</string></value></param>\
             </params></methodCall>"
        );
    }

    #[test]
    fn encodes_int_and_escapes_strings() {
        let xml = encode_str("system.deleteSystem", &[Value::from("a<b&c"), Value::from(101)]);
        assert!(xml.contains("<string>a&lt;b&amp;c</string>"));
        assert!(xml.contains("<value><int>101</int></value>"));
    }

    #[test]
    fn encodes_large_int_as_i8_and_nil_as_empty() {
        let xml = encode_str("x", &[Value::Int(1 << 40), Value::Nil]);
        assert!(xml.contains("<i8>1099511627776</i8>"));
        assert!(xml.contains("<value><nil/></value>"));
    }

    #[test]
    fn decodes_string_token() {
        let body = r#"<?xml version="1.0" encoding="UTF-8"?>
<methodResponse>
  <params>
    <param>
      <value><string>5x2f0c3d8e9a</string></value>
    </param>
  </params>
</methodResponse>"#;
        assert_eq!(decode_response(body).unwrap(), Value::from("5x2f0c3d8e9a"));
    }

    #[test]
    fn decodes_untyped_value_as_string() {
        let body = "<methodResponse><params><param><value> tok </value></param></params></methodResponse>";
        assert_eq!(decode_response(body).unwrap(), Value::from(" tok "));
    }

    #[test]
    fn decodes_scalar_types() {
        let cases = [
            ("<i4>1</i4>", Value::Int(1)),
            ("<int>-7</int>", Value::Int(-7)),
            ("<i8>4294967296</i8>", Value::Int(4_294_967_296)),
            ("<boolean>0</boolean>", Value::Boolean(false)),
            ("<double>2.5</double>", Value::Double(2.5)),
            ("<nil/>", Value::Nil),
            ("<string/>", Value::from("")),
        ];
        for (inner, expected) in cases {
            let body = format!(
                "<methodResponse><params><param><value>{inner}</value></param></params></methodResponse>"
            );
            assert_eq!(decode_response(&body).unwrap(), expected, "{inner}");
        }
    }

    #[test]
    fn decodes_struct_and_array() {
        let body = "<methodResponse><params><param><value><struct>\
            <member><name>id</name><value><int>101</int></value></member>\
            <member><name>tags</name><value><array><data>\
              <value>web</value><value><string>db</string></value>\
            </data></array></value></member>\
            </struct></value></param></params></methodResponse>";
        let value = decode_response(body).unwrap();
        let members = value.as_struct().unwrap();
        assert_eq!(members["id"], Value::Int(101));
        assert_eq!(
            members["tags"],
            Value::Array(vec![Value::from("web"), Value::from("db")])
        );
    }

    #[test]
    fn decodes_fault_into_error() {
        let body = r#"<?xml version="1.0"?>
<methodResponse><fault><value><struct>
  <member><name>faultCode</name><value><int>2950</int></value></member>
  <member><name>faultString</name><value><string>Either the password or username is incorrect.</string></value></member>
</struct></value></fault></methodResponse>"#;
        match decode_response(body) {
            Err(RpcError::Fault { code, message }) => {
                assert_eq!(code, 2950);
                assert_eq!(message, "Either the password or username is incorrect.");
            }
            other => panic!("expected fault, got {other:?}"),
        }
    }

    #[test]
    fn empty_params_is_nil() {
        let body = "<methodResponse><params/></methodResponse>";
        assert_eq!(decode_response(body).unwrap(), Value::Nil);
    }

    #[test]
    fn rejects_non_response_documents() {
        assert!(matches!(
            decode_response("<html><body>502</body></html>"),
            Err(RpcError::Malformed(_))
        ));
        assert!(matches!(decode_response(""), Err(RpcError::Malformed(_))));
        assert!(decode_response("<methodResponse><params>").is_err());
    }

    #[test]
    fn rejects_bad_scalar() {
        let body = "<methodResponse><params><param><value><int>one</int></value></param></params></methodResponse>";
        assert!(matches!(decode_response(body), Err(RpcError::Malformed(_))));
    }
}
