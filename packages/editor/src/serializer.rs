//! # Diagram Export
//!
//! JSON (lossless, importable) and XML (export only) projections of a
//! document snapshot. Both are pure functions of the snapshot.
//!
//! XML schema:
//!
//! ```text
//! <diagram>
//!   <nodes>
//!     <node id=".." type=".." x=".." y=".." w=".." h="..">
//!       <label>..</label>
//!       <style fill=".." stroke=".." />
//!     </node>
//!   </nodes>
//!   <edges>
//!     <edge id=".." source=".." target=".." type=".." />
//!   </edges>
//! </diagram>
//! ```

use crate::document::GraphDocument;
use crate::errors::SerializeError;
use serde_json::Value;
use std::collections::HashSet;

pub const DEFAULT_JSON_FILE_NAME: &str = "diagram.json";
pub const DEFAULT_XML_FILE_NAME: &str = "diagram.xml";

/// Serialize `{nodes, edges}` as pretty-printed JSON
///
/// JSON has no encoding for NaN or infinity, so a document holding one
/// fails with [`SerializeError::NonFiniteNumber`] instead of exporting a
/// `null` that would not import back.
pub fn to_json(doc: &GraphDocument) -> Result<String, SerializeError> {
    check_finite(doc)?;
    Ok(serde_json::to_string_pretty(doc)?)
}

fn check_finite(doc: &GraphDocument) -> Result<(), SerializeError> {
    for node in doc.nodes() {
        let data = &node.data;
        let fields = [
            ("position.x", Some(node.position.x)),
            ("position.y", Some(node.position.y)),
            ("size.width", node.size.as_ref().map(|s| s.width)),
            ("size.height", node.size.as_ref().map(|s| s.height)),
            ("data.strokeWidth", data.stroke_width),
            ("data.opacity", data.opacity),
            ("data.rotation", data.rotation),
            ("data.fontSize", data.font_size),
        ];
        for (field, value) in fields {
            if let Some(value) = value.filter(|v| !v.is_finite()) {
                return Err(SerializeError::NonFiniteNumber(format!(
                    "node `{}` {} is {}",
                    node.id, field, value
                )));
            }
        }
    }

    for edge in doc.edges() {
        if !edge.style.stroke_width.is_finite() {
            return Err(SerializeError::NonFiniteNumber(format!(
                "edge `{}` style.strokeWidth is {}",
                edge.id, edge.style.stroke_width
            )));
        }
    }

    Ok(())
}

/// Parse a document produced by [`to_json`]
///
/// Fails with [`SerializeError::MalformedDocument`] instead of returning a
/// partially populated document: required fields are never guessed.
pub fn from_json(source: &str) -> Result<GraphDocument, SerializeError> {
    let value: Value = serde_json::from_str(source)
        .map_err(|e| SerializeError::MalformedDocument(format!("invalid JSON: {}", e)))?;

    let Value::Object(fields) = &value else {
        return Err(SerializeError::MalformedDocument(
            "top level must be an object".to_string(),
        ));
    };

    for key in ["nodes", "edges"] {
        match fields.get(key) {
            Some(Value::Array(_)) => {}
            Some(_) => {
                return Err(SerializeError::MalformedDocument(format!(
                    "`{}` must be a sequence",
                    key
                )))
            }
            None => {
                return Err(SerializeError::MalformedDocument(format!(
                    "missing `{}`",
                    key
                )))
            }
        }
    }

    let doc: GraphDocument = serde_json::from_value(value)
        .map_err(|e| SerializeError::MalformedDocument(e.to_string()))?;

    validate(&doc)?;
    Ok(doc)
}

fn validate(doc: &GraphDocument) -> Result<(), SerializeError> {
    let mut node_ids = HashSet::new();
    for node in doc.nodes() {
        if !node_ids.insert(node.id.as_str()) {
            return Err(SerializeError::MalformedDocument(format!(
                "duplicate node id `{}`",
                node.id
            )));
        }
        if let Some(opacity) = node.data.opacity {
            if !(0.0..=1.0).contains(&opacity) {
                return Err(SerializeError::MalformedDocument(format!(
                    "node `{}` has opacity {} outside 0..1",
                    node.id, opacity
                )));
            }
        }
    }

    let mut edge_ids = HashSet::new();
    for edge in doc.edges() {
        if !edge_ids.insert(edge.id.as_str()) {
            return Err(SerializeError::MalformedDocument(format!(
                "duplicate edge id `{}`",
                edge.id
            )));
        }
    }

    Ok(())
}

/// Render the fixed XML export schema
pub fn to_xml(doc: &GraphDocument) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<diagram>\n");

    xml.push_str("  <nodes>\n");
    for node in doc.nodes() {
        let size = node.dimensions();
        xml.push_str(&format!(
            "    <node id=\"{}\" type=\"{}\" x=\"{}\" y=\"{}\" w=\"{}\" h=\"{}\">\n",
            escape_xml(&node.id),
            escape_xml(&node.node_type),
            node.position.x,
            node.position.y,
            size.width,
            size.height
        ));
        xml.push_str(&format!("      <label>{}</label>\n", escape_xml(&node.data.label)));
        xml.push_str(&format!(
            "      <style fill=\"{}\" stroke=\"{}\" />\n",
            escape_xml(node.data.fill_or_default()),
            escape_xml(node.data.stroke_or_default())
        ));
        xml.push_str("    </node>\n");
    }
    xml.push_str("  </nodes>\n");

    xml.push_str("  <edges>\n");
    for edge in doc.edges() {
        xml.push_str(&format!(
            "    <edge id=\"{}\" source=\"{}\" target=\"{}\" type=\"{}\" />\n",
            escape_xml(&edge.id),
            escape_xml(&edge.source),
            escape_xml(&edge.target),
            escape_xml(&edge.edge_type)
        ));
    }
    xml.push_str("  </edges>\n");

    xml.push_str("</diagram>");
    xml
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
