//! # Diagram Data Model
//!
//! Nodes, edges and the payloads the action surface accepts.
//!
//! Field names serialize in camelCase so exported JSON matches what the
//! canvas layer produces. Optional styling fields are omitted when unset.

use crate::shape::ShapeKind;
use serde::{Deserialize, Serialize};

pub type NodeId = String;
pub type EdgeId = String;
pub type HandleId = String;

/// Renderer key every node created by the editor carries
pub const DEFAULT_NODE_TYPE: &str = "shape";

/// Renderer key every edge created by the editor carries
pub const DEFAULT_EDGE_TYPE: &str = "default";

pub const DEFAULT_NODE_WIDTH: f64 = 100.0;
pub const DEFAULT_NODE_HEIGHT: f64 = 100.0;

pub const DEFAULT_FILL: &str = "#ffffff";
pub const DEFAULT_STROKE: &str = "#000000";

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            width: DEFAULT_NODE_WIDTH,
            height: DEFAULT_NODE_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Label and style of a node
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    pub label: String,

    #[serde(rename = "shapeVariant", alias = "type", default)]
    pub shape: ShapeKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_dasharray: Option<String>,

    /// Always within `0.0..=1.0` when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
}

impl NodeData {
    pub fn new(label: impl Into<String>, shape: ShapeKind) -> Self {
        Self {
            label: label.into(),
            shape,
            ..Default::default()
        }
    }

    /// Style a freshly dropped shape starts with
    pub fn with_default_style(mut self) -> Self {
        self.fill = Some(DEFAULT_FILL.to_string());
        self.stroke = Some(DEFAULT_STROKE.to_string());
        self.stroke_width = Some(2.0);
        self.opacity = Some(1.0);
        self
    }

    pub fn fill_or_default(&self) -> &str {
        self.fill.as_deref().unwrap_or(DEFAULT_FILL)
    }

    pub fn stroke_or_default(&self) -> &str {
        self.stroke.as_deref().unwrap_or(DEFAULT_STROKE)
    }

    pub fn opacity_or_default(&self) -> f64 {
        self.opacity.unwrap_or(1.0)
    }

    pub fn text_align_or_default(&self) -> TextAlign {
        self.text_align.unwrap_or_default()
    }
}

/// Partial update of [`NodeData`]; only the fields that are `Some` change
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeDataPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "shapeVariant", alias = "type", skip_serializing_if = "Option::is_none")]
    pub shape: Option<ShapeKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_dasharray: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
}

impl NodeDataPatch {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Default::default()
        }
    }

    pub fn fill(fill: impl Into<String>) -> Self {
        Self {
            fill: Some(fill.into()),
            ..Default::default()
        }
    }

    pub fn stroke(stroke: impl Into<String>) -> Self {
        Self {
            stroke: Some(stroke.into()),
            ..Default::default()
        }
    }

    pub fn opacity(opacity: f64) -> Self {
        Self {
            opacity: Some(opacity),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Shallow merge onto `data`, returning the merged copy
    pub fn merge_into(&self, data: &NodeData) -> NodeData {
        let mut merged = data.clone();

        if let Some(label) = &self.label {
            merged.label = label.clone();
        }
        if let Some(shape) = self.shape {
            merged.shape = shape;
        }
        if let Some(fill) = &self.fill {
            merged.fill = Some(fill.clone());
        }
        if let Some(stroke) = &self.stroke {
            merged.stroke = Some(stroke.clone());
        }
        if let Some(width) = self.stroke_width {
            merged.stroke_width = Some(width);
        }
        if let Some(dasharray) = &self.stroke_dasharray {
            merged.stroke_dasharray = Some(dasharray.clone());
        }
        if let Some(opacity) = self.opacity {
            // NaN clamps to NaN; treat it as fully opaque instead
            merged.opacity = Some(if opacity.is_nan() { 1.0 } else { opacity.clamp(0.0, 1.0) });
        }
        if let Some(rotation) = self.rotation {
            merged.rotation = Some(rotation);
        }
        if let Some(family) = &self.font_family {
            merged.font_family = Some(family.clone());
        }
        if let Some(size) = self.font_size {
            merged.font_size = Some(size);
        }
        if let Some(weight) = &self.font_weight {
            merged.font_weight = Some(weight.clone());
        }
        if let Some(style) = &self.font_style {
            merged.font_style = Some(style.clone());
        }
        if let Some(decoration) = &self.text_decoration {
            merged.text_decoration = Some(decoration.clone());
        }
        if let Some(align) = self.text_align {
            merged.text_align = Some(align);
        }

        merged
    }
}

/// Positioned graph vertex
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,

    /// Renderer key (`"shape"` for every node the editor creates)
    #[serde(rename = "type")]
    pub node_type: String,

    pub position: Position,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Dimensions>,

    pub data: NodeData,

    #[serde(default)]
    pub selected: bool,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, position: Position, data: NodeData) -> Self {
        Self {
            id: id.into(),
            node_type: DEFAULT_NODE_TYPE.to_string(),
            position,
            size: None,
            data,
            selected: false,
        }
    }

    pub fn with_size(mut self, size: Dimensions) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Explicit size, or 100x100 when the node carries none
    pub fn dimensions(&self) -> Dimensions {
        self.size.unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStyle {
    pub stroke_width: f64,
    pub stroke: String,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self {
            stroke_width: 2.0,
            stroke: DEFAULT_STROKE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerType {
    #[serde(rename = "arrow")]
    Arrow,
    #[serde(rename = "arrowclosed")]
    ArrowClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeMarker {
    #[serde(rename = "type")]
    pub marker_type: MarkerType,
}

/// Directed connection between two nodes
///
/// `source` and `target` are not required to name existing nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<HandleId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<HandleId>,

    #[serde(rename = "type", default = "default_edge_type")]
    pub edge_type: String,

    #[serde(default)]
    pub style: EdgeStyle,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker_end: Option<EdgeMarker>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub selected: bool,
}

fn default_edge_type() -> String {
    DEFAULT_EDGE_TYPE.to_string()
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Edge {
    /// Edge with the editor's default type, style and closed arrow head
    pub fn new(id: impl Into<EdgeId>, source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
            edge_type: default_edge_type(),
            style: EdgeStyle::default(),
            marker_end: Some(EdgeMarker {
                marker_type: MarkerType::ArrowClosed,
            }),
            selected: false,
        }
    }

    pub fn with_handles(mut self, source: Option<HandleId>, target: Option<HandleId>) -> Self {
        self.source_handle = source;
        self.target_handle = target;
        self
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }

    /// Same endpoints and handles as `connection`
    pub fn matches(&self, connection: &Connection) -> bool {
        Some(self.source.as_str()) == connection.source.as_deref()
            && Some(self.target.as_str()) == connection.target.as_deref()
            && self.source_handle == connection.source_handle
            && self.target_handle == connection.target_handle
    }
}

/// Connection request emitted when the user drags between two handles
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Connection {
    pub source: Option<NodeId>,
    pub target: Option<NodeId>,
    pub source_handle: Option<HandleId>,
    pub target_handle: Option<HandleId>,
}

impl Connection {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: Some(source.into()),
            target: Some(target.into()),
            source_handle: None,
            target_handle: None,
        }
    }

    pub fn with_handles(mut self, source: impl Into<HandleId>, target: impl Into<HandleId>) -> Self {
        self.source_handle = Some(source.into());
        self.target_handle = Some(target.into());
        self
    }

    /// Both endpoints, or `None` if either is missing or empty
    pub fn endpoints(&self) -> Option<(&str, &str)> {
        let source = self.source.as_deref().filter(|s| !s.is_empty())?;
        let target = self.target.as_deref().filter(|t| !t.is_empty())?;
        Some((source, target))
    }
}
