//! # Shape Catalogue
//!
//! Closed set of shape kinds a diagram node can take. Each kind resolves to
//! an [`Outline`] in a 100x100 view box by exhaustive match, so adding a
//! kind is a compile error until its geometry is decided.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Side length of the view box every outline is expressed in
pub const VIEW_BOX: f64 = 100.0;

/// Shape variant of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Circle,
    Oval,
    Diamond,
    Triangle,
    Hexagon,
    Cylinder,
    Actor,
    Database,
    Process,
    Terminal,
    Input,
    Network,
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Unknown shape kind: {0}")]
pub struct UnknownShapeKind(pub String);

/// Geometry of a shape inside the view box
#[derive(Debug, Clone, PartialEq)]
pub enum Outline {
    RoundedRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
    },
    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
    },
    Polygon {
        points: &'static [(f64, f64)],
    },
    /// Vertical cylinder; `cap_height` is the half-height of the top ellipse
    Cylinder {
        cap_height: f64,
    },
}

const DIAMOND: &[(f64, f64)] = &[(50.0, 0.0), (100.0, 50.0), (50.0, 100.0), (0.0, 50.0)];
const TRIANGLE: &[(f64, f64)] = &[(50.0, 0.0), (100.0, 100.0), (0.0, 100.0)];
const HEXAGON: &[(f64, f64)] = &[
    (25.0, 0.0),
    (75.0, 0.0),
    (100.0, 50.0),
    (75.0, 100.0),
    (25.0, 100.0),
    (0.0, 50.0),
];
const PARALLELOGRAM: &[(f64, f64)] = &[(20.0, 0.0), (100.0, 0.0), (80.0, 100.0), (0.0, 100.0)];

impl ShapeKind {
    pub const ALL: [ShapeKind; 13] = [
        ShapeKind::Rectangle,
        ShapeKind::Circle,
        ShapeKind::Oval,
        ShapeKind::Diamond,
        ShapeKind::Triangle,
        ShapeKind::Hexagon,
        ShapeKind::Cylinder,
        ShapeKind::Actor,
        ShapeKind::Database,
        ShapeKind::Process,
        ShapeKind::Terminal,
        ShapeKind::Input,
        ShapeKind::Network,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
            ShapeKind::Oval => "oval",
            ShapeKind::Diamond => "diamond",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Hexagon => "hexagon",
            ShapeKind::Cylinder => "cylinder",
            ShapeKind::Actor => "actor",
            ShapeKind::Database => "database",
            ShapeKind::Process => "process",
            ShapeKind::Terminal => "terminal",
            ShapeKind::Input => "input",
            ShapeKind::Network => "network",
        }
    }

    /// Outline used to draw this shape
    pub fn outline(&self) -> Outline {
        match self {
            ShapeKind::Circle => Outline::Ellipse {
                cx: 50.0,
                cy: 50.0,
                rx: 48.0,
                ry: 48.0,
            },
            ShapeKind::Oval => Outline::Ellipse {
                cx: 50.0,
                cy: 50.0,
                rx: 48.0,
                ry: 32.0,
            },
            ShapeKind::Diamond => Outline::Polygon { points: DIAMOND },
            ShapeKind::Triangle => Outline::Polygon { points: TRIANGLE },
            ShapeKind::Hexagon => Outline::Polygon { points: HEXAGON },
            ShapeKind::Input => Outline::Polygon {
                points: PARALLELOGRAM,
            },
            ShapeKind::Database | ShapeKind::Cylinder => Outline::Cylinder { cap_height: 15.0 },
            ShapeKind::Terminal => Outline::RoundedRect {
                x: 1.0,
                y: 1.0,
                width: 98.0,
                height: 98.0,
                radius: 49.0,
            },
            // No dedicated geometry yet: drawn as the default box
            ShapeKind::Rectangle | ShapeKind::Process | ShapeKind::Actor | ShapeKind::Network => {
                Outline::RoundedRect {
                    x: 1.0,
                    y: 1.0,
                    width: 98.0,
                    height: 98.0,
                    radius: 4.0,
                }
            }
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = UnknownShapeKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownShapeKind(s.to_string()))
    }
}

impl Outline {
    /// Short description, e.g. `polygon(4)`
    pub fn describe(&self) -> String {
        match self {
            Outline::RoundedRect { radius, .. } if *radius > 0.0 => "rounded rect".to_string(),
            Outline::RoundedRect { .. } => "rect".to_string(),
            Outline::Ellipse { rx, ry, .. } if rx == ry => "circle".to_string(),
            Outline::Ellipse { .. } => "ellipse".to_string(),
            Outline::Polygon { points } => format!("polygon({})", points.len()),
            Outline::Cylinder { .. } => "cylinder".to_string(),
        }
    }
}
