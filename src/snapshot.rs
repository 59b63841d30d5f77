// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! JSON snapshot format for diagrams.
//!
//! The host serializes its canvas into this shape on every structural
//! change; the DTO structs here are deliberately separate from the model
//! types so the wire format can stay stable while the model moves.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{
    Anchor, CapStyle, Connector, ConnectorEnd, Diagram, Element, ElementId, ElementKind,
    FontStyle, Frame, IdError, ShapeKind,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiagramJson {
    #[serde(default)]
    pub elements: Vec<ElementJson>,
    #[serde(default)]
    pub connectors: Vec<ConnectorJson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementJson {
    pub id: String,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorJson {
    pub from: AnchorJson,
    pub to: AnchorJson,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnchorJson {
    /// Absent for free (position-anchored) endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    #[serde(default)]
    pub arrow: bool,
}

#[derive(Debug)]
pub enum SnapshotError {
    Json { source: serde_json::Error },
    BadId { id: String, reason: IdError },
    UnknownKind { id: String, kind: String },
    UnknownShape { id: String, shape: String },
    UnknownFont { id: String, font: String },
    DuplicateElement { id: String },
    DanglingConnector { index: usize, element: String },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json { source } => write!(f, "invalid snapshot JSON: {source}"),
            Self::BadId { id, reason } => write!(f, "invalid element id '{id}': {reason}"),
            Self::UnknownKind { id, kind } => {
                write!(f, "element '{id}' has unknown kind '{kind}' (expected shape/label/region)")
            }
            Self::UnknownShape { id, shape } => {
                write!(f, "element '{id}' has unknown shape '{shape}'")
            }
            Self::UnknownFont { id, font } => {
                write!(f, "element '{id}' has unknown font '{font}' (expected regular/italic/mixed)")
            }
            Self::DuplicateElement { id } => write!(f, "duplicate element id '{id}'"),
            Self::DanglingConnector { index, element } => {
                write!(f, "connector {index} references unknown element '{element}'")
            }
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json { source } => Some(source),
            _ => None,
        }
    }
}

pub fn diagram_from_json(text: &str) -> Result<Diagram, SnapshotError> {
    let json: DiagramJson =
        serde_json::from_str(text).map_err(|source| SnapshotError::Json { source })?;
    diagram_from_snapshot(&json)
}

pub fn diagram_from_snapshot(json: &DiagramJson) -> Result<Diagram, SnapshotError> {
    let mut diagram = Diagram::new();

    for element in &json.elements {
        let element_id = parse_id(&element.id)?;
        if diagram.element(&element_id).is_some() {
            return Err(SnapshotError::DuplicateElement { id: element.id.clone() });
        }

        let kind = match element.kind.as_str() {
            "shape" => ElementKind::Shape {
                shape: parse_shape(element)?,
                label: element.label.clone().unwrap_or_default(),
            },
            "label" => ElementKind::Label {
                text: element.text.clone().unwrap_or_default(),
                font: parse_font(element)?,
            },
            "region" => ElementKind::Region,
            other => {
                return Err(SnapshotError::UnknownKind {
                    id: element.id.clone(),
                    kind: other.to_owned(),
                });
            }
        };

        diagram.insert_element(Element::new_with(
            element_id,
            kind,
            Frame::new(element.x, element.y, element.width, element.height),
        ));
    }

    for (index, connector) in json.connectors.iter().enumerate() {
        let start = parse_anchor(&connector.from, index, &diagram)?;
        let end = parse_anchor(&connector.to, index, &diagram)?;
        diagram.push_connector(Connector::new(start, end));
    }

    Ok(diagram)
}

pub fn diagram_to_snapshot(diagram: &Diagram) -> DiagramJson {
    let elements = diagram
        .elements()
        .values()
        .map(|element| {
            let (kind, shape, label, text, font) = match element.kind() {
                ElementKind::Shape { shape, label } => (
                    "shape",
                    Some(shape_name(*shape).to_owned()),
                    Some(label.clone()),
                    None,
                    None,
                ),
                ElementKind::Label { text, font } => (
                    "label",
                    None,
                    None,
                    Some(text.clone()),
                    Some(font_name(*font).to_owned()),
                ),
                ElementKind::Region => ("region", None, None, None, None),
            };
            let frame = element.frame();
            ElementJson {
                id: element.element_id().as_str().to_owned(),
                kind: kind.to_owned(),
                shape,
                label,
                text,
                font,
                x: frame.x,
                y: frame.y,
                width: frame.width,
                height: frame.height,
            }
        })
        .collect();

    let connectors = diagram
        .connectors()
        .iter()
        .map(|connector| ConnectorJson {
            from: anchor_json(connector.start()),
            to: anchor_json(connector.end()),
        })
        .collect();

    DiagramJson { elements, connectors }
}

pub fn diagram_to_json(diagram: &Diagram) -> String {
    serde_json::to_string_pretty(&diagram_to_snapshot(diagram))
        .expect("snapshot serialization is infallible")
}

fn parse_id(id: &str) -> Result<ElementId, SnapshotError> {
    ElementId::new(id).map_err(|reason| SnapshotError::BadId { id: id.to_owned(), reason })
}

fn parse_shape(element: &ElementJson) -> Result<ShapeKind, SnapshotError> {
    match element.shape.as_deref() {
        Some("square") => Ok(ShapeKind::Square),
        Some("ellipse") => Ok(ShapeKind::Ellipse),
        Some("database") => Ok(ShapeKind::Database),
        Some("triangle-up") => Ok(ShapeKind::TriangleUp),
        Some("other") | None => Ok(ShapeKind::Other),
        Some(other) => Err(SnapshotError::UnknownShape {
            id: element.id.clone(),
            shape: other.to_owned(),
        }),
    }
}

fn parse_font(element: &ElementJson) -> Result<FontStyle, SnapshotError> {
    match element.font.as_deref() {
        Some("regular") | None => Ok(FontStyle::Regular),
        Some("italic") => Ok(FontStyle::Italic),
        Some("mixed") => Ok(FontStyle::Mixed),
        Some(other) => Err(SnapshotError::UnknownFont {
            id: element.id.clone(),
            font: other.to_owned(),
        }),
    }
}

fn parse_anchor(
    anchor: &AnchorJson,
    index: usize,
    diagram: &Diagram,
) -> Result<ConnectorEnd, SnapshotError> {
    let cap = if anchor.arrow { CapStyle::Arrow } else { CapStyle::Plain };
    let Some(element) = &anchor.element else {
        return Ok(ConnectorEnd::new(Anchor::Free, cap));
    };

    let element_id = parse_id(element)?;
    if diagram.element(&element_id).is_none() {
        return Err(SnapshotError::DanglingConnector { index, element: element.clone() });
    }
    Ok(ConnectorEnd::new(Anchor::Element(element_id), cap))
}

fn anchor_json(end: &ConnectorEnd) -> AnchorJson {
    let element = match end.anchor() {
        Anchor::Element(id) => Some(id.as_str().to_owned()),
        Anchor::Free => None,
    };
    AnchorJson { element, arrow: end.cap() == CapStyle::Arrow }
}

fn shape_name(shape: ShapeKind) -> &'static str {
    match shape {
        ShapeKind::Square => "square",
        ShapeKind::Ellipse => "ellipse",
        ShapeKind::Database => "database",
        ShapeKind::TriangleUp => "triangle-up",
        ShapeKind::Other => "other",
    }
}

fn font_name(font: FontStyle) -> &'static str {
    match font {
        FontStyle::Regular => "regular",
        FontStyle::Italic => "italic",
        FontStyle::Mixed => "mixed",
    }
}
