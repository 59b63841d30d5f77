// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The diagram as the compiler sees it: positioned elements plus connectors.
//!
//! The diagram is read-only during compilation; the host replaces it wholesale
//! whenever the canvas changes structurally.

use std::collections::BTreeMap;

use super::ids::ElementId;

/// Geometric shape of a shape-with-label element.
///
/// Only the first four kinds carry compile-time meaning; everything else is
/// an opaque graphic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Square,
    Ellipse,
    Database,
    TriangleUp,
    Other,
}

/// Font style of a text label, as far as the host can tell.
///
/// `Mixed` means the label uses more than one style and italics cannot be
/// detected; the compiler warns and treats it as regular.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Italic,
    Mixed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Shape { shape: ShapeKind, label: String },
    Label { text: String, font: FontStyle },
    Region,
}

impl ElementKind {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Shape { .. } => "shape",
            Self::Label { .. } => "label",
            Self::Region => "region",
        }
    }
}

/// Position and size of an element on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    element_id: ElementId,
    kind: ElementKind,
    frame: Frame,
}

impl Element {
    pub fn new(element_id: ElementId, kind: ElementKind) -> Self {
        Self { element_id, kind, frame: Frame::default() }
    }

    pub fn new_with(element_id: ElementId, kind: ElementKind, frame: Frame) -> Self {
        Self { element_id, kind, frame }
    }

    pub fn element_id(&self) -> &ElementId {
        &self.element_id
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub fn set_kind(&mut self, kind: ElementKind) {
        self.kind = kind;
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn set_frame(&mut self, frame: Frame) {
        self.frame = frame;
    }
}

/// Marker drawn on one connector endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapStyle {
    Plain,
    Arrow,
}

/// What a connector endpoint is attached to.
///
/// `Free` endpoints float at a canvas position (e.g. lines drawn by a running
/// program); they never participate in edge classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anchor {
    Element(ElementId),
    Free,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorEnd {
    anchor: Anchor,
    cap: CapStyle,
}

impl ConnectorEnd {
    pub fn new(anchor: Anchor, cap: CapStyle) -> Self {
        Self { anchor, cap }
    }

    pub fn anchor(&self) -> &Anchor {
        &self.anchor
    }

    pub fn cap(&self) -> CapStyle {
        self.cap
    }
}

/// A directed link between two endpoints. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    start: ConnectorEnd,
    end: ConnectorEnd,
}

impl Connector {
    pub fn new(start: ConnectorEnd, end: ConnectorEnd) -> Self {
        Self { start, end }
    }

    /// Plain tail-to-head connector between two elements.
    pub fn plain(start: ElementId, end: ElementId) -> Self {
        Self {
            start: ConnectorEnd::new(Anchor::Element(start), CapStyle::Plain),
            end: ConnectorEnd::new(Anchor::Element(end), CapStyle::Plain),
        }
    }

    pub fn start(&self) -> &ConnectorEnd {
        &self.start
    }

    pub fn end(&self) -> &ConnectorEnd {
        &self.end
    }

    pub fn touches(&self, element_id: &ElementId) -> bool {
        let on = |end: &ConnectorEnd| matches!(end.anchor(), Anchor::Element(id) if id == element_id);
        on(&self.start) || on(&self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Diagram {
    elements: BTreeMap<ElementId, Element>,
    connectors: Vec<Connector>,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> &BTreeMap<ElementId, Element> {
        &self.elements
    }

    pub fn element(&self, element_id: &ElementId) -> Option<&Element> {
        self.elements.get(element_id)
    }

    pub fn insert_element(&mut self, element: Element) {
        self.elements.insert(element.element_id().clone(), element);
    }

    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }

    pub fn push_connector(&mut self, connector: Connector) {
        self.connectors.push(connector);
    }

    pub fn attached_connectors<'a>(
        &'a self,
        element_id: &'a ElementId,
    ) -> impl Iterator<Item = &'a Connector> {
        self.connectors.iter().filter(move |connector| connector.touches(element_id))
    }

    /// Region elements in id order; each compiles into one window.
    pub fn regions(&self) -> impl Iterator<Item = &Element> {
        self.elements.values().filter(|element| matches!(element.kind(), ElementKind::Region))
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Anchor, CapStyle, Connector, ConnectorEnd, Diagram, Element, ElementKind, Frame, ShapeKind,
    };
    use crate::model::ElementId;

    fn id(value: &str) -> ElementId {
        ElementId::new(value).expect("element id")
    }

    #[test]
    fn diagram_finds_attached_connectors_from_either_endpoint() {
        let mut diagram = Diagram::new();
        diagram.insert_element(Element::new(
            id("a"),
            ElementKind::Shape { shape: ShapeKind::Square, label: "a".to_owned() },
        ));
        diagram.insert_element(Element::new(
            id("b"),
            ElementKind::Shape { shape: ShapeKind::Ellipse, label: "b".to_owned() },
        ));
        diagram.push_connector(Connector::plain(id("a"), id("b")));
        diagram.push_connector(Connector::new(
            ConnectorEnd::new(Anchor::Free, CapStyle::Plain),
            ConnectorEnd::new(Anchor::Element(id("b")), CapStyle::Arrow),
        ));

        assert_eq!(diagram.attached_connectors(&id("a")).count(), 1);
        assert_eq!(diagram.attached_connectors(&id("b")).count(), 2);
        assert_eq!(diagram.attached_connectors(&id("c")).count(), 0);
    }

    #[test]
    fn regions_lists_only_region_elements() {
        let mut diagram = Diagram::new();
        diagram.insert_element(Element::new_with(
            id("w1"),
            ElementKind::Region,
            Frame::new(0.0, 0.0, 640.0, 480.0),
        ));
        diagram.insert_element(Element::new(
            id("t1"),
            ElementKind::Label { text: "setup".to_owned(), font: super::FontStyle::Regular },
        ));

        let regions: Vec<_> = diagram.regions().map(|e| e.element_id().as_str()).collect();
        assert_eq!(regions, vec!["w1"]);
    }
}
