// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Shared test helpers for building diagrams by hand.
//!
//! Edge conventions: the arrow cap sits at the data *source* end, so an
//! element whose opposite endpoint is arrowed reads that edge as an incoming
//! input, and an element whose own endpoint is arrowed writes along it.

use super::diagram::{
    Anchor, CapStyle, Connector, ConnectorEnd, Diagram, Element, ElementKind, FontStyle, Frame,
    ShapeKind,
};
use super::ids::ElementId;

pub(crate) fn eid(value: &str) -> ElementId {
    ElementId::new(value).expect("element id")
}

pub(crate) fn shape(diagram: &mut Diagram, id: &str, kind: ShapeKind, label: &str, y: f64) {
    diagram.insert_element(Element::new_with(
        eid(id),
        ElementKind::Shape { shape: kind, label: label.to_owned() },
        Frame::new(0.0, y, 100.0, 50.0),
    ));
}

pub(crate) fn label(diagram: &mut Diagram, id: &str, text: &str, y: f64) {
    label_with_font(diagram, id, text, FontStyle::Regular, y);
}

pub(crate) fn italic(diagram: &mut Diagram, id: &str, text: &str, y: f64) {
    label_with_font(diagram, id, text, FontStyle::Italic, y);
}

pub(crate) fn label_with_font(
    diagram: &mut Diagram,
    id: &str,
    text: &str,
    font: FontStyle,
    y: f64,
) {
    diagram.insert_element(Element::new_with(
        eid(id),
        ElementKind::Label { text: text.to_owned(), font },
        Frame::new(0.0, y, 100.0, 20.0),
    ));
}

pub(crate) fn region(diagram: &mut Diagram, id: &str) {
    diagram.insert_element(Element::new_with(
        eid(id),
        ElementKind::Region,
        Frame::new(0.0, 0.0, 640.0, 480.0),
    ));
}

/// `target` reads data from `source`: the cap at the source end is arrowed.
pub(crate) fn input_edge(diagram: &mut Diagram, source: &str, target: &str) {
    diagram.push_connector(Connector::new(
        ConnectorEnd::new(Anchor::Element(eid(source)), CapStyle::Arrow),
        ConnectorEnd::new(Anchor::Element(eid(target)), CapStyle::Plain),
    ));
}

/// Plain sequential edge: `head` becomes a next-candidate of `tail`.
pub(crate) fn seq_edge(diagram: &mut Diagram, tail: &str, head: &str) {
    diagram.push_connector(Connector::plain(eid(tail), eid(head)));
}
