// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Synthetic boards for the benches.

use galatea::model::{
    Anchor, CapStyle, Connector, ConnectorEnd, Diagram, Element, ElementId, ElementKind,
    FontStyle, Frame, ShapeKind,
};

pub fn eid(value: &str) -> ElementId {
    ElementId::new(value).expect("element id")
}

fn label(diagram: &mut Diagram, id: &str, text: &str, y: f64) {
    diagram.insert_element(Element::new_with(
        eid(id),
        ElementKind::Label { text: text.to_owned(), font: FontStyle::Regular },
        Frame::new(0.0, y, 100.0, 20.0),
    ));
}

fn square(diagram: &mut Diagram, id: &str, label: &str, y: f64) {
    diagram.insert_element(Element::new_with(
        eid(id),
        ElementKind::Shape { shape: ShapeKind::Square, label: label.to_owned() },
        Frame::new(0.0, y, 100.0, 50.0),
    ));
}

fn arrow(diagram: &mut Diagram, source: &str, target: &str) {
    diagram.push_connector(Connector::new(
        ConnectorEnd::new(Anchor::Element(eid(source)), CapStyle::Arrow),
        ConnectorEnd::new(Anchor::Element(eid(target)), CapStyle::Plain),
    ));
}

fn seq(diagram: &mut Diagram, tail: &str, head: &str) {
    diagram.push_connector(Connector::plain(eid(tail), eid(head)));
}

/// One window whose setup seeds a counter and whose loop chain bumps it
/// through `chain_len` instructions per tick.
pub fn counter_board(chain_len: usize) -> Diagram {
    let mut diagram = Diagram::new();
    diagram.insert_element(Element::new_with(
        eid("w1"),
        ElementKind::Region,
        Frame::new(0.0, 0.0, 640.0, 480.0),
    ));

    label(&mut diagram, "setup", "setup", 0.0);
    arrow(&mut diagram, "w1", "setup");
    label(&mut diagram, "seed", "0", 10.0);
    square(&mut diagram, "score", "score", 20.0);
    seq(&mut diagram, "setup", "seed");
    arrow(&mut diagram, "seed", "score");

    label(&mut diagram, "loopflow", "loop", 30.0);
    arrow(&mut diagram, "w1", "loopflow");

    let mut tail = "loopflow".to_owned();
    for index in 0..chain_len {
        let id = format!("bump{index}");
        label(&mut diagram, &id, "+ 1", 40.0 + index as f64 * 10.0);
        arrow(&mut diagram, "score", &id);
        arrow(&mut diagram, &id, "score");
        seq(&mut diagram, &tail, &id);
        tail = id;
    }

    diagram
}
