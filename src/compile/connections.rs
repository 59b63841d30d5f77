// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Edge classification: each connector touching an element denotes a data
//! input, a data output, or a plain sequential successor.
//!
//! The arrow cap sits at the data source end: an edge whose *other* endpoint
//! is arrowed feeds this element, an edge whose *own* endpoint is arrowed
//! feeds the other one. Plain edges run tail-to-head, and an element only
//! sees heads as next-candidates.

use smallvec::SmallVec;

use crate::model::{Anchor, CapStyle, Element, ElementId};

use super::{CompileError, Compiler};

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Connections {
    pub incoming: SmallVec<[ElementId; 4]>,
    pub outgoing: SmallVec<[ElementId; 4]>,
    pub next: SmallVec<[ElementId; 4]>,
}

impl<'a> Compiler<'a> {
    pub(crate) fn connections(&self, element: &Element) -> Result<Connections, CompileError> {
        self.budget_step(element.element_id())?;

        let element_id = element.element_id();
        let mut conns = Connections::default();

        for connector in self.diagram.attached_connectors(element_id) {
            let Anchor::Element(start_id) = connector.start().anchor() else { continue };
            let Anchor::Element(end_id) = connector.end().anchor() else { continue };
            if start_id == end_id {
                continue;
            }

            let (this_cap, other_id, other_cap) = if start_id == element_id {
                (connector.start().cap(), end_id, connector.end().cap())
            } else {
                (connector.end().cap(), start_id, connector.start().cap())
            };

            if other_cap == CapStyle::Arrow {
                conns.incoming.push(other_id.clone());
            } else if this_cap == CapStyle::Arrow {
                conns.outgoing.push(other_id.clone());
            } else if end_id != element_id {
                conns.next.push(end_id.clone());
            }
        }

        // Top-to-bottom reading order is the sole tiebreak for successors.
        conns.next.sort_by(|a, b| {
            let ay = self.element(a).map(|e| e.frame().y).unwrap_or_default();
            let by = self.element(b).map(|e| e.frame().y).unwrap_or_default();
            ay.total_cmp(&by)
        });

        Ok(conns)
    }

    pub(crate) fn budget_step(&self, at: &ElementId) -> Result<(), CompileError> {
        self.budget
            .step()
            .map_err(|_| CompileError::StepCeiling { at: at.clone() })
    }
}
