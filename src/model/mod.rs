// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Data model: the diagram the compiler reads and the program tree it emits.

pub mod diagram;
pub mod ids;
pub mod program;

#[cfg(test)]
pub(crate) mod fixtures;

pub use diagram::{
    Anchor, CapStyle, Connector, ConnectorEnd, Diagram, Element, ElementKind, FontStyle, Frame,
    ShapeKind,
};
pub use ids::{ElementId, IdError};
pub use program::{
    DataAst, FlowAst, InfixOp, InstructionAst, MatchArms, OpAst, PropertyParent, WindowAst,
};
