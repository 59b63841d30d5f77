// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Graph compiler: one window region's diagram subgraph into a `WindowAst`.
//!
//! Compilation is total and best-effort: malformed pieces of the diagram
//! produce warnings and compile to nothing. The only fatal condition is the
//! step ceiling, which guards against cyclic diagrams the classification
//! step cannot otherwise detect.

mod connections;
mod data;
mod instruction;


use std::fmt;
use std::sync::Arc;

use crate::budget::StepBudget;
use crate::model::{
    Diagram, Element, ElementId, ElementKind, FlowAst, ShapeKind, WindowAst,
};
use crate::report::{Annotations, Severity};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    StepCeiling { at: ElementId },
}

impl CompileError {
    pub fn at(&self) -> &ElementId {
        match self {
            Self::StepCeiling { at } => at,
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StepCeiling { at } => {
                write!(f, "compilation step ceiling exceeded at element {at} (cyclic diagram?)")
            }
        }
    }
}

impl std::error::Error for CompileError {}

/// One compile pass over one diagram.
pub struct Compiler<'a> {
    diagram: &'a Diagram,
    annotations: &'a dyn Annotations,
    budget: &'a StepBudget,
}

/// Compile every window region on the diagram.
///
/// Prior warning markers are cleared first; the pass re-emits whatever still
/// applies.
pub fn compile_page(
    diagram: &Diagram,
    annotations: &dyn Annotations,
    budget: &StepBudget,
) -> Result<Vec<WindowAst>, CompileError> {
    annotations.clear_all(Severity::Warning);

    let compiler = Compiler { diagram, annotations, budget };

    let mut windows = Vec::new();
    for region in diagram.regions() {
        windows.push(compiler.compile_window(region)?);
    }
    Ok(windows)
}

impl<'a> Compiler<'a> {
    pub fn new(
        diagram: &'a Diagram,
        annotations: &'a dyn Annotations,
        budget: &'a StepBudget,
    ) -> Self {
        Self { diagram, annotations, budget }
    }

    pub(crate) fn warn(&self, message: &str, at: &ElementId) {
        self.annotations.annotate(Severity::Warning, message, at);
    }

    pub(crate) fn element(&self, element_id: &ElementId) -> Option<&'a Element> {
        self.diagram.element(element_id)
    }

    /// Resolve a connector endpoint, warning once when it dangles.
    pub(crate) fn resolve(&self, element_id: &ElementId) -> Option<&'a Element> {
        let element = self.element(element_id);
        if element.is_none() {
            self.warn("connector endpoint does not resolve to an element.", element_id);
        }
        element
    }

    pub fn compile_window(&self, region: &Element) -> Result<WindowAst, CompileError> {
        let conns = self.connections(region)?;

        let mut setup: Option<Arc<FlowAst>> = None;
        let mut looped: Option<Arc<FlowAst>> = None;

        for element_id in &conns.outgoing {
            let Some(element) = self.resolve(element_id) else { continue };
            let ElementKind::Label { text, .. } = element.kind() else {
                self.warn(
                    &format!("unknown {} element as child of window.", element.kind().describe()),
                    element_id,
                );
                continue;
            };

            match text.as_str() {
                "setup" => {
                    if setup.is_some() {
                        self.warn("duplicate setup flow! ignoring.", element_id);
                        continue;
                    }
                    setup = Some(Arc::new(self.compile_flow(element)?));
                }
                "loop" => {
                    if looped.is_some() {
                        self.warn("duplicate loop flow! ignoring.", element_id);
                        continue;
                    }
                    looped = Some(Arc::new(self.compile_flow(element)?));
                }
                other => {
                    self.warn(&format!("unknown flow '{other}' on window."), element_id);
                }
            }
        }

        let mut play_triggers = Vec::new();
        let mut stop_triggers = Vec::new();
        for element_id in &conns.incoming {
            let Some(element) = self.element(element_id) else { continue };
            match element.kind() {
                ElementKind::Shape { shape: ShapeKind::TriangleUp, .. } => {
                    play_triggers.push(element_id.clone());
                }
                ElementKind::Shape { shape: ShapeKind::Square, .. } => {
                    stop_triggers.push(element_id.clone());
                }
                _ => {}
            }
        }

        Ok(WindowAst {
            play_triggers,
            stop_triggers,
            setup,
            looped,
            at: region.element_id().clone(),
        })
    }

    pub(crate) fn compile_flow(&self, element: &Element) -> Result<FlowAst, CompileError> {
        let name = match element.kind() {
            ElementKind::Label { text, .. } => text.clone(),
            _ => String::new(),
        };
        Ok(FlowAst {
            name,
            first: self.compile_chain(element)?,
            at: element.element_id().clone(),
        })
    }
}
