// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The compiled program tree: windows → flows → linked instructions → data
//! expressions.
//!
//! The tree is immutable once built and is rebuilt wholesale on every compile
//! pass. Every node records the diagram element it was compiled from (`at`)
//! so warnings and evaluation errors can be attributed on the canvas.

use std::fmt;
use std::sync::Arc;

use super::ids::ElementId;

/// Infix operator tokens, in the order the compiler tries to split a label.
///
/// The order is significant: two-character tokens come before their
/// one-character prefixes, and `-` comes last so numeric literals with a
/// leading minus are not torn apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOp {
    Ge,
    Le,
    Gt,
    Lt,
    Add,
    Mul,
    Div,
    Rem,
    Sub,
}

impl InfixOp {
    pub const ALL: [InfixOp; 9] = [
        InfixOp::Ge,
        InfixOp::Le,
        InfixOp::Gt,
        InfixOp::Lt,
        InfixOp::Add,
        InfixOp::Mul,
        InfixOp::Div,
        InfixOp::Rem,
        InfixOp::Sub,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            Self::Ge => ">=",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Add => "+",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Sub => "-",
        }
    }
}

impl fmt::Display for InfixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Parent of a property access: the ambient window, or a nested expression.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyParent {
    CurrentWindow,
    Data(Box<DataAst>),
}

/// A data expression: something an instruction can read from or write to.
#[derive(Debug, Clone, PartialEq)]
pub enum DataAst {
    Variable {
        name: String,
        /// Default read through this property while the variable is unset.
        initializer: Option<Box<DataAst>>,
        at: ElementId,
    },
    Property {
        name: String,
        parent: PropertyParent,
        at: ElementId,
    },
    Number {
        value: f64,
        at: ElementId,
    },
    Str {
        value: String,
        at: ElementId,
    },
    File {
        data: String,
        at: ElementId,
    },
    Graphic {
        at: ElementId,
    },
    Flow(Arc<FlowAst>),
}

impl DataAst {
    pub fn at(&self) -> &ElementId {
        match self {
            Self::Variable { at, .. }
            | Self::Property { at, .. }
            | Self::Number { at, .. }
            | Self::Str { at, .. }
            | Self::File { at, .. }
            | Self::Graphic { at } => at,
            Self::Flow(flow) => &flow.at,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Self::Variable { .. } => "variable",
            Self::Property { .. } => "property",
            Self::Number { .. } => "number",
            Self::Str { .. } => "string",
            Self::File { .. } => "file",
            Self::Graphic { .. } => "graphic",
            Self::Flow(_) => "flow",
        }
    }
}

/// The operation carried by one instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum OpAst {
    Function {
        name: String,
    },
    Infix {
        op: InfixOp,
        left: Option<Box<DataAst>>,
        right: Option<Box<DataAst>>,
    },
    Loop {
        body: Option<Box<InstructionAst>>,
    },
    Number {
        value: f64,
    },
    Str {
        value: String,
    },
}

/// Match arms in label insertion order.
///
/// Insertion order is preserved because it decides the order arm bodies are
/// pushed onto the evaluator's work list. Inserting an existing label
/// replaces the body in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatchArms {
    arms: Vec<(String, InstructionAst)>,
}

impl MatchArms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.arms.iter().any(|(existing, _)| existing == label)
    }

    pub fn insert(&mut self, label: impl Into<String>, chain: InstructionAst) {
        let label = label.into();
        if let Some(slot) = self.arms.iter_mut().find(|(existing, _)| *existing == label) {
            slot.1 = chain;
        } else {
            self.arms.push((label, chain));
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &InstructionAst)> {
        self.arms.iter().map(|(label, chain)| (label.as_str(), chain))
    }

    pub fn len(&self) -> usize {
        self.arms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arms.is_empty()
    }
}

/// One node of a linked instruction chain.
///
/// Compilation never sets both continuations at once: a match instruction
/// starts with `next` empty, though chain splicing may later hang a sibling
/// off it — that spliced `next` is what a matched arm rejoins.
#[derive(Debug, Clone, PartialEq)]
pub struct InstructionAst {
    pub op: OpAst,
    pub inputs: Vec<DataAst>,
    pub outputs: Vec<DataAst>,
    pub match_arms: Option<MatchArms>,
    pub next: Option<Box<InstructionAst>>,
    pub at: ElementId,
}

/// A named entry point into an instruction chain.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowAst {
    pub name: String,
    pub first: Option<InstructionAst>,
    pub at: ElementId,
}

/// The top-level runtime unit: one compiled window region.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowAst {
    pub play_triggers: Vec<ElementId>,
    pub stop_triggers: Vec<ElementId>,
    pub setup: Option<Arc<FlowAst>>,
    pub looped: Option<Arc<FlowAst>>,
    pub at: ElementId,
}
