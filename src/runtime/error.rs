// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Fatal evaluation errors.
//!
//! A fatal error aborts the current tick of the owning window only; the
//! scheduler annotates the offending element and stops that window.

use std::fmt;

use crate::model::ElementId;

use super::value::Type;

#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    UnsetVariable {
        name: String,
        at: ElementId,
    },
    UnknownBuiltin {
        name: String,
        suggestion: Option<&'static str>,
        at: ElementId,
    },
    MissingArgument {
        ty: Type,
        name: Option<&'static str>,
        position: usize,
        at: ElementId,
    },
    /// The output target kind can never be assigned to.
    Unassignable {
        target: &'static str,
        at: ElementId,
    },
    PropertyRead {
        name: String,
        at: ElementId,
    },
    PropertyWrite {
        name: String,
        at: ElementId,
    },
    IndexOutOfBounds {
        index: f64,
        len: usize,
        at: ElementId,
    },
    MalformedNumber {
        token: String,
        at: ElementId,
    },
    BadRange {
        value: f64,
        at: ElementId,
    },
    StepCeiling {
        at: ElementId,
    },
    Internal {
        message: String,
        at: ElementId,
    },
}

impl EvalError {
    pub fn at(&self) -> &ElementId {
        match self {
            Self::UnsetVariable { at, .. }
            | Self::UnknownBuiltin { at, .. }
            | Self::MissingArgument { at, .. }
            | Self::Unassignable { at, .. }
            | Self::PropertyRead { at, .. }
            | Self::PropertyWrite { at, .. }
            | Self::IndexOutOfBounds { at, .. }
            | Self::MalformedNumber { at, .. }
            | Self::BadRange { at, .. }
            | Self::StepCeiling { at }
            | Self::Internal { at, .. } => at,
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsetVariable { name, .. } => write!(f, "variable '{name}' is not set."),
            Self::UnknownBuiltin { name, suggestion, .. } => {
                write!(f, "unknown builtin function '{name}'.")?;
                if let Some(suggestion) = suggestion {
                    write!(f, " did you mean '{suggestion}'?")?;
                }
                Ok(())
            }
            Self::MissingArgument { ty, name, position, .. } => {
                write!(f, "missing argument of type '{ty}'")?;
                if let Some(name) = name {
                    write!(f, " with name '{name}'")?;
                }
                write!(f, " at position {position}.")
            }
            Self::Unassignable { target, .. } => {
                write!(f, "this is a '{target}' and cannot be assigned to.")
            }
            Self::PropertyRead { name, .. } => {
                write!(f, "failed to read property '{name}'.")
            }
            Self::PropertyWrite { name, .. } => {
                write!(f, "failed to set property '{name}'.")
            }
            Self::IndexOutOfBounds { index, len, .. } => {
                write!(f, "array index out of bounds: {index} >= length {len}.")
            }
            Self::MalformedNumber { token, .. } => {
                write!(f, "'{token}' is not a number.")
            }
            Self::BadRange { value, .. } => {
                write!(f, "cannot build a range of {value} items.")
            }
            Self::StepCeiling { .. } => f.write_str("step ceiling exceeded."),
            Self::Internal { message, .. } => write!(f, "internal error: {message}"),
        }
    }
}

impl std::error::Error for EvalError {}
