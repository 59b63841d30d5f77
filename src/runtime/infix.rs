// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Infix operator implementations.
//!
//! Division, remainder, subtraction and the comparisons name their
//! parameters `left`/`right` so the sides can be claimed by name; addition
//! and multiplication are commutative and bind purely by type.

use crate::model::{ElementId, InfixOp};

use super::args::Param;
use super::error::EvalError;
use super::value::{Obj, Type};

pub(crate) fn infix_params(op: InfixOp) -> [Param; 2] {
    match op {
        InfixOp::Add | InfixOp::Mul => {
            [Param::positional(Type::Number), Param::positional(Type::Number)]
        }
        _ => [Param::named("left", Type::Number), Param::named("right", Type::Number)],
    }
}

pub(crate) fn apply_infix(
    op: InfixOp,
    left: &Obj,
    right: &Obj,
    at: &ElementId,
) -> Result<Obj, EvalError> {
    let (Some(left), Some(right)) = (left.as_number(), right.as_number()) else {
        return Err(EvalError::Internal {
            message: format!("infix '{op}' bound a non-number argument"),
            at: at.clone(),
        });
    };

    let obj = match op {
        InfixOp::Add => Obj::number(left + right, at.clone()),
        InfixOp::Sub => Obj::number(left - right, at.clone()),
        InfixOp::Mul => Obj::number(left * right, at.clone()),
        InfixOp::Div => Obj::number(left / right, at.clone()),
        InfixOp::Rem => Obj::number(left % right, at.clone()),
        InfixOp::Lt => Obj::from_bool(left < right, at.clone()),
        InfixOp::Gt => Obj::from_bool(left > right, at.clone()),
        InfixOp::Le => Obj::from_bool(left <= right, at.clone()),
        InfixOp::Ge => Obj::from_bool(left >= right, at.clone()),
    };
    Ok(obj)
}
