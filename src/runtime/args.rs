// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Argument binder: an instruction's unordered actual inputs against a
//! builtin's ordered, possibly-named parameter list.
//!
//! The name pass runs fully before the type pass, so a later positional
//! actual of the same type can still be claimed by name.

use crate::model::ElementId;
use crate::report::{Annotations, Severity};

use super::error::EvalError;
use super::value::{Obj, Type};

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Option<&'static str>,
    pub ty: Type,
}

impl Param {
    pub fn positional(ty: Type) -> Self {
        Self { name: None, ty }
    }

    pub fn named(name: &'static str, ty: Type) -> Self {
        Self { name: Some(name), ty }
    }
}

/// One evaluated input, optionally named after its source variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Actual {
    pub name: Option<String>,
    pub obj: Obj,
}

pub fn bind_args(
    params: &[Param],
    actuals: Vec<Actual>,
    at: &ElementId,
    annotations: &dyn Annotations,
) -> Result<Vec<Obj>, EvalError> {
    let mut remaining: Vec<Actual> = actuals;
    let mut bound: Vec<Option<Obj>> = params.iter().map(|_| None).collect();

    // Name pass.
    for (position, param) in params.iter().enumerate() {
        let Some(param_name) = param.name else { continue };
        let Some(index) =
            remaining.iter().position(|actual| actual.name.as_deref() == Some(param_name))
        else {
            continue;
        };
        bound[position] = Some(remaining.remove(index).obj);
    }

    // Type pass.
    for (position, param) in params.iter().enumerate() {
        if bound[position].is_some() {
            continue;
        }
        let Some(index) = remaining.iter().position(|actual| actual.obj.ty().matches(&param.ty))
        else {
            continue;
        };
        bound[position] = Some(remaining.remove(index).obj);
    }

    for actual in &remaining {
        annotations.annotate(
            Severity::Warning,
            "extraneous input has been ignored.",
            actual.obj.at(),
        );
    }

    let mut args = Vec::with_capacity(params.len());
    for (position, slot) in bound.into_iter().enumerate() {
        match slot {
            Some(obj) => args.push(obj),
            None => {
                let param = &params[position];
                return Err(EvalError::MissingArgument {
                    ty: param.ty.clone(),
                    name: param.name,
                    position,
                    at: at.clone(),
                });
            }
        }
    }

    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::{bind_args, Actual, Param};
    use crate::model::ElementId;
    use crate::report::{NoticeLog, Severity};
    use crate::runtime::error::EvalError;
    use crate::runtime::value::{Obj, Type};

    fn id(value: &str) -> ElementId {
        ElementId::new(value).expect("element id")
    }

    fn number(value: f64, at: &str) -> Actual {
        Actual { name: None, obj: Obj::number(value, id(at)) }
    }

    fn named(name: &str, value: f64, at: &str) -> Actual {
        Actual { name: Some(name.to_owned()), obj: Obj::number(value, id(at)) }
    }

    #[test]
    fn positional_binding_matches_by_type() {
        let log = NoticeLog::new();
        let params = [Param::positional(Type::Number), Param::positional(Type::Str)];
        let actuals = vec![
            Actual { name: None, obj: Obj::string("hi", id("s")) },
            number(1.0, "n"),
        ];

        let args = bind_args(&params, actuals, &id("call"), &log).expect("bind");
        assert_eq!(args[0].as_number(), Some(1.0));
        assert_eq!(args[1].as_str(), Some("hi"));
    }

    #[test]
    fn name_pass_runs_fully_before_type_pass() {
        let log = NoticeLog::new();
        // Two number params, the second one named. A positional 1.0 comes
        // first, but the named actual must claim its slot before the type
        // pass hands the positional one to param 0.
        let params = [Param::positional(Type::Number), Param::named("right", Type::Number)];
        let actuals = vec![named("right", 9.0, "b"), number(1.0, "a")];

        let args = bind_args(&params, actuals, &id("call"), &log).expect("bind");
        assert_eq!(args[0].as_number(), Some(1.0));
        assert_eq!(args[1].as_number(), Some(9.0));
    }

    #[test]
    fn binding_is_input_order_independent_with_unique_names() {
        let log = NoticeLog::new();
        let params = [Param::named("left", Type::Number), Param::named("right", Type::Number)];

        let forward = vec![named("left", 1.0, "a"), named("right", 2.0, "b")];
        let backward = vec![named("right", 2.0, "b"), named("left", 1.0, "a")];

        let first = bind_args(&params, forward, &id("call"), &log).expect("bind");
        let second = bind_args(&params, backward, &id("call"), &log).expect("bind");
        assert_eq!(first, second);
    }

    #[test]
    fn extraneous_actuals_warn_and_are_dropped() {
        let log = NoticeLog::new();
        let params = [Param::positional(Type::Number)];
        let actuals = vec![number(1.0, "a"), number(2.0, "b")];

        let args = bind_args(&params, actuals, &id("call"), &log).expect("bind");
        assert_eq!(args.len(), 1);

        let warnings = log.notices_of(Severity::Warning);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].at, id("b"));
    }

    #[test]
    fn unbound_parameter_is_fatal_and_names_its_slot() {
        let log = NoticeLog::new();
        let params = [Param::positional(Type::Number), Param::named("flow", Type::Flow)];
        let actuals = vec![number(1.0, "a")];

        let err = bind_args(&params, actuals, &id("call"), &log).expect_err("missing argument");
        assert_eq!(
            err,
            EvalError::MissingArgument {
                ty: Type::Flow,
                name: Some("flow"),
                position: 1,
                at: id("call"),
            }
        );
    }

    #[test]
    fn any_typed_parameter_accepts_every_actual() {
        let log = NoticeLog::new();
        let params = [Param::positional(Type::Any)];
        let actuals = vec![Actual { name: None, obj: Obj::string("x", id("s")) }];

        let args = bind_args(&params, actuals, &id("call"), &log).expect("bind");
        assert_eq!(args[0].as_str(), Some("x"));
    }
}
