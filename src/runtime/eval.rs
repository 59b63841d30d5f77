// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tree-walking evaluation of compiled instruction chains.
//!
//! Chains run off an explicit LIFO work list. `next` is pushed before any
//! matched arm bodies, so a matched arm runs to completion and then rejoins
//! the instruction that lexically follows the match. Cancellation is checked
//! between instructions, and every instruction consumes one budget step.

use crate::budget::StepBudget;
use crate::model::{DataAst, Diagram, ElementId, InstructionAst, OpAst, PropertyParent};
use crate::render::{GraphicHandle, RenderSurface};
use crate::report::{Annotations, Severity};

use super::args::{bind_args, Actual, Param};
use super::builtins::{call_builtin, Builtin};
use super::error::EvalError;
use super::fields::{read_field, read_window_field, write_field};
use super::infix::{apply_infix, infix_params};
use super::value::{Obj, Type};
use super::{CancelFlag, Interp};

/// Everything one evaluation pass needs, borrowed from the session.
pub struct EvalCtx<'a> {
    pub(crate) interp: &'a Interp,
    pub(crate) diagram: &'a Diagram,
    pub(crate) window_region: &'a ElementId,
    pub(crate) cancel: &'a CancelFlag,
    pub(crate) budget: &'a StepBudget,
}

impl<'a> EvalCtx<'a> {
    pub(crate) fn new(
        interp: &'a Interp,
        diagram: &'a Diagram,
        window_region: &'a ElementId,
        cancel: &'a CancelFlag,
        budget: &'a StepBudget,
    ) -> Self {
        Self { interp, diagram, window_region, cancel, budget }
    }

    pub(crate) fn surface(&self) -> &dyn RenderSurface {
        self.interp.surface()
    }

    pub(crate) fn annotations(&self) -> &dyn Annotations {
        self.interp.annotations()
    }

    pub(crate) fn warn(&self, message: &str, at: &ElementId) {
        self.annotations().annotate(Severity::Warning, message, at);
    }
}

/// Evaluate a data expression to a value.
pub(crate) fn data_value(data: &DataAst, ctx: &EvalCtx<'_>) -> Result<Obj, EvalError> {
    match data {
        DataAst::Graphic { at } => Ok(Obj::Graphic {
            graphic: GraphicHandle::Element(at.clone()),
            at: at.clone(),
        }),
        DataAst::Variable { name, initializer, at } => {
            if let Some(value) = ctx.interp.variable(at) {
                return Ok(value);
            }
            if let Some(initializer) = initializer {
                return data_value(initializer, ctx);
            }
            Err(EvalError::UnsetVariable { name: name.clone(), at: at.clone() })
        }
        DataAst::Property { name, parent, at } => match parent {
            PropertyParent::CurrentWindow => {
                read_window_field(name, ctx.window_region, ctx.surface(), at)
            }
            PropertyParent::Data(parent_data) => {
                let DataAst::Variable { at: parent_at, .. } = parent_data.as_ref() else {
                    return Err(EvalError::PropertyRead { name: name.clone(), at: at.clone() });
                };
                let parent_obj = ctx.interp.variable(parent_at).ok_or_else(|| {
                    EvalError::PropertyRead { name: name.clone(), at: at.clone() }
                })?;
                read_field(&parent_obj, name, ctx.surface(), ctx.diagram, at)
            }
        },
        DataAst::Flow(flow) => Ok(Obj::Flow { flow: flow.clone(), at: flow.at.clone() }),
        DataAst::Number { value, at } => Ok(Obj::number(*value, at.clone())),
        DataAst::Str { value, at } => Ok(Obj::string(value.clone(), at.clone())),
        DataAst::File { data, at } => Ok(Obj::string(data.clone(), at.clone())),
    }
}

/// Evaluate one instruction to its (optional) value.
async fn instruction_value(
    instruction: &InstructionAst,
    ctx: &EvalCtx<'_>,
) -> Result<Option<Obj>, EvalError> {
    let mut actuals = Vec::with_capacity(instruction.inputs.len() + 2);
    for input in &instruction.inputs {
        let name = match input {
            DataAst::Variable { name, .. } => Some(name.clone()),
            _ => None,
        };
        actuals.push(Actual { name, obj: data_value(input, ctx)? });
    }

    match &instruction.op {
        OpAst::Loop { body } => {
            let Some(body) = body else {
                ctx.warn("loop has no body.", &instruction.at);
                return Ok(None);
            };

            let params = [Param::positional(Type::array_of(Type::Any))];
            let mut args = bind_args(&params, actuals, &instruction.at, ctx.annotations())?;
            let Some(Obj::Array { items, .. }) = args.pop() else {
                return Err(EvalError::Internal {
                    message: "loop bound a non-array argument".to_owned(),
                    at: instruction.at.clone(),
                });
            };

            // The loop unrolls synchronously: outputs carry the item, then
            // the body runs to completion before the next item.
            for item in items {
                set_outputs(&instruction.outputs, &item, ctx)?;
                Box::pin(run_instructions(Some(body.as_ref()), ctx)).await?;
            }

            Ok(None)
        }
        OpAst::Function { name } => {
            let Some(builtin) = Builtin::lookup(name) else {
                return Err(EvalError::UnknownBuiltin {
                    name: name.clone(),
                    suggestion: Builtin::suggest(name),
                    at: instruction.at.clone(),
                });
            };
            let args = bind_args(&builtin.params(), actuals, &instruction.at, ctx.annotations())?;
            call_builtin(builtin, args, ctx, &instruction.at).await
        }
        OpAst::Infix { op, left, right } => {
            // Literal sides from the label participate like explicit inputs.
            if let Some(left) = left {
                actuals.push(Actual { name: Some("left".to_owned()), obj: data_value(left, ctx)? });
            }
            if let Some(right) = right {
                actuals
                    .push(Actual { name: Some("right".to_owned()), obj: data_value(right, ctx)? });
            }

            let params = infix_params(*op);
            let args = bind_args(&params, actuals, &instruction.at, ctx.annotations())?;
            apply_infix(*op, &args[0], &args[1], &instruction.at).map(Some)
        }
        OpAst::Number { value } => Ok(Some(Obj::number(*value, instruction.at.clone()))),
        OpAst::Str { value } => Ok(Some(Obj::string(value.clone(), instruction.at.clone()))),
    }
}

/// Assign a produced value to every declared output target.
pub(crate) fn set_outputs(
    outputs: &[DataAst],
    value: &Obj,
    ctx: &EvalCtx<'_>,
) -> Result<(), EvalError> {
    for output in outputs {
        match output {
            DataAst::Variable { at, .. } => {
                ctx.interp.set_variable(at.clone(), value.clone());
            }
            DataAst::Property { name, parent, at } => {
                let PropertyParent::Data(parent_data) = parent else {
                    return Err(EvalError::PropertyWrite {
                        name: name.clone(),
                        at: at.clone(),
                    });
                };
                let DataAst::Variable { at: parent_at, .. } = parent_data.as_ref() else {
                    return Err(EvalError::PropertyWrite {
                        name: name.clone(),
                        at: at.clone(),
                    });
                };
                let parent_obj = ctx.interp.variable(parent_at).ok_or_else(|| {
                    EvalError::PropertyWrite { name: name.clone(), at: at.clone() }
                })?;
                write_field(&parent_obj, name, value, ctx.surface(), at)?;
            }
            other => {
                return Err(EvalError::Unassignable {
                    target: other.describe(),
                    at: other.at().clone(),
                });
            }
        }
    }
    Ok(())
}

/// Run a chain to completion (or cancellation) off a LIFO work list.
pub(crate) async fn run_instructions(
    first: Option<&InstructionAst>,
    ctx: &EvalCtx<'_>,
) -> Result<(), EvalError> {
    let mut work: Vec<&InstructionAst> = Vec::new();
    if let Some(first) = first {
        work.push(first);
    }

    while let Some(instruction) = work.pop() {
        if ctx.cancel.is_cancelled() {
            return Ok(());
        }
        ctx.budget
            .step()
            .map_err(|_| EvalError::StepCeiling { at: instruction.at.clone() })?;

        if let Some(next) = instruction.next.as_deref() {
            work.push(next);
        }

        let value = instruction_value(instruction, ctx).await?;

        if let (Some(Obj::Enum { options, selected, .. }), Some(arms)) =
            (&value, &instruction.match_arms)
        {
            for (arm_label, arm) in arms.iter() {
                if selected.contains(arm_label) {
                    work.push(arm);
                } else if !options.contains(arm_label) {
                    let valid: Vec<String> =
                        options.iter().map(|option| format!("'{option}'")).collect();
                    ctx.warn(
                        &format!("unknown enum value. valid: {}", valid.join(", ")),
                        &instruction.at,
                    );
                }
            }
        }

        match &value {
            Some(value) => set_outputs(&instruction.outputs, value, ctx)?,
            None => {
                if !instruction.outputs.is_empty()
                    && !matches!(instruction.op, OpAst::Loop { .. })
                {
                    ctx.warn(
                        "not outputting anything because this instruction does not return anything.",
                        instruction.outputs[0].at(),
                    );
                }
            }
        }
    }

    Ok(())
}
