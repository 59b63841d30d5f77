// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Label-to-instruction compilation and chain linearization.

use crate::model::{
    DataAst, Element, ElementKind, FontStyle, InfixOp, InstructionAst, MatchArms, OpAst,
};

use super::data::{try_parse_number, try_parse_string};
use super::{CompileError, Compiler};

impl<'a> Compiler<'a> {
    pub(crate) fn compile_instruction(
        &self,
        element: &Element,
    ) -> Result<InstructionAst, CompileError> {
        let (inputs, outputs) = self.inputs_outputs(element)?;
        let at = element.element_id().clone();

        let (text, font) = match element.kind() {
            ElementKind::Label { text, font } => (text.trim(), *font),
            _ => ("", FontStyle::Regular),
        };

        let op = self.compile_op(text, element)?;

        // A loop swallows its own successor chain as its body.
        if matches!(op, OpAst::Loop { .. }) {
            return Ok(InstructionAst {
                op,
                inputs,
                outputs,
                match_arms: None,
                next: None,
                at,
            });
        }

        if font == FontStyle::Mixed {
            self.warn("mixed font detected, cannot detect italics.", &at);
        }

        if font == FontStyle::Italic {
            let conns = self.connections(element)?;
            let mut arms = MatchArms::new();

            for destination_id in &conns.next {
                let Some(destination) = self.resolve(destination_id) else { continue };
                let ElementKind::Label { text, .. } = destination.kind() else {
                    self.warn("cannot match against non-text.", destination_id);
                    continue;
                };

                let arm_label = text.trim();
                if arms.contains(arm_label) {
                    self.warn("duplicate match arm, one will be ignored.", destination_id);
                }

                if let Some(chain) = self.compile_chain(destination)? {
                    arms.insert(arm_label, chain);
                }
            }

            return Ok(InstructionAst {
                op,
                inputs,
                outputs,
                match_arms: Some(arms),
                next: None,
                at,
            });
        }

        Ok(InstructionAst {
            op,
            inputs,
            outputs,
            match_arms: None,
            next: self.compile_chain(element)?.map(Box::new),
            at,
        })
    }

    fn compile_op(&self, text: &str, element: &Element) -> Result<OpAst, CompileError> {
        if text == "loop" {
            return Ok(OpAst::Loop {
                body: self.compile_chain(element)?.map(Box::new),
            });
        }

        if let Some(value) = try_parse_number(text) {
            return Ok(OpAst::Number { value });
        }

        if let Some(value) = try_parse_string(text) {
            return Ok(OpAst::Str { value: value.to_owned() });
        }

        for op in InfixOp::ALL {
            let parts: Vec<&str> = text.split(op.token()).collect();
            if parts.len() < 2 {
                continue;
            }
            if parts.len() > 2 {
                self.warn("too many operands passed to infix operator.", element.element_id());
            }

            return Ok(OpAst::Infix {
                op,
                left: self.compile_infix_side(parts[0], element).map(Box::new),
                right: self.compile_infix_side(parts[1], element).map(Box::new),
            });
        }

        Ok(OpAst::Function { name: text.to_owned() })
    }

    fn inputs_outputs(
        &self,
        element: &Element,
    ) -> Result<(Vec<DataAst>, Vec<DataAst>), CompileError> {
        let conns = self.connections(element)?;

        let mut inputs = Vec::new();
        for incoming_id in &conns.incoming {
            let Some(incoming) = self.resolve(incoming_id) else { continue };
            if let Some(data) = self.compile_data(incoming)? {
                inputs.push(data);
            }
        }

        let mut outputs = Vec::new();
        for outgoing_id in &conns.outgoing {
            let Some(outgoing) = self.resolve(outgoing_id) else { continue };
            if let Some(data) = self.compile_data(outgoing)? {
                outputs.push(data);
            }
        }

        Ok((inputs, outputs))
    }

    /// Compile the sequential successors of `element` into one linked chain.
    ///
    /// Successors come pre-sorted top-to-bottom; the first becomes the head
    /// and every later one is spliced onto the tail of what came before.
    pub(crate) fn compile_chain(
        &self,
        element: &Element,
    ) -> Result<Option<InstructionAst>, CompileError> {
        let conns = self.connections(element)?;

        let mut successors = Vec::new();
        for next_id in &conns.next {
            let Some(next) = self.resolve(next_id) else { continue };
            if matches!(next.kind(), ElementKind::Label { .. }) {
                successors.push(next);
            } else {
                self.warn(
                    &format!(
                        "a {} element cannot be a valid instruction.",
                        next.kind().describe()
                    ),
                    next_id,
                );
            }
        }

        let Some((head, rest)) = successors.split_first() else {
            return Ok(None);
        };

        let mut first = self.compile_instruction(head)?;
        let mut last = self.tail_of(&mut first)?;

        for subsequent in rest {
            if last.next.is_some() {
                self.warn(
                    "chain splice tried to overwrite an existing instruction.",
                    subsequent.element_id(),
                );
                continue;
            }

            last.next = Some(Box::new(self.compile_instruction(subsequent)?));
            last = self.tail_of(last)?;
        }

        Ok(Some(first))
    }

    /// Walk `next` pointers to the end of a chain, on the step budget.
    fn tail_of<'i>(
        &self,
        instruction: &'i mut InstructionAst,
    ) -> Result<&'i mut InstructionAst, CompileError> {
        let mut current = instruction;
        loop {
            self.budget_step(&current.at)?;
            if current.next.is_none() {
                return Ok(current);
            }
            current = current.next.as_deref_mut().expect("checked above");
        }
    }
}
