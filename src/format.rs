// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Plain-text outline of a compiled window, for the CLI and for structural
//! assertions in tests.

use std::fmt::Write as _;

use crate::model::{DataAst, InstructionAst, OpAst, PropertyParent, WindowAst};

pub fn outline(window: &WindowAst) -> String {
    let mut out = String::from("window\n");

    match &window.setup {
        Some(setup) => {
            out.push_str(&indent(&flow_outline("setup", setup.first.as_ref()), 1));
        }
        None => out.push_str("  no setup\n"),
    }
    match &window.looped {
        Some(looped) => {
            out.push_str(&indent(&flow_outline("loop", looped.first.as_ref()), 1));
        }
        None => out.push_str("  no loop\n"),
    }

    out
}

fn flow_outline(name: &str, first: Option<&InstructionAst>) -> String {
    let mut out = format!("flow '{name}'\n");
    match first {
        Some(first) => out.push_str(&indent(&instruction_outline(first), 1)),
        None => out.push_str("  no instructions\n"),
    }
    out
}

fn instruction_outline(instruction: &InstructionAst) -> String {
    let mut out = String::new();
    let mut current = Some(instruction);

    while let Some(instruction) = current {
        let _ = writeln!(out, "{}", op_label(&instruction.op));

        for input in &instruction.inputs {
            out.push_str(&indent(&format!("<- {}\n", data_label(input)), 1));
        }
        for output in &instruction.outputs {
            out.push_str(&indent(&format!("-> {}\n", data_label(output)), 1));
        }

        if let OpAst::Loop { body: Some(body) } = &instruction.op {
            out.push_str(&indent("body:\n", 1));
            out.push_str(&indent(&instruction_outline(body), 2));
        }

        if let Some(arms) = &instruction.match_arms {
            for (label, chain) in arms.iter() {
                out.push_str(&indent(&format!("match '{label}':\n"), 1));
                out.push_str(&indent(&instruction_outline(chain), 2));
            }
        }

        current = instruction.next.as_deref();
    }

    out
}

fn op_label(op: &OpAst) -> String {
    match op {
        OpAst::Function { name } => format!("function '{name}'"),
        OpAst::Infix { op, left, right } => {
            let mut label = String::from("infix ");
            if let Some(left) = left {
                let _ = write!(label, "[{}] ", data_label(left));
            }
            let _ = write!(label, "{op}");
            if let Some(right) = right {
                let _ = write!(label, " [{}]", data_label(right));
            }
            label
        }
        OpAst::Loop { body: _ } => "loop".to_owned(),
        OpAst::Number { value } => format!("number {value}"),
        OpAst::Str { value } => format!("string '{value}'"),
    }
}

fn data_label(data: &DataAst) -> String {
    match data {
        DataAst::Variable { name, at, .. } => format!("variable '{name}' ({at})"),
        DataAst::Property { name, parent, .. } => match parent {
            PropertyParent::CurrentWindow => format!("property '{name}' of current window"),
            PropertyParent::Data(parent) => {
                format!("property '{name}' of {}", data_label(parent))
            }
        },
        DataAst::Number { value, .. } => format!("number {value}"),
        DataAst::Str { value, .. } => format!("string '{value}'"),
        DataAst::File { .. } => "[file]".to_owned(),
        DataAst::Graphic { .. } => "[graphic]".to_owned(),
        DataAst::Flow(flow) => format!("flow '{}'", flow.name),
    }
}

fn indent(text: &str, levels: usize) -> String {
    let pad = "  ".repeat(levels);
    let mut out = String::new();
    for line in text.lines() {
        out.push_str(&pad);
        out.push_str(line);
        out.push('\n');
    }
    out
}
