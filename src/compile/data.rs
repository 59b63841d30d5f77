// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Element-to-data-expression compilation, plus the literal grammar shared
//! with infix operand parsing.

use std::sync::Arc;
use std::sync::OnceLock;

use regex::Regex;

use crate::model::{DataAst, Element, ElementKind, PropertyParent, ShapeKind};

use super::{CompileError, Compiler};

/// Accepted opening/closing quote characters for string literals.
const QUOTES: [char; 4] = ['"', '\u{201C}', '\u{201D}', '/'];

pub(crate) fn try_parse_number(text: &str) -> Option<f64> {
    static NUMBER: OnceLock<Regex> = OnceLock::new();
    let number = NUMBER.get_or_init(|| {
        Regex::new(r"^-?(?:\d*\.)?\d+$").expect("number literal pattern")
    });

    let text = text.trim();
    if !number.is_match(text) {
        return None;
    }
    text.parse().ok()
}

pub(crate) fn try_parse_string(text: &str) -> Option<&str> {
    let text = text.trim();
    let mut chars = text.chars();
    let first = chars.next()?;
    let last = chars.next_back()?;
    if !QUOTES.contains(&first) || !QUOTES.contains(&last) {
        return None;
    }
    Some(&text[first.len_utf8()..text.len() - last.len_utf8()])
}

impl<'a> Compiler<'a> {
    /// Compile one element into a data expression, or warn and yield nothing.
    pub(crate) fn compile_data(&self, element: &Element) -> Result<Option<DataAst>, CompileError> {
        let at = element.element_id().clone();

        match element.kind() {
            ElementKind::Shape { shape, label } => {
                let text = label.trim();

                if !text.is_empty() {
                    match shape {
                        ShapeKind::Square => {
                            let conns = self.connections(element)?;

                            let mut inputs = Vec::new();
                            for incoming_id in &conns.incoming {
                                let Some(incoming) = self.resolve(incoming_id) else { continue };
                                if !matches!(
                                    incoming.kind(),
                                    ElementKind::Shape { shape: ShapeKind::Ellipse, .. }
                                ) {
                                    continue;
                                }
                                if let Some(data) = self.compile_data(incoming)? {
                                    inputs.push(data);
                                }
                            }

                            let initializer = inputs
                                .into_iter()
                                .find(|data| matches!(data, DataAst::Property { .. }))
                                .map(Box::new);

                            return Ok(Some(DataAst::Variable {
                                name: text.to_owned(),
                                initializer,
                                at,
                            }));
                        }
                        ShapeKind::Ellipse => {
                            let conns = self.connections(element)?;

                            let mut valid_parents = Vec::new();
                            for incoming_id in &conns.incoming {
                                let Some(incoming) = self.resolve(incoming_id) else { continue };
                                if !matches!(incoming.kind(), ElementKind::Shape { .. }) {
                                    continue;
                                }
                                if let Some(data) = self.compile_data(incoming)? {
                                    valid_parents.push(data);
                                }
                            }

                            if valid_parents.len() > 1 {
                                self.warn(
                                    &format!(
                                        "property '{text}' has more than one valid parent, only one will be used."
                                    ),
                                    &at,
                                );
                            }

                            let parent = match valid_parents.into_iter().next() {
                                Some(data) => PropertyParent::Data(Box::new(data)),
                                None => PropertyParent::CurrentWindow,
                            };

                            return Ok(Some(DataAst::Property {
                                name: text.to_owned(),
                                parent,
                                at,
                            }));
                        }
                        ShapeKind::Database => {
                            return Ok(Some(DataAst::File { data: text.to_owned(), at }));
                        }
                        _ => {}
                    }
                }

                Ok(Some(DataAst::Graphic { at }))
            }
            ElementKind::Label { .. } => {
                Ok(Some(DataAst::Flow(Arc::new(self.compile_flow(element)?))))
            }
            ElementKind::Region => {
                self.warn("could not interpret this data, it will be ignored.", &at);
                Ok(None)
            }
        }
    }

    /// One side of an infix label: number, string, else a property read on
    /// the ambient window; empty sides are absent.
    pub(crate) fn compile_infix_side(&self, text: &str, at: &Element) -> Option<DataAst> {
        let text = text.trim();

        if let Some(value) = try_parse_number(text) {
            return Some(DataAst::Number { value, at: at.element_id().clone() });
        }

        if let Some(value) = try_parse_string(text) {
            return Some(DataAst::Str { value: value.to_owned(), at: at.element_id().clone() });
        }

        if !text.is_empty() {
            return Some(DataAst::Property {
                name: text.to_owned(),
                parent: PropertyParent::CurrentWindow,
                at: at.element_id().clone(),
            });
        }

        None
    }
}
