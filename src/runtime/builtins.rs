// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The builtin function table.
//!
//! Builtins are resolved by label text at run time; an unknown label is a
//! fatal error, with a closest-name suggestion when one is close enough.

use std::collections::BTreeSet;
use std::time::Duration;

use smol_str::SmolStr;

use crate::model::ElementId;
use crate::render::GraphicHandle;

use super::args::Param;
use super::error::EvalError;
use super::eval::{run_instructions, EvalCtx};
use super::input::Key;
use super::value::{Obj, Type};

/// Minimum fuzzy-match ratio (0..=100) before a suggestion is offered.
const SUGGESTION_RATIO: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    AddSprite,
    AddText,
    AddLine,
    Call,
    Range,
    Inputs,
    Colliding,
    ToString,
    Length,
    Index,
    ParseObjFaces,
    ParseObjVertices,
    DebugLog,
    Yield,
}

impl Builtin {
    pub const ALL: [Builtin; 14] = [
        Builtin::AddSprite,
        Builtin::AddText,
        Builtin::AddLine,
        Builtin::Call,
        Builtin::Range,
        Builtin::Inputs,
        Builtin::Colliding,
        Builtin::ToString,
        Builtin::Length,
        Builtin::Index,
        Builtin::ParseObjFaces,
        Builtin::ParseObjVertices,
        Builtin::DebugLog,
        Builtin::Yield,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::AddSprite => "add sprite",
            Self::AddText => "add text",
            Self::AddLine => "add line",
            Self::Call => "call",
            Self::Range => "range",
            Self::Inputs => "inputs",
            Self::Colliding => "colliding",
            Self::ToString => "to string",
            Self::Length => "length",
            Self::Index => "index",
            Self::ParseObjFaces => "parse obj faces",
            Self::ParseObjVertices => "parse obj vertices",
            Self::DebugLog => "debug log",
            Self::Yield => "yield",
        }
    }

    pub fn lookup(name: &str) -> Option<Builtin> {
        Self::ALL.into_iter().find(|builtin| builtin.name() == name)
    }

    /// Closest builtin name to a mistyped label, if any is close enough.
    pub fn suggest(name: &str) -> Option<&'static str> {
        let mut best: Option<(f64, &'static str)> = None;
        for builtin in Self::ALL {
            let ratio = rapidfuzz::fuzz::ratio(name.chars(), builtin.name().chars());
            if ratio < SUGGESTION_RATIO {
                continue;
            }
            if best.map(|(best_ratio, _)| ratio > best_ratio).unwrap_or(true) {
                best = Some((ratio, builtin.name()));
            }
        }
        best.map(|(_, name)| name)
    }

    pub fn params(&self) -> Vec<Param> {
        match self {
            Self::AddSprite => vec![Param::positional(Type::Graphic)],
            Self::AddText => Vec::new(),
            Self::AddLine => vec![
                Param::named("start x", Type::Number),
                Param::named("start y", Type::Number),
                Param::named("end x", Type::Number),
                Param::named("end y", Type::Number),
            ],
            Self::Call => vec![Param::positional(Type::Flow)],
            Self::Range => vec![Param::positional(Type::Number)],
            Self::Inputs => Vec::new(),
            Self::Colliding => {
                vec![Param::positional(Type::Sprite), Param::positional(Type::Sprite)]
            }
            Self::ToString => vec![Param::positional(Type::Number)],
            Self::Length => vec![Param::positional(Type::array_of(Type::Any))],
            Self::Index => vec![
                Param::positional(Type::array_of(Type::Any)),
                Param::positional(Type::Number),
            ],
            Self::ParseObjFaces => vec![Param::positional(Type::Str)],
            Self::ParseObjVertices => vec![Param::positional(Type::Str)],
            Self::DebugLog => vec![Param::positional(Type::Any)],
            Self::Yield => Vec::new(),
        }
    }
}

pub(crate) async fn call_builtin(
    builtin: Builtin,
    args: Vec<Obj>,
    ctx: &EvalCtx<'_>,
    at: &ElementId,
) -> Result<Option<Obj>, EvalError> {
    let mut args = args.into_iter();
    let mut next_arg = move || {
        args.next().ok_or_else(|| EvalError::Internal {
            message: "builtin bound fewer arguments than declared".to_owned(),
            at: at.clone(),
        })
    };

    match builtin {
        Builtin::AddSprite => {
            let Obj::Graphic { graphic, .. } = next_arg()? else {
                return Err(internal_mismatch(builtin, at));
            };
            let sprite = ctx.surface().create_sprite(ctx.window_region, &graphic);
            Ok(Some(Obj::Sprite { sprite, at: at.clone() }))
        }
        Builtin::AddText => {
            let text = ctx.surface().create_text(ctx.window_region);
            Ok(Some(Obj::Text { text, at: at.clone() }))
        }
        Builtin::AddLine => {
            let start_x = number_arg(next_arg()?, builtin, at)?;
            let start_y = number_arg(next_arg()?, builtin, at)?;
            let end_x = number_arg(next_arg()?, builtin, at)?;
            let end_y = number_arg(next_arg()?, builtin, at)?;
            let shape =
                ctx.surface().create_line(ctx.window_region, (start_x, start_y), (end_x, end_y));
            Ok(Some(Obj::Graphic { graphic: GraphicHandle::Shape(shape), at: at.clone() }))
        }
        Builtin::Call => {
            let Obj::Flow { flow, .. } = next_arg()? else {
                return Err(internal_mismatch(builtin, at));
            };
            Box::pin(run_instructions(flow.first.as_ref(), ctx)).await?;
            Ok(None)
        }
        Builtin::Range => {
            let max = number_arg(next_arg()?, builtin, at)?;
            if !max.is_finite() || max < 0.0 || max.fract() != 0.0 {
                return Err(EvalError::BadRange { value: max, at: at.clone() });
            }
            let items = (0..max as usize)
                .map(|index| Obj::number(index as f64, at.clone()))
                .collect();
            Ok(Some(Obj::Array { item: Type::Number, items, at: at.clone() }))
        }
        Builtin::Inputs => {
            let options: BTreeSet<SmolStr> = Key::ALL.iter().map(Key::as_smol).collect();
            let selected: BTreeSet<SmolStr> =
                ctx.interp.input().pressed().iter().map(Key::as_smol).collect();
            Ok(Some(Obj::Enum { options, selected, at: at.clone() }))
        }
        Builtin::Colliding => {
            let Obj::Sprite { sprite: a, .. } = next_arg()? else {
                return Err(internal_mismatch(builtin, at));
            };
            let Obj::Sprite { sprite: b, .. } = next_arg()? else {
                return Err(internal_mismatch(builtin, at));
            };
            let bounds_a = ctx.surface().sprite_bounds(a).ok_or_else(|| gone(at))?;
            let bounds_b = ctx.surface().sprite_bounds(b).ok_or_else(|| gone(at))?;
            Ok(Some(Obj::from_bool(bounds_a.overlaps(&bounds_b), at.clone())))
        }
        Builtin::ToString => {
            let value = number_arg(next_arg()?, builtin, at)?;
            Ok(Some(Obj::string(value.to_string(), at.clone())))
        }
        Builtin::Length => {
            let Obj::Array { items, .. } = next_arg()? else {
                return Err(internal_mismatch(builtin, at));
            };
            Ok(Some(Obj::number(items.len() as f64, at.clone())))
        }
        Builtin::Index => {
            let Obj::Array { items, .. } = next_arg()? else {
                return Err(internal_mismatch(builtin, at));
            };
            let index = number_arg(next_arg()?, builtin, at)?;
            let out_of_bounds =
                || EvalError::IndexOutOfBounds { index, len: items.len(), at: at.clone() };
            if index < 0.0 || index.fract() != 0.0 {
                return Err(out_of_bounds());
            }
            items.get(index as usize).cloned().map(Some).ok_or_else(out_of_bounds)
        }
        Builtin::ParseObjFaces => {
            let Obj::Str { value, .. } = next_arg()? else {
                return Err(internal_mismatch(builtin, at));
            };
            let faces = parse_obj_rows(&value, 'f', at, |index| index - 1.0)?;
            ctx.annotations().log(&format!("loaded {} faces", faces.len()));
            Ok(Some(Obj::Array {
                item: Type::array_of(Type::Number),
                items: faces,
                at: at.clone(),
            }))
        }
        Builtin::ParseObjVertices => {
            let Obj::Str { value, .. } = next_arg()? else {
                return Err(internal_mismatch(builtin, at));
            };
            let vertices = parse_obj_rows(&value, 'v', at, |coord| coord)?;
            ctx.annotations().log(&format!("loaded {} vertices", vertices.len()));
            Ok(Some(Obj::Array {
                item: Type::array_of(Type::Number),
                items: vertices,
                at: at.clone(),
            }))
        }
        Builtin::DebugLog => {
            let value = next_arg()?;
            ctx.annotations().log(&format!("debug log: {}", brief(&value)));
            Ok(None)
        }
        Builtin::Yield => {
            tokio::time::sleep(Duration::from_millis(1)).await;
            Ok(None)
        }
    }
}

fn number_arg(obj: Obj, builtin: Builtin, at: &ElementId) -> Result<f64, EvalError> {
    obj.as_number().ok_or_else(|| internal_mismatch(builtin, at))
}

fn internal_mismatch(builtin: Builtin, at: &ElementId) -> EvalError {
    EvalError::Internal {
        message: format!("builtin '{}' bound an argument of the wrong kind", builtin.name()),
        at: at.clone(),
    }
}

fn gone(at: &ElementId) -> EvalError {
    EvalError::Internal { message: "sprite no longer exists".to_owned(), at: at.clone() }
}

/// Rows of a wavefront-style text blob: every line starting with the marker
/// letter becomes an array of numbers.
fn parse_obj_rows(
    file: &str,
    marker: char,
    at: &ElementId,
    map: impl Fn(f64) -> f64,
) -> Result<Vec<Obj>, EvalError> {
    let mut rows = Vec::new();

    for line in file.lines() {
        let Some(rest) = line.strip_prefix(marker) else { continue };
        if !rest.starts_with(char::is_whitespace) {
            continue;
        }

        let mut row = Vec::new();
        for token in rest.split_whitespace() {
            // Face tokens may carry texture/normal references ('1/2/3'); the
            // leading component is the one that matters.
            let head = token.split('/').next().unwrap_or(token);
            let value: f64 = head.parse().map_err(|_| EvalError::MalformedNumber {
                token: token.to_owned(),
                at: at.clone(),
            })?;
            row.push(Obj::number(map(value), at.clone()));
        }

        rows.push(Obj::Array { item: Type::Number, items: row, at: at.clone() });
    }

    Ok(rows)
}

/// One-line rendering for the debug log.
fn brief(obj: &Obj) -> String {
    match obj {
        Obj::Number { value, .. } => value.to_string(),
        Obj::Str { value, .. } => format!("'{value}'"),
        Obj::Enum { selected, .. } => {
            let selected: Vec<&str> = selected.iter().map(SmolStr::as_str).collect();
            format!("enum {{{}}}", selected.join(", "))
        }
        Obj::Array { items, .. } => {
            let items: Vec<String> = items.iter().map(brief).collect();
            format!("[{}]", items.join(", "))
        }
        Obj::Graphic { .. } => "graphic".to_owned(),
        Obj::Sprite { sprite, .. } => format!("sprite #{sprite}"),
        Obj::Text { text, .. } => format!("text #{text}"),
        Obj::Flow { flow, .. } => format!("flow '{}'", flow.name),
    }
}

#[cfg(test)]
mod tests {
    use super::Builtin;

    #[test]
    fn lookup_resolves_every_declared_name() {
        for builtin in Builtin::ALL {
            assert_eq!(Builtin::lookup(builtin.name()), Some(builtin));
        }
        assert_eq!(Builtin::lookup("no such builtin"), None);
    }

    #[test]
    fn suggest_finds_near_misses_only() {
        assert_eq!(Builtin::suggest("add sprit"), Some("add sprite"));
        assert_eq!(Builtin::suggest("rang"), Some("range"));
        assert_eq!(Builtin::suggest("zzzzzz"), None);
    }

    #[test]
    fn parameter_lists_are_stable() {
        assert_eq!(Builtin::AddLine.params().len(), 4);
        assert!(Builtin::AddLine.params().iter().all(|p| p.name.is_some()));
        assert!(Builtin::Yield.params().is_empty());
    }
}
