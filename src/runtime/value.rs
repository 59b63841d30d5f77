// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Runtime values and their type descriptors.
//!
//! Values are dynamically typed; binding and dispatch use structural type
//! equality. Every value carries the element it originated from so errors
//! can be attributed on the canvas.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use smol_str::SmolStr;

use crate::model::{ElementId, FlowAst};
use crate::render::{GraphicHandle, SpriteId, TextId};

/// Structural type descriptor.
///
/// `Any` matches everything; Enum types match iff their option sets are
/// equal; Array types match iff their item types match recursively; all
/// other types match iff the tags match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Number,
    Str,
    Sprite,
    Text,
    Graphic,
    Flow,
    Enum { options: BTreeSet<SmolStr> },
    Array { item: Box<Type> },
    Any,
}

impl Type {
    pub fn array_of(item: Type) -> Type {
        Type::Array { item: Box::new(item) }
    }

    /// The yes/no enum produced by comparisons and collision checks.
    pub fn boolean() -> Type {
        Type::Enum { options: boolean_options() }
    }

    pub fn matches(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::Any, _) | (_, Type::Any) => true,
            (Type::Enum { options: a }, Type::Enum { options: b }) => a == b,
            (Type::Array { item: a }, Type::Array { item: b }) => a.matches(b),
            (Type::Number, Type::Number)
            | (Type::Str, Type::Str)
            | (Type::Sprite, Type::Sprite)
            | (Type::Text, Type::Text)
            | (Type::Graphic, Type::Graphic)
            | (Type::Flow, Type::Flow) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number => f.write_str("number"),
            Self::Str => f.write_str("string"),
            Self::Sprite => f.write_str("sprite"),
            Self::Text => f.write_str("text"),
            Self::Graphic => f.write_str("graphic"),
            Self::Flow => f.write_str("flow"),
            Self::Enum { options } => {
                f.write_str("enum {")?;
                for (index, option) in options.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "'{option}'")?;
                }
                f.write_str("}")
            }
            Self::Array { item } => write!(f, "array of {item}"),
            Self::Any => f.write_str("any"),
        }
    }
}

pub fn boolean_options() -> BTreeSet<SmolStr> {
    [SmolStr::new_static("yes"), SmolStr::new_static("no")].into_iter().collect()
}

/// A runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Obj {
    Number { value: f64, at: ElementId },
    Str { value: String, at: ElementId },
    Enum { options: BTreeSet<SmolStr>, selected: BTreeSet<SmolStr>, at: ElementId },
    Array { item: Type, items: Vec<Obj>, at: ElementId },
    Graphic { graphic: GraphicHandle, at: ElementId },
    Sprite { sprite: SpriteId, at: ElementId },
    Text { text: TextId, at: ElementId },
    Flow { flow: Arc<FlowAst>, at: ElementId },
}

impl Obj {
    pub fn ty(&self) -> Type {
        match self {
            Self::Number { .. } => Type::Number,
            Self::Str { .. } => Type::Str,
            Self::Enum { options, .. } => Type::Enum { options: options.clone() },
            Self::Array { item, .. } => Type::array_of(item.clone()),
            Self::Graphic { .. } => Type::Graphic,
            Self::Sprite { .. } => Type::Sprite,
            Self::Text { .. } => Type::Text,
            Self::Flow { .. } => Type::Flow,
        }
    }

    pub fn at(&self) -> &ElementId {
        match self {
            Self::Number { at, .. }
            | Self::Str { at, .. }
            | Self::Enum { at, .. }
            | Self::Array { at, .. }
            | Self::Graphic { at, .. }
            | Self::Sprite { at, .. }
            | Self::Text { at, .. }
            | Self::Flow { at, .. } => at,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Self::Number { .. } => "number",
            Self::Str { .. } => "string",
            Self::Enum { .. } => "enum",
            Self::Array { .. } => "array",
            Self::Graphic { .. } => "graphic",
            Self::Sprite { .. } => "sprite",
            Self::Text { .. } => "text",
            Self::Flow { .. } => "flow",
        }
    }

    pub fn number(value: f64, at: ElementId) -> Obj {
        Obj::Number { value, at }
    }

    pub fn string(value: impl Into<String>, at: ElementId) -> Obj {
        Obj::Str { value: value.into(), at }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number { value, .. } => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str { value, .. } => Some(value),
            _ => None,
        }
    }

    /// The yes/no enum with `yes` selected.
    pub fn yes(at: ElementId) -> Obj {
        Obj::from_bool(true, at)
    }

    /// The yes/no enum with `no` selected.
    pub fn no(at: ElementId) -> Obj {
        Obj::from_bool(false, at)
    }

    pub fn from_bool(value: bool, at: ElementId) -> Obj {
        let selected = if value { "yes" } else { "no" };
        Obj::Enum {
            options: boolean_options(),
            selected: [SmolStr::new_static(selected)].into_iter().collect(),
            at,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use smol_str::SmolStr;

    use super::{boolean_options, Obj, Type};
    use crate::model::ElementId;

    fn id(value: &str) -> ElementId {
        ElementId::new(value).expect("element id")
    }

    fn options(values: &[&str]) -> BTreeSet<SmolStr> {
        values.iter().map(|v| SmolStr::new(*v)).collect()
    }

    #[test]
    fn any_matches_everything() {
        for ty in [
            Type::Number,
            Type::Str,
            Type::Sprite,
            Type::boolean(),
            Type::array_of(Type::Number),
        ] {
            assert!(Type::Any.matches(&ty));
            assert!(ty.matches(&Type::Any));
        }
    }

    #[test]
    fn enum_types_match_only_on_equal_option_sets() {
        let a = Type::Enum { options: options(&["yes", "no"]) };
        let b = Type::Enum { options: options(&["no", "yes"]) };
        let c = Type::Enum { options: options(&["yes", "no", "maybe"]) };

        assert!(a.matches(&b));
        assert!(!a.matches(&c));
    }

    #[test]
    fn array_types_match_recursively() {
        let numbers = Type::array_of(Type::Number);
        let strings = Type::array_of(Type::Str);
        let anys = Type::array_of(Type::Any);

        assert!(numbers.matches(&numbers));
        assert!(!numbers.matches(&strings));
        assert!(numbers.matches(&anys));
        assert!(!numbers.matches(&Type::Number));
    }

    #[test]
    fn tag_mismatch_never_matches() {
        assert!(!Type::Number.matches(&Type::Str));
        assert!(!Type::Sprite.matches(&Type::Graphic));
    }

    #[test]
    fn boolean_objects_select_one_option() {
        let yes = Obj::yes(id("a"));
        let Obj::Enum { options: declared, selected, .. } = &yes else {
            panic!("expected enum, got {yes:?}");
        };
        assert_eq!(declared, &boolean_options());
        assert_eq!(selected, &options(&["yes"]));

        let no = Obj::no(id("a"));
        let Obj::Enum { selected, .. } = &no else {
            panic!("expected enum, got {no:?}");
        };
        assert_eq!(selected, &options(&["no"]));
    }
}
