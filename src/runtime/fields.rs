// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Per-value-kind field tables for property reads and writes.
//!
//! Each read pulls live state from the surface immediately before the
//! access, so a read after a move observes the move. Unknown field names
//! and unsupported parent kinds fail with the fatal property-error
//! contract.

use crate::model::{Diagram, ElementId};
use crate::render::{Bounds, GraphicHandle, RenderSurface};

use super::error::EvalError;
use super::value::Obj;

/// Read a field of the ambient window region.
pub(crate) fn read_window_field(
    name: &str,
    region: &ElementId,
    surface: &dyn RenderSurface,
    at: &ElementId,
) -> Result<Obj, EvalError> {
    let bounds = surface
        .region_bounds(region)
        .ok_or_else(|| EvalError::PropertyRead { name: name.to_owned(), at: at.clone() })?;

    match name {
        "width" => Ok(Obj::number(bounds.width, at.clone())),
        "height" => Ok(Obj::number(bounds.height, at.clone())),
        _ => Err(EvalError::PropertyRead { name: name.to_owned(), at: at.clone() }),
    }
}

pub(crate) fn read_field(
    parent: &Obj,
    name: &str,
    surface: &dyn RenderSurface,
    diagram: &Diagram,
    at: &ElementId,
) -> Result<Obj, EvalError> {
    let fail = || EvalError::PropertyRead { name: name.to_owned(), at: at.clone() };

    match parent {
        Obj::Sprite { sprite, .. } => {
            let bounds = surface.sprite_bounds(*sprite).ok_or_else(fail)?;
            bounds_field(&bounds, name, at).ok_or_else(fail)
        }
        Obj::Text { text, .. } => match name {
            "content" => {
                let content = surface.text_content(*text).ok_or_else(fail)?;
                Ok(Obj::string(content, at.clone()))
            }
            "size" => {
                let size = surface.text_size(*text).ok_or_else(fail)?;
                Ok(Obj::number(size, at.clone()))
            }
            "x" | "y" => {
                let bounds = surface.text_bounds(*text).ok_or_else(fail)?;
                bounds_field(&bounds, name, at).ok_or_else(fail)
            }
            _ => Err(fail()),
        },
        Obj::Graphic { graphic, .. } => {
            let bounds = match graphic {
                GraphicHandle::Element(element_id) => diagram.element(element_id).map(|element| {
                    let frame = element.frame();
                    Bounds::new(frame.x, frame.y, frame.width, frame.height)
                }),
                GraphicHandle::Shape(shape_id) => surface.shape_bounds(*shape_id),
            }
            .ok_or_else(fail)?;
            bounds_field(&bounds, name, at).ok_or_else(fail)
        }
        _ => Err(fail()),
    }
}

pub(crate) fn write_field(
    parent: &Obj,
    name: &str,
    value: &Obj,
    surface: &dyn RenderSurface,
    at: &ElementId,
) -> Result<(), EvalError> {
    let fail = || EvalError::PropertyWrite { name: name.to_owned(), at: at.clone() };

    match parent {
        Obj::Sprite { sprite, .. } => {
            let bounds = surface.sprite_bounds(*sprite).ok_or_else(fail)?;
            let value = value.as_number().ok_or_else(fail)?;
            match name {
                "x" => surface.set_sprite_position(*sprite, value, bounds.y),
                "y" => surface.set_sprite_position(*sprite, bounds.x, value),
                _ => return Err(fail()),
            }
            Ok(())
        }
        Obj::Text { text, .. } => match name {
            "content" => {
                let content = value.as_str().ok_or_else(fail)?;
                surface.set_text_content(*text, content);
                Ok(())
            }
            "size" => {
                surface.set_text_size(*text, value.as_number().ok_or_else(fail)?);
                Ok(())
            }
            "x" | "y" => {
                let bounds = surface.text_bounds(*text).ok_or_else(fail)?;
                let value = value.as_number().ok_or_else(fail)?;
                match name {
                    "x" => surface.set_text_position(*text, value, bounds.y),
                    _ => surface.set_text_position(*text, bounds.x, value),
                }
                Ok(())
            }
            _ => Err(fail()),
        },
        _ => Err(fail()),
    }
}

fn bounds_field(bounds: &Bounds, name: &str, at: &ElementId) -> Option<Obj> {
    let value = match name {
        "x" => bounds.x,
        "y" => bounds.y,
        "width" => bounds.width,
        "height" => bounds.height,
        _ => return None,
    };
    Some(Obj::number(value, at.clone()))
}
