// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! In-process render surface used by the headless CLI and the test suite.
//!
//! Regions and source-graphic geometry are seeded from the diagram; objects
//! the program creates live in plain maps.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::model::{Diagram, ElementId};

use super::{Bounds, GraphicHandle, RenderSurface, ShapeId, SpriteId, TextId};

const DEFAULT_TEXT_SIZE: f64 = 20.0;

#[derive(Debug, Clone, PartialEq)]
struct SpriteState {
    region: ElementId,
    bounds: Bounds,
}

#[derive(Debug, Clone, PartialEq)]
struct ShapeState {
    region: ElementId,
    bounds: Bounds,
}

#[derive(Debug, Clone, PartialEq)]
struct TextState {
    region: ElementId,
    x: f64,
    y: f64,
    content: String,
    size: f64,
}

#[derive(Debug, Default)]
struct SurfaceState {
    next_id: u64,
    regions: BTreeMap<ElementId, Bounds>,
    graphics: BTreeMap<ElementId, Bounds>,
    sprites: BTreeMap<SpriteId, SpriteState>,
    shapes: BTreeMap<ShapeId, ShapeState>,
    texts: BTreeMap<TextId, TextState>,
}

impl SurfaceState {
    fn next_id(&mut self) -> u64 {
        self.next_id = self.next_id.wrapping_add(1);
        self.next_id
    }
}

#[derive(Debug, Default)]
pub struct MemorySurface {
    state: Mutex<SurfaceState>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed region and source-graphic geometry from a diagram snapshot.
    pub fn from_diagram(diagram: &Diagram) -> Self {
        let surface = Self::new();
        {
            let mut state = surface.state.lock().expect("surface poisoned");
            for element in diagram.elements().values() {
                let frame = element.frame();
                let bounds = Bounds::new(frame.x, frame.y, frame.width, frame.height);
                if matches!(element.kind(), crate::model::ElementKind::Region) {
                    state.regions.insert(element.element_id().clone(), bounds);
                } else {
                    state.graphics.insert(element.element_id().clone(), bounds);
                }
            }
        }
        surface
    }

    /// Number of live objects (sprites, shapes, texts) inside the region.
    pub fn object_count(&self, region: &ElementId) -> usize {
        let state = self.state.lock().expect("surface poisoned");
        state.sprites.values().filter(|s| &s.region == region).count()
            + state.shapes.values().filter(|s| &s.region == region).count()
            + state.texts.values().filter(|t| &t.region == region).count()
    }
}

impl RenderSurface for MemorySurface {
    fn clear_region(&self, region: &ElementId) {
        let mut state = self.state.lock().expect("surface poisoned");
        state.sprites.retain(|_, sprite| &sprite.region != region);
        state.shapes.retain(|_, shape| &shape.region != region);
        state.texts.retain(|_, text| &text.region != region);
    }

    fn resize_region(&self, region: &ElementId, width: f64, height: f64) {
        let mut state = self.state.lock().expect("surface poisoned");
        if let Some(bounds) = state.regions.get_mut(region) {
            bounds.width = width;
            bounds.height = height;
        }
    }

    fn region_bounds(&self, region: &ElementId) -> Option<Bounds> {
        self.state.lock().expect("surface poisoned").regions.get(region).copied()
    }

    fn create_sprite(&self, region: &ElementId, graphic: &GraphicHandle) -> SpriteId {
        let mut state = self.state.lock().expect("surface poisoned");
        let source = match graphic {
            GraphicHandle::Element(element_id) => state.graphics.get(element_id).copied(),
            GraphicHandle::Shape(shape_id) => state.shapes.get(shape_id).map(|shape| shape.bounds),
        }
        .unwrap_or_default();

        let sprite_id = SpriteId::new(state.next_id());
        state.sprites.insert(
            sprite_id,
            SpriteState {
                region: region.clone(),
                bounds: Bounds::new(0.0, 0.0, source.width, source.height),
            },
        );
        sprite_id
    }

    fn sprite_bounds(&self, sprite: SpriteId) -> Option<Bounds> {
        let state = self.state.lock().expect("surface poisoned");
        state.sprites.get(&sprite).map(|s| s.bounds)
    }

    fn set_sprite_position(&self, sprite: SpriteId, x: f64, y: f64) {
        let mut state = self.state.lock().expect("surface poisoned");
        if let Some(s) = state.sprites.get_mut(&sprite) {
            s.bounds.x = x;
            s.bounds.y = y;
        }
    }

    fn create_line(&self, region: &ElementId, from: (f64, f64), to: (f64, f64)) -> ShapeId {
        let mut state = self.state.lock().expect("surface poisoned");
        let shape_id = ShapeId::new(state.next_id());
        let x = from.0.min(to.0);
        let y = from.1.min(to.1);
        let bounds = Bounds::new(x, y, (from.0 - to.0).abs(), (from.1 - to.1).abs());
        state.shapes.insert(shape_id, ShapeState { region: region.clone(), bounds });
        shape_id
    }

    fn shape_bounds(&self, shape: ShapeId) -> Option<Bounds> {
        let state = self.state.lock().expect("surface poisoned");
        state.shapes.get(&shape).map(|s| s.bounds)
    }

    fn create_text(&self, region: &ElementId) -> TextId {
        let mut state = self.state.lock().expect("surface poisoned");
        let text_id = TextId::new(state.next_id());
        state.texts.insert(
            text_id,
            TextState {
                region: region.clone(),
                x: 0.0,
                y: 0.0,
                content: String::new(),
                size: DEFAULT_TEXT_SIZE,
            },
        );
        text_id
    }

    fn text_bounds(&self, text: TextId) -> Option<Bounds> {
        let state = self.state.lock().expect("surface poisoned");
        state.texts.get(&text).map(|t| Bounds::new(t.x, t.y, 0.0, 0.0))
    }

    fn set_text_position(&self, text: TextId, x: f64, y: f64) {
        let mut state = self.state.lock().expect("surface poisoned");
        if let Some(t) = state.texts.get_mut(&text) {
            t.x = x;
            t.y = y;
        }
    }

    fn text_content(&self, text: TextId) -> Option<String> {
        let state = self.state.lock().expect("surface poisoned");
        state.texts.get(&text).map(|t| t.content.clone())
    }

    fn set_text_content(&self, text: TextId, content: &str) {
        let mut state = self.state.lock().expect("surface poisoned");
        if let Some(t) = state.texts.get_mut(&text) {
            t.content = content.to_owned();
        }
    }

    fn text_size(&self, text: TextId) -> Option<f64> {
        let state = self.state.lock().expect("surface poisoned");
        state.texts.get(&text).map(|t| t.size)
    }

    fn set_text_size(&self, text: TextId, size: f64) {
        let mut state = self.state.lock().expect("surface poisoned");
        if let Some(t) = state.texts.get_mut(&text) {
            t.size = size;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MemorySurface;
    use crate::model::fixtures::{eid, region, shape};
    use crate::model::{Diagram, ShapeKind};
    use crate::render::{GraphicHandle, RenderSurface};

    fn surface() -> MemorySurface {
        let mut diagram = Diagram::new();
        region(&mut diagram, "w1");
        shape(&mut diagram, "g1", ShapeKind::Other, "", 10.0);
        MemorySurface::from_diagram(&diagram)
    }

    #[test]
    fn sprite_is_cloned_at_origin_with_source_size() {
        let surface = surface();
        let sprite = surface.create_sprite(&eid("w1"), &GraphicHandle::Element(eid("g1")));

        let bounds = surface.sprite_bounds(sprite).expect("sprite bounds");
        assert_eq!((bounds.x, bounds.y), (0.0, 0.0));
        assert_eq!((bounds.width, bounds.height), (100.0, 50.0));
    }

    #[test]
    fn clear_region_removes_created_objects() {
        let surface = surface();
        let sprite = surface.create_sprite(&eid("w1"), &GraphicHandle::Element(eid("g1")));
        let text = surface.create_text(&eid("w1"));
        assert_eq!(surface.object_count(&eid("w1")), 2);

        surface.clear_region(&eid("w1"));

        assert_eq!(surface.object_count(&eid("w1")), 0);
        assert!(surface.sprite_bounds(sprite).is_none());
        assert!(surface.text_content(text).is_none());
    }

    #[test]
    fn resize_region_updates_live_bounds() {
        let surface = surface();
        surface.resize_region(&eid("w1"), 800.0, 600.0);

        let bounds = surface.region_bounds(&eid("w1")).expect("region bounds");
        assert_eq!((bounds.width, bounds.height), (800.0, 600.0));
    }
}
