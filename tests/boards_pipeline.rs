// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! End-to-end pipeline over snapshot fixtures: JSON -> diagram -> compiled
//! windows -> headless execution on the in-memory surface.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use galatea::budget::StepBudget;
use galatea::compile::compile_page;
use galatea::format::outline;
use galatea::model::{Diagram, ElementId, WindowAst};
use galatea::render::{MemorySurface, RenderSurface};
use galatea::report::{NoticeLog, Severity};
use galatea::runtime::{interpret_host_keys, Interp, Obj};
use galatea::snapshot::diagram_from_json;

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join("boards")
}

fn read_board(name: &str) -> Diagram {
    let path = fixtures_dir().join(name);
    let text = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {path:?}: {err}"));
    diagram_from_json(&text).unwrap_or_else(|err| panic!("failed to parse {name}: {err}"))
}

fn eid(value: &str) -> ElementId {
    ElementId::new(value).expect("element id")
}

struct Board {
    diagram: Diagram,
    windows: Vec<WindowAst>,
    log: Arc<NoticeLog>,
    surface: Arc<MemorySurface>,
    interp: Interp,
}

fn load(name: &str) -> Board {
    let diagram = read_board(name);
    let log = Arc::new(NoticeLog::new());
    let budget = StepBudget::new();
    let windows = compile_page(&diagram, log.as_ref(), &budget).expect("compile");
    let surface = Arc::new(MemorySurface::from_diagram(&diagram));
    let interp = Interp::new(surface.clone(), log.clone());
    Board { diagram, windows, log, surface, interp }
}

#[test]
fn counter_board_compiles_with_triggers_and_without_warnings() {
    let board = load("counter.json");

    assert_eq!(board.windows.len(), 1);
    let window = &board.windows[0];
    assert_eq!(window.play_triggers, vec![eid("play")]);
    assert_eq!(window.stop_triggers, vec![eid("stop")]);
    assert!(window.setup.is_some());
    assert!(window.looped.is_some());
    assert!(board.log.notices_of(Severity::Warning).is_empty());

    let rendered = outline(window);
    assert!(rendered.contains("flow 'setup'"));
    assert!(rendered.contains("-> variable 'score' (score)"));
}

#[tokio::test]
async fn counter_board_counts_frames() {
    let board = load("counter.json");
    let window = &board.windows[0];

    board.interp.run_frames(window, &board.diagram, 10).await.expect("run");

    let score = board.interp.variable(&eid("score")).expect("score");
    assert_eq!(score.as_number(), Some(10.0));
}

#[tokio::test]
async fn sprite_chase_moves_the_sprite_while_right_is_held() {
    let board = load("sprite_chase.json");
    let window = &board.windows[0];

    board.interp.input().update_pressed(interpret_host_keys(["ArrowRight"]));
    board.interp.run_frames(window, &board.diagram, 5).await.expect("run");

    let player = board.interp.variable(&eid("player")).expect("player variable");
    let Obj::Sprite { sprite, .. } = player else {
        panic!("expected sprite, got {player:?}");
    };
    let bounds = board.surface.sprite_bounds(sprite).expect("sprite bounds");
    assert_eq!(bounds.x, 10.0, "five frames at +2 each");
    assert_eq!((bounds.width, bounds.height), (32.0, 32.0), "cloned from the art element");

    // Releasing the key freezes the sprite.
    board.interp.input().update_pressed(BTreeSet::new());
    board.interp.run_frames(window, &board.diagram, 5).await.expect("run again");
    let player = board.interp.variable(&eid("player")).expect("player variable");
    let Obj::Sprite { sprite, .. } = player else {
        panic!("expected sprite, got {player:?}");
    };
    let bounds = board.surface.sprite_bounds(sprite).expect("sprite bounds");
    assert_eq!(bounds.x, 0.0, "a fresh run respawns the sprite at the origin");
}

#[test]
fn boards_compile_deterministically() {
    for name in ["counter.json", "sprite_chase.json"] {
        let diagram = read_board(name);
        let log = NoticeLog::new();

        let first = {
            let budget = StepBudget::new();
            compile_page(&diagram, &log, &budget).expect("compile")
        };
        let second = {
            let budget = StepBudget::new();
            compile_page(&diagram, &log, &budget).expect("compile")
        };
        assert_eq!(first, second, "{name} must compile to a deep-equal tree");
    }
}
