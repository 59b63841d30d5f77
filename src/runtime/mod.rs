// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The interpreter session and the per-window scheduler.
//!
//! An [`Interp`] owns the persistent variable store and the map of running
//! windows; it is created when the host starts and torn down when the host
//! unloads — never ambient. Windows are scheduled independently: `setup`
//! runs once, then a 60Hz timer task runs `loop` until the window is
//! stopped, errors, or is restarted.

pub mod args;
pub mod builtins;
pub mod error;
pub mod eval;
pub mod fields;
pub mod infix;
pub mod input;
pub mod value;


use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};

use crate::budget::StepBudget;
use crate::model::{Diagram, ElementId, WindowAst};
use crate::render::RenderSurface;
use crate::report::{Annotations, Severity};

use eval::{run_instructions, EvalCtx};

pub use args::{bind_args, Actual, Param};
pub use builtins::Builtin;
pub use error::EvalError;
pub use input::{interpret_host_keys, InputState, Key};
pub use value::{Obj, Type};

const FRAME: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// Cooperative per-window cancellation flag.
///
/// A running chain checks it between instructions; the timer task checks it
/// at every tick. Once set it stays set.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Debug)]
struct RunHandle {
    cancel: CancelFlag,
}

/// One interpreter session: the variable store, the running-window map, and
/// the host collaborators.
pub struct Interp {
    surface: Arc<dyn RenderSurface>,
    annotations: Arc<dyn Annotations>,
    input: InputState,
    variables: Mutex<BTreeMap<ElementId, Obj>>,
    running: Mutex<BTreeMap<ElementId, RunHandle>>,
}

impl Interp {
    pub fn new(surface: Arc<dyn RenderSurface>, annotations: Arc<dyn Annotations>) -> Self {
        Self {
            surface,
            annotations,
            input: InputState::new(),
            variables: Mutex::new(BTreeMap::new()),
            running: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn surface(&self) -> &dyn RenderSurface {
        self.surface.as_ref()
    }

    pub fn annotations(&self) -> &dyn Annotations {
        self.annotations.as_ref()
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn variable(&self, element_id: &ElementId) -> Option<Obj> {
        self.variables.lock().expect("variable store poisoned").get(element_id).cloned()
    }

    pub(crate) fn set_variable(&self, element_id: ElementId, value: Obj) {
        self.variables.lock().expect("variable store poisoned").insert(element_id, value);
    }

    /// Drop every stored variable. Hosts call this on recompilation.
    pub fn clear_variables(&self) {
        self.variables.lock().expect("variable store poisoned").clear();
    }

    pub fn is_running(&self, region: &ElementId) -> bool {
        self.running.lock().expect("run map poisoned").contains_key(region)
    }

    /// Clear the window's region and cancel its run. Stopping a window that
    /// is not running only clears the region.
    pub fn stop(&self, region: &ElementId) {
        self.surface.clear_region(region);
        let handle = self.running.lock().expect("run map poisoned").remove(region);
        if let Some(handle) = handle {
            handle.cancel.cancel();
        }
    }

    fn register_run(&self, region: ElementId, cancel: CancelFlag) {
        self.running.lock().expect("run map poisoned").insert(region, RunHandle { cancel });
    }

    /// Headless execution: `setup` once, then `loop` a fixed number of times
    /// back to back. Errors annotate and stop the window, like `play`.
    pub async fn run_frames(
        &self,
        window: &WindowAst,
        diagram: &Diagram,
        frames: usize,
    ) -> Result<(), EvalError> {
        self.annotations.clear_all(Severity::Warning);
        self.annotations.clear_all(Severity::Error);
        self.surface.clear_region(&window.at);
        self.stop(&window.at);

        let cancel = CancelFlag::new();
        let result = self.run_frames_inner(window, diagram, frames, &cancel).await;
        if let Err(err) = &result {
            self.annotations.annotate(Severity::Error, &err.to_string(), err.at());
            self.stop(&window.at);
        }
        result
    }

    async fn run_frames_inner(
        &self,
        window: &WindowAst,
        diagram: &Diagram,
        frames: usize,
        cancel: &CancelFlag,
    ) -> Result<(), EvalError> {
        if let Some(setup) = &window.setup {
            let budget = StepBudget::new();
            let ctx = EvalCtx::new(self, diagram, &window.at, cancel, &budget);
            run_instructions(setup.first.as_ref(), &ctx).await?;
        }

        for _ in 0..frames {
            let Some(looped) = &window.looped else { break };
            let budget = StepBudget::new();
            let ctx = EvalCtx::new(self, diagram, &window.at, cancel, &budget);
            run_instructions(looped.first.as_ref(), &ctx).await?;
        }

        Ok(())
    }
}

/// Start a window: clear annotations and the region, cancel any prior run,
/// run `setup` once, then tick `loop` at 60Hz until stopped.
///
/// A fatal error during setup or a tick annotates the offending element and
/// stops the window; other windows are unaffected.
pub async fn play(interp: &Arc<Interp>, window: &Arc<WindowAst>, diagram: &Arc<Diagram>) {
    interp.annotations().clear_all(Severity::Warning);
    interp.annotations().clear_all(Severity::Error);
    interp.surface().clear_region(&window.at);
    interp.stop(&window.at);

    let cancel = CancelFlag::new();

    if let Some(setup) = &window.setup {
        let budget = StepBudget::new();
        let ctx = EvalCtx::new(interp, diagram, &window.at, &cancel, &budget);
        if let Err(err) = run_instructions(setup.first.as_ref(), &ctx).await {
            interp.annotations().annotate(Severity::Error, &err.to_string(), err.at());
            interp.stop(&window.at);
            return;
        }
    }

    let tick_interp = Arc::clone(interp);
    let tick_window = Arc::clone(window);
    let tick_diagram = Arc::clone(diagram);
    let tick_cancel = cancel.clone();
    tokio::spawn(async move {
        let mut timer = time::interval_at(time::Instant::now() + FRAME, FRAME);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            timer.tick().await;
            if tick_cancel.is_cancelled() {
                break;
            }
            let Some(looped) = tick_window.looped.as_ref() else { continue };

            let budget = StepBudget::new();
            let ctx = EvalCtx::new(
                &tick_interp,
                &tick_diagram,
                &tick_window.at,
                &tick_cancel,
                &budget,
            );
            if let Err(err) = run_instructions(looped.first.as_ref(), &ctx).await {
                tick_interp.annotations().annotate(Severity::Error, &err.to_string(), err.at());
                tick_interp.stop(&tick_window.at);
                break;
            }
        }
    });

    interp.register_run(window.at.clone(), cancel);
}

/// Apply one selection delta from the host.
///
/// A delta naming more than one element is ignored entirely (ambiguous
/// intent). Otherwise every window whose play trigger was selected starts
/// and every window whose stop trigger was selected stops.
pub async fn handle_selection(
    interp: &Arc<Interp>,
    windows: &[Arc<WindowAst>],
    diagram: &Arc<Diagram>,
    newly_selected: &BTreeSet<ElementId>,
) {
    if newly_selected.len() > 1 {
        return;
    }

    let selected = |triggers: &[ElementId]| {
        triggers.iter().any(|trigger| newly_selected.contains(trigger))
    };

    for window in windows {
        if selected(&window.play_triggers) {
            play(interp, window, diagram).await;
        }
    }

    for window in windows {
        if selected(&window.stop_triggers) {
            interp.stop(&window.at);
        }
    }
}
