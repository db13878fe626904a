// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidelink and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The comparison controller.
//!
//! Owns the view state, the current row layout and the connector overlay, and exposes the three
//! entry points a front end wires to its controls: mode selection, the connectors toggle and
//! viewport changes. Geometry always arrives as a [`SpanMeasure`], so every transition can be
//! driven from tests without a surface.
//!
//! Entering side-by-side rebuilds rows and defers the first connector draw through a
//! [`Scheduler`] until the new rows have been laid out. All other redraws happen inline.

use std::collections::VecDeque;

use tracing::{debug, info};

use crate::layout::{build_rows, RowLayout, SpanMeasure};
use crate::model::{Category, CategoryCounts, ComparisonSource};
use crate::render::{draw_connectors, pair_count, Overlay};
use crate::ui::{ComparisonState, ViewMode};

/// Work postponed until after the next layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    DrawConnectors,
}

/// "Run this once the surface has laid out the latest content."
pub trait Scheduler {
    fn defer(&mut self, task: Deferred);
}

/// FIFO of deferred tasks, drained by the front end right after it lays out a frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameQueue {
    tasks: VecDeque<Deferred>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn drain(&mut self) -> Vec<Deferred> {
        self.tasks.drain(..).collect()
    }
}

impl Scheduler for FrameQueue {
    fn defer(&mut self, task: Deferred) {
        self.tasks.push_back(task);
    }
}

#[derive(Debug)]
pub struct ComparisonController<S: Scheduler = FrameQueue> {
    source: Option<ComparisonSource>,
    state: ComparisonState,
    rows: Option<RowLayout>,
    overlay: Overlay,
    scheduler: S,
    rebuilds: u64,
    draws: u64,
}

impl<S: Scheduler> ComparisonController<S> {
    /// `source` may be absent; every operation then degrades to a no-op.
    pub fn new(source: Option<ComparisonSource>, scheduler: S) -> Self {
        Self {
            source,
            state: ComparisonState::default(),
            rows: None,
            overlay: Overlay::new(),
            scheduler,
            rebuilds: 0,
            draws: 0,
        }
    }

    pub fn source(&self) -> Option<&ComparisonSource> {
        self.source.as_ref()
    }

    pub fn state(&self) -> &ComparisonState {
        &self.state
    }

    pub fn rows(&self) -> Option<&RowLayout> {
        self.rows.as_ref()
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Number of row rebuilds so far.
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    /// Number of connector draws so far (including draws that produced nothing).
    pub fn draw_count(&self) -> u64 {
        self.draws
    }

    /// Mode selection. Side-by-side always rebuilds, even when already active.
    pub fn on_mode_change(&mut self, mode: ViewMode) {
        self.state.set_mode(mode);
        match mode {
            ViewMode::SideBySide => self.refresh(),
            ViewMode::Analysis => {
                self.overlay.clear();
                self.state.bump();
            }
        }
    }

    /// Connectors checkbox. Redraws against current rows; never rebuilds.
    pub fn on_connectors_toggle<M: SpanMeasure + ?Sized>(&mut self, enabled: bool, measure: &M) {
        self.state.set_connectors_enabled(enabled);
        if self.state.mode() == ViewMode::SideBySide {
            self.redraw(measure);
        } else {
            self.overlay.clear();
        }
    }

    /// Resize or scroll. Only side-by-side has anything to redraw.
    pub fn on_viewport_change<M: SpanMeasure + ?Sized>(&mut self, measure: &M) {
        if self.state.mode() != ViewMode::SideBySide {
            return;
        }
        self.redraw(measure);
    }

    /// Rebuilds rows and schedules the first draw for after the next layout pass.
    pub fn refresh(&mut self) {
        self.rebuild();
        self.scheduler.defer(Deferred::DrawConnectors);
    }

    /// Replaces the row layout wholesale. Leaves the overlay empty until the next draw.
    pub fn rebuild(&mut self) {
        self.overlay.clear();
        let Some(source) = &self.source else {
            debug!("no documents to compare; skipping row rebuild");
            return;
        };

        let rows = build_rows(&source.left, &source.right);
        info!(
            left = %source.left.id(),
            right = %source.right.id(),
            rows = rows.len(),
            "rebuilt comparison rows"
        );
        self.rows = Some(rows);
        self.rebuilds += 1;
        self.state.bump();
    }

    /// Runs one deferred task against current geometry.
    ///
    /// A task left over from an earlier mode still runs; the draw reads the current state and
    /// clears the overlay when connectors are not visible.
    pub fn run_deferred<M: SpanMeasure + ?Sized>(&mut self, task: Deferred, measure: &M) {
        match task {
            Deferred::DrawConnectors => {
                self.redraw(measure);
            }
        }
    }

    /// Clears and repopulates the overlay. Returns the number of connectors drawn.
    pub fn redraw<M: SpanMeasure + ?Sized>(&mut self, measure: &M) -> usize {
        let drawn = draw_connectors(
            self.rows.as_ref(),
            self.state.connectors_visible(),
            measure,
            &mut self.overlay,
        );
        self.draws += 1;
        self.state.bump();
        debug!(drawn, mode = %self.state.mode(), "connector draw");
        drawn
    }
}

impl ComparisonController<FrameQueue> {
    /// Runs everything deferred until now. Call right after the surface laid out a frame.
    pub fn after_layout<M: SpanMeasure + ?Sized>(&mut self, measure: &M) -> usize {
        let tasks = self.scheduler.drain();
        let count = tasks.len();
        for task in tasks {
            self.run_deferred(task, measure);
        }
        count
    }
}

/// One line of the analysis view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryLine {
    pub category: Category,
    pub left: usize,
    pub right: usize,
    /// Connectors the pairing rule yields for this category across all rows.
    pub links: usize,
}

/// Per-category highlight counts for both documents, in [`Category::ALL`] order.
pub fn analysis_summary(source: &ComparisonSource) -> Vec<SummaryLine> {
    let left = CategoryCounts::from_document(&source.left);
    let right = CategoryCounts::from_document(&source.right);
    let rows = build_rows(&source.left, &source.right);

    Category::ALL
        .into_iter()
        .map(|category| SummaryLine {
            category,
            left: left.get(category),
            right: right.get(category),
            links: rows.rows().iter().map(|row| pair_count(row, category)).sum(),
        })
        .collect()
}
