// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::time::Duration;

use serde::Serialize;

/// Lifecycle of an [`Engine`](super::Engine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Completed,
}

/// Summary of one completed run.
///
/// Task failures never abort a run, so a report is always produced; a
/// non-zero `tasks_failed` is how callers learn something went wrong.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RunReport {
    pub state: RunState,
    pub tasks_run: usize,
    pub tasks_failed: usize,
    pub nodes_skipped: usize,
    pub commands_dispatched: usize,
    pub evaluation_fallbacks: usize,
    pub loop_caps_hit: usize,
    #[serde(serialize_with = "serialize_millis")]
    pub duration: Duration,
}

impl RunReport {
    pub fn is_clean(&self) -> bool {
        self.tasks_failed == 0 && self.nodes_skipped == 0 && self.evaluation_fallbacks == 0
    }
}

fn serialize_millis<S: serde::Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}
