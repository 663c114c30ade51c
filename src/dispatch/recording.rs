// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::time::Instant;

use crate::errors::DispatchError;
use crate::traits::CommandDispatcher;
use crate::types::Command;

/// A command together with the (tokio) instant it was accepted.
#[derive(Debug, Clone)]
pub struct RecordedCommand {
    pub command: Command,
    pub at: Instant,
}

/// Keeps every command in memory, in send order. Accepts immediately.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    log: Mutex<Vec<RecordedCommand>>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<RecordedCommand> {
        self.log.lock().clone()
    }

    pub fn commands(&self) -> Vec<Command> {
        self.records().into_iter().map(|r| r.command).collect()
    }

    /// Command names only, handy for order assertions.
    pub fn names(&self) -> Vec<String> {
        self.records().into_iter().map(|r| r.command.command).collect()
    }

    pub fn len(&self) -> usize {
        self.log.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.log.lock().clear();
    }
}

#[async_trait]
impl CommandDispatcher for RecordingDispatcher {
    async fn send(&self, command: Command) -> Result<(), DispatchError> {
        let record = RecordedCommand {
            command,
            at: Instant::now(),
        };
        self.log.lock().push(record);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}
