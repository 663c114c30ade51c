// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::io::Write;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::errors::DispatchError;
use crate::traits::CommandDispatcher;
use crate::types::Command;

/// Writes each command as one JSON object per line and flushes it.
///
/// The write is synchronous; commands are small and the engine waits for
/// each send anyway.
#[derive(Debug)]
pub struct JsonLinesDispatcher<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesDispatcher<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl JsonLinesDispatcher<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

#[async_trait]
impl<W: Write + Send> CommandDispatcher for JsonLinesDispatcher<W> {
    async fn send(&self, command: Command) -> Result<(), DispatchError> {
        let line = serde_json::to_string(&command)?;
        let mut writer = self.writer.lock();
        writeln!(writer, "{}", line)?;
        writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "json-lines"
    }
}
