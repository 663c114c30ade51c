// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::errors::DispatchError;
use crate::traits::CommandDispatcher;
use crate::types::Command;

/// One command handed to the bridge.
///
/// In acknowledged mode the engine waits until the bridge calls
/// [`acknowledge`](Self::acknowledge). Dropping the delivery instead fails
/// the send with [`DispatchError::AckDropped`].
#[derive(Debug)]
pub struct Delivery {
    pub command: Command,
    ack: Option<oneshot::Sender<()>>,
}

impl Delivery {
    pub fn acknowledge(self) {
        if let Some(ack) = self.ack {
            // Sender side may have given up already; nothing left to tell it.
            let _ = ack.send(());
        }
    }

    pub fn expects_ack(&self) -> bool {
        self.ack.is_some()
    }
}

/// Forwards commands to a bridge task over a bounded channel.
#[derive(Debug, Clone)]
pub struct ChannelDispatcher {
    sender: mpsc::Sender<Delivery>,
    acknowledged: bool,
}

impl ChannelDispatcher {
    /// `send` returns once the bridge acknowledges the command.
    pub fn acknowledged(capacity: usize) -> (Self, mpsc::Receiver<Delivery>) {
        Self::with_mode(capacity, true)
    }

    /// `send` returns as soon as the command is queued.
    pub fn fire_and_forget(capacity: usize) -> (Self, mpsc::Receiver<Delivery>) {
        Self::with_mode(capacity, false)
    }

    fn with_mode(capacity: usize, acknowledged: bool) -> (Self, mpsc::Receiver<Delivery>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender, acknowledged }, receiver)
    }
}

#[async_trait]
impl CommandDispatcher for ChannelDispatcher {
    async fn send(&self, command: Command) -> Result<(), DispatchError> {
        let name = command.command.clone();

        let (ack, acked) = if self.acknowledged {
            let (tx, rx) = oneshot::channel();
            (Some(tx), Some(rx))
        } else {
            (None, None)
        };

        self.sender
            .send(Delivery { command, ack })
            .await
            .map_err(|_| DispatchError::ChannelClosed { command: name.clone() })?;

        if let Some(acked) = acked {
            acked.await.map_err(|_| DispatchError::AckDropped { command: name })?;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        if self.acknowledged {
            "channel(acknowledged)"
        } else {
            "channel(fire-and-forget)"
        }
    }
}
