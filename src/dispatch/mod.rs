//! [`CommandDispatcher`](crate::traits::CommandDispatcher) adapters.
//!
//! - [`RecordingDispatcher`]: in-memory, for tests and dry runs
//! - [`ChannelDispatcher`]: hands commands to a bridge task, optionally waiting for its ack
//! - [`JsonLinesDispatcher`]: one JSON object per line on any writer

mod channel;
mod json_lines;
mod recording;

pub use channel::{ChannelDispatcher, Delivery};
pub use json_lines::JsonLinesDispatcher;
pub use recording::{RecordedCommand, RecordingDispatcher};
