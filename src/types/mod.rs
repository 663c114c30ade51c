// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod command;
mod value;

pub use command::{Command, VALUE_KEY};
pub use value::Value;
