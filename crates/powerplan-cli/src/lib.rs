//! Library half of the `powerplan-cli` binary: input loading and rendering.

pub mod input;
pub mod output;
pub mod terminal;
