//! Interactive terminal chat for Parley.
//!
//! Implements the chat loop: thinking spinner, markdown rendering, welcome
//! banner and slash commands. Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
