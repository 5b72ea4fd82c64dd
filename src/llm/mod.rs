pub mod backend;
pub mod client;
pub mod gemini;
pub mod prompts;
#[cfg(test)]
pub(crate) mod scripted;

pub use backend::*;
pub use client::*;
pub use gemini::*;
pub use prompts::*;
