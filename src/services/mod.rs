//! Application services sitting between HTTP handlers and the backend.
//!
//! Services never return errors to handlers: backend and validation problems
//! are turned into outcomes the pages can show.

pub mod admission;
pub mod assembler;
pub mod contact;
pub mod settings;
pub mod submission;
