//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]** — application state, keyboard event loop, pane focus,
//!   compile/run/write actions
//! - **[`panes`]** — stateless render functions for each visible pane
//!   (pseudocode, generated Python, program output, status bar)
//! - **[`theme`]** — centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with the source file,
//! its text and an [`Executor`], then call [`App::run`] to start the event loop.
//!
//! [`Executor`]: crate::runner::Executor
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
