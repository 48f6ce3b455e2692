// Library surface for the binary and the integration tests.
// Everything below the TUI lives here; main.rs only wires terminal I/O.
pub mod action;
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod error;
pub mod feedback;
pub mod input;
pub mod migrate;
pub mod persist;
pub mod reducer;
pub mod runtime;
pub mod session;
pub mod state;
pub mod util;
pub mod word;
pub mod wordlist;
