// NOTE: odgrid Architecture Rationale
//
// Why a server-authoritative grid (not a client-side cache)?
// - Sort and filter are translated to $orderby/$filter and evaluated remotely,
//   so the fetched collection is always the displayed collection
// - After a write the grid patches the one affected row; everything else is
//   untouched until the next fetch
// - Trade-off: every sort or filter change costs a round trip, but there is
//   exactly one source of truth and no cache-invalidation logic
//
// Why edits buffer locally until save?
// - Intermediate keystrokes never issue network calls
// - Abandoning an edit (cancel, or editing another row) is free and silent
// - Trade-off: a failed save drops the buffer; the pre-edit values stand

mod args;
mod commands;
pub mod app;
pub mod config;
pub mod datasets;
pub mod demo;
pub mod handlers;
pub mod types;
pub mod ui;

pub use args::{Cli, Commands};
pub use commands::run;
