// Engine module - editable-grid core logic
// This layer sits between the gateway boundary (types) and CLI presentation

pub mod cell;
pub mod export;
pub mod local;
pub mod lookup;
pub mod pipeline;
pub mod session;

pub use cell::{CellRenderer, DefaultRenderer, EditControl, commit_input, edit_control, value_text};
pub use export::{Worksheet, worksheet};
pub use local::LocalGateway;
pub use lookup::{LookupSet, LookupTable};
pub use pipeline::row_model;
pub use session::EditSession;
