pub mod annual_index;
pub mod events;
pub mod journal;
pub mod menu;
pub mod search;
pub mod selection;

pub use annual_index::AnnualIndex;
pub use journal::{EditOutcome, Journal};
pub use selection::SelectionState;
