//! Racer identity resolution
//!
//! Result pages carry no personal identifier, only a name and an age category
//! valid on race day. Each row is attached to the oldest racer with the same
//! name whose inferred birth-date window is still compatible, or to a newly
//! minted racer when none is.
//!
//! ## Architecture
//!
//! - [`store`] - the [`RacerStore`] interface the resolver reads and writes
//! - [`window`] - category to birth-window inference and history folding
//! - [`resolver`] - per-row decisions and operator merges

pub mod resolver;
pub mod store;
pub mod window;

#[cfg(test)]
pub mod tests;

pub use resolver::{Resolution, ResolvedRow, merge_racers, resolve_race, resolve_row};
pub use store::RacerStore;
