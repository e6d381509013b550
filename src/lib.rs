//! Number castle - drag-and-drop core of a hundred-square teaching board.
//!
//! Caches (coloured tiles) and masks (3×3 operation masks showing ±1/±10)
//! are dragged from sidebar templates onto a castle illustration, moved
//! around, and dropped on a trash to delete them. Every commit can be undone.
//!
//! The crate is headless: views forward pointer events to a [`castle::Castle`]
//! and draw the [`scene::Scene`] it publishes.

pub mod board;
pub mod castle;
pub mod constants;
pub mod debounce;
pub mod error;
pub mod geometry;
pub mod history;
pub mod input;
pub mod perf;
pub mod reference;
pub mod scene;
pub mod settings;
pub mod settings_watcher;
pub mod spatial_index;
pub mod template;
pub mod types;

pub use error::{CastleError, CastleResult};
