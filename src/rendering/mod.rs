//! Presentation layer: badge, checkout table and their delegated events.
//!
//! Nothing here caches cart state across mutations; the badge and table are
//! projections recomputed from the store on demand.

pub mod badge;
pub mod context;
pub mod events;
pub mod format;
pub mod table;

pub use badge::{BadgeElement, BadgePresenter, BadgeSlot, BadgeState};
pub use context::{Layout, Mode, RenderContext};
pub use events::{CartAction, EventTarget, UiEvent};
pub use format::CurrencyFormat;
pub use table::{Cell, CartTable, Row, TableView};
