//! Live order feed: the dashboard's "recent orders" widget.

pub mod events;
pub mod panel;
pub mod view;

pub use panel::LiveFeedPanel;
