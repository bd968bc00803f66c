//! Background work: recurring read-only feeds.

pub mod order_feed;

pub use order_feed::PendingOrderFeed;
