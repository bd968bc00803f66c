//! Catalog browsing: category paging and the custom scrollbar mapping.

pub mod paging;
pub mod scrollbar;

pub use paging::paginate;
pub use scrollbar::Scrollbar;
