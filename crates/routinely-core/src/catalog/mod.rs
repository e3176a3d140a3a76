//! Product catalog: the loaded product list and the filtered view of it.

pub mod store;
pub mod view;
