pub mod context_list;

pub use context_list::{filter_items, ContextListWidget, StatusMessage};
