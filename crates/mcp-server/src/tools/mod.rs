//! Tool catalog and dispatch

mod catalog;
mod dispatch;

pub use catalog::{ToolCatalog, DETECT_AUTH, GET_ENDPOINT, LIST_ENDPOINTS};
pub use dispatch::ToolDispatcher;
