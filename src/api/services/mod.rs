pub mod admin;
pub mod history;
pub mod redirect;
pub mod render;

pub use admin::{AdminService, create_routes, list_routes};
pub use history::{HistoryService, history_routes};
pub use redirect::{RedirectService, redirect_routes};
