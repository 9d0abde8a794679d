//! View models over the catalog engine

pub mod admin;
pub mod projection;
pub mod storefront;

pub use admin::{AdminMode, AdminPage, AdminView, Confirm, PAGE_SIZE};
pub use storefront::{GroupPanel, PanelContent, ProductCard, StorefrontRender, StorefrontView};
