//! API endpoint modules.

mod as_info;
mod bgp;
mod catalog;
mod probe;

pub use as_info::AsInfoApi;
pub use bgp::BgpApi;
pub use catalog::CatalogApi;
pub use probe::ProbeApi;
