mod address;
mod as_info;
mod common;
mod dns;
mod route;
mod router;

pub use address::*;
pub use as_info::*;
pub use common::*;
pub use dns::*;
pub use route::*;
pub use router::*;
