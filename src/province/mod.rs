//! Province index: the static province list used for autocomplete

mod dataset;
mod index;

pub use dataset::{BUILTIN_PROVINCES, REGION_CENTRAL, REGION_NORTH, REGION_SOUTH};
pub use index::{ProvinceError, ProvinceIndex, ProvinceRecord};
