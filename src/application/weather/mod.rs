//! Weather forecast loading.

pub mod cache;
pub mod lookup;
pub mod normalize;
