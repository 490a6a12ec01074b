pub mod cgt;
pub mod cii;
pub mod ltcg;
pub mod regime;
pub mod slab;
