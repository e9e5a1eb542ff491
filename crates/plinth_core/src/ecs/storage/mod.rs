// mod.rs - Storage module exports

mod column;
mod store;

pub use column::Column;
pub use store::ComponentStore;
