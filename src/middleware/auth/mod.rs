pub mod context;

pub use context::apply;
