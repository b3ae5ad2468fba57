mod api;
mod error;
mod interop;

pub use api::{bloat_and_simplify, make_indexed_collection, set_panic_hook};
