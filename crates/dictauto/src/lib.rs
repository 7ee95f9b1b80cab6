//! dictauto: fill display entries for coded fields in response graphs.
//!
//! Mark coded fields with `#[derive(Dict)]`, load rows into a
//! [`DictTable`](table::DictTable), then call [`inject`] on the value
//! before it is serialized. [`handler::DictHandler`] bundles the
//! discover, fetch and inject steps behind one call.

pub mod handler;

pub use dictauto_core::*;
pub use dictauto_derive::Dict;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Dict,
        handler::{DictHandler, DictSource},
    };
    pub use dictauto_core::prelude::*;
}
