//! Core runtime for dictauto: the graph walker, the dictionary resolver,
//! lookup tables, configuration, and the traits emitted by `#[derive(Dict)]`.
#![warn(unreachable_pub)]

extern crate self as dictauto;

// public exports are one module level down
pub mod config;
pub mod error;
pub mod item;
pub mod model;
pub mod obs;
pub mod resolve;
pub mod table;
pub mod traits;
pub mod visitor;

pub use visitor::{discover, inject};

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No visitors, adapters, or error types are re-exported here.
///

pub mod prelude {
    pub use crate::{
        config::DictConfig,
        item::DictItem,
        table::DictTable,
        traits::{DictCode, DictRecord, Visitable},
    };
}
