#[macro_use]
mod macros;
mod code;
mod visitor;

pub use code::*;
pub use visitor::*;

use crate::{error::DictError, item::DictItem, model::RecordModel};

///
/// DictRecord
///
/// Metadata provider for one structured type: its static field model
/// plus the handful of field reads and writes the resolver needs.
/// Usually emitted by `#[derive(Dict)]`.
///

pub trait DictRecord {
    fn model(&self) -> &'static RecordModel;

    /// Code string of a coded or parent field; `Ok(None)` when empty.
    fn read_code(&self, field: &str) -> Result<Option<String>, DictError>;

    /// Current content of an item slot, or `None` if no such slot exists.
    fn read_item(&self, field: &str) -> Option<Option<&DictItem>>;

    fn write_item(&mut self, field: &str, item: DictItem) -> Result<(), DictError>;
}
