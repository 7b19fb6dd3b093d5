// crates/core/src/lib.rs

//! Shared mock store and the validate → mutate → respond toolkit used by the
//! domain tool packs.

pub mod cascade;
pub mod clock;
pub mod envelope;
pub mod error;
pub mod filter;
pub mod interface;
pub mod record;
pub mod store;
pub mod table;
pub mod tool;
pub mod validate;

pub use cascade::{cascade_delete, CascadeReport, CascadeRule};
pub use clock::{Clock, FixedClock, SystemClock, DEFAULT_FIXTURE_TIMESTAMP};
pub use error::ToolError;
pub use interface::Interface;
pub use record::{de_id, de_opt_id, record_from, Record, RecordExt, RecordId};
pub use store::Store;
pub use table::{Table, TableSchema};
pub use tool::{parse_args, Tool, ToolContext};
pub use validate::{apply_mutation, FieldRules, Rule};
