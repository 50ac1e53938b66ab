//! Patient biometrics held in an id-sorted doubly-linked list, with
//! min/max partitioning and average-weight reporting.

mod config;
mod errors;
mod extremes;
mod handle;
mod node;
mod ordered_list;
mod patient;
mod report;

pub use config::{Config, OpenError, UsageError};
pub use errors::{ListError, ParseError};
pub use extremes::{Bounds, Extremes, Extremum};
pub use handle::Handle;
pub use ordered_list::{Iter, OrderedList};
pub use patient::{parse_patients, read_patients, Patient};
pub use report::{load_sorted, write_report};
