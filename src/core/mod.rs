mod amounts;
mod engine;
mod error;
mod types;

pub use amounts::{parse_amounts, sum_amounts};
pub use engine::{MAX_PEOPLE, apply_tax, check_people_count, split_bill, tax_rate};
pub use error::{Result, SplitError};
pub use types::{ItemPass, PersonItems, PersonShare, SplitInputs, SplitReport};
