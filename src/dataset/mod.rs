//! Turning raw delimited text into a [`Dataset`](crate::common_types::Dataset) and
//! cutting it into train/test subsets.

pub mod parser;
pub mod split;

pub use parser::{parse_dataset, FIELD_DELIMITER};
pub use split::{train_test_split, DEFAULT_TRAIN_RATIO};
