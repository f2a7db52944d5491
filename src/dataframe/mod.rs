pub mod core;
pub mod groupby;
pub mod io;
pub mod series;

pub use self::core::DataFrame;
pub use groupby::GroupBy;
pub use series::{AnyValue, DataType, Scalar, Series};
