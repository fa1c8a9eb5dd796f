mod book;
mod query;
mod side;
mod trade;

pub use book::{BookLevel, BookSnapshot};
pub use query::{SortOrder, TimeRange};
pub use side::Side;
pub use trade::{Trade, TradeId};
