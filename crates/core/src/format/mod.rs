pub mod markdown;
pub mod numbers;

pub use markdown::format_message;
pub use numbers::{format_ceil, format_currency, format_number, format_percent};
