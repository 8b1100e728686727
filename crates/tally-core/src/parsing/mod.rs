pub mod amount;
pub mod label;

pub use amount::coerce_amount;
pub use label::match_total_label;
