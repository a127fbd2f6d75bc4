pub mod form_control;
pub mod gauges;
pub mod primitives;
pub mod rich_text;
pub mod true_false;
