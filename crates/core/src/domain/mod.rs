pub mod event;
pub mod quote;
