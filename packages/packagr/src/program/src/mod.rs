pub mod discovery;
pub mod sources;
pub mod unit;
