pub mod enhancement;
pub mod portfolio;
