pub mod chain;
pub mod download;
pub mod links;
pub mod methods;
