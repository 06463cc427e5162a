pub mod index;
pub mod convert;
pub mod upload;
