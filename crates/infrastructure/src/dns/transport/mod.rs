pub mod https;

pub use https::DohForwarder;
