pub mod product;

pub use product::{Product, IDENTITY_FIELD};
