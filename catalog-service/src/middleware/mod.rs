pub mod payload;

pub use payload::ProductPayload;
