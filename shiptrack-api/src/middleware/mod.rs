pub mod access;
pub mod cors;

pub use access::PublicKey;
pub use cors::{origin_gate, OriginPolicy};
