pub mod hash;
pub mod hashfn;
pub mod hmac;

pub use hashfn::DigestAlgorithm;
