pub mod classify;
pub mod convert;
pub mod resolve_network;
pub mod validate;
