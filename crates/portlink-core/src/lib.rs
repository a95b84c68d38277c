//! Portlink Core Types and Definitions
//!
//! This crate provides the record store that every other Portlink crate
//! operates on. It includes:
//!
//! - **Store**: The ordered collection of modules ([`store::Store`], [`store::Module`])
//! - **Ports**: Typed, directed attachment points ([`port::Port`], [`port::Direction`])
//! - **Fields**: Length bounds shared by the parser and the codec ([`field`] module)

pub mod field;
pub mod port;
pub mod store;

pub use port::{Direction, Port, PortRef, UNKNOWN_TYPE};
pub use store::{Link, Module, Store};
