//! Small-business admin domain built on the generic CRUD engines.
//!
//! This crate supplies what the engines deliberately do not own: the
//! entities ([`models`]), an in-memory persistence backend ([`store`]),
//! and the declarative per-entity screen configurations ([`configs`]).
//! Wiring a new entity means one model struct, one store, and one config
//! module — no new engine code.

pub mod configs;
pub mod models;
pub mod store;

pub use models::{Address, Category, Contract, Customer, EntityRef, LineItem, ServiceOffering};
pub use store::{MemoryStore, StoreLoader};
