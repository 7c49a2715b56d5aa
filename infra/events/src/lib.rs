//! # Event Bus
//!
//! A synchronous, string-keyed event bus for decoupling producers of state
//! changes from their consumers inside one process.
//!
//! ## Overview
//!
//! Provides a centralized [`EventBus`] that maps opaque type keys (e.g.
//! `"change:name"`) to ordered handler lists. Firing a type invokes every
//! registered handler on the caller's thread, in subscription order, before
//! the fire call returns. `FxHashMap` + `parking_lot::RwLock` keep lookups
//! cheap, and the lock is never held while handlers run.
//!
//! ## Features
//!
//! * **Exact keys**: type keys are opaque non-empty strings; no wildcard or
//!   namespace matching.
//! * **Reference identity**: a `(type, handler)` pair registers at most once;
//!   dedup compares handler references, never closure bodies.
//! * **Synchronous dispatch**: handlers run inline; there is no queue, no
//!   scheduler, and no cross-thread delivery.
//! * **Reentrancy-safe**: handlers may subscribe, unsubscribe, or publish
//!   from inside a dispatch; the running pass iterates a snapshot.
//! * **One-shot mode**: [`EventBus::subscribe_once`] self-deregisters before
//!   its first invocation.
//!
//! # Example
//!
//! ```rust
//! use herald_event_bus::{EventBus, Handler};
//! use std::sync::{Arc, Mutex};
//!
//! let bus = EventBus::new();
//! let names = Arc::new(Mutex::new(Vec::new()));
//!
//! let sink = Arc::clone(&names);
//! let handler = Handler::new(move |event| {
//!     if let Some(name) = event.data::<&str>() {
//!         sink.lock().unwrap().push(*name);
//!     }
//! });
//!
//! assert!(bus.subscribe("change:name", handler.clone()));
//! bus.publish_with("change:name", "bill");
//! bus.publish_with("change:name", "ada");
//!
//! assert_eq!(*names.lock().unwrap(), vec!["bill", "ada"]);
//! assert_eq!(bus.handlers("change:name"), vec![handler]);
//! ```

mod bus;
mod error;
mod event;
mod global;
mod handler;

pub use bus::EventBus;
pub use error::EventBusError;
pub use event::Event;
pub use global::global;
pub use handler::Handler;
