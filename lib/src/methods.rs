//! Method resolver implementations
//!
//! Each resolver owns exactly one resolution strategy and is registered with
//! a [`ResolverRegistry`](crate::ResolverRegistry) under one
//! `(prefix, method)` pair. New methods are added by registering new entries,
//! never by branching inside the registry.

mod delegated;
mod key;
mod ledger;

pub use delegated::*;
pub use key::*;
pub use ledger::*;
