//! Store contract integration tests.

mod contract;
mod in_memory;
