//! Table-level data access.
//!
//! Each module owns the SQL for one table. Functions take a borrowed `Connection` (a
//! `Transaction` derefs to one), so callers decide the transaction boundary.

pub mod interviews;
pub mod notes;
pub mod tags;
