pub mod equivalence;
pub mod faults;
pub mod snapshot;
