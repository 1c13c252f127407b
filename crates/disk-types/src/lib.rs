//! Value types and traits shared by the devicegraph and the storage planners.

#[macro_use]
extern crate bitflags;
extern crate failure;
#[macro_use]
extern crate failure_derive;

mod device;
mod fs;
mod md;
mod partition;
mod size;
mod table;

pub use self::{device::*, fs::*, md::*, partition::*, size::*, table::*};
