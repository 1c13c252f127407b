//! Sections of an AutoYaST profile which describe the storage layout.
//!
//! The sections are plain data, already un-marshalled from the profile. Any
//! attribute that was not present in the profile is kept as `None`.

mod drive;
mod partition;
mod skip_list;

pub use self::{
    drive::{is_windows, DriveSpec, DriveType, DriveUse},
    partition::{PartitionSpec, RaidOptions},
    skip_list::{SkipKey, SkipList, SkipPredicate, SkipRule},
};
