//! A crate for planning the storage devices of an AutoYaST installation.
//!
//! The `<drive>` sections of a profile are matched against the devices found
//! on the system, and every section is turned into partitions, volume groups
//! or software RAIDs that an allocation engine can later place on the disks.

extern crate dirs;
extern crate disk_types;
extern crate failure;
extern crate fern;
extern crate itertools;
#[macro_use]
extern crate derive_new;
#[macro_use]
extern crate failure_derive;
#[macro_use]
extern crate log;

pub mod devicegraph;
pub mod issues;
mod logging;
pub mod planned;
pub mod profile;
pub mod proposal;
pub mod resize;
pub mod settings;
pub mod subvol;

pub use self::{
    devicegraph::Devicegraph,
    issues::{Issue, IssueKind, IssuesList, SectionRef},
    logging::log,
    planned::PlannedDevice,
    profile::{DriveSpec, DriveType, PartitionSpec},
    proposal::{planned_devices, DevicesPlanner, DrivesMap},
    resize::ResizeError,
    settings::ProposalSettings,
};
