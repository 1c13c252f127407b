//! Turns the drive sections of a profile into planned devices.
//!
//! The drives are first associated to the devices they describe through a
//! [`DrivesMap`], and then each drive is handed to the planner of its type.
//! Nothing is ever allocated here: sizes are ranges or percentages that the
//! allocation engine resolves later against the real free space.

mod base_planner;
mod devices_planner;
mod disk_planner;
mod drives_map;
mod md_planner;
mod size_parser;
mod vg_planner;

pub use self::{
    base_planner::{add_device_reuse, PlannerExt, Reusable},
    devices_planner::DevicesPlanner,
    disk_planner::DiskPlanner,
    drives_map::DrivesMap,
    md_planner::MdPlanner,
    size_parser::{SizeError, SizeInfo, SizeParser},
    vg_planner::VgPlanner,
};

use crate::{
    devicegraph::Devicegraph, issues::IssuesList, planned::PlannedDevice, profile::DriveSpec,
    settings::ProposalSettings,
};

/// Plans the devices for the given drive sections in a single pass.
pub fn planned_devices(
    devicegraph: &Devicegraph,
    settings: &ProposalSettings,
    drives: &[DriveSpec],
    issues: &mut IssuesList,
) -> Vec<PlannedDevice> {
    let drives_map = DrivesMap::new(devicegraph, drives, issues);
    if !drives_map.has_partitions() {
        info!("no drive describes any partition");
    }

    DevicesPlanner::new(devicegraph, settings).planned_devices(&drives_map, issues)
}
