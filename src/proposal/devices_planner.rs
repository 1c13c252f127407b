use super::{DiskPlanner, DrivesMap, MdPlanner, VgPlanner};
use crate::{
    devicegraph::Devicegraph,
    issues::{IssueKind, IssuesList, SectionRef},
    planned::PlannedDevice,
    profile::{DriveSpec, DriveType},
    settings::ProposalSettings,
};

/// Turns every drive of a drives map into the devices to be created or reused.
pub struct DevicesPlanner<'a> {
    devicegraph: &'a Devicegraph,
    settings:    &'a ProposalSettings,
}

impl<'a> DevicesPlanner<'a> {
    pub fn new(devicegraph: &'a Devicegraph, settings: &'a ProposalSettings) -> DevicesPlanner<'a> {
        DevicesPlanner { devicegraph, settings }
    }

    /// Plans the devices of all drives, in the order of the drives map.
    ///
    /// Problems are reported through `issues`: a drive that cannot be planned
    /// contributes no devices, but never stops the planning of the others.
    pub fn planned_devices(
        &self,
        drives_map: &DrivesMap,
        issues: &mut IssuesList,
    ) -> Vec<PlannedDevice> {
        let mut devices = Vec::new();

        for (name, drive) in drives_map.iter() {
            let planned = self.planned_for_drive(name, drive, issues);
            debug!("{}: {} planned devices", name, planned.len());
            devices.extend(planned);
        }

        remove_shadowed_subvolumes(&mut devices);
        devices
    }

    fn planned_for_drive(
        &self,
        name: &str,
        drive: &DriveSpec,
        issues: &mut IssuesList,
    ) -> Vec<PlannedDevice> {
        match drive.drive_type() {
            DriveType::Disk => match self.devicegraph.find_disk_by_any_name(name) {
                Some(disk) => DiskPlanner::new(self.devicegraph, self.settings)
                    .planned_for_disk(disk, drive, issues)
                    .into_iter()
                    .map(PlannedDevice::from)
                    .collect(),
                None => {
                    issues.add(IssueKind::NoDisk, SectionRef::Drive { device: Some(name.into()) });
                    Vec::new()
                }
            },
            DriveType::Lvm => {
                let vg = VgPlanner::new(self.devicegraph, self.settings)
                    .planned_for_vg(name, drive, issues);
                vec![vg.into()]
            }
            DriveType::Md => MdPlanner::new(self.devicegraph, self.settings)
                .planned_for_md(name, drive, issues)
                .map(PlannedDevice::from)
                .into_iter()
                .collect(),
        }
    }
}

/// Drops the subvolumes that other planned file systems would hide once mounted.
fn remove_shadowed_subvolumes(devices: &mut [PlannedDevice]) {
    let mount_points: Vec<Option<String>> = devices
        .iter()
        .flat_map(PlannedDevice::filesystems)
        .map(|attrs| attrs.mount_point.clone())
        .collect();

    let filesystems = devices.iter_mut().flat_map(PlannedDevice::filesystems_mut);
    for (index, attrs) in filesystems.enumerate() {
        let others = mount_points
            .iter()
            .enumerate()
            .filter(|&(other, _)| other != index)
            .filter_map(|(_, mount_point)| mount_point.as_deref());

        for subvol in attrs.shadowed_subvolumes(others) {
            if attrs.default_subvolumes_used {
                info!("Default subvolume {} would be shadowed. Removing it.", subvol.path);
            } else {
                warn!("Subvolume {} would be shadowed. Removing it.", subvol.path);
            }
            attrs.remove_subvolume(&subvol);
        }
    }
}
