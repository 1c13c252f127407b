use super::{
    base_planner::{add_device_reuse, partition_ref, PlannerExt, Reusable},
    size_parser::SizeInfo,
};
use crate::{
    devicegraph::{Devicegraph, Disk, Partition},
    issues::{IssueKind, IssuesList},
    planned::{PartitionBuilder, PlannedPartition},
    profile::{DriveSpec, PartitionSpec},
    settings::ProposalSettings,
};
use disk_types::{DiskSize, PartitionExt};

/// Minimal size of a partition.
const PARTITION_MIN_SIZE: DiskSize = DiskSize::b(1);

/// Plans the partitions of a disk drive.
pub struct DiskPlanner<'a> {
    devicegraph: &'a Devicegraph,
    settings:    &'a ProposalSettings,
}

impl<'a> PlannerExt for DiskPlanner<'a> {
    fn devicegraph(&self) -> &Devicegraph { self.devicegraph }

    fn settings(&self) -> &ProposalSettings { self.settings }
}

impl<'a> DiskPlanner<'a> {
    pub fn new(devicegraph: &'a Devicegraph, settings: &'a ProposalSettings) -> DiskPlanner<'a> {
        DiskPlanner { devicegraph, settings }
    }

    /// Plans the partitions of the drive, in the order in which they are
    /// listed. Sections with problems are reported and skipped.
    pub fn planned_for_disk(
        &self,
        disk: &Disk,
        drive: &DriveSpec,
        issues: &mut IssuesList,
    ) -> Vec<PlannedPartition> {
        let mut result = Vec::with_capacity(drive.partitions.len());

        for (index, section) in drive.partitions.iter().enumerate() {
            let section_ref = partition_ref(drive, index, section);

            // Sizes are checked before reuse, so a section with an invalid size
            // is only reported for its size. Logical volumes check reuse first.
            let (min, max) = match self.parse_size(
                section,
                PARTITION_MIN_SIZE,
                disk.size,
                issues,
                &section_ref,
            ) {
                Some(SizeInfo::Range { min, max }) => (min, max),
                Some(SizeInfo::Percentage(percent)) => {
                    let size = disk.size.percent(percent).clamp_to(PARTITION_MIN_SIZE, disk.size);
                    (size, size)
                }
                None => continue,
            };

            let mut attrs = self.device_config(section, drive);

            if section.is_reuse() {
                attrs = match find_partition_to_reuse(disk, section) {
                    Reusable::Found(partition) => add_device_reuse(
                        attrs,
                        &partition.name,
                        partition.get_file_system(),
                        section,
                        true,
                    ),
                    Reusable::NotFound => {
                        issues.add(IssueKind::MissingReusableDevice, section_ref);
                        attrs
                    }
                    Reusable::MissingInfo => {
                        issues.add(IssueKind::MissingReuseInfo, section_ref);
                        continue;
                    }
                };
            }

            let partition = PartitionBuilder::new(disk.name.as_str(), attrs)
                .size(min, max)
                .partition_id(section.id_for_partition())
                .logical_volume(section.lvm_group.clone())
                .raid(section.raid_name.clone())
                .build();

            debug!(
                "planned partition on {}: {} - {} ({:?})",
                partition.disk, partition.min_size, partition.max_size, partition.attrs.mount_point
            );
            result.push(partition);
        }

        result
    }
}

/// Looks for the partition to reuse, by number or by label, on the given disk.
fn find_partition_to_reuse<'d>(
    disk: &'d Disk,
    section: &PartitionSpec,
) -> Reusable<&'d Partition> {
    if let Some(number) = section.partition_nr {
        disk.get_partition(number).into()
    } else if let Some(ref label) = section.label {
        disk.get_partition_by_label(label).into()
    } else {
        Reusable::MissingInfo
    }
}
