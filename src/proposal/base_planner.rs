use super::size_parser::{SizeInfo, SizeParser};
use crate::{
    devicegraph::Devicegraph,
    issues::{IssueKind, IssuesList, SectionRef},
    planned::DeviceAttrs,
    profile::{DriveSpec, PartitionSpec},
    settings::ProposalSettings,
};
use disk_types::{DiskSize, FileSystem};

/// The outcome of looking for an existing device to reuse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reusable<T> {
    Found(T),
    /// The section does not give enough information to find the device.
    MissingInfo,
    NotFound,
}

impl<T> From<Option<T>> for Reusable<T> {
    fn from(device: Option<T>) -> Reusable<T> { device.map_or(Reusable::NotFound, Reusable::Found) }
}

/// Behavior shared by the planners of every kind of drive.
pub trait PlannerExt {
    /// The devicegraph used as starting point.
    fn devicegraph(&self) -> &Devicegraph;

    fn settings(&self) -> &ProposalSettings;

    /// Attributes shared by any device defined by a `<partition>` section:
    /// partitions, logical volumes and RAIDs.
    fn device_config(&self, section: &PartitionSpec, drive: &DriveSpec) -> DeviceAttrs {
        let mut attrs = DeviceAttrs {
            mount_point: section.mount.clone(),
            filesystem_type: section.filesystem,
            label: section.label.clone(),
            uuid: section.uuid.clone(),
            mount_by: section.mount_by,
            mkfs_options: section.mkfs_options.clone(),
            fstab_options: section.fstab_options.clone(),
            encryption_password: section.encryption_password().map(String::from),
            ..Default::default()
        };

        // Snapshots are always enabled for the root file system, unless the drive disables them.
        attrs.snapshots = attrs.is_root() && drive.enable_snapshots != Some(false);
        self.add_subvolumes(&mut attrs, section);
        attrs
    }

    /// Btrfs subvolumes come from the profile. When the profile does not list
    /// any, the root file system gets the default subvolumes of the product.
    fn add_subvolumes(&self, attrs: &mut DeviceAttrs, section: &PartitionSpec) {
        if !attrs.is_btrfs() {
            return;
        }

        let settings = self.settings();
        match section.subvolumes {
            Some(ref subvolumes) => attrs.subvolumes = subvolumes.clone(),
            None if attrs.is_root() => {
                attrs.subvolumes = settings.subvolumes.clone();
                attrs.default_subvolumes_used = true;
            }
            None => (),
        }

        attrs.default_subvolume = Some(
            section
                .subvolumes_prefix
                .clone()
                .unwrap_or_else(|| settings.legacy_btrfs_default_subvolume.clone()),
        );
    }

    /// Parses the size of a section. An invalid size is reported, and `None` is
    /// returned so that the device is skipped.
    fn parse_size(
        &self,
        section: &PartitionSpec,
        min: DiskSize,
        max: DiskSize,
        issues: &mut IssuesList,
        section_ref: &SectionRef,
    ) -> Option<SizeInfo> {
        let parser = SizeParser::new(self.settings());
        match parser.parse(section.size.as_deref(), section.mount.as_deref(), min, max) {
            Ok(info) => Some(info),
            Err(why) => {
                warn!("skipping {}: {}", section_ref, why);
                issues.add_with_attr(IssueKind::InvalidValue, section_ref.clone(), "size");
                None
            }
        }
    }
}

/// Marks the device as a reused one.
///
/// The file system of the existing device is kept when the section does not
/// set any.
pub fn add_device_reuse(
    mut attrs: DeviceAttrs,
    name: &str,
    existing_fs: Option<FileSystem>,
    section: &PartitionSpec,
    resizable: bool,
) -> DeviceAttrs {
    debug!("reusing {} (format: {:?}, resize: {:?})", name, section.format, section.resize);
    attrs.reuse = Some(name.to_owned());
    attrs.filesystem_type = attrs.filesystem_type.or(existing_fs);
    attrs.reformat = section.format == Some(true);
    attrs.resize = resizable && section.resize == Some(true);
    attrs
}

/// Refers to the `index`th section of a drive in issues.
pub fn partition_ref(drive: &DriveSpec, index: usize, section: &PartitionSpec) -> SectionRef {
    SectionRef::Partition { drive: drive.device.clone(), index, mount: section.mount.clone() }
}

pub fn drive_ref(drive: &DriveSpec) -> SectionRef {
    SectionRef::Drive { device: drive.device.clone() }
}
