use crate::subvol::SubvolSpec;
use disk_types::{FileSystem, MountBy};

/// Attributes shared by every planned device that may hold a file system.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DeviceAttrs {
    pub mount_point:             Option<String>,
    pub filesystem_type:         Option<FileSystem>,
    pub label:                   Option<String>,
    pub uuid:                    Option<String>,
    pub mount_by:                Option<MountBy>,
    pub mkfs_options:            Option<String>,
    pub fstab_options:           Option<String>,
    pub encryption_password:     Option<String>,
    pub snapshots:               bool,
    /// Btrfs only: the subvolume under which the other subvolumes are created.
    pub default_subvolume:       Option<String>,
    pub subvolumes:              Vec<SubvolSpec>,
    /// Whether the subvolumes come from the product defaults instead of the profile.
    pub default_subvolumes_used: bool,
    /// The name of the existing device to reuse.
    pub reuse:                   Option<String>,
    pub reformat:                bool,
    pub resize:                  bool,
}

impl DeviceAttrs {
    pub fn is_root(&self) -> bool { self.mount_point.as_deref() == Some("/") }

    pub fn is_btrfs(&self) -> bool { self.filesystem_type.map_or(false, FileSystem::is_btrfs) }

    /// Subvolumes that would be hidden by file systems mounted at the given points.
    pub fn shadowed_subvolumes<'a, I>(&self, other_mount_points: I) -> Vec<SubvolSpec>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mount_point = match self.mount_point.as_deref() {
            Some(mount_point) if self.is_btrfs() => mount_point,
            _ => return Vec::new(),
        };

        let others: Vec<&str> = other_mount_points.into_iter().collect();
        self.subvolumes
            .iter()
            .filter(|subvol| subvol.is_shadowed(mount_point, others.iter().cloned()))
            .cloned()
            .collect()
    }

    pub fn remove_subvolume(&mut self, subvol: &SubvolSpec) {
        self.subvolumes.retain(|existing| existing != subvol);
    }
}
