use disk_types::{FileSystem, MountBy};

/// A file system which currently exists on a block device.
#[derive(Debug, Clone, PartialEq, new)]
pub struct Filesystem {
    pub fs_type:           FileSystem,
    #[new(default)]
    pub label:             Option<String>,
    #[new(default)]
    pub uuid:              Option<String>,
    /// Where the file system is, or will be, mounted.
    #[new(default)]
    pub mount_point:       Option<String>,
    #[new(default)]
    pub mount_by:          Option<MountBy>,
    #[new(default)]
    pub fstab_options:     Vec<String>,
    /// Btrfs only: whether snapper snapshots are configured.
    #[new(default)]
    pub snapshots:         bool,
    /// Btrfs only: the subvolume under which the other subvolumes are created.
    #[new(default)]
    pub default_subvolume: Option<String>,
    /// Btrfs only: subvolume paths, relative to the default subvolume.
    #[new(default)]
    pub subvolumes:        Vec<String>,
}

impl Filesystem {
    pub fn with_label<S: Into<String>>(mut self, label: S) -> Filesystem {
        self.label = Some(label.into());
        self
    }

    pub fn with_mount_point<S: Into<String>>(mut self, mount_point: S) -> Filesystem {
        self.mount_point = Some(mount_point.into());
        self
    }

    /// The udev links created for the file system.
    pub fn udev_links(&self) -> Vec<String> {
        let labels = self.label.iter().map(|label| ["/dev/disk/by-label/", label].concat());
        let uuids = self.uuid.iter().map(|uuid| ["/dev/disk/by-uuid/", uuid].concat());
        labels.chain(uuids).collect()
    }
}

pub(crate) fn filesystem_links(filesystem: Option<&Filesystem>) -> Vec<String> {
    filesystem.map_or_else(Vec::new, Filesystem::udev_links)
}
