use std::{fmt, str::FromStr};

/// Describes a file system format, such as ext4 or btrfs.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum FileSystem {
    Btrfs,
    Exfat,
    Ext2,
    Ext3,
    Ext4,
    F2fs,
    Jfs,
    Ntfs,
    Reiserfs,
    Swap,
    Vfat,
    Xfs,
}

impl FileSystem {
    pub fn is_btrfs(self) -> bool { self == FileSystem::Btrfs }

    /// Whether existing file systems of this type can be grown or shrunk.
    pub fn supports_resize(self) -> bool {
        match self {
            FileSystem::Btrfs
            | FileSystem::Ext2
            | FileSystem::Ext3
            | FileSystem::Ext4
            | FileSystem::Ntfs
            | FileSystem::Reiserfs
            | FileSystem::Swap
            | FileSystem::Vfat
            | FileSystem::Xfs => true,
            FileSystem::Exfat | FileSystem::F2fs | FileSystem::Jfs => false,
        }
    }

    /// Only Btrfs is able to keep snapshots of itself.
    pub fn supports_snapshots(self) -> bool { self.is_btrfs() }
}

impl FromStr for FileSystem {
    type Err = &'static str;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let type_ = match string.to_lowercase().as_str() {
            "btrfs" => FileSystem::Btrfs,
            "exfat" => FileSystem::Exfat,
            "ext2" => FileSystem::Ext2,
            "ext3" => FileSystem::Ext3,
            "ext4" => FileSystem::Ext4,
            "f2fs" => FileSystem::F2fs,
            "jfs" => FileSystem::Jfs,
            "ntfs" => FileSystem::Ntfs,
            "reiser" | "reiserfs" => FileSystem::Reiserfs,
            "swap" | "linux-swap(v1)" => FileSystem::Swap,
            "vfat" | "fat" | "fat16" | "fat32" => FileSystem::Vfat,
            "xfs" => FileSystem::Xfs,
            _ => return Err("invalid file system name"),
        };
        Ok(type_)
    }
}

impl From<FileSystem> for &'static str {
    fn from(val: FileSystem) -> Self {
        match val {
            FileSystem::Btrfs => "btrfs",
            FileSystem::Exfat => "exfat",
            FileSystem::Ext2 => "ext2",
            FileSystem::Ext3 => "ext3",
            FileSystem::Ext4 => "ext4",
            FileSystem::F2fs => "f2fs",
            FileSystem::Jfs => "jfs",
            FileSystem::Ntfs => "ntfs",
            FileSystem::Reiserfs => "reiserfs",
            FileSystem::Swap => "swap",
            FileSystem::Vfat => "vfat",
            FileSystem::Xfs => "xfs",
        }
    }
}

impl fmt::Display for FileSystem {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        let str: &'static str = (*self).into();
        f.write_str(str)
    }
}

/// How a file system is referenced in fstab.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum MountBy {
    Device,
    Id,
    Label,
    Path,
    Uuid,
}

impl FromStr for MountBy {
    type Err = &'static str;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let mount_by = match string.to_lowercase().as_str() {
            "device" => MountBy::Device,
            "id" => MountBy::Id,
            "label" => MountBy::Label,
            "path" => MountBy::Path,
            "uuid" => MountBy::Uuid,
            _ => return Err("invalid mount by value"),
        };
        Ok(mount_by)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_names() {
        assert_eq!("BTRFS".parse::<FileSystem>(), Ok(FileSystem::Btrfs));
        assert_eq!("fat32".parse::<FileSystem>(), Ok(FileSystem::Vfat));
        assert_eq!("linux-swap(v1)".parse::<FileSystem>(), Ok(FileSystem::Swap));
        assert!("zfs".parse::<FileSystem>().is_err());
        assert_eq!(FileSystem::Reiserfs.to_string(), "reiserfs");
    }

    #[test]
    fn fs_capabilities() {
        assert!(FileSystem::Ext4.supports_resize());
        assert!(!FileSystem::Exfat.supports_resize());
        assert!(FileSystem::Btrfs.supports_snapshots());
        assert!(!FileSystem::Xfs.supports_snapshots());
    }

    #[test]
    fn mount_by_names() {
        assert_eq!("uuid".parse::<MountBy>(), Ok(MountBy::Uuid));
        assert!("serial".parse::<MountBy>().is_err());
    }
}
