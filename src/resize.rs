//! Checks performed before resizing an existing partition or logical volume.
//!
//! When a profile asks to resize a reused device, there is nobody to ask for
//! confirmation, so every reason that forbids the resize is collected instead.

use crate::devicegraph::{DeviceRef, Devicegraph};
use disk_types::FileSystem;

#[rustfmt::skip]
#[derive(Debug, Fail, PartialEq)]
pub enum ResizeError {
    #[fail(display = "{} was not found", device)]
    NotFound { device: String },
    #[fail(display = "{} is neither a partition nor a logical volume", device)]
    UnsupportedDevice { device: String },
    #[fail(display = "{} is in use by LVM or a software RAID", device)]
    InUse { device: String },
    #[fail(display = "{:?} file systems cannot be resized", fs)]
    UnsupportedFilesystem { fs: FileSystem },
    #[fail(display = "{} cannot be resized: {}", device, reasons)]
    Blocked { device: String, reasons: String },
}

/// Every reason which prevents resizing the named device, in the order in
/// which they should be reported. An empty list means the resize may proceed.
pub fn errors(devicegraph: &Devicegraph, name: &str) -> Vec<ResizeError> {
    let device = match devicegraph.find_by_any_name(name) {
        Some(device) => device,
        None => return vec![ResizeError::NotFound { device: name.into() }],
    };

    let (in_use, blockers) = match device {
        DeviceRef::Partition(_, part) => (part.is_lvm_or_md_member(), &part.resize_blockers),
        DeviceRef::LvmLv(_, lv) => (false, &lv.resize_blockers),
        _ => return vec![ResizeError::UnsupportedDevice { device: device.name() }],
    };

    let mut errors = Vec::new();

    if in_use {
        errors.push(ResizeError::InUse { device: device.name() });
    }

    if let Some(fs) = device.filesystem().map(|fs| fs.fs_type) {
        if !fs.supports_resize() {
            errors.push(ResizeError::UnsupportedFilesystem { fs });
        }
    }

    if !blockers.is_empty() {
        let reasons = blockers.join(", ");
        warn!("{}: resize blocked by the storage layer: {}", device.name(), reasons);
        errors.push(ResizeError::Blocked { device: device.name(), reasons });
    }

    errors
}

/// Like [`errors`], but only reports the first reason.
pub fn check(devicegraph: &Devicegraph, name: &str) -> Result<(), ResizeError> {
    match errors(devicegraph, name).into_iter().next() {
        Some(why) => Err(why),
        None => Ok(()),
    }
}
