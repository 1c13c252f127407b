//! Problems found while planning, reported back to the caller.
//!
//! Issues are never fatal for the planning run: the offending section is
//! skipped and the caller decides what to do once the run is over.

use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueKind {
    /// No device could be found for a drive section.
    NoDisk,
    /// A device is going to be reused, but the section does not tell which one.
    MissingReuseInfo,
    /// The device to reuse does not exist.
    MissingReusableDevice,
    /// An attribute has a value that cannot be used.
    InvalidValue,
}

/// Identifies the profile section that caused an issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionRef {
    Drive { device: Option<String> },
    Partition { drive: Option<String>, index: usize, mount: Option<String> },
}

impl Display for SectionRef {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            SectionRef::Drive { device } => {
                write!(f, "drive {}", device.as_deref().unwrap_or("(any disk)"))
            }
            SectionRef::Partition { drive, index, mount } => {
                let drive = drive.as_deref().unwrap_or("(any disk)");
                write!(f, "partition #{} of drive {}", index, drive)?;
                if let Some(mount) = mount {
                    write!(f, " ({})", mount)?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Issue {
    pub kind:    IssueKind,
    pub section: SectionRef,
    /// The attribute of the section with the problem, if any.
    pub attr:    Option<&'static str>,
}

impl Display for Issue {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let description = match self.kind {
            IssueKind::NoDisk => "no suitable device was found",
            IssueKind::MissingReuseInfo => "not enough information to find the device to reuse",
            IssueKind::MissingReusableDevice => "the device to reuse was not found",
            IssueKind::InvalidValue => "invalid value",
        };

        write!(f, "{}: {}", self.section, description)?;
        if let Some(attr) = self.attr {
            write!(f, " for '{}'", attr)?;
        }
        Ok(())
    }
}

/// An append-only list of issues.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct IssuesList {
    issues: Vec<Issue>,
}

impl IssuesList {
    pub fn new() -> IssuesList { IssuesList::default() }

    pub fn add(&mut self, kind: IssueKind, section: SectionRef) {
        self.push(Issue::new(kind, section, None));
    }

    pub fn add_with_attr(&mut self, kind: IssueKind, section: SectionRef, attr: &'static str) {
        self.push(Issue::new(kind, section, Some(attr)));
    }

    fn push(&mut self, issue: Issue) {
        info!("autoinst issue: {}", issue);
        self.issues.push(issue);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Issue> { self.issues.iter() }

    pub fn len(&self) -> usize { self.issues.len() }

    pub fn is_empty(&self) -> bool { self.issues.is_empty() }

    /// The number of issues of the given kind.
    pub fn count(&self, kind: IssueKind) -> usize {
        self.issues.iter().filter(|issue| issue.kind == kind).count()
    }
}
