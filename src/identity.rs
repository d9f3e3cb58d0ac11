//! Owner and group name resolution
//!
//! Lookups go through the `IdentityLookup` trait so tests can substitute a fixed
//! mapping for the host account database.

use std::collections::HashMap;

/// Source of user and group names for numeric ids.
pub trait IdentityLookup {
    fn user_name(&self, uid: u32) -> Option<String>;
    fn group_name(&self, gid: u32) -> Option<String>;
}

/// Lookup backed by the host's passwd/group databases.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemIdentities;

impl IdentityLookup for SystemIdentities {
    fn user_name(&self, uid: u32) -> Option<String> {
        users::get_user_by_uid(uid).map(|u| u.name().to_string_lossy().to_string())
    }

    fn group_name(&self, gid: u32) -> Option<String> {
        users::get_group_by_gid(gid).map(|g| g.name().to_string_lossy().to_string())
    }
}

/// Lookup from fixed maps.
#[derive(Debug, Default, Clone)]
pub struct FixedIdentities {
    pub users: HashMap<u32, String>,
    pub groups: HashMap<u32, String>,
}

impl FixedIdentities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, uid: u32, name: impl Into<String>) -> Self {
        self.users.insert(uid, name.into());
        self
    }

    pub fn with_group(mut self, gid: u32, name: impl Into<String>) -> Self {
        self.groups.insert(gid, name.into());
        self
    }
}

impl IdentityLookup for FixedIdentities {
    fn user_name(&self, uid: u32) -> Option<String> {
        self.users.get(&uid).cloned()
    }

    fn group_name(&self, gid: u32) -> Option<String> {
        self.groups.get(&gid).cloned()
    }
}

/// Per-run memo of resolved names.
///
/// Unknown ids fall back to their decimal form.
pub struct IdentityCache {
    lookup: Box<dyn IdentityLookup>,
    users: HashMap<u32, String>,
    groups: HashMap<u32, String>,
}

impl IdentityCache {
    pub fn new(lookup: Box<dyn IdentityLookup>) -> Self {
        Self {
            lookup,
            users: HashMap::new(),
            groups: HashMap::new(),
        }
    }

    /// Cache backed by the host account database.
    pub fn system() -> Self {
        Self::new(Box::new(SystemIdentities))
    }

    pub fn user(&mut self, uid: u32) -> &str {
        let lookup = &self.lookup;
        self.users.entry(uid).or_insert_with(|| {
            lookup.user_name(uid).unwrap_or_else(|| {
                tracing::debug!("no user name for uid {uid}");
                uid.to_string()
            })
        })
    }

    pub fn group(&mut self, gid: u32) -> &str {
        let lookup = &self.lookup;
        self.groups.entry(gid).or_insert_with(|| {
            lookup.group_name(gid).unwrap_or_else(|| {
                tracing::debug!("no group name for gid {gid}");
                gid.to_string()
            })
        })
    }
}

impl Default for IdentityCache {
    fn default() -> Self {
        Self::system()
    }
}
