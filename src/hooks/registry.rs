//! Command hook registry.
//!
//! Maps a lowercased command name to an ordered list of hooks. Several
//! hooks may share a name; they run in registration order. Hooks are
//! identified by a [`HookId`] chosen by the caller or auto-assigned.
//!
//! Auto-assigned ids count down from `u32::MAX`, leaving the low end of
//! the id space to callers. The counter wraps after 2^32 registrations.

use super::context::Hook;
use crate::error::RegistryError;
use proxycmd_proto::command_to_lower;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::error;

/// Identifier of a registered hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HookId(pub u32);

impl fmt::Display for HookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

fn is_blank(name: &str) -> bool {
    name.trim().is_empty()
}

/// One command name or a set of aliases.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Aliases(Vec<String>);

impl Aliases {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn describe(&self) -> String {
        self.0.join(",")
    }

    /// Usable names; blank ones are dropped.
    fn valid(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|name| !is_blank(name))
    }

    fn blank(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|name| is_blank(name))
    }
}

impl From<&str> for Aliases {
    fn from(name: &str) -> Self {
        Self(vec![name.to_string()])
    }
}

impl From<String> for Aliases {
    fn from(name: String) -> Self {
        Self(vec![name])
    }
}

impl From<Vec<String>> for Aliases {
    fn from(names: Vec<String>) -> Self {
        Self(names)
    }
}

impl From<&[String]> for Aliases {
    fn from(names: &[String]) -> Self {
        Self(names.to_vec())
    }
}

impl From<&Vec<String>> for Aliases {
    fn from(names: &Vec<String>) -> Self {
        Self(names.clone())
    }
}

impl From<&[&str]> for Aliases {
    fn from(names: &[&str]) -> Self {
        Self(names.iter().map(|n| n.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Aliases {
    fn from(names: [&str; N]) -> Self {
        Self(names.iter().map(|n| n.to_string()).collect())
    }
}

/// A registered hook.
#[derive(Clone)]
pub struct HookEntry {
    pub id: HookId,
    pub hook: Arc<dyn Hook>,
    /// Descriptive owner label, used when listing commands.
    pub owner: Option<String>,
}

impl fmt::Debug for HookEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookEntry")
            .field("id", &self.id)
            .field("owner", &self.owner)
            .finish_non_exhaustive()
    }
}

/// Registry of command hooks.
pub struct Registry {
    hooks: BTreeMap<String, Vec<HookEntry>>,
    next_id: u32,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            hooks: BTreeMap::new(),
            next_id: u32::MAX,
        }
    }

    /// Register `hook` under every name in `names`.
    ///
    /// All aliases of one call share one id: `id` when given, otherwise
    /// the next auto-assigned id. Returns that id. Blank aliases are logged
    /// and skipped; the call fails only when no alias is usable.
    pub fn add(
        &mut self,
        names: impl Into<Aliases>,
        hook: Arc<dyn Hook>,
        id: Option<HookId>,
        owner: Option<&str>,
    ) -> Result<HookId, RegistryError> {
        let names = names.into();
        for name in names.blank() {
            let err = RegistryError::InvalidRegistration(name.to_string());
            error!(error = %err, "Rejected hook alias");
        }
        if names.valid().next().is_none() {
            let err = RegistryError::InvalidRegistration(names.describe());
            error!(error = %err, "Rejected hook registration");
            return Err(err);
        }

        let id = id.unwrap_or_else(|| self.allocate_id());
        for name in names.valid() {
            self.hooks
                .entry(command_to_lower(name))
                .or_default()
                .push(HookEntry {
                    id,
                    hook: Arc::clone(&hook),
                    owner: owner.map(str::to_string),
                });
        }
        Ok(id)
    }

    /// Remove the first hook with `id` from every name in `names`.
    ///
    /// Returns how many entries were removed; unknown names or ids are
    /// not an error. Blank aliases are logged and skipped.
    pub fn remove(&mut self, names: impl Into<Aliases>, id: HookId) -> Result<usize, RegistryError> {
        let names = names.into();
        for name in names.blank() {
            let err = RegistryError::InvalidRemoval(name.to_string());
            error!(error = %err, id = %id, "Rejected hook alias removal");
        }
        if names.valid().next().is_none() {
            let err = RegistryError::InvalidRemoval(names.describe());
            error!(error = %err, id = %id, "Rejected hook removal");
            return Err(err);
        }

        let mut removed = 0;
        for name in names.valid() {
            let key = command_to_lower(name);
            let Some(entries) = self.hooks.get_mut(&key) else {
                continue;
            };
            if let Some(pos) = entries.iter().position(|entry| entry.id == id) {
                entries.remove(pos);
                removed += 1;
            }
            if entries.is_empty() {
                self.hooks.remove(&key);
            }
        }
        Ok(removed)
    }

    /// Hooks registered under `name`, in invocation order.
    pub fn lookup(&self, name: &str) -> &[HookEntry] {
        self.hooks
            .get(&command_to_lower(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        !self.lookup(name).is_empty()
    }

    /// All commands with their hooks, sorted by name.
    pub fn list(&self) -> impl Iterator<Item = (&str, &[HookEntry])> {
        self.hooks
            .iter()
            .map(|(name, entries)| (name.as_str(), entries.as_slice()))
    }

    /// Command names grouped by owner label. Unlabeled hooks map to `None`.
    pub fn by_owner(&self) -> BTreeMap<Option<&str>, Vec<&str>> {
        let mut groups: BTreeMap<Option<&str>, Vec<&str>> = BTreeMap::new();
        for (name, entries) in self.list() {
            let mut owners: Vec<Option<&str>> =
                entries.iter().map(|entry| entry.owner.as_deref()).collect();
            owners.dedup();
            for owner in owners {
                let names = groups.entry(owner).or_default();
                if names.last() != Some(&name) {
                    names.push(name);
                }
            }
        }
        groups
    }

    /// Number of distinct command names.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    fn allocate_id(&mut self) -> HookId {
        self.next_id = self.next_id.wrapping_sub(1);
        HookId(self.next_id)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("commands", &self.hooks.keys().collect::<Vec<_>>())
            .field("next_id", &HookId(self.next_id))
            .finish()
    }
}
