use crate::assets;
use crate::comments::{CommentEntry, build_tables};
use crate::cpu::{AddressingMode, Cpu, Operand};
use crate::profile::{Language, Lookup, Platform, PlatformProfile, ProfileId};
use anyhow::{Result, anyhow, bail};
use std::collections::BTreeMap;

/// Longest parent chain followed when resolving.
pub const MAX_CHAIN_DEPTH: usize = 16;

/// Owns every profile; parents are referenced by id, never owned by children.
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    profiles: BTreeMap<ProfileId, PlatformProfile>,
}

impl ProfileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every platform with its bundled comment tables and default regions.
    pub fn bundled() -> Result<Self> {
        let mut registry = Self::new();
        // Platform::all() lists parents before children.
        for platform in Platform::all() {
            let mut profile = PlatformProfile::for_platform(*platform);
            profile.tables = build_tables(&assets::load_comments(*platform)?);
            registry.insert(profile)?;
        }
        Ok(registry)
    }

    /// Adds or replaces a profile. Its parent must already be registered and
    /// must not lead back to the profile itself.
    pub fn insert(&mut self, profile: PlatformProfile) -> Result<()> {
        if let Some(parent) = &profile.parent {
            if !self.profiles.contains_key(parent) {
                bail!("Profile {} refers to unknown parent {}", profile.id, parent);
            }
            if self.chain(parent).iter().any(|p| p.id == profile.id) {
                bail!("Profile {} would be its own ancestor", profile.id);
            }
        }
        log::debug!(
            "Registered profile {} (parent: {})",
            profile.id,
            profile
                .parent
                .as_ref()
                .map_or_else(|| "none".to_string(), |p| p.to_string())
        );
        self.profiles.insert(profile.id.clone(), profile);
        Ok(())
    }

    /// Stacks user comments on top of `parent` under a new profile id.
    pub fn add_overlay(
        &mut self,
        name: &str,
        parent: ProfileId,
        entries: &[CommentEntry],
    ) -> Result<ProfileId> {
        let cpu = self
            .get(&parent)
            .map(|p| p.cpu)
            .ok_or_else(|| anyhow!("Unknown profile {}", parent))?;
        let id = ProfileId::User(name.to_string());
        let mut profile = PlatformProfile::new(id.clone(), cpu, Some(parent));
        profile.tables = build_tables(entries);
        self.insert(profile)?;
        Ok(id)
    }

    pub fn get(&self, id: &ProfileId) -> Option<&PlatformProfile> {
        self.profiles.get(id)
    }

    pub fn get_mut(&mut self, id: &ProfileId) -> Option<&mut PlatformProfile> {
        self.profiles.get_mut(id)
    }

    pub fn profiles(&self) -> impl Iterator<Item = &PlatformProfile> {
        self.profiles.values()
    }

    /// Toggles the region called `name` on the nearest profile in the chain
    /// from `id` that declares it. Returns false when none does.
    pub fn set_region(&mut self, id: &ProfileId, name: &str, enabled: bool) -> bool {
        let ids: Vec<ProfileId> = self.chain(id).iter().map(|p| p.id.clone()).collect();
        let found = ids.into_iter().find(|pid| {
            self.profiles
                .get_mut(pid)
                .is_some_and(|p| p.set_region(name, enabled))
        });
        if let Some(pid) = &found {
            log::debug!("{}: region {} set to {}", pid, name, enabled);
        }
        found.is_some()
    }

    /// `id` followed by its ancestors, nearest first.
    pub fn chain(&self, id: &ProfileId) -> Vec<&PlatformProfile> {
        let mut chain = Vec::new();
        let mut next = self.profiles.get(id);
        while let Some(profile) = next {
            if chain.len() == MAX_CHAIN_DEPTH {
                log::warn!("Profile chain from {} is deeper than {}", id, MAX_CHAIN_DEPTH);
                break;
            }
            chain.push(profile);
            next = profile.parent.as_ref().and_then(|p| self.profiles.get(p));
        }
        chain
    }

    /// Walks the chain from `id` until a profile answers.
    ///
    /// A profile answers with text when its table has the address, and with
    /// `None` when the addressing mode is not eligible on its CPU or one of
    /// its regions hides the address. A plain miss moves on to the parent.
    pub fn resolve(&self, id: &ProfileId, operand: &Operand, language: Language) -> Option<&str> {
        for profile in self.chain(id) {
            match profile.lookup(operand, language) {
                Lookup::Found(text) => return Some(text),
                Lookup::Ineligible | Lookup::Hidden => return None,
                Lookup::Miss => {
                    log::trace!(
                        "{}: no comment for ${:04X} in {}",
                        profile.id,
                        operand.address,
                        language
                    );
                }
            }
        }
        None
    }

    /// Shorthand for resolving a bare address as an absolute operand.
    pub fn resolve_address(&self, id: &ProfileId, address: u16, language: Language) -> Option<&str> {
        let mode = match self.get(id).map(|p| p.cpu) {
            Some(Cpu::Intel8048) => AddressingMode::CallAddress,
            _ => AddressingMode::Absolute,
        };
        self.resolve(id, &Operand::new(mode, address, address), language)
    }
}
