pub mod regions;

use crate::comments::CommentTable;
use crate::cpu::{Cpu, Operand};
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Range;
use std::str::FromStr;

pub use regions::default_regions;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum Platform {
    Generic,
    #[default]
    Commodore64,
    Commodore64StereoSid,
    Commodore128,
    CommodoreVIC20,
    CommodorePlus4,
    Atari8Bit,
    Commodore1541,
    Odyssey2,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Generic => write!(f, "Generic"),
            Platform::Commodore64 => write!(f, "Commodore 64"),
            Platform::Commodore64StereoSid => write!(f, "Commodore 64 (stereo SID)"),
            Platform::Commodore128 => write!(f, "Commodore 128"),
            Platform::CommodoreVIC20 => write!(f, "Commodore VIC-20"),
            Platform::CommodorePlus4 => write!(f, "Commodore Plus4"),
            Platform::Atari8Bit => write!(f, "Atari 8-bit"),
            Platform::Commodore1541 => write!(f, "Commodore 1541"),
            Platform::Odyssey2 => write!(f, "Odyssey2"),
        }
    }
}

impl Platform {
    pub fn all() -> &'static [Platform] {
        &[
            Platform::Generic,
            Platform::Commodore64,
            Platform::Commodore64StereoSid,
            Platform::Commodore128,
            Platform::CommodoreVIC20,
            Platform::CommodorePlus4,
            Platform::Atari8Bit,
            Platform::Commodore1541,
            Platform::Odyssey2,
        ]
    }

    /// Short name used for asset directories and on the command line.
    pub fn slug(&self) -> &'static str {
        match self {
            Platform::Generic => "generic",
            Platform::Commodore64 => "c64",
            Platform::Commodore64StereoSid => "c64-stereo-sid",
            Platform::Commodore128 => "c128",
            Platform::CommodoreVIC20 => "vic20",
            Platform::CommodorePlus4 => "plus4",
            Platform::Atari8Bit => "atari",
            Platform::Commodore1541 => "1541",
            Platform::Odyssey2 => "odyssey2",
        }
    }

    pub fn cpu(&self) -> Cpu {
        match self {
            Platform::Odyssey2 => Cpu::Intel8048,
            _ => Cpu::Mos6502,
        }
    }

    /// The platform whose comments this one inherits on a miss.
    pub fn parent(&self) -> Option<Platform> {
        match self {
            Platform::Generic => None,
            Platform::Commodore64StereoSid => Some(Platform::Commodore64),
            _ => Some(Platform::Generic),
        }
    }
}

impl FromStr for Platform {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::all()
            .iter()
            .find(|p| p.slug().eq_ignore_ascii_case(s) || p.to_string().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| {
                let known: Vec<&str> = Platform::all().iter().map(|p| p.slug()).collect();
                anyhow!("Unknown platform '{}' (known: {})", s, known.join(", "))
            })
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum Language {
    #[default]
    English,
    Italian,
}

impl Language {
    pub fn all() -> &'static [Language] {
        &[Language::English, Language::Italian]
    }

    /// Two-letter tag used in comment table files.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Italian => "it",
        }
    }

    pub fn from_code(code: &str) -> Option<Language> {
        Language::all()
            .iter()
            .find(|l| l.code().eq_ignore_ascii_case(code))
            .copied()
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::English => write!(f, "English"),
            Language::Italian => write!(f, "Italian"),
        }
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_code(s)
            .or_else(|| {
                Language::all()
                    .iter()
                    .find(|l| l.to_string().eq_ignore_ascii_case(s))
                    .copied()
            })
            .ok_or_else(|| anyhow!("Unknown language '{}' (known: en, it)", s))
    }
}

/// A named address window whose comments can be switched off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionFlag {
    pub name: &'static str,
    /// Half-open, so the last page can end at 0x10000.
    pub range: Range<u32>,
    pub enabled: bool,
}

impl RegionFlag {
    pub fn new(name: &'static str, range: Range<u32>) -> Self {
        Self {
            name,
            range,
            enabled: true,
        }
    }

    pub fn contains(&self, address: u16) -> bool {
        self.range.contains(&(address as u32))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProfileId {
    Platform(Platform),
    /// User supplied overlay, stacked on top of a platform.
    User(String),
}

impl From<Platform> for ProfileId {
    fn from(platform: Platform) -> Self {
        ProfileId::Platform(platform)
    }
}

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileId::Platform(platform) => write!(f, "{}", platform),
            ProfileId::User(name) => write!(f, "user:{}", name),
        }
    }
}

/// Outcome of looking an operand up in a single profile, without delegation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// The addressing mode never carries a memory comment on this CPU.
    Ineligible,
    /// A disabled region covers the address.
    Hidden,
    Found(&'a str),
    Miss,
}

#[derive(Debug, Clone)]
pub struct PlatformProfile {
    pub id: ProfileId,
    pub cpu: Cpu,
    pub parent: Option<ProfileId>,
    pub regions: Vec<RegionFlag>,
    pub tables: BTreeMap<Language, CommentTable>,
}

impl PlatformProfile {
    pub fn new(id: ProfileId, cpu: Cpu, parent: Option<ProfileId>) -> Self {
        Self {
            id,
            cpu,
            parent,
            regions: Vec::new(),
            tables: BTreeMap::new(),
        }
    }

    /// Empty profile for `platform` with its regions and parent, but no comments.
    pub fn for_platform(platform: Platform) -> Self {
        let mut profile = Self::new(
            platform.into(),
            platform.cpu(),
            platform.parent().map(ProfileId::from),
        );
        profile.regions = default_regions(platform);
        profile
    }

    pub fn table(&self, language: Language) -> Option<&CommentTable> {
        self.tables.get(&language)
    }

    pub fn table_mut(&mut self, language: Language) -> &mut CommentTable {
        self.tables.entry(language).or_default()
    }

    /// The first declared region containing `address` decides; unclassified
    /// addresses are visible.
    pub fn is_visible(&self, address: u16) -> bool {
        self.regions
            .iter()
            .find(|r| r.contains(address))
            .is_none_or(|r| r.enabled)
    }

    /// Returns false when the profile has no region called `name`.
    pub fn set_region(&mut self, name: &str, enabled: bool) -> bool {
        match self
            .regions
            .iter_mut()
            .find(|r| r.name.eq_ignore_ascii_case(name))
        {
            Some(region) => {
                region.enabled = enabled;
                true
            }
            None => false,
        }
    }

    pub fn lookup(&self, operand: &Operand, language: Language) -> Lookup<'_> {
        if !self.cpu.annotates(operand.mode) {
            return Lookup::Ineligible;
        }
        if !self.is_visible(operand.address) {
            return Lookup::Hidden;
        }
        match self.table(language).and_then(|t| t.get(operand.address)) {
            Some(text) => Lookup::Found(text),
            None => Lookup::Miss,
        }
    }
}
