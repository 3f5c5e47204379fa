use crate::constants::{BILLING, USERS};
use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Debug;

bitflags! {
    /// Represents a set of platform modules.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct ModuleSet: u32 {
        const USERS = 1 << 0;
        const BILLING = 1 << 1;

        const ALL = Self::USERS.bits() | Self::BILLING.bits();
    }
}

impl ModuleSet {
    /// Builds a set from configuration entries (module names, `"all"`, or `"*"`).
    ///
    /// Unknown names map to the empty set and are simply ignored.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().fold(Self::empty(), |set, name| set | Self::from(name.as_ref()))
    }
}

impl From<&str> for ModuleSet {
    fn from(s: &str) -> Self {
        match s {
            USERS => Self::USERS,
            BILLING => Self::BILLING,
            "all" | "*" => Self::ALL,
            _ => Self::empty(),
        }
    }
}

impl From<u32> for ModuleSet {
    fn from(bits: u32) -> Self {
        Self::from_bits_truncate(bits)
    }
}

impl Serialize for ModuleSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for ModuleSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bits = u32::deserialize(deserializer)?;
        Ok(Self::from_bits_retain(bits))
    }
}
