use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// Bitmask selecting what goes into the stamp in front of each record.
///
/// These flags are cosmetic: they never influence filtering or rotation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flags(u32);

impl Flags {
    /// No stamp at all.
    pub const NONE: Flags = Flags(0);
    /// Local date: `2026/01/23`.
    pub const DATE: Flags = Flags(1);
    /// Local time: `01:23:23`.
    pub const TIME: Flags = Flags(1 << 1);
    /// Microsecond resolution: `01:23:23.123123`. Implies [`Flags::TIME`].
    pub const MICROSECONDS: Flags = Flags(1 << 2);
    /// Full source path and line: `/a/b/c/main.rs:23`.
    pub const LONG_FILE: Flags = Flags(1 << 3);
    /// Final path component and line: `main.rs:23`. Overrides [`Flags::LONG_FILE`].
    pub const SHORT_FILE: Flags = Flags(1 << 4);
    /// Date and time.
    pub const STD: Flags = Flags(Self::DATE.0 | Self::TIME.0);

    const NAMED: [(&'static str, Flags); 5] = [
        ("date", Flags::DATE),
        ("time", Flags::TIME),
        ("microseconds", Flags::MICROSECONDS),
        ("long_file", Flags::LONG_FILE),
        ("short_file", Flags::SHORT_FILE),
    ];

    pub const fn from_bits(bits: u32) -> Flags {
        Flags(bits & 0b1_1111)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: Flags) -> bool {
        self.0 & other.0 != 0
    }

    fn from_name(name: &str) -> Option<Flags> {
        let name = name.trim().to_ascii_lowercase();
        if name == "std" {
            return Some(Flags::STD);
        }
        Self::NAMED
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, flag)| *flag)
    }

    fn names(self) -> Vec<&'static str> {
        Self::NAMED
            .iter()
            .filter(|(_, flag)| self.contains(*flag))
            .map(|(n, _)| *n)
            .collect()
    }
}

/// Default stamp of every new logger: date, time and microseconds.
pub(crate) const DEFAULT_FLAGS: Flags = Flags(Flags::STD.0 | Flags::MICROSECONDS.0);

impl BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Flags) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("Flags(NONE)");
        }
        write!(f, "Flags({})", self.names().join(" | "))
    }
}

impl Serialize for Flags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.names().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Flags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum FlagsInput {
            Bits(u32),
            Name(String),
            Names(Vec<String>),
        }

        let lookup = |name: &str| -> Result<Flags, D::Error> {
            Flags::from_name(name)
                .ok_or_else(|| de::Error::custom(format!("unknown log flag: {}", name)))
        };

        match FlagsInput::deserialize(deserializer)? {
            FlagsInput::Bits(bits) => Ok(Flags::from_bits(bits)),
            FlagsInput::Name(name) => lookup(&name),
            FlagsInput::Names(names) => names
                .iter()
                .try_fold(Flags::NONE, |acc, name| Ok(acc | lookup(name)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_std_is_date_and_time() {
        assert_eq!(Flags::STD, Flags::DATE | Flags::TIME);
        assert!(Flags::STD.contains(Flags::DATE));
        assert!(!Flags::STD.contains(Flags::MICROSECONDS));
        assert!(DEFAULT_FLAGS.contains(Flags::MICROSECONDS));
    }

    #[test]
    fn test_from_bits_drops_unknown() {
        assert_eq!(Flags::from_bits(0xff).bits(), 0b1_1111);
        assert_eq!(Flags::from_bits(3), Flags::STD);
    }

    #[test]
    fn test_deserialize_forms() {
        let flags: Flags = serde_yaml::from_str("[date, short_file]").unwrap();
        assert_eq!(flags, Flags::DATE | Flags::SHORT_FILE);

        let flags: Flags = serde_yaml::from_str("std").unwrap();
        assert_eq!(flags, Flags::STD);

        let flags: Flags = serde_yaml::from_str("7").unwrap();
        assert_eq!(flags, Flags::STD | Flags::MICROSECONDS);

        assert!(serde_yaml::from_str::<Flags>("[date, utc]").is_err());
    }

    #[test]
    fn test_serialize_names() {
        let yaml = serde_yaml::to_string(&(Flags::TIME | Flags::LONG_FILE)).unwrap();
        let back: Flags = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, Flags::TIME | Flags::LONG_FILE);
        assert_eq!(format!("{:?}", Flags::NONE), "Flags(NONE)");
    }
}
