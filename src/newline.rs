use crate::types::{CR, LF};

/// Line-ending convention named on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineEnding {
    /// Classic Mac OS: a single CR.
    Mac,
    /// Unix: a single LF.
    Unix,
    /// Windows: CR followed by LF.
    Windows,
}

impl LineEnding {
    /// Parse a `-mac`, `-unix` or `-win` flag. Anything else is unset.
    #[must_use]
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            "-mac" => Some(LineEnding::Mac),
            "-unix" => Some(LineEnding::Unix),
            "-win" => Some(LineEnding::Windows),
            _ => None,
        }
    }

    #[must_use]
    pub const fn flag(self) -> &'static str {
        match self {
            LineEnding::Mac => "-mac",
            LineEnding::Unix => "-unix",
            LineEnding::Windows => "-win",
        }
    }

    /// The single signal byte of this convention. Windows has none since its
    /// newline spans two code units.
    #[must_use]
    pub const fn signal(self) -> Option<u8> {
        match self {
            LineEnding::Mac => Some(CR),
            LineEnding::Unix => Some(LF),
            LineEnding::Windows => None,
        }
    }
}

/// Resolve an optional flag to its signal byte.
#[must_use]
pub fn resolve(flag: Option<LineEnding>) -> Option<u8> {
    flag.and_then(LineEnding::signal)
}
