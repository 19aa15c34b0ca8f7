// src/models/platform.rs
// DOCUMENTATION: Supported publishing platforms and their text constraints
// PURPOSE: Closed mapping from platform key to instruction framing and length limit

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target publishing surface
/// DOCUMENTATION: The set is closed - unknown keys are rejected, never defaulted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    LinkedIn,
    Instagram,
}

/// Static text constraints for one platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformProfile {
    /// Instruction placed in front of the caller's prompt
    pub instruction_prefix: &'static str,
    /// Maximum length of the returned content, in characters
    pub max_length: usize,
}

const TWITTER: PlatformProfile = PlatformProfile {
    instruction_prefix: "Write a concise, engaging tweet (max 280 characters) about:",
    max_length: 280,
};

const LINKEDIN: PlatformProfile = PlatformProfile {
    instruction_prefix: "Write a professional LinkedIn post about:",
    max_length: 3000,
};

const INSTAGRAM: PlatformProfile = PlatformProfile {
    instruction_prefix: "Write an engaging Instagram caption about:",
    max_length: 2500,
};

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Twitter, Platform::LinkedIn, Platform::Instagram];

    /// Wire key used by callers
    pub fn key(&self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::LinkedIn => "linkedin",
            Platform::Instagram => "instagram",
        }
    }

    pub fn profile(&self) -> PlatformProfile {
        match self {
            Platform::Twitter => TWITTER,
            Platform::LinkedIn => LINKEDIN,
            Platform::Instagram => INSTAGRAM,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Returned when a key is not one of the supported platforms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPlatform(pub String);

impl fmt::Display for UnknownPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown platform: {}", self.0)
    }
}

impl std::error::Error for UnknownPlatform {}

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|platform| platform.key() == key)
            .ok_or_else(|| UnknownPlatform(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_platforms() {
        assert_eq!("twitter".parse::<Platform>(), Ok(Platform::Twitter));
        assert_eq!("linkedin".parse::<Platform>(), Ok(Platform::LinkedIn));
        assert_eq!("instagram".parse::<Platform>(), Ok(Platform::Instagram));
    }

    #[test]
    fn test_unknown_platform_is_rejected() {
        assert!("facebook".parse::<Platform>().is_err());
        assert!("Twitter".parse::<Platform>().is_err());
        assert!("".parse::<Platform>().is_err());
    }

    #[test]
    fn test_profiles_have_positive_limits() {
        for platform in Platform::ALL {
            assert!(platform.profile().max_length > 0, "{}", platform);
        }
        assert_eq!(Platform::Twitter.profile().max_length, 280);
        assert_eq!(Platform::LinkedIn.profile().max_length, 3000);
        assert_eq!(Platform::Instagram.profile().max_length, 2500);
    }
}
