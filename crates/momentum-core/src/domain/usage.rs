//! Social media screen-time records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Apps whose usage is tracked.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum SocialApp {
    Instagram,
    Tiktok,
    Facebook,
    Twitter,
    Youtube,
    Snapchat,
    Reddit,
}

impl SocialApp {
    pub const ALL: [SocialApp; 7] = [
        SocialApp::Instagram,
        SocialApp::Tiktok,
        SocialApp::Facebook,
        SocialApp::Twitter,
        SocialApp::Youtube,
        SocialApp::Snapchat,
        SocialApp::Reddit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SocialApp::Instagram => "instagram",
            SocialApp::Tiktok => "tiktok",
            SocialApp::Facebook => "facebook",
            SocialApp::Twitter => "twitter",
            SocialApp::Youtube => "youtube",
            SocialApp::Snapchat => "snapchat",
            SocialApp::Reddit => "reddit",
        }
    }
}

impl fmt::Display for SocialApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SocialApp {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let lower = match lower.as_str() {
            "x" => "twitter",
            "tik_tok" | "tik-tok" => "tiktok",
            other => other,
        };
        SocialApp::ALL
            .iter()
            .copied()
            .find(|app| app.as_str() == lower)
            .ok_or_else(|| ValidationError::UnknownVariant {
                kind: "social app",
                value: s.to_string(),
            })
    }
}

/// Minutes spent in one app on one date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SocialMediaUsage {
    pub date: NaiveDate,
    pub app: SocialApp,
    pub minutes: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_aliases_parse() {
        assert_eq!("X".parse::<SocialApp>().unwrap(), SocialApp::Twitter);
        assert_eq!("Tik-Tok".parse::<SocialApp>().unwrap(), SocialApp::Tiktok);
        assert!("myspace".parse::<SocialApp>().is_err());
    }
}
