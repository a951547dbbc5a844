use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocaleKey {
    #[default]
    #[serde(rename = "en_US")]
    EnUs,
    #[serde(rename = "pt_BR")]
    PtBr,
    #[serde(rename = "fr_FR")]
    FrFr,
    #[serde(rename = "zh_CN")]
    ZhCn,
    #[serde(rename = "ja_JP")]
    JaJp,
}

impl LocaleKey {
    pub const ALL: &'static [LocaleKey] = &[
        LocaleKey::EnUs,
        LocaleKey::PtBr,
        LocaleKey::FrFr,
        LocaleKey::ZhCn,
        LocaleKey::JaJp,
    ];

    /// Accepts `en_US` as well as the short `en` form.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "en_US" | "en" => Some(Self::EnUs),
            "pt_BR" => Some(Self::PtBr),
            "fr_FR" | "fr" => Some(Self::FrFr),
            "zh_CN" => Some(Self::ZhCn),
            "ja_JP" | "ja" => Some(Self::JaJp),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::EnUs => "en_US",
            Self::PtBr => "pt_BR",
            Self::FrFr => "fr_FR",
            Self::ZhCn => "zh_CN",
            Self::JaJp => "ja_JP",
        }
    }
}

impl fmt::Display for LocaleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
