use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SearchError;

/// The provider categories a search can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SearchType {
    /// Web search engine scoped to a document host.
    GenericDrive,
    /// Open directory listings of FTP mirrors.
    FtpIndex,
    /// Open HTTP directory listings.
    DirectoryIndex,
    /// Code hosting search, aimed at leaked secrets.
    CodeHost,
    /// Internet-connected device search.
    DeviceIndex,
}

impl SearchType {
    /// Canonical tag, as persisted and accepted on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GenericDrive => "generic-drive",
            Self::FtpIndex => "ftp-index",
            Self::DirectoryIndex => "directory-index",
            Self::CodeHost => "code-host",
            Self::DeviceIndex => "device-index",
        }
    }

    /// Human-readable provider label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::GenericDrive => "Google Drive",
            Self::FtpIndex => "FTP",
            Self::DirectoryIndex => "Directory",
            Self::CodeHost => "GitHub",
            Self::DeviceIndex => "Shodan",
        }
    }

    pub fn all() -> &'static [SearchType] {
        &[Self::GenericDrive, Self::FtpIndex, Self::DirectoryIndex, Self::CodeHost, Self::DeviceIndex]
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchType {
    type Err = SearchError;

    /// Accepts canonical tags plus the short tags older history files use.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generic-drive" | "google" => Ok(Self::GenericDrive),
            "ftp-index" | "ftp" => Ok(Self::FtpIndex),
            "directory-index" | "directory" | "dir" => Ok(Self::DirectoryIndex),
            "code-host" | "github" => Ok(Self::CodeHost),
            "device-index" | "shodan" => Ok(Self::DeviceIndex),
            _ => Err(SearchError::UnknownSearchType(s.to_string())),
        }
    }
}

impl Serialize for SearchType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SearchType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        tag.parse().map_err(serde::de::Error::custom)
    }
}
