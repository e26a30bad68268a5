use serde::{Deserialize, Serialize};

use crate::models::SearchType;

/// Display hint for where a result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceIcon {
    Drive,
    FtpServer,
    Folder,
    Repository,
    Device,
    Document,
}

impl SourceIcon {
    pub fn for_search_type(search_type: SearchType) -> Self {
        match search_type {
            SearchType::GenericDrive => Self::Drive,
            SearchType::FtpIndex => Self::FtpServer,
            SearchType::DirectoryIndex => Self::Folder,
            SearchType::CodeHost => Self::Repository,
            SearchType::DeviceIndex => Self::Device,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Drive => "drive",
            Self::FtpServer => "ftp-server",
            Self::Folder => "folder",
            Self::Repository => "repository",
            Self::Device => "device",
            Self::Document => "document",
        }
    }

    /// Parse a provider-supplied icon tag, if it is one we know.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "drive" => Some(Self::Drive),
            "ftp-server" => Some(Self::FtpServer),
            "folder" => Some(Self::Folder),
            "repository" => Some(Self::Repository),
            "device" => Some(Self::Device),
            "document" => Some(Self::Document),
            _ => None,
        }
    }
}

/// One normalized search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultItem {
    pub title: String,
    /// Absolute URI, or empty when the provider gave nothing usable.
    pub url: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_icon: Option<SourceIcon>,
}

/// Everything one search produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEnvelope {
    pub search_type: SearchType,
    pub built_query_string: String,
    pub items: Vec<ResultItem>,
}

impl ResultEnvelope {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
