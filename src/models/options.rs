//! Typed per-type search options.
//!
//! Each [`SearchType`] owns exactly one options record; [`SearchOptions`] is the
//! tagged union over them. Defaults match what the tool has always used when a
//! field is left unset.

use crate::error::{Result, SearchError};
use crate::models::SearchType;

pub const DEFAULT_FILE_TYPE: &str = "pdf";
pub const DEFAULT_EXTENSIONS: &[&str] = &["env", "json", "yml"];
pub const DEFAULT_DEVICE_TYPE: &str = "webcam";
pub const MAX_COUNTRY_CODE_LEN: usize = 2;

/// Options for document-host searches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveOptions {
    pub file_type: String,
    /// Extra `site:` restriction; empty or unset means none.
    pub domain: Option<String>,
}

impl Default for DriveOptions {
    fn default() -> Self {
        Self { file_type: DEFAULT_FILE_TYPE.to_string(), domain: None }
    }
}

/// Options for FTP index searches. Carried to the provider, not part of the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FtpOptions {
    pub anonymous_only: bool,
    pub deep_scan: bool,
}

impl Default for FtpOptions {
    fn default() -> Self {
        Self { anonymous_only: true, deep_scan: false }
    }
}

/// Options for code-host secret searches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeHostOptions {
    /// File extensions, one `ext:` clause each, in this order.
    pub extensions: Vec<String>,
    pub organization: Option<String>,
}

impl Default for CodeHostOptions {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            organization: None,
        }
    }
}

/// Options for device searches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceOptions {
    pub device_type: String,
    /// ISO 3166 alpha-2 code.
    pub country_code: Option<String>,
}

impl Default for DeviceOptions {
    fn default() -> Self {
        Self { device_type: DEFAULT_DEVICE_TYPE.to_string(), country_code: None }
    }
}

/// Options for one search, tagged by the search type they belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOptions {
    GenericDrive(DriveOptions),
    FtpIndex(FtpOptions),
    DirectoryIndex,
    CodeHost(CodeHostOptions),
    DeviceIndex(DeviceOptions),
}

impl SearchOptions {
    /// Options with every field at its default.
    pub fn default_for(search_type: SearchType) -> Self {
        match search_type {
            SearchType::GenericDrive => Self::GenericDrive(DriveOptions::default()),
            SearchType::FtpIndex => Self::FtpIndex(FtpOptions::default()),
            SearchType::DirectoryIndex => Self::DirectoryIndex,
            SearchType::CodeHost => Self::CodeHost(CodeHostOptions::default()),
            SearchType::DeviceIndex => Self::DeviceIndex(DeviceOptions::default()),
        }
    }

    /// The search type this record belongs to.
    pub fn search_type(&self) -> SearchType {
        match self {
            Self::GenericDrive(_) => SearchType::GenericDrive,
            Self::FtpIndex(_) => SearchType::FtpIndex,
            Self::DirectoryIndex => SearchType::DirectoryIndex,
            Self::CodeHost(_) => SearchType::CodeHost,
            Self::DeviceIndex(_) => SearchType::DeviceIndex,
        }
    }

    /// Check these options against the rules of `search_type`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::OptionsValidation`] if the record belongs to a
    /// different search type, a required field is empty, a value would break
    /// out of its query operator, or a length limit is exceeded.
    pub fn validate(&self, search_type: SearchType) -> Result<()> {
        if self.search_type() != search_type {
            return Err(SearchError::options(
                search_type,
                format!("got options for {} search", self.search_type()),
            ));
        }

        match self {
            Self::GenericDrive(opts) => {
                check_operand(search_type, "fileType", &opts.file_type, true)?;
                if let Some(domain) = &opts.domain {
                    check_operand(search_type, "domain", domain, false)?;
                }
            }
            Self::FtpIndex(_) | Self::DirectoryIndex => {}
            Self::CodeHost(opts) => {
                if opts.extensions.is_empty() {
                    return Err(SearchError::options(
                        search_type,
                        "extensions must list at least one extension",
                    ));
                }
                for ext in &opts.extensions {
                    check_operand(search_type, "extensions", ext, true)?;
                }
                if let Some(org) = &opts.organization {
                    check_operand(search_type, "organization", org, false)?;
                }
            }
            Self::DeviceIndex(opts) => {
                check_operand(search_type, "deviceType", &opts.device_type, true)?;
                if let Some(code) = &opts.country_code {
                    if code.chars().count() > MAX_COUNTRY_CODE_LEN {
                        return Err(SearchError::options(
                            search_type,
                            format!(
                                "countryCode {code:?} is longer than {MAX_COUNTRY_CODE_LEN} characters"
                            ),
                        ));
                    }
                    if !code.chars().all(|c| c.is_ascii_alphabetic()) {
                        return Err(SearchError::options(
                            search_type,
                            format!("countryCode {code:?} must be ASCII letters"),
                        ));
                    }
                }
            }
        }

        Ok(())
    }
}

/// Values end up as bare operator arguments (`filetype:pdf`), so whitespace or
/// a quote would silently change the meaning of the query.
fn check_operand(search_type: SearchType, field: &str, value: &str, required: bool) -> Result<()> {
    if value.is_empty() {
        if required {
            return Err(SearchError::options(search_type, format!("{field} must not be empty")));
        }
        return Ok(());
    }
    if value.chars().any(|c| c.is_whitespace() || c == '"') {
        return Err(SearchError::options(
            search_type,
            format!("{field} value {value:?} must not contain whitespace or quotes"),
        ));
    }
    Ok(())
}
