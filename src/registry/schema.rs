//! Declarative option schemas, one per search type.
//!
//! The schema is what the command line validates raw `key=value` pairs
//! against before a typed [`SearchOptions`] record is built. Keys match
//! case-insensitively and ignore `-`/`_`, so `fileType`, `file-type` and
//! `file_type` name the same field.

use std::collections::HashMap;

use crate::error::{Result, SearchError};
use crate::models::{SearchOptions, SearchType};

/// Value shape of one option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text.
    Text,
    /// Boolean switch (`true`/`false`, `yes`/`no`, `on`/`off`, `1`/`0`).
    Flag,
    /// Comma-separated, order-preserving list.
    List,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Flag => "flag",
            Self::List => "list",
        }
    }
}

/// One declared option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionField {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Value used when the field is not supplied.
    pub default: Option<&'static str>,
    pub help: &'static str,
}

/// Every option a search type accepts.
#[derive(Debug, PartialEq, Eq)]
pub struct OptionsSchema {
    pub search_type: SearchType,
    pub fields: &'static [OptionField],
}

static DRIVE_SCHEMA: OptionsSchema = OptionsSchema {
    search_type: SearchType::GenericDrive,
    fields: &[
        OptionField {
            name: "fileType",
            kind: FieldKind::Text,
            required: true,
            default: Some("pdf"),
            help: "filetype: operator value (pdf, doc,docx, xls,xlsx, ppt,pptx, csv, txt)",
        },
        OptionField {
            name: "domain",
            kind: FieldKind::Text,
            required: false,
            default: None,
            help: "additional site: restriction",
        },
    ],
};

static FTP_SCHEMA: OptionsSchema = OptionsSchema {
    search_type: SearchType::FtpIndex,
    fields: &[
        OptionField {
            name: "anonymousOnly",
            kind: FieldKind::Flag,
            required: false,
            default: Some("true"),
            help: "only servers allowing anonymous login",
        },
        OptionField {
            name: "deepScan",
            kind: FieldKind::Flag,
            required: false,
            default: Some("false"),
            help: "slower, more thorough scan",
        },
    ],
};

static DIRECTORY_SCHEMA: OptionsSchema =
    OptionsSchema { search_type: SearchType::DirectoryIndex, fields: &[] };

static CODE_HOST_SCHEMA: OptionsSchema = OptionsSchema {
    search_type: SearchType::CodeHost,
    fields: &[
        OptionField {
            name: "extensions",
            kind: FieldKind::List,
            required: true,
            default: Some("env,json,yml"),
            help: "file extensions, one ext: clause each",
        },
        OptionField {
            name: "organization",
            kind: FieldKind::Text,
            required: false,
            default: None,
            help: "restrict to one organization (org:)",
        },
    ],
};

static DEVICE_SCHEMA: OptionsSchema = OptionsSchema {
    search_type: SearchType::DeviceIndex,
    fields: &[
        OptionField {
            name: "deviceType",
            kind: FieldKind::Text,
            required: true,
            default: Some("webcam"),
            help: "device class (webcam, printer, router, database, server)",
        },
        OptionField {
            name: "countryCode",
            kind: FieldKind::Text,
            required: false,
            default: None,
            help: "two-letter country code (country:)",
        },
    ],
};

/// Schema registered for `search_type`.
pub fn schema_for(search_type: SearchType) -> &'static OptionsSchema {
    match search_type {
        SearchType::GenericDrive => &DRIVE_SCHEMA,
        SearchType::FtpIndex => &FTP_SCHEMA,
        SearchType::DirectoryIndex => &DIRECTORY_SCHEMA,
        SearchType::CodeHost => &CODE_HOST_SCHEMA,
        SearchType::DeviceIndex => &DEVICE_SCHEMA,
    }
}

#[derive(Debug)]
enum FieldValue {
    Text(String),
    Flag(bool),
    List(Vec<String>),
}

impl OptionsSchema {
    /// Find a field by name, ignoring case, `-` and `_`.
    pub fn field(&self, name: &str) -> Option<&'static OptionField> {
        let wanted = normalize_key(name);
        self.fields.iter().find(|field| normalize_key(field.name) == wanted)
    }

    /// Build validated options from raw `key=value` pairs; unset fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::OptionsValidation`] for an unknown or repeated key,
    /// an unparsable flag, or a value the typed record rejects.
    pub fn parse_pairs(&self, pairs: &[(String, String)]) -> Result<SearchOptions> {
        let search_type = self.search_type;
        let mut values: HashMap<&'static str, FieldValue> = HashMap::new();

        for (key, raw) in pairs {
            let field = self.field(key).ok_or_else(|| {
                SearchError::options(
                    search_type,
                    format!("unknown option `{key}` (expected one of: {})", self.field_names()),
                )
            })?;
            if values.contains_key(field.name) {
                return Err(SearchError::options(
                    search_type,
                    format!("option `{}` given more than once", field.name),
                ));
            }

            let value = match field.kind {
                FieldKind::Text => FieldValue::Text(raw.trim().to_string()),
                FieldKind::Flag => FieldValue::Flag(parse_flag(raw).ok_or_else(|| {
                    SearchError::options(
                        search_type,
                        format!("option `{}` expects true or false, got {raw:?}", field.name),
                    )
                })?),
                FieldKind::List => {
                    let items: Vec<String> =
                        raw.split(',').map(|item| item.trim().to_string()).collect();
                    if items.iter().any(String::is_empty) {
                        return Err(SearchError::options(
                            search_type,
                            format!("option `{}` has an empty entry in {raw:?}", field.name),
                        ));
                    }
                    FieldValue::List(items)
                }
            };
            values.insert(field.name, value);
        }

        let mut options = SearchOptions::default_for(search_type);
        match &mut options {
            SearchOptions::GenericDrive(opts) => {
                if let Some(FieldValue::Text(v)) = values.remove("fileType") {
                    opts.file_type = v;
                }
                if let Some(FieldValue::Text(v)) = values.remove("domain") {
                    opts.domain = Some(v);
                }
            }
            SearchOptions::FtpIndex(opts) => {
                if let Some(FieldValue::Flag(v)) = values.remove("anonymousOnly") {
                    opts.anonymous_only = v;
                }
                if let Some(FieldValue::Flag(v)) = values.remove("deepScan") {
                    opts.deep_scan = v;
                }
            }
            SearchOptions::DirectoryIndex => {}
            SearchOptions::CodeHost(opts) => {
                if let Some(FieldValue::List(v)) = values.remove("extensions") {
                    opts.extensions = v;
                }
                if let Some(FieldValue::Text(v)) = values.remove("organization") {
                    opts.organization = Some(v);
                }
            }
            SearchOptions::DeviceIndex(opts) => {
                if let Some(FieldValue::Text(v)) = values.remove("deviceType") {
                    opts.device_type = v;
                }
                if let Some(FieldValue::Text(v)) = values.remove("countryCode") {
                    opts.country_code = Some(v);
                }
            }
        }

        options.validate(search_type)?;
        Ok(options)
    }

    fn field_names(&self) -> String {
        if self.fields.is_empty() {
            return "none".to_string();
        }
        self.fields.iter().map(|field| field.name).collect::<Vec<_>>().join(", ")
    }
}

fn normalize_key(key: &str) -> String {
    key.chars().filter(|c| *c != '-' && *c != '_').map(|c| c.to_ascii_lowercase()).collect()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::options::{CodeHostOptions, DeviceOptions, FtpOptions};

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_no_pairs_gives_defaults() {
        for search_type in SearchType::all() {
            let options = schema_for(*search_type).parse_pairs(&[]).unwrap();
            assert_eq!(options, SearchOptions::default_for(*search_type));
        }
    }

    #[test]
    fn test_schema_defaults_match_typed_defaults() {
        let schema = schema_for(SearchType::CodeHost);
        let default = schema.field("extensions").unwrap().default.unwrap();
        let parsed = schema.parse_pairs(&pairs(&[("extensions", default)])).unwrap();
        assert_eq!(parsed, SearchOptions::default_for(SearchType::CodeHost));
    }

    #[test]
    fn test_key_spelling_variants() {
        let schema = schema_for(SearchType::DeviceIndex);
        for key in ["countryCode", "country-code", "country_code", "COUNTRYCODE"] {
            let options = schema.parse_pairs(&pairs(&[(key, "US")])).unwrap();
            assert_eq!(
                options,
                SearchOptions::DeviceIndex(DeviceOptions {
                    device_type: "webcam".into(),
                    country_code: Some("US".into()),
                })
            );
        }
    }

    #[test]
    fn test_list_keeps_order() {
        let schema = schema_for(SearchType::CodeHost);
        let options =
            schema.parse_pairs(&pairs(&[("extensions", "yml, env,pem"), ("org", "x")]));
        // `org` is not a declared field name
        assert!(options.is_err());

        let options = schema
            .parse_pairs(&pairs(&[("extensions", "yml, env,pem"), ("organization", "acme")]))
            .unwrap();
        assert_eq!(
            options,
            SearchOptions::CodeHost(CodeHostOptions {
                extensions: vec!["yml".into(), "env".into(), "pem".into()],
                organization: Some("acme".into()),
            })
        );
    }

    #[test]
    fn test_list_rejects_empty_entries() {
        let schema = schema_for(SearchType::CodeHost);
        for raw in ["env,,yml", "env,", " , ", ""] {
            let err = schema.parse_pairs(&pairs(&[("extensions", raw)])).unwrap_err();
            assert!(matches!(err, SearchError::OptionsValidation { .. }), "accepted {raw:?}");
            assert!(err.to_string().contains("empty entry"), "{err}");
        }
    }

    #[test]
    fn test_flags() {
        let schema = schema_for(SearchType::FtpIndex);
        let options =
            schema.parse_pairs(&pairs(&[("anonymousOnly", "no"), ("deepScan", "on")])).unwrap();
        assert_eq!(
            options,
            SearchOptions::FtpIndex(FtpOptions { anonymous_only: false, deep_scan: true })
        );

        let err = schema.parse_pairs(&pairs(&[("deepScan", "maybe")])).unwrap_err();
        assert!(err.to_string().contains("expects true or false"));
    }

    #[test]
    fn test_unknown_and_duplicate_keys() {
        let schema = schema_for(SearchType::DirectoryIndex);
        let err = schema.parse_pairs(&pairs(&[("depth", "2")])).unwrap_err();
        assert!(err.to_string().contains("expected one of: none"));

        let schema = schema_for(SearchType::GenericDrive);
        let err =
            schema.parse_pairs(&pairs(&[("domain", "a.com"), ("domain", "b.com")])).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_values_are_validated() {
        let schema = schema_for(SearchType::DeviceIndex);
        let err = schema.parse_pairs(&pairs(&[("countryCode", "USA")])).unwrap_err();
        assert!(matches!(err, SearchError::OptionsValidation { .. }));

        let schema = schema_for(SearchType::CodeHost);
        assert!(schema.parse_pairs(&pairs(&[("extensions", " , ")])).is_err());
    }
}
