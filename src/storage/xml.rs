//! Decoding of the two registry files.
//!
//! The address file has the shape
//!
//! ```xml
//! <ADDRESSOBJECTS>
//!   <OBJECT OBJECTID="5" NAME="Main" TYPENAME="street"
//!           STARTDATE="2000-01-01" ENDDATE="2079-06-06"
//!           ISACTUAL="1" ISACTIVE="1"/>
//! </ADDRESSOBJECTS>
//! ```
//!
//! and the hierarchy file
//!
//! ```xml
//! <ITEMS>
//!   <ITEM OBJECTID="5" PARENTOBJID="3"/>
//! </ITEMS>
//! ```
//!
//! Attributes not listed here are ignored.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use quick_xml::{events::Event, Reader};
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::instrument;

use crate::{
    domain::{input::DATE_FORMAT, AddressRecord, Config, Hierarchy, ObjectId},
    storage::RecordSource,
};

/// Errors that can occur while loading a registry file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file does not exist.
    #[error("registry file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file exists but could not be read.
    #[error("failed to read {}", .path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// The file is not well-formed XML, or an attribute has the wrong type.
    #[error("failed to decode {}", .path.display())]
    Xml {
        /// The file being decoded.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: quick_xml::DeError,
    },

    /// The document root is not the element this file must start with.
    #[error("{} is not a {expected} document (root element is {found})", .path.display())]
    UnexpectedRoot {
        /// The file being decoded.
        path: PathBuf,
        /// The required root element.
        expected: &'static str,
        /// The root element found.
        found: String,
    },

    /// A date attribute is not a valid `yyyy-MM-dd` date.
    #[error("invalid {attribute} '{value}' on object {object_id} in {}", .path.display())]
    InvalidDate {
        /// The file being decoded.
        path: PathBuf,
        /// The object carrying the bad attribute.
        object_id: ObjectId,
        /// The attribute name.
        attribute: &'static str,
        /// The raw attribute value.
        value: String,
    },
}

/// A [`RecordSource`] reading the registry XML files from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlSource {
    addresses: PathBuf,
    hierarchy: PathBuf,
}

impl XmlSource {
    /// Creates a source reading the given files.
    #[must_use]
    pub const fn new(addresses: PathBuf, hierarchy: PathBuf) -> Self {
        Self {
            addresses,
            hierarchy,
        }
    }

    /// Creates a source from a configuration, resolving paths against `root`.
    #[must_use]
    pub fn from_config(root: &Path, config: &Config) -> Self {
        Self::new(config.addresses_path(root), config.hierarchy_path(root))
    }

    /// The address objects file.
    #[must_use]
    pub fn addresses(&self) -> &Path {
        &self.addresses
    }

    /// The hierarchy file.
    #[must_use]
    pub fn hierarchy(&self) -> &Path {
        &self.hierarchy
    }
}

impl RecordSource for XmlSource {
    #[instrument(skip(self), fields(path = %self.addresses.display()))]
    fn load_addresses(&self) -> Result<Vec<AddressRecord>, LoadError> {
        let content = read(&self.addresses)?;
        let records = decode_addresses(&content, &self.addresses)?;
        tracing::info!("loaded {} address records", records.len());
        Ok(records)
    }

    #[instrument(skip(self), fields(path = %self.hierarchy.display()))]
    fn load_hierarchy(&self) -> Result<Hierarchy, LoadError> {
        let content = read(&self.hierarchy)?;
        let hierarchy = decode_hierarchy(&content, &self.hierarchy)?;
        tracing::info!("loaded {} hierarchy entries", hierarchy.len());
        Ok(hierarchy)
    }
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

#[derive(Debug, Deserialize)]
struct AddressObjects {
    #[serde(rename = "OBJECT", default)]
    objects: Vec<Object>,
}

#[derive(Debug, Deserialize)]
struct Object {
    #[serde(rename = "@OBJECTID")]
    object_id: ObjectId,
    #[serde(rename = "@NAME", default)]
    name: String,
    #[serde(rename = "@TYPENAME", default)]
    type_name: String,
    #[serde(rename = "@STARTDATE", default)]
    start_date: String,
    #[serde(rename = "@ENDDATE", default)]
    end_date: String,
    #[serde(rename = "@ISACTUAL", default, deserialize_with = "flag")]
    is_actual: bool,
    #[serde(rename = "@ISACTIVE", default, deserialize_with = "flag")]
    is_active: bool,
}

impl Object {
    fn into_record(self, path: &Path) -> Result<AddressRecord, LoadError> {
        let date = |attribute: &'static str, value: &str| {
            NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| LoadError::InvalidDate {
                path: path.to_path_buf(),
                object_id: self.object_id,
                attribute,
                value: value.to_string(),
            })
        };

        let valid_from = date("STARTDATE", &self.start_date)?;
        let valid_to = date("ENDDATE", &self.end_date)?;

        Ok(AddressRecord {
            object_id: self.object_id,
            name: self.name,
            type_name: self.type_name,
            valid_from,
            valid_to,
            is_active: self.is_active,
            is_current: self.is_actual,
        })
    }
}

#[derive(Debug, Deserialize)]
struct Items {
    #[serde(rename = "ITEM", default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    #[serde(rename = "@OBJECTID")]
    child: ObjectId,
    #[serde(rename = "@PARENTOBJID")]
    parent: ObjectId,
}

/// Registry flags are set only when the attribute is exactly `"1"`.
fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = String::deserialize(deserializer)?;
    Ok(value == "1")
}

/// The serde decoder ignores the root element name, so it is checked here.
fn check_root(content: &str, expected: &'static str, path: &Path) -> Result<(), LoadError> {
    let mut reader = Reader::from_str(content);
    loop {
        match reader.read_event() {
            Ok(Event::Start(element) | Event::Empty(element)) => {
                let found = String::from_utf8_lossy(element.name().as_ref()).into_owned();
                if found == expected {
                    return Ok(());
                }
                return Err(LoadError::UnexpectedRoot {
                    path: path.to_path_buf(),
                    expected,
                    found,
                });
            }
            // an empty document is reported by the decoder
            Ok(Event::Eof) => return Ok(()),
            Ok(_) => {}
            Err(source) => {
                return Err(LoadError::Xml {
                    path: path.to_path_buf(),
                    source: source.into(),
                });
            }
        }
    }
}

fn decode_addresses(content: &str, path: &Path) -> Result<Vec<AddressRecord>, LoadError> {
    check_root(content, "ADDRESSOBJECTS", path)?;
    let root: AddressObjects = quick_xml::de::from_str(content).map_err(|source| LoadError::Xml {
        path: path.to_path_buf(),
        source,
    })?;

    root.objects
        .into_iter()
        .map(|object| object.into_record(path))
        .collect()
}

fn decode_hierarchy(content: &str, path: &Path) -> Result<Hierarchy, LoadError> {
    check_root(content, "ITEMS", path)?;
    let root: Items = quick_xml::de::from_str(content).map_err(|source| LoadError::Xml {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(root
        .items
        .into_iter()
        .map(|item| (item.child, item.parent))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESSES: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ADDRESSOBJECTS>
  <OBJECT ID="1" OBJECTID="3" OBJECTGUID="c0a1" NAME="Springfield" TYPENAME="city" LEVEL="5"
          STARTDATE="2000-01-01" ENDDATE="2079-06-06" ISACTUAL="1" ISACTIVE="1" />
  <OBJECT ID="2" OBJECTID="5" NAME="Main" TYPENAME="street"
          STARTDATE="2005-03-01" ENDDATE="2015-12-31" ISACTUAL="0" ISACTIVE="1" />
  <OBJECT ID="3" OBJECTID="7" NAME="Old Mill" TYPENAME="street"
          STARTDATE="1990-01-01" ENDDATE="2004-12-31" ISACTIVE="0" />
</ADDRESSOBJECTS>
"#;

    fn path() -> PathBuf {
        PathBuf::from("AS_ADDR_OBJ.XML")
    }

    #[test]
    fn decodes_address_objects() {
        let records = decode_addresses(ADDRESSES, &path()).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].object_id, 3);
        assert_eq!(records[0].name, "Springfield");
        assert_eq!(records[0].type_name, "city");
        assert_eq!(
            records[0].valid_from,
            NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()
        );
        assert_eq!(
            records[0].valid_to,
            NaiveDate::from_ymd_opt(2079, 6, 6).unwrap()
        );
        assert!(records[0].is_current_and_active());
    }

    #[test]
    fn actual_maps_to_current_and_active_to_active() {
        let records = decode_addresses(ADDRESSES, &path()).unwrap();

        assert!(!records[1].is_current);
        assert!(records[1].is_active);
    }

    #[test]
    fn missing_flag_is_false() {
        let records = decode_addresses(ADDRESSES, &path()).unwrap();

        assert!(!records[2].is_current);
        assert!(!records[2].is_active);
    }

    #[test]
    fn empty_registry_has_no_records() {
        let records = decode_addresses("<ADDRESSOBJECTS/>", &path()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn bad_date_is_load_error() {
        let xml = r#"<ADDRESSOBJECTS>
  <OBJECT OBJECTID="9" NAME="X" TYPENAME="street" STARTDATE="2000-01-01" ENDDATE="06.06.2079" />
</ADDRESSOBJECTS>"#;

        let error = decode_addresses(xml, &path()).unwrap_err();

        assert!(matches!(
            error,
            LoadError::InvalidDate {
                object_id: 9,
                attribute: "ENDDATE",
                ..
            }
        ));
    }

    #[test]
    fn non_integer_id_is_load_error() {
        let xml = r#"<ADDRESSOBJECTS>
  <OBJECT OBJECTID="abc" NAME="X" TYPENAME="street" STARTDATE="2000-01-01" ENDDATE="2001-01-01" />
</ADDRESSOBJECTS>"#;

        let error = decode_addresses(xml, &path()).unwrap_err();
        assert!(matches!(error, LoadError::Xml { .. }));
    }

    #[test]
    fn malformed_xml_is_load_error() {
        let error = decode_addresses("<ADDRESSOBJECTS><OBJECT", &path()).unwrap_err();
        assert!(matches!(error, LoadError::Xml { .. }));
    }

    #[test]
    fn hierarchy_file_is_not_an_address_registry() {
        let xml = r#"<ITEMS><ITEM OBJECTID="5" PARENTOBJID="3" /></ITEMS>"#;

        let error = decode_addresses(xml, &path()).unwrap_err();

        assert!(matches!(
            error,
            LoadError::UnexpectedRoot {
                expected: "ADDRESSOBJECTS",
                ref found,
                ..
            } if found == "ITEMS"
        ));
        assert_eq!(
            error.to_string(),
            "AS_ADDR_OBJ.XML is not a ADDRESSOBJECTS document (root element is ITEMS)"
        );
    }

    #[test]
    fn address_file_is_not_a_hierarchy() {
        let error = decode_hierarchy(ADDRESSES, Path::new("AS_ADM_HIERARCHY.XML")).unwrap_err();

        assert!(matches!(
            error,
            LoadError::UnexpectedRoot {
                expected: "ITEMS",
                ..
            }
        ));
    }

    #[test]
    fn decode_error_message_does_not_repeat_cause() {
        let xml = r#"<ADDRESSOBJECTS>
  <OBJECT OBJECTID="x" NAME="X" TYPENAME="street" STARTDATE="2000-01-01" ENDDATE="2001-01-01" />
</ADDRESSOBJECTS>"#;

        let error = decode_addresses(xml, &path()).unwrap_err();

        assert_eq!(error.to_string(), "failed to decode AS_ADDR_OBJ.XML");
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn decodes_hierarchy_items() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<ITEMS>
  <ITEM ID="10" OBJECTID="5" PARENTOBJID="3" ISACTIVE="1" />
  <ITEM ID="11" OBJECTID="3" PARENTOBJID="0" ISACTIVE="1" />
</ITEMS>"#;

        let hierarchy = decode_hierarchy(xml, Path::new("AS_ADM_HIERARCHY.XML")).unwrap();

        assert_eq!(hierarchy.len(), 2);
        assert_eq!(hierarchy.parent_of(5), Some(3));
        assert_eq!(hierarchy.parent_of(3), None);
    }

    #[test]
    fn missing_parent_attribute_is_load_error() {
        let xml = r#"<ITEMS><ITEM OBJECTID="5" /></ITEMS>"#;

        let error = decode_hierarchy(xml, Path::new("AS_ADM_HIERARCHY.XML")).unwrap_err();
        assert!(matches!(error, LoadError::Xml { .. }));
    }

    #[test]
    fn missing_file_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let source = XmlSource::new(tmp.path().join("a.xml"), tmp.path().join("h.xml"));

        let error = source.load_addresses().unwrap_err();

        assert!(matches!(error, LoadError::NotFound(p) if p == tmp.path().join("a.xml")));
    }

    #[test]
    fn reads_files_from_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let addresses = tmp.path().join("AS_ADDR_OBJ.XML");
        let hierarchy = tmp.path().join("AS_ADM_HIERARCHY.XML");
        fs::write(&addresses, ADDRESSES).unwrap();
        fs::write(&hierarchy, r#"<ITEMS><ITEM OBJECTID="5" PARENTOBJID="3"/></ITEMS>"#).unwrap();

        let source = XmlSource::new(addresses, hierarchy);

        assert_eq!(source.load_addresses().unwrap().len(), 3);
        assert_eq!(source.load_hierarchy().unwrap().parent_of(5), Some(3));
    }
}
