use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};

/// A file entry as reported by `GET /API/storage/{storage}/file/{file}`.
///
/// `size` is signed because the server reports `-1` when it cannot determine
/// the length. Convert to a [`SizedFile`] before reading any data.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDocument {
    pub id: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub state: String,
    pub size: i64,
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub refresh_flag: u8,
    #[serde(rename = "storage", default)]
    pub storage_id: String,
    /// Key/value pairs in document order. Keys may repeat.
    #[serde(default, deserialize_with = "metadata_fields")]
    pub metadata: Vec<MetadataField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MetadataField {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

fn metadata_fields<'de, D>(deserializer: D) -> std::result::Result<Vec<MetadataField>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Fields {
        #[serde(default)]
        field: Vec<MetadataField>,
    }

    Ok(Fields::deserialize(deserializer)?.field)
}

impl FileDocument {
    /// Decode an XML `FileDocument`.
    pub fn from_xml(xml: &[u8]) -> Result<Self> {
        Ok(quick_xml::de::from_reader(xml)?)
    }

    /// First value recorded for `key`, if any.
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|field| field.key == key)
            .map(|field| field.value.as_str())
    }

    /// Validate the declared size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSize`] when the server reported a negative size.
    pub fn into_sized(self) -> Result<SizedFile> {
        SizedFile::try_from(self)
    }
}

/// A [`FileDocument`] whose size is known to be non-negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizedFile {
    document: FileDocument,
    size: u64,
}

impl TryFrom<FileDocument> for SizedFile {
    type Error = Error;

    fn try_from(document: FileDocument) -> Result<Self> {
        let size = u64::try_from(document.size).map_err(|_| Error::InvalidSize {
            file_id: document.id.clone(),
            size: document.size,
        })?;
        Ok(Self { document, size })
    }
}

impl SizedFile {
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn file_id(&self) -> &str {
        &self.document.id
    }

    pub fn storage_id(&self) -> &str {
        &self.document.storage_id
    }

    pub fn path(&self) -> &str {
        &self.document.path
    }

    pub fn document(&self) -> &FileDocument {
        &self.document
    }

    /// Last element of the remote path.
    ///
    /// Trailing slashes are ignored; an empty path yields `"."` and a path of
    /// only slashes yields `"/"`.
    pub fn basename(&self) -> &str {
        basename(&self.document.path)
    }
}

fn basename(path: &str) -> &str {
    if path.is_empty() {
        return ".";
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/";
    }
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}
