use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::CommandInfo;

/// Serializable bundle of command trees used for export.
///
/// A package groups one or more [`CommandInfo`] roots with version metadata,
/// making it suitable for handing to a UI or documentation generator as a
/// single JSON or YAML document.
///
/// # Examples
///
/// ```
/// use command_info_core::*;
///
/// let mut package = MetadataPackage::new("1.0.0", "2024-01-15T10:30:00Z");
/// package.name = Some("tool-metadata".into());
/// package.commands.push(CommandInfo::new("tool"));
///
/// assert_eq!(package.command_count(), 1);
/// assert_eq!(package.schema_version.as_deref(), Some(METADATA_CONTRACT_VERSION));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataPackage {
    /// Metadata contract version (populated from
    /// [`METADATA_CONTRACT_VERSION`](crate::METADATA_CONTRACT_VERSION)).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    /// Package format version (semver string).
    pub version: String,
    /// Optional package name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Optional package description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// ISO-8601 timestamp for package creation.
    pub generated_at: String,
    /// Optional hash of the serialized command trees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_hash: Option<String>,
    /// Command trees included in this package.
    pub commands: Vec<CommandInfo>,
}

impl MetadataPackage {
    /// Creates a package with required fields.
    ///
    /// The `schema_version` is automatically set from
    /// [`METADATA_CONTRACT_VERSION`](crate::METADATA_CONTRACT_VERSION).
    pub fn new(version: impl Into<String>, generated_at: impl Into<String>) -> Self {
        Self {
            schema_version: Some(crate::METADATA_CONTRACT_VERSION.to_string()),
            version: version.into(),
            name: None,
            description: None,
            generated_at: generated_at.into(),
            bundle_hash: None,
            commands: Vec::new(),
        }
    }

    /// Returns the number of root commands in this package.
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Lowercase hex SHA-256 of the compact JSON encoding of `commands`.
    ///
    /// Only the command trees are hashed; name, description and timestamp
    /// can change without invalidating the hash.
    ///
    /// # Errors
    ///
    /// Returns an error if a command tree cannot be serialized.
    pub fn compute_bundle_hash(&self) -> serde_json::Result<String> {
        let bytes = serde_json::to_vec(&self.commands)?;
        Ok(format!("{:x}", Sha256::digest(&bytes)))
    }

    /// Stores the current [`compute_bundle_hash`](Self::compute_bundle_hash)
    /// in `bundle_hash`.
    ///
    /// # Errors
    ///
    /// Returns an error if a command tree cannot be serialized.
    pub fn seal(&mut self) -> serde_json::Result<()> {
        self.bundle_hash = Some(self.compute_bundle_hash()?);
        Ok(())
    }

    /// Returns `true` if `bundle_hash` is present and matches the command
    /// trees. An unsealed package never verifies.
    ///
    /// # Errors
    ///
    /// Returns an error if a command tree cannot be serialized.
    pub fn verify_bundle_hash(&self) -> serde_json::Result<bool> {
        match &self.bundle_hash {
            Some(stored) => Ok(*stored == self.compute_bundle_hash()?),
            None => Ok(false),
        }
    }
}
