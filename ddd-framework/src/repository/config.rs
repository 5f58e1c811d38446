use crate::errors::{ErrorKind, FrameworkError, FrameworkResult};
use crate::index::{validate_indexes, IndexSpec};
use std::sync::Arc;

/// Declarative configuration of a document repository.
///
/// Names the backing collection and, optionally, the indexes the collection
/// must carry. The configuration is immutable once built and cheap to clone,
/// so a repository type can keep one instance and hand it to every
/// repository it constructs.
///
/// # Index declaration
/// - `indexes` not set: index reconciliation is disabled for the repository.
/// - `indexes(vec![])`: the collection is reconciled to carry no indexes
///   besides the primary-key index.
///
/// # Usage
/// ```rust
/// use ddd_framework::index::{IndexKey, IndexSpec};
/// use ddd_framework::repository::RepositoryConfig;
///
/// # fn main() -> ddd_framework::errors::FrameworkResult<()> {
/// let config = RepositoryConfig::new("users")
///     .indexes(vec![
///         IndexSpec::field("email").unique(true),
///         IndexSpec::new(vec![IndexKey::descending("createdAt")]),
///     ])
///     .build()?;
///
/// assert_eq!(config.collection_name(), "users");
/// assert_eq!(config.indexes().map(|indexes| indexes.len()), Some(2));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "RepositoryConfigData", into = "RepositoryConfigData")
)]
pub struct RepositoryConfig {
    inner: Arc<RepositoryConfigData>,
}

impl RepositoryConfig {
    /// Starts a configuration for the given collection.
    pub fn new(collection_name: &str) -> RepositoryConfigBuilder {
        RepositoryConfigBuilder {
            data: RepositoryConfigData {
                collection_name: collection_name.to_string(),
                indexes: None,
            },
        }
    }

    pub fn collection_name(&self) -> &str {
        &self.inner.collection_name
    }

    /// Returns the declared indexes, or `None` if reconciliation is disabled.
    pub fn indexes(&self) -> Option<&[IndexSpec]> {
        self.inner.indexes.as_deref()
    }

    /// Returns `true` if the repository reconciles indexes on first access.
    pub fn manages_indexes(&self) -> bool {
        self.inner.indexes.is_some()
    }
}

/// Builder for [`RepositoryConfig`].
pub struct RepositoryConfigBuilder {
    data: RepositoryConfigData,
}

impl RepositoryConfigBuilder {
    /// Declares the indexes the collection must carry.
    pub fn indexes(mut self, indexes: Vec<IndexSpec>) -> Self {
        self.data.indexes = Some(indexes);
        self
    }

    /// Validates and freezes the configuration.
    ///
    /// # Errors
    /// `ConfigurationError` if the collection name is empty or the declared
    /// indexes are invalid (see [`validate_indexes`]).
    pub fn build(self) -> FrameworkResult<RepositoryConfig> {
        RepositoryConfig::try_from(self.data)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct RepositoryConfigData {
    collection_name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    indexes: Option<Vec<IndexSpec>>,
}

impl TryFrom<RepositoryConfigData> for RepositoryConfig {
    type Error = FrameworkError;

    fn try_from(data: RepositoryConfigData) -> FrameworkResult<Self> {
        if data.collection_name.trim().is_empty() {
            log::error!("Repository configured without a collection name");
            return Err(FrameworkError::new(
                "Collection name must not be empty",
                ErrorKind::ConfigurationError,
            ));
        }

        if let Some(indexes) = &data.indexes {
            validate_indexes(indexes).map_err(|err| {
                FrameworkError::new_with_cause(
                    &format!("Invalid index declaration for collection '{}'", data.collection_name),
                    ErrorKind::ConfigurationError,
                    err,
                )
            })?;
        }

        Ok(RepositoryConfig {
            inner: Arc::new(data),
        })
    }
}

impl From<RepositoryConfig> for RepositoryConfigData {
    fn from(config: RepositoryConfig) -> Self {
        RepositoryConfigData::clone(&config.inner)
    }
}
