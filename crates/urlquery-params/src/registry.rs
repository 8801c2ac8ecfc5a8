//! The field registry.
//!
//! The registry maps each target type to the ordered list of
//! [`FieldDescriptor`]s that drive its mapping. Registration appends;
//! lookups return a snapshot. A single process-wide registry lives behind
//! [`registry`], and [`register_query_field`] / [`registered_fields`] are the
//! usual entry points.
//!
//! Fields are registered either explicitly or, for [`QueryParams`] types, by
//! declaring them in [`QueryParams::query_fields`]. Declared fields are
//! registered once, the first time the type is mapped or its fields are
//! looked up through [`registered_fields`].

use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use urlquery_core::{UrlQueryError, UrlQueryResult};

use crate::access::QueryParams;
use crate::converters::UrlConverter;

/// Optional per-field settings.
///
/// `url_key` defaults to the field name and `read_only` to `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParamConfig {
    /// The key used in the query string.
    pub url_key: Option<String>,
    /// If `true`, the field is read from queries but never written.
    pub read_only: Option<bool>,
}

/// The registered mapping rule for one field.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// The key used in the query string.
    pub url_key: String,
    /// If `true`, the field is skipped when writing.
    pub read_only: bool,
    /// The name passed to [`FieldAccess`](crate::FieldAccess).
    pub field_name: String,
    /// The converter; descriptors without one are skipped by the engine.
    pub converter: Option<Arc<dyn UrlConverter>>,
}

impl FieldDescriptor {
    /// Creates a writable descriptor whose URL key is the field name.
    pub fn new(field_name: impl Into<String>, converter: Arc<dyn UrlConverter>) -> Self {
        let field_name = field_name.into();
        Self {
            url_key: field_name.clone(),
            read_only: false,
            field_name,
            converter: Some(converter),
        }
    }
}

/// A builder for one field registration.
///
/// # Examples
///
/// ```
/// use urlquery_params::converters::IsoDateConverter;
/// use urlquery_params::QueryField;
///
/// let descriptor = QueryField::new("start_time")
///     .converter::<IsoDateConverter>()
///     .url_key("stTm")
///     .into_descriptor()
///     .unwrap();
/// assert_eq!(descriptor.url_key, "stTm");
/// assert!(!descriptor.read_only);
///
/// assert!(QueryField::new("title").into_descriptor().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct QueryField {
    field_name: String,
    converter: Option<Arc<dyn UrlConverter>>,
    config: QueryParamConfig,
}

impl QueryField {
    /// Starts a registration for the named field.
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            converter: None,
            config: QueryParamConfig::default(),
        }
    }

    /// Uses a fresh instance of converter type `C`.
    #[must_use]
    pub fn converter<C: UrlConverter + Default + 'static>(self) -> Self {
        self.converter_arc(Arc::new(C::default()))
    }

    /// Uses the given converter instance.
    #[must_use]
    pub fn with_converter(self, converter: impl UrlConverter + 'static) -> Self {
        self.converter_arc(Arc::new(converter))
    }

    /// Uses a shared converter instance.
    #[must_use]
    pub fn converter_arc(mut self, converter: Arc<dyn UrlConverter>) -> Self {
        self.converter = Some(converter);
        self
    }

    /// Sets the key used in the query string.
    #[must_use]
    pub fn url_key(mut self, url_key: impl Into<String>) -> Self {
        self.config.url_key = Some(url_key.into());
        self
    }

    /// Marks the field read-only.
    #[must_use]
    pub const fn read_only(mut self, read_only: bool) -> Self {
        self.config.read_only = Some(read_only);
        self
    }

    /// Replaces the whole configuration.
    #[must_use]
    pub fn config(mut self, config: QueryParamConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolves defaults and builds the descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`UrlQueryError::ConfigurationError`] naming the URL key if no
    /// converter was given.
    pub fn into_descriptor(self) -> UrlQueryResult<FieldDescriptor> {
        let url_key = self.config.url_key.unwrap_or_else(|| self.field_name.clone());
        let Some(converter) = self.converter else {
            return Err(UrlQueryError::ConfigurationError(format!(
                "no converter given for url key '{url_key}'"
            )));
        };

        Ok(FieldDescriptor {
            url_key,
            read_only: self.config.read_only.unwrap_or(false),
            field_name: self.field_name,
            converter: Some(converter),
        })
    }
}

/// Identifies a registered type.
#[derive(Clone, Copy)]
pub struct TargetType {
    id: TypeId,
    name: &'static str,
}

impl TargetType {
    /// Returns the identity of `T`.
    pub fn of<T: 'static + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Returns the Rust type name, for diagnostics.
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TargetType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TargetType {}

impl Hash for TargetType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[derive(Debug, Default)]
struct RegistryEntry {
    fields: Vec<FieldDescriptor>,
    declared: bool,
}

/// A table from target type to its field descriptors.
///
/// Registration is append-only and expected to happen during setup; lookups
/// may run concurrently from any thread.
#[derive(Debug, Default)]
pub struct FieldRegistry {
    entries: RwLock<HashMap<TargetType, RegistryEntry>>,
}

impl FieldRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<TargetType, RegistryEntry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<TargetType, RegistryEntry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a field for `target`, after its existing fields.
    ///
    /// # Errors
    ///
    /// Returns [`UrlQueryError::ConfigurationError`] if the field has no
    /// converter.
    pub fn register(&self, target: TargetType, field: QueryField) -> UrlQueryResult<()> {
        self.register_descriptor(target, field.into_descriptor()?)
    }

    /// Registers a prepared descriptor for `target`.
    ///
    /// # Errors
    ///
    /// Returns [`UrlQueryError::ConfigurationError`] if the descriptor has no
    /// converter.
    pub fn register_descriptor(
        &self,
        target: TargetType,
        descriptor: FieldDescriptor,
    ) -> UrlQueryResult<()> {
        if descriptor.converter.is_none() {
            return Err(UrlQueryError::ConfigurationError(format!(
                "no converter given for url key '{}'",
                descriptor.url_key
            )));
        }

        tracing::debug!(
            target_type = target.name(),
            field = %descriptor.field_name,
            url_key = %descriptor.url_key,
            read_only = descriptor.read_only,
            "registered query field"
        );

        self.write()
            .entry(target)
            .or_default()
            .fields
            .push(descriptor);
        Ok(())
    }

    /// Returns the descriptors registered for `target`, in registration
    /// order. Unknown types yield an empty list.
    pub fn lookup(&self, target: TargetType) -> Vec<FieldDescriptor> {
        self.read()
            .get(&target)
            .map(|entry| entry.fields.clone())
            .unwrap_or_default()
    }

    /// Returns `true` if any field is registered for `target`.
    pub fn contains(&self, target: TargetType) -> bool {
        self.read().get(&target).is_some_and(|e| !e.fields.is_empty())
    }

    /// Registers the fields `T` declares, unless that already happened.
    ///
    /// # Errors
    ///
    /// Returns [`UrlQueryError::ConfigurationError`] if a declared field has
    /// no converter; nothing is registered in that case.
    pub fn declare<T: QueryParams>(&self) -> UrlQueryResult<()> {
        let target = TargetType::of::<T>();
        if self.read().get(&target).is_some_and(|e| e.declared) {
            return Ok(());
        }

        let declared = T::query_fields()
            .into_iter()
            .map(QueryField::into_descriptor)
            .collect::<UrlQueryResult<Vec<_>>>()?;

        let mut entries = self.write();
        let entry = entries.entry(target).or_default();
        if !entry.declared {
            tracing::debug!(
                target_type = target.name(),
                count = declared.len(),
                "declared query fields"
            );
            entry.fields.extend(declared);
            entry.declared = true;
        }
        Ok(())
    }

    /// Declares `T` if needed and returns its descriptors.
    pub fn fields_of<T: QueryParams>(&self) -> UrlQueryResult<Vec<FieldDescriptor>> {
        self.declare::<T>()?;
        Ok(self.lookup(TargetType::of::<T>()))
    }
}

static REGISTRY: LazyLock<FieldRegistry> = LazyLock::new(FieldRegistry::new);

/// Returns the process-wide registry.
pub fn registry() -> &'static FieldRegistry {
    &REGISTRY
}

/// Registers a field of `T` in the process-wide registry.
///
/// # Errors
///
/// Returns [`UrlQueryError::ConfigurationError`] naming the URL key if the
/// field has no converter.
pub fn register_query_field<T: 'static>(field: QueryField) -> UrlQueryResult<()> {
    registry().register(TargetType::of::<T>(), field)
}

/// Returns the fields registered for `T` in the process-wide registry,
/// declaring `T`'s fields first if that has not happened yet.
///
/// The result is the same whether or not `T` has been mapped before. A type
/// with neither declared nor registered fields yields an empty list.
///
/// # Errors
///
/// Returns [`UrlQueryError::ConfigurationError`] if a declared field has no
/// converter.
pub fn registered_fields<T: QueryParams>() -> UrlQueryResult<Vec<FieldDescriptor>> {
    registry().fields_of::<T>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converters::{BoolConverter, IntConverter, StringConverter};
    use crate::value::FieldValue;
    use crate::FieldAccess;

    struct Unregistered;

    #[derive(Default)]
    struct Declared;

    impl FieldAccess for Declared {
        fn field(&self, _name: &str) -> Option<FieldValue> {
            None
        }

        fn set_field(&mut self, _name: &str, _value: FieldValue) -> UrlQueryResult<()> {
            Ok(())
        }
    }

    impl QueryParams for Declared {
        fn query_fields() -> Vec<QueryField> {
            vec![
                QueryField::new("a").converter::<IntConverter>(),
                QueryField::new("b").converter::<BoolConverter>().read_only(true),
            ]
        }
    }

    #[derive(Default)]
    struct Broken;

    impl FieldAccess for Broken {
        fn field(&self, _name: &str) -> Option<FieldValue> {
            None
        }

        fn set_field(&mut self, _name: &str, _value: FieldValue) -> UrlQueryResult<()> {
            Ok(())
        }
    }

    impl QueryParams for Broken {
        fn query_fields() -> Vec<QueryField> {
            vec![
                QueryField::new("ok").converter::<IntConverter>(),
                QueryField::new("missing"),
            ]
        }
    }

    #[test]
    fn test_url_key_defaults_to_field_name() {
        let d = QueryField::new("title")
            .converter::<StringConverter>()
            .into_descriptor()
            .unwrap();
        assert_eq!(d.url_key, "title");
        assert_eq!(d.field_name, "title");
        assert!(!d.read_only);
    }

    #[test]
    fn test_config_applies() {
        let d = QueryField::new("start")
            .converter::<StringConverter>()
            .config(QueryParamConfig {
                url_key: Some("st".into()),
                read_only: Some(true),
            })
            .into_descriptor()
            .unwrap();
        assert_eq!(d.url_key, "st");
        assert!(d.read_only);
    }

    #[test]
    fn test_missing_converter_names_url_key() {
        let err = QueryField::new("title")
            .url_key("t")
            .into_descriptor()
            .unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("'t'"));
    }

    #[test]
    fn test_register_preserves_order() {
        let registry = FieldRegistry::new();
        let target = TargetType::of::<Unregistered>();
        for name in ["z", "a", "m"] {
            registry
                .register(target, QueryField::new(name).converter::<StringConverter>())
                .unwrap();
        }
        let names: Vec<_> = registry
            .lookup(target)
            .into_iter()
            .map(|d| d.field_name)
            .collect();
        assert_eq!(names, vec!["z", "a", "m"]);
        assert!(registry.contains(target));
    }

    #[test]
    fn test_register_descriptor_without_converter_fails() {
        let registry = FieldRegistry::new();
        let descriptor = FieldDescriptor {
            url_key: "k".into(),
            read_only: false,
            field_name: "f".into(),
            converter: None,
        };
        let err = registry
            .register_descriptor(TargetType::of::<Unregistered>(), descriptor)
            .unwrap_err();
        assert!(err.is_configuration());
        assert!(registry.lookup(TargetType::of::<Unregistered>()).is_empty());
    }

    #[test]
    fn test_lookup_unknown_type_is_empty() {
        let registry = FieldRegistry::new();
        assert!(registry.lookup(TargetType::of::<Unregistered>()).is_empty());
        assert!(!registry.contains(TargetType::of::<Unregistered>()));
    }

    #[test]
    fn test_declare_runs_once_after_explicit_fields() {
        let registry = FieldRegistry::new();
        let target = TargetType::of::<Declared>();
        registry
            .register(target, QueryField::new("extra").converter::<StringConverter>())
            .unwrap();

        registry.declare::<Declared>().unwrap();
        registry.declare::<Declared>().unwrap();

        let names: Vec<_> = registry
            .fields_of::<Declared>()
            .unwrap()
            .into_iter()
            .map(|d| d.field_name)
            .collect();
        assert_eq!(names, vec!["extra", "a", "b"]);
    }

    #[test]
    fn test_declare_failure_registers_nothing() {
        let registry = FieldRegistry::new();
        assert!(registry.declare::<Broken>().unwrap_err().is_configuration());
        assert!(registry.lookup(TargetType::of::<Broken>()).is_empty());
    }

    #[test]
    fn test_target_type_identity() {
        assert_eq!(TargetType::of::<Declared>(), TargetType::of::<Declared>());
        assert_ne!(TargetType::of::<Declared>(), TargetType::of::<Broken>());
        assert!(TargetType::of::<Declared>().name().ends_with("Declared"));
    }
}
