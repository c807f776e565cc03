//! Connection descriptors consumed by column type resolution.
//!
//! A [`ConnectionDescriptor`] exposes what type resolution and DDL
//! generation read from a database connection: its engine identifier,
//! type-format table, identifier quoting and SQL dialect. Spatial
//! connections additionally carry a nested connection whose table is used
//! for lookups.
//!
//! [`DatabaseConnection`] is the concrete descriptor built from
//! [`DatabaseSettings`]. It never opens a socket.

use std::collections::HashMap;

use bigfield_core::{BigFieldError, BigFieldResult, DatabaseSettings};

use crate::engine::EngineVariant;

/// Read-only view of a database connection used for column type resolution.
pub trait ConnectionDescriptor: Send + Sync {
    /// Returns the engine identifier from the connection's settings.
    fn engine(&self) -> &str;

    /// Returns the backend's type-format table.
    fn data_types(&self) -> &DataTypeTable;

    /// Quotes an identifier (table or column name) for this backend.
    fn quote_name(&self, name: &str) -> String;

    /// Returns the nested connection a spatial backend reads its types from.
    fn spatial_connection(&self) -> Option<&dyn ConnectionDescriptor> {
        None
    }

    /// Returns the SQL dialect DDL is written in. Inferred from the engine
    /// identifier unless the backend knows better.
    fn vendor(&self) -> Option<Vendor> {
        Vendor::from_engine(self.engine()).ok()
    }
}

/// Returns the type-format table lookups on `connection` should use.
///
/// For the PostGIS variant this is the nested spatial connection's table;
/// a spatial engine without a nested connection uses its own table.
pub fn type_format_table(connection: &dyn ConnectionDescriptor) -> &DataTypeTable {
    let spatial = EngineVariant::from_identifier(connection.engine())
        .is_some_and(EngineVariant::is_spatial);
    if spatial {
        if let Some(nested) = connection.spatial_connection() {
            return nested.data_types();
        }
    }
    connection.data_types()
}

/// Mapping from an internal field type name to a column type template.
///
/// Templates use `%(name)s` placeholders, e.g. `varchar(%(max_length)s)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTypeTable {
    types: HashMap<String, String>,
}

impl DataTypeTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the template registered for `internal_type`.
    pub fn get(&self, internal_type: &str) -> Option<&str> {
        self.types.get(internal_type).map(String::as_str)
    }

    /// Registers (or replaces) a template.
    pub fn insert(&mut self, internal_type: impl Into<String>, template: impl Into<String>) {
        self.types.insert(internal_type.into(), template.into());
    }

    /// Returns `true` if a template is registered for `internal_type`.
    pub fn contains(&self, internal_type: &str) -> bool {
        self.types.contains_key(internal_type)
    }

    /// Returns the number of registered templates.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no templates are registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// The PostgreSQL backend's built-in table.
    pub fn postgresql() -> Self {
        [
            ("AutoField", "serial"),
            ("BigIntegerField", "bigint"),
            ("BinaryField", "bytea"),
            ("BooleanField", "boolean"),
            ("CharField", "varchar(%(max_length)s)"),
            ("DateField", "date"),
            ("DateTimeField", "timestamp with time zone"),
            ("DecimalField", "numeric(%(max_digits)s, %(decimal_places)s)"),
            ("DurationField", "interval"),
            ("FloatField", "double precision"),
            ("IntegerField", "integer"),
            ("IpAddressField", "inet"),
            ("JsonField", "jsonb"),
            ("PositiveIntegerField", "integer CHECK (%(qn_column)s >= 0)"),
            ("SmallIntegerField", "smallint"),
            ("TextField", "text"),
            ("TimeField", "time"),
            ("UuidField", "uuid"),
        ]
        .into_iter()
        .collect()
    }

    /// The PostGIS spatial connection's table: PostgreSQL plus geometry types.
    pub fn postgis() -> Self {
        let mut table = Self::postgresql();
        table.insert("GeometryField", "geometry(GEOMETRY)");
        table.insert("PointField", "geometry(POINT)");
        table
    }

    /// The SQLite backend's built-in table.
    pub fn sqlite() -> Self {
        [
            ("AutoField", "integer"),
            ("BigIntegerField", "bigint"),
            ("BinaryField", "BLOB"),
            ("BooleanField", "bool"),
            ("CharField", "varchar(%(max_length)s)"),
            ("DateField", "date"),
            ("DateTimeField", "datetime"),
            ("DecimalField", "decimal"),
            ("DurationField", "bigint"),
            ("FloatField", "real"),
            ("IntegerField", "integer"),
            ("IpAddressField", "char(39)"),
            ("JsonField", "text"),
            ("PositiveIntegerField", "integer unsigned"),
            ("SmallIntegerField", "smallint"),
            ("TextField", "text"),
            ("TimeField", "time"),
            ("UuidField", "char(32)"),
        ]
        .into_iter()
        .collect()
    }

    /// The MySQL backend's built-in table.
    pub fn mysql() -> Self {
        [
            ("AutoField", "integer AUTO_INCREMENT"),
            ("BigIntegerField", "bigint"),
            ("BinaryField", "longblob"),
            ("BooleanField", "bool"),
            ("CharField", "varchar(%(max_length)s)"),
            ("DateField", "date"),
            ("DateTimeField", "datetime(6)"),
            ("DecimalField", "numeric(%(max_digits)s, %(decimal_places)s)"),
            ("DurationField", "bigint"),
            ("FloatField", "double precision"),
            ("IntegerField", "integer"),
            ("IpAddressField", "char(39)"),
            ("JsonField", "json"),
            ("PositiveIntegerField", "integer UNSIGNED"),
            ("SmallIntegerField", "smallint"),
            ("TextField", "longtext"),
            ("TimeField", "time(6)"),
            ("UuidField", "char(32)"),
        ]
        .into_iter()
        .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DataTypeTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            types: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for DataTypeTable {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

/// The database vendor a connection speaks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vendor {
    /// PostgreSQL.
    PostgreSql,
    /// PostgreSQL with PostGIS.
    PostGis,
    /// SQLite.
    Sqlite,
    /// MySQL.
    MySql,
}

impl Vendor {
    /// Infers the vendor from an engine identifier.
    pub fn from_engine(engine: &str) -> BigFieldResult<Self> {
        if engine.contains("postgis") {
            Ok(Self::PostGis)
        } else if engine.contains("postgresql") {
            Ok(Self::PostgreSql)
        } else if engine.contains("sqlite") {
            Ok(Self::Sqlite)
        } else if engine.contains("mysql") {
            Ok(Self::MySql)
        } else {
            Err(BigFieldError::UnsupportedEngine(engine.to_string()))
        }
    }

    /// Returns the vendor's built-in type-format table.
    pub fn data_types(self) -> DataTypeTable {
        match self {
            Self::PostgreSql | Self::PostGis => DataTypeTable::postgresql(),
            Self::Sqlite => DataTypeTable::sqlite(),
            Self::MySql => DataTypeTable::mysql(),
        }
    }

    const fn quote_char(self) -> char {
        match self {
            Self::MySql => '`',
            Self::PostgreSql | Self::PostGis | Self::Sqlite => '"',
        }
    }
}

/// A connection descriptor built from database settings.
#[derive(Debug, Clone)]
pub struct DatabaseConnection {
    engine: String,
    vendor: Vendor,
    data_types: DataTypeTable,
    spatial: Option<Box<DatabaseConnection>>,
}

impl DatabaseConnection {
    /// Builds a connection descriptor from settings.
    ///
    /// The settings' `data_types` entries are layered over the vendor's
    /// built-in table (and over the nested spatial table for PostGIS).
    ///
    /// # Errors
    ///
    /// Returns [`BigFieldError::UnsupportedEngine`] if the engine names no
    /// known vendor.
    pub fn from_settings(settings: &DatabaseSettings) -> BigFieldResult<Self> {
        let vendor = Vendor::from_engine(&settings.engine)?;
        let mut connection = Self::new(settings.engine.clone(), vendor);
        connection
            .data_types
            .extend(settings.data_types.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        if let Some(spatial) = connection.spatial.as_mut() {
            spatial
                .data_types
                .extend(settings.data_types.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        tracing::debug!(
            engine = %settings.engine,
            ?vendor,
            types = connection.data_types.len(),
            "built connection descriptor"
        );
        Ok(connection)
    }

    /// Creates a descriptor with the vendor's built-in table.
    pub fn new(engine: impl Into<String>, vendor: Vendor) -> Self {
        let engine = engine.into();
        let spatial = (vendor == Vendor::PostGis).then(|| {
            Box::new(Self {
                engine: engine.clone(),
                vendor,
                data_types: DataTypeTable::postgis(),
                spatial: None,
            })
        });
        Self {
            engine,
            vendor,
            data_types: vendor.data_types(),
            spatial,
        }
    }

    /// Creates a descriptor with an explicit table and no spatial connection.
    pub fn with_data_types(
        engine: impl Into<String>,
        vendor: Vendor,
        data_types: DataTypeTable,
    ) -> Self {
        Self {
            engine: engine.into(),
            vendor,
            data_types,
            spatial: None,
        }
    }

    /// Attaches a nested spatial connection.
    #[must_use]
    pub fn spatial(mut self, nested: Self) -> Self {
        self.spatial = Some(Box::new(nested));
        self
    }
}

impl ConnectionDescriptor for DatabaseConnection {
    fn engine(&self) -> &str {
        &self.engine
    }

    fn data_types(&self) -> &DataTypeTable {
        &self.data_types
    }

    fn quote_name(&self, name: &str) -> String {
        let q = self.vendor.quote_char();
        if name.len() >= 2 && name.starts_with(q) && name.ends_with(q) {
            return name.to_string();
        }
        format!("{q}{name}{q}")
    }

    fn spatial_connection(&self) -> Option<&dyn ConnectionDescriptor> {
        self.spatial
            .as_deref()
            .map(|c| c as &dyn ConnectionDescriptor)
    }

    fn vendor(&self) -> Option<Vendor> {
        Some(self.vendor)
    }
}
