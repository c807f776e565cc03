//! Framework field definitions.
//!
//! [`FieldType`] covers the ORM's built-in field classes and [`FieldDef`]
//! captures the metadata schema generation needs about a single field. A
//! `FieldDef` resolves its column type through the connection's type-format
//! table, keyed by [`FieldType::internal_type`].

use crate::connection::ConnectionDescriptor;
use crate::resolver::{default_db_type, FieldKind, FieldTypeResolver};

/// The type of a model field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// Auto-incrementing 32-bit integer primary key.
    AutoField,
    /// 32-bit signed integer.
    IntegerField,
    /// 64-bit signed integer.
    BigIntegerField,
    /// 16-bit signed integer.
    SmallIntegerField,
    /// Non-negative 32-bit integer.
    PositiveIntegerField,
    /// 64-bit floating-point number.
    FloatField,
    /// Fixed-precision decimal number.
    DecimalField {
        /// Maximum total digits.
        max_digits: u32,
        /// Digits after the decimal point.
        decimal_places: u32,
    },
    /// Variable-length string with a max length.
    CharField,
    /// Unlimited-length text.
    TextField,
    /// Boolean (true/false).
    BooleanField,
    /// Date without time.
    DateField,
    /// Date and time.
    DateTimeField,
    /// Time without date.
    TimeField,
    /// Duration / interval.
    DurationField,
    /// UUID field.
    UuidField,
    /// Raw binary data.
    BinaryField,
    /// JSON data.
    JsonField,
    /// IP address.
    IpAddressField,
    /// Spatial geometry of any kind.
    GeometryField,
    /// Spatial point.
    PointField,
    /// Many-to-one relationship.
    ForeignKey {
        /// The target model name (e.g. "share.Document").
        to: String,
        /// Behavior when the referenced object is deleted.
        on_delete: OnDelete,
    },
    /// A field type the ORM does not ship, identified by its internal type name.
    Custom {
        /// The internal type name used for type-format lookups.
        internal_type: String,
    },
}

impl FieldType {
    /// Returns the internal type name used as the type-format table key.
    pub fn internal_type(&self) -> &str {
        match self {
            Self::AutoField => "AutoField",
            Self::IntegerField => "IntegerField",
            Self::BigIntegerField => "BigIntegerField",
            Self::SmallIntegerField => "SmallIntegerField",
            Self::PositiveIntegerField => "PositiveIntegerField",
            Self::FloatField => "FloatField",
            Self::DecimalField { .. } => "DecimalField",
            Self::CharField => "CharField",
            Self::TextField => "TextField",
            Self::BooleanField => "BooleanField",
            Self::DateField => "DateField",
            Self::DateTimeField => "DateTimeField",
            Self::TimeField => "TimeField",
            Self::DurationField => "DurationField",
            Self::UuidField => "UuidField",
            Self::BinaryField => "BinaryField",
            Self::JsonField => "JsonField",
            Self::IpAddressField => "IpAddressField",
            Self::GeometryField => "GeometryField",
            Self::PointField => "PointField",
            Self::ForeignKey { .. } => "ForeignKey",
            Self::Custom { internal_type } => internal_type,
        }
    }

    /// Returns `(max_digits, decimal_places)` for decimal fields.
    pub const fn decimal_precision(&self) -> Option<(u32, u32)> {
        match self {
            Self::DecimalField {
                max_digits,
                decimal_places,
            } => Some((*max_digits, *decimal_places)),
            _ => None,
        }
    }

    /// Returns the override category of this field type.
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::AutoField => FieldKind::AutoField,
            Self::ForeignKey { .. } => FieldKind::ForeignKey,
            Self::FloatField => FieldKind::Float,
            _ => FieldKind::Other,
        }
    }
}

/// Behavior when a referenced object is deleted (ON DELETE action).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnDelete {
    /// Delete all related objects (CASCADE).
    #[default]
    Cascade,
    /// Prevent deletion if related objects exist (PROTECT).
    Protect,
    /// Set the foreign key to NULL.
    SetNull,
    /// Take no action (may cause integrity errors).
    DoNothing,
}

impl OnDelete {
    /// Returns the SQL `ON DELETE` action.
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Cascade => "CASCADE",
            Self::Protect => "RESTRICT",
            Self::SetNull => "SET NULL",
            Self::DoNothing => "NO ACTION",
        }
    }
}

/// Definition of a model field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// The attribute name of this field.
    pub name: String,
    /// The database column name (may differ from `name`).
    pub column: String,
    /// The type of this field.
    pub field_type: FieldType,
    /// Whether this field is the primary key.
    pub primary_key: bool,
    /// Whether NULL is allowed in the database.
    pub null: bool,
    /// Whether a UNIQUE constraint is applied.
    pub unique: bool,
    /// Whether a database index should be created.
    pub db_index: bool,
    /// Maximum character length (for CharField and similar).
    pub max_length: Option<usize>,
}

impl FieldDef {
    /// Creates a new `FieldDef` whose column is named after the field.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        let name = name.into();
        Self {
            column: name.clone(),
            name,
            field_type,
            primary_key: false,
            null: false,
            unique: false,
            db_index: false,
            max_length: None,
        }
    }

    /// Sets the database column name.
    #[must_use]
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = column.into();
        self
    }

    /// Marks this field as the primary key.
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Allows NULL values in the database.
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.null = true;
        self
    }

    /// Sets the maximum character length.
    #[must_use]
    pub const fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Marks this field as having a UNIQUE constraint.
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Marks this field as having a database index.
    #[must_use]
    pub const fn db_index(mut self) -> Self {
        self.db_index = true;
        self
    }

    /// Returns the internal type name of this field.
    pub fn internal_type(&self) -> &str {
        self.field_type.internal_type()
    }
}

impl FieldTypeResolver for FieldDef {
    fn field(&self) -> &FieldDef {
        self
    }

    fn kind(&self) -> FieldKind {
        self.field_type.kind()
    }

    fn db_type(&self, connection: &dyn ConnectionDescriptor) -> Option<String> {
        default_db_type(self, connection)
    }
}
