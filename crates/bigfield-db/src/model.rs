//! Primary key schemes and model schemas.
//!
//! Models pick their primary key by choosing a base:
//!
//! | Scheme | Base | `id` field |
//! |---|---|---|
//! | [`PrimaryKeyScheme::Default`] | `ModelWithoutPkey` | framework `AutoField` |
//! | [`PrimaryKeyScheme::BigForMigrations`] | `ModelPkeyForMigrations` | [`BigAutoFieldForMigrations`] |
//! | [`PrimaryKeyScheme::Big`] | `ModelPkey` | [`BigAutoField`] |
//!
//! New tables start on `Big`. Existing tables move in two steps: first to
//! `BigForMigrations` (generate and apply the migration, which alters the
//! column to `bigint`), then to `Big` (whose `bigserial` only matters for
//! future `CREATE TABLE`s).

use std::fmt;

use crate::fields::{BigAutoField, BigAutoFieldForMigrations, FieldDef, FieldType};
use crate::resolver::FieldTypeResolver;

/// The primary key a model inherits from its base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrimaryKeyScheme {
    /// The framework's 32-bit `AutoField`.
    #[default]
    Default,
    /// The intermediate step for converting an existing table.
    BigForMigrations,
    /// The 64-bit `BigAutoField`.
    Big,
}

impl PrimaryKeyScheme {
    /// Returns the name of the abstract model base for this scheme.
    pub const fn base_name(self) -> &'static str {
        match self {
            Self::Default => "ModelWithoutPkey",
            Self::BigForMigrations => "ModelPkeyForMigrations",
            Self::Big => "ModelPkey",
        }
    }

    /// Returns the `id` primary key field this scheme contributes.
    pub fn id_field(self) -> Box<dyn FieldTypeResolver> {
        match self {
            Self::Default => Box::new(FieldDef::new("id", FieldType::AutoField).primary_key()),
            Self::BigForMigrations => Box::new(BigAutoFieldForMigrations::default()),
            Self::Big => Box::new(BigAutoField::default()),
        }
    }

    /// Returns the scheme to move to next when converting an existing table.
    pub const fn next_step(self) -> Option<Self> {
        match self {
            Self::Default => Some(Self::BigForMigrations),
            Self::BigForMigrations => Some(Self::Big),
            Self::Big => None,
        }
    }

    /// Returns the remaining steps from this scheme to [`PrimaryKeyScheme::Big`].
    pub fn conversion_steps(self) -> Vec<Self> {
        std::iter::successors(self.next_step(), |s| s.next_step()).collect()
    }
}

impl fmt::Display for PrimaryKeyScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base_name())
    }
}

/// A model's table layout: its primary key scheme plus its other fields.
#[derive(Debug)]
pub struct ModelSchema {
    /// The application label this model belongs to.
    pub app_label: String,
    /// The model name (lowercase).
    pub name: String,
    scheme: PrimaryKeyScheme,
    pk: Box<dyn FieldTypeResolver>,
    fields: Vec<Box<dyn FieldTypeResolver>>,
    db_table: Option<String>,
}

impl ModelSchema {
    /// Creates a model with only its scheme's primary key.
    pub fn new(
        app_label: impl Into<String>,
        name: impl Into<String>,
        scheme: PrimaryKeyScheme,
    ) -> Self {
        Self {
            app_label: app_label.into(),
            name: name.into(),
            scheme,
            pk: scheme.id_field(),
            fields: Vec::new(),
            db_table: None,
        }
    }

    /// Adds a non-primary-key field.
    #[must_use]
    pub fn field(mut self, field: impl FieldTypeResolver + 'static) -> Self {
        self.fields.push(Box::new(field));
        self
    }

    /// Overrides the table name.
    #[must_use]
    pub fn db_table(mut self, table: impl Into<String>) -> Self {
        self.db_table = Some(table.into());
        self
    }

    /// Returns the database table name (`<app_label>_<name>` by default).
    pub fn table_name(&self) -> String {
        self.db_table
            .clone()
            .unwrap_or_else(|| format!("{}_{}", self.app_label, self.name))
    }

    /// Returns the primary key scheme.
    pub const fn scheme(&self) -> PrimaryKeyScheme {
        self.scheme
    }

    /// Rebases the model onto another scheme, replacing its primary key.
    pub fn set_scheme(&mut self, scheme: PrimaryKeyScheme) {
        tracing::debug!(
            model = %self.name,
            from = %self.scheme,
            to = %scheme,
            "changing primary key scheme"
        );
        self.scheme = scheme;
        self.pk = scheme.id_field();
    }

    /// Returns the primary key field.
    pub fn pk(&self) -> &dyn FieldTypeResolver {
        self.pk.as_ref()
    }

    /// Returns all fields, primary key first.
    pub fn fields(&self) -> impl Iterator<Item = &(dyn FieldTypeResolver + 'static)> {
        std::iter::once(self.pk.as_ref()).chain(self.fields.iter().map(AsRef::as_ref))
    }
}
