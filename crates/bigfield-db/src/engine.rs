//! Engines that get 64-bit primary keys.
//!
//! Only the PostgreSQL backend and its PostGIS variant have a `bigserial`
//! type. Every other engine goes through the framework's regular type-format
//! lookup.

use std::fmt;

/// A database engine variant with native 64-bit sequence support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineVariant {
    /// The plain PostgreSQL backend.
    PostgreSql,
    /// PostgreSQL with the PostGIS spatial extension.
    PostGis,
}

impl EngineVariant {
    /// All supported variants, in index order.
    pub const ALL: [Self; 2] = [Self::PostgreSql, Self::PostGis];

    /// Returns the engine identifier used in database settings.
    pub const fn identifier(self) -> &'static str {
        match self {
            Self::PostgreSql => "django_rs.db.backends.postgresql",
            Self::PostGis => "django_rs.contrib.gis.db.backends.postgis",
        }
    }

    /// Returns the position of this variant in [`EngineVariant::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Self::PostgreSql => 0,
            Self::PostGis => 1,
        }
    }

    /// Looks up the variant for an engine identifier. Matching is exact.
    pub fn from_identifier(engine: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.identifier() == engine)
    }

    /// Returns `true` if the variant reads its type-format table from a
    /// nested spatial connection.
    pub const fn is_spatial(self) -> bool {
        matches!(self, Self::PostGis)
    }
}

impl fmt::Display for EngineVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Returns `true` if `engine` names one of the supported variants.
pub fn is_supported(engine: &str) -> bool {
    EngineVariant::from_identifier(engine).is_some()
}

/// Returns the index of `engine` among the supported variants, if any.
pub fn engine_index(engine: &str) -> Option<usize> {
    EngineVariant::from_identifier(engine).map(EngineVariant::index)
}
