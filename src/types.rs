//! SQL type codes shared by the translator, the array adapter and the DDL builder.

use serde::{Deserialize, Serialize};

/// A JDBC-style SQL type family.
///
/// The numeric codes returned by [`SqlType::code`] are the `java.sql.Types`
/// constants, which is what binding layers and schema tooling hand us.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SqlType {
    Boolean,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Real,
    Float,
    Double,
    Numeric,
    Decimal,
    Char,
    Varchar,
    LongVarchar,
    Binary,
    VarBinary,
    Date,
    Time,
    Timestamp,
    TimestampWithTimezone,
    Json,
    Array,
    #[default]
    Other,
}

impl SqlType {
    /// The `java.sql.Types` code.
    pub fn code(self) -> i32 {
        match self {
            SqlType::Boolean => 16,
            SqlType::TinyInt => -6,
            SqlType::SmallInt => 5,
            SqlType::Integer => 4,
            SqlType::BigInt => -5,
            SqlType::Real => 7,
            SqlType::Float => 6,
            SqlType::Double => 8,
            SqlType::Numeric => 2,
            SqlType::Decimal => 3,
            SqlType::Char => 1,
            SqlType::Varchar => 12,
            SqlType::LongVarchar => -1,
            SqlType::Binary => -2,
            SqlType::VarBinary => -3,
            SqlType::Date => 91,
            SqlType::Time => 92,
            SqlType::Timestamp => 93,
            SqlType::TimestampWithTimezone => 2014,
            SqlType::Json => 3001,
            SqlType::Array => 2003,
            SqlType::Other => 1111,
        }
    }

    /// Look up a type family by its `java.sql.Types` code.
    pub fn from_code(code: i32) -> Option<Self> {
        let ty = match code {
            16 | -7 => SqlType::Boolean,
            -6 => SqlType::TinyInt,
            5 => SqlType::SmallInt,
            4 => SqlType::Integer,
            -5 => SqlType::BigInt,
            7 => SqlType::Real,
            6 => SqlType::Float,
            8 => SqlType::Double,
            2 => SqlType::Numeric,
            3 => SqlType::Decimal,
            1 => SqlType::Char,
            12 => SqlType::Varchar,
            -1 => SqlType::LongVarchar,
            -2 => SqlType::Binary,
            -3 => SqlType::VarBinary,
            91 => SqlType::Date,
            92 => SqlType::Time,
            93 => SqlType::Timestamp,
            2014 => SqlType::TimestampWithTimezone,
            3001 => SqlType::Json,
            2003 => SqlType::Array,
            1111 => SqlType::Other,
            _ => return None,
        };
        Some(ty)
    }

    /// Snake-case name, the same spelling serde uses.
    pub fn name(self) -> &'static str {
        match self {
            SqlType::Boolean => "boolean",
            SqlType::TinyInt => "tiny_int",
            SqlType::SmallInt => "small_int",
            SqlType::Integer => "integer",
            SqlType::BigInt => "big_int",
            SqlType::Real => "real",
            SqlType::Float => "float",
            SqlType::Double => "double",
            SqlType::Numeric => "numeric",
            SqlType::Decimal => "decimal",
            SqlType::Char => "char",
            SqlType::Varchar => "varchar",
            SqlType::LongVarchar => "long_varchar",
            SqlType::Binary => "binary",
            SqlType::VarBinary => "var_binary",
            SqlType::Date => "date",
            SqlType::Time => "time",
            SqlType::Timestamp => "timestamp",
            SqlType::TimestampWithTimezone => "timestamp_with_timezone",
            SqlType::Json => "json",
            SqlType::Array => "array",
            SqlType::Other => "other",
        }
    }

    /// Exact integer types of any width.
    pub fn is_integral(self) -> bool {
        matches!(
            self,
            SqlType::TinyInt | SqlType::SmallInt | SqlType::Integer | SqlType::BigInt
        )
    }

    /// Integer types narrower than 64 bits.
    pub fn is_narrow_integer(self) -> bool {
        matches!(self, SqlType::TinyInt | SqlType::SmallInt | SqlType::Integer)
    }

    pub fn is_floating(self) -> bool {
        matches!(self, SqlType::Real | SqlType::Float | SqlType::Double)
    }

    /// Default GoogleSQL column type used for DDL.
    pub fn spanner_type_name(self) -> &'static str {
        match self {
            SqlType::Boolean => "bool",
            SqlType::TinyInt | SqlType::SmallInt | SqlType::Integer | SqlType::BigInt => "int64",
            SqlType::Real => "float32",
            SqlType::Float | SqlType::Double => "float64",
            SqlType::Numeric | SqlType::Decimal => "numeric",
            SqlType::Char | SqlType::Varchar | SqlType::LongVarchar | SqlType::Other => {
                "string(max)"
            }
            SqlType::Binary | SqlType::VarBinary => "bytes(max)",
            SqlType::Date => "date",
            SqlType::Time | SqlType::Timestamp | SqlType::TimestampWithTimezone => "timestamp",
            SqlType::Json => "json",
            SqlType::Array => "array<string(max)>",
        }
    }
}

impl std::fmt::Display for SqlType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for SqlType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const ALL: [SqlType; 22] = [
            SqlType::Boolean,
            SqlType::TinyInt,
            SqlType::SmallInt,
            SqlType::Integer,
            SqlType::BigInt,
            SqlType::Real,
            SqlType::Float,
            SqlType::Double,
            SqlType::Numeric,
            SqlType::Decimal,
            SqlType::Char,
            SqlType::Varchar,
            SqlType::LongVarchar,
            SqlType::Binary,
            SqlType::VarBinary,
            SqlType::Date,
            SqlType::Time,
            SqlType::Timestamp,
            SqlType::TimestampWithTimezone,
            SqlType::Json,
            SqlType::Array,
            SqlType::Other,
        ];
        let lower = s.to_ascii_lowercase();
        ALL.into_iter()
            .find(|ty| ty.name() == lower)
            .ok_or_else(|| format!("unknown SQL type '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for ty in [
            SqlType::TinyInt,
            SqlType::SmallInt,
            SqlType::Integer,
            SqlType::BigInt,
            SqlType::Varchar,
            SqlType::Timestamp,
            SqlType::Array,
        ] {
            assert_eq!(SqlType::from_code(ty.code()), Some(ty));
        }
        assert_eq!(SqlType::from_code(-7), Some(SqlType::Boolean));
        assert_eq!(SqlType::from_code(424242), None);
    }

    #[test]
    fn test_narrow_integers() {
        assert!(SqlType::Integer.is_narrow_integer());
        assert!(SqlType::TinyInt.is_narrow_integer());
        assert!(!SqlType::BigInt.is_narrow_integer());
        assert!(SqlType::BigInt.is_integral());
        assert!(!SqlType::Numeric.is_integral());
    }

    #[test]
    fn test_name_matches_serde() {
        for ty in [SqlType::TinyInt, SqlType::LongVarchar, SqlType::TimestampWithTimezone] {
            let json = serde_json::to_string(&ty).unwrap();
            assert_eq!(json, format!("\"{}\"", ty.name()));
            assert_eq!(ty.name().parse::<SqlType>(), Ok(ty));
        }
        assert!("int64".parse::<SqlType>().is_err());
    }
}
