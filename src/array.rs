//! Array parameter values.
//!
//! Spanner stores every integer as INT64, so arrays declared with a narrower
//! element type are widened when bound and narrowed again when read back.

use serde::{Deserialize, Serialize};

use crate::error::{TranslateError, TranslateResult};
use crate::types::SqlType;

/// A typed array payload with nullable elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "snake_case")]
pub enum ArrayValue {
    Bool(Vec<Option<bool>>),
    TinyInt(Vec<Option<i8>>),
    SmallInt(Vec<Option<i16>>),
    Integer(Vec<Option<i32>>),
    BigInt(Vec<Option<i64>>),
    Double(Vec<Option<f64>>),
    String(Vec<Option<String>>),
}

impl ArrayValue {
    /// Decode a JSON array (`[1, null, 3]`) as elements of `element_type`.
    ///
    /// # Example
    /// ```
    /// use qail_spanner::array::ArrayValue;
    /// use qail_spanner::types::SqlType;
    ///
    /// let value = ArrayValue::parse(SqlType::SmallInt, "[1, null, 3]").unwrap();
    /// assert_eq!(value, ArrayValue::SmallInt(vec![Some(1), None, Some(3)]));
    /// ```
    pub fn parse(element_type: SqlType, json: &str) -> TranslateResult<Self> {
        let value = match element_type {
            SqlType::Boolean => ArrayValue::Bool(serde_json::from_str(json)?),
            SqlType::TinyInt => ArrayValue::TinyInt(serde_json::from_str(json)?),
            SqlType::SmallInt => ArrayValue::SmallInt(serde_json::from_str(json)?),
            SqlType::Integer => ArrayValue::Integer(serde_json::from_str(json)?),
            SqlType::BigInt => ArrayValue::BigInt(serde_json::from_str(json)?),
            SqlType::Real | SqlType::Float | SqlType::Double => {
                ArrayValue::Double(serde_json::from_str(json)?)
            }
            SqlType::Char | SqlType::Varchar | SqlType::LongVarchar => {
                ArrayValue::String(serde_json::from_str(json)?)
            }
            other => {
                return Err(TranslateError::InvalidValue(format!(
                    "Arrays of {} are not supported",
                    other
                )));
            }
        };
        Ok(value)
    }

    /// The type of the elements actually carried.
    pub fn element_type(&self) -> SqlType {
        match self {
            ArrayValue::Bool(_) => SqlType::Boolean,
            ArrayValue::TinyInt(_) => SqlType::TinyInt,
            ArrayValue::SmallInt(_) => SqlType::SmallInt,
            ArrayValue::Integer(_) => SqlType::Integer,
            ArrayValue::BigInt(_) => SqlType::BigInt,
            ArrayValue::Double(_) => SqlType::Double,
            ArrayValue::String(_) => SqlType::Varchar,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ArrayValue::Bool(v) => v.len(),
            ArrayValue::TinyInt(v) => v.len(),
            ArrayValue::SmallInt(v) => v.len(),
            ArrayValue::Integer(v) => v.len(),
            ArrayValue::BigInt(v) => v.len(),
            ArrayValue::Double(v) => v.len(),
            ArrayValue::String(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn widen<T: Into<i64>>(values: Vec<Option<T>>) -> Vec<Option<i64>> {
    values.into_iter().map(|v| v.map(Into::into)).collect()
}

fn narrow<T: TryFrom<i64>>(values: Vec<Option<i64>>, element_type: SqlType) -> TranslateResult<Vec<Option<T>>> {
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| match v {
            None => Ok(None),
            Some(n) => T::try_from(n).map(Some).map_err(|_| {
                TranslateError::InvalidValue(format!(
                    "Array element {} ({}) does not fit {}",
                    i, n, element_type
                ))
            }),
        })
        .collect()
}

/// Array binding for a declared element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpannerArrayType {
    element_type: SqlType,
}

impl SpannerArrayType {
    pub fn new(element_type: SqlType) -> Self {
        Self { element_type }
    }

    pub fn element_type(&self) -> SqlType {
        self.element_type
    }

    /// Element type of the value handed to the driver.
    pub fn bound_element_type(&self) -> SqlType {
        if self.element_type.is_narrow_integer() {
            SqlType::BigInt
        } else {
            self.element_type
        }
    }

    /// Widen narrow integer arrays to INT64; anything else is returned as is.
    ///
    /// # Example
    /// ```
    /// use qail_spanner::array::{ArrayValue, SpannerArrayType};
    /// use qail_spanner::types::SqlType;
    ///
    /// let bound = SpannerArrayType::new(SqlType::Integer)
    ///     .bind(ArrayValue::Integer(vec![Some(1), None, Some(3)]));
    /// assert_eq!(bound, ArrayValue::BigInt(vec![Some(1), None, Some(3)]));
    /// ```
    pub fn bind(&self, value: ArrayValue) -> ArrayValue {
        if !self.element_type.is_narrow_integer() {
            return value;
        }
        match value {
            ArrayValue::TinyInt(v) => ArrayValue::BigInt(widen(v)),
            ArrayValue::SmallInt(v) => ArrayValue::BigInt(widen(v)),
            ArrayValue::Integer(v) => ArrayValue::BigInt(widen(v)),
            other => {
                if other.element_type() != SqlType::BigInt {
                    tracing::trace!(
                        "Binding {} array declared as {} unchanged",
                        other.element_type(),
                        self.element_type
                    );
                }
                other
            }
        }
    }

    /// Narrow an INT64 array read from Spanner back to the declared width.
    pub fn extract(&self, value: ArrayValue) -> TranslateResult<ArrayValue> {
        let ArrayValue::BigInt(values) = value else {
            return Ok(value);
        };
        Ok(match self.element_type {
            SqlType::TinyInt => ArrayValue::TinyInt(narrow(values, self.element_type)?),
            SqlType::SmallInt => ArrayValue::SmallInt(narrow(values, self.element_type)?),
            SqlType::Integer => ArrayValue::Integer(narrow(values, self.element_type)?),
            _ => ArrayValue::BigInt(values),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widen_preserves_nulls() {
        let ty = SpannerArrayType::new(SqlType::SmallInt);
        assert_eq!(
            ty.bind(ArrayValue::SmallInt(vec![None, Some(-7), Some(i16::MAX), None])),
            ArrayValue::BigInt(vec![None, Some(-7), Some(32767), None])
        );
        assert_eq!(ty.bind(ArrayValue::TinyInt(vec![])), ArrayValue::BigInt(vec![]));
        assert_eq!(
            ty.bind(ArrayValue::Integer(vec![None, None])),
            ArrayValue::BigInt(vec![None, None])
        );
    }

    #[test]
    fn test_bind_passes_through() {
        let strings = ArrayValue::String(vec![Some("a".into()), None]);
        assert_eq!(SpannerArrayType::new(SqlType::Varchar).bind(strings.clone()), strings);

        let ints = ArrayValue::Integer(vec![Some(1)]);
        assert_eq!(SpannerArrayType::new(SqlType::BigInt).bind(ints.clone()), ints);

        // Declared narrow, payload not an integer array.
        let flags = ArrayValue::Bool(vec![Some(true)]);
        assert_eq!(SpannerArrayType::new(SqlType::Integer).bind(flags.clone()), flags);
    }

    #[test]
    fn test_extract_narrows() {
        let ty = SpannerArrayType::new(SqlType::TinyInt);
        assert_eq!(
            ty.extract(ArrayValue::BigInt(vec![Some(1), None, Some(-128)])).unwrap(),
            ArrayValue::TinyInt(vec![Some(1), None, Some(-128)])
        );
        let err = ty.extract(ArrayValue::BigInt(vec![Some(1), Some(300)])).unwrap_err();
        assert!(matches!(err, TranslateError::InvalidValue(_)));
        assert_eq!(err.to_string(), "Invalid value: Array element 1 (300) does not fit tiny_int");

        let doubles = ArrayValue::Double(vec![Some(1.5)]);
        assert_eq!(ty.extract(doubles.clone()).unwrap(), doubles);
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            ArrayValue::parse(SqlType::Varchar, r#"["a", null]"#).unwrap(),
            ArrayValue::String(vec![Some("a".into()), None])
        );
        assert!(matches!(
            ArrayValue::parse(SqlType::TinyInt, "[1000]"),
            Err(TranslateError::Json(_))
        ));
        assert!(matches!(
            ArrayValue::parse(SqlType::Date, "[]"),
            Err(TranslateError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_serde_shape() {
        let value: ArrayValue =
            serde_json::from_str(r#"{"type": "small_int", "values": [1, null]}"#).unwrap();
        assert_eq!(value, ArrayValue::SmallInt(vec![Some(1), None]));
        assert_eq!(value.len(), 2);
        assert_eq!(SpannerArrayType::new(SqlType::SmallInt).bound_element_type(), SqlType::BigInt);
    }
}
