//! Nullable column types for generated models.
//!
//! Each wrapper pairs a value with a `valid` flag. An invalid wrapper is SQL
//! `NULL` and JSON `null`; a valid one always carries its value, even when
//! that value is empty, zero or false.
//!
//! [`DbInt`], [`DbFloat`] and [`DbTime`] read a whole family of column types
//! into one Rust type: every integer width signed or unsigned, DECIMAL as well
//! as FLOAT and DOUBLE, and DATE, TIME and TIMESTAMP as well as DATETIME.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;
use sqlx::database::{HasArguments, HasValueRef};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::mysql::{MySql, MySqlTypeInfo};
use sqlx::{Decode, Encode, Type, TypeInfo, ValueRef};

/// Whether an engine type name is an exact numeric (`DECIMAL`/`NUMERIC`)
pub fn is_decimal_name(name: &str) -> bool {
    let base = name.split_whitespace().next().unwrap_or_default();
    base.eq_ignore_ascii_case("DECIMAL") || base.eq_ignore_ascii_case("NUMERIC")
}

/// Any integer column read as `i64`, including unsigned widths and YEAR
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DbInt(pub i64);

impl From<DbInt> for i64 {
    fn from(value: DbInt) -> Self {
        value.0
    }
}

impl Type<MySql> for DbInt {
    fn type_info() -> MySqlTypeInfo {
        <i64 as Type<MySql>>::type_info()
    }

    fn compatible(ty: &MySqlTypeInfo) -> bool {
        <i64 as Type<MySql>>::compatible(ty)
            || <u64 as Type<MySql>>::compatible(ty)
            || ty.name().eq_ignore_ascii_case("YEAR")
    }
}

impl<'r> Decode<'r, MySql> for DbInt {
    fn decode(value: <MySql as HasValueRef<'r>>::ValueRef) -> Result<Self, BoxDynError> {
        let ty = value.type_info().into_owned();
        if <u64 as Type<MySql>>::compatible(&ty) {
            let unsigned = <u64 as Decode<'r, MySql>>::decode(value)?;
            Ok(DbInt(i64::try_from(unsigned)?))
        } else {
            <i64 as Decode<'r, MySql>>::decode(value).map(DbInt)
        }
    }
}

/// Any floating-point or DECIMAL column read as `f64`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DbFloat(pub f64);

impl From<DbFloat> for f64 {
    fn from(value: DbFloat) -> Self {
        value.0
    }
}

impl Type<MySql> for DbFloat {
    fn type_info() -> MySqlTypeInfo {
        <f64 as Type<MySql>>::type_info()
    }

    fn compatible(ty: &MySqlTypeInfo) -> bool {
        <f64 as Type<MySql>>::compatible(ty)
            || <f32 as Type<MySql>>::compatible(ty)
            || is_decimal_name(ty.name())
    }
}

impl<'r> Decode<'r, MySql> for DbFloat {
    fn decode(value: <MySql as HasValueRef<'r>>::ValueRef) -> Result<Self, BoxDynError> {
        let ty = value.type_info().into_owned();
        if is_decimal_name(ty.name()) {
            // DECIMAL travels as text in both protocols
            let text = <&str as Decode<'r, MySql>>::decode(value)?;
            Ok(DbFloat(text.trim().parse()?))
        } else if <f32 as Type<MySql>>::compatible(&ty) && !<f64 as Type<MySql>>::compatible(&ty) {
            <f32 as Decode<'r, MySql>>::decode(value).map(|v| DbFloat(f64::from(v)))
        } else {
            <f64 as Decode<'r, MySql>>::decode(value).map(DbFloat)
        }
    }
}

/// Any date or time column read as `NaiveDateTime`
///
/// A DATE reads as midnight of that day, a TIME as that time on 1970-01-01.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DbTime(pub NaiveDateTime);

impl From<DbTime> for NaiveDateTime {
    fn from(value: DbTime) -> Self {
        value.0
    }
}

impl Type<MySql> for DbTime {
    fn type_info() -> MySqlTypeInfo {
        <NaiveDateTime as Type<MySql>>::type_info()
    }

    fn compatible(ty: &MySqlTypeInfo) -> bool {
        <NaiveDateTime as Type<MySql>>::compatible(ty)
            || <DateTime<Utc> as Type<MySql>>::compatible(ty)
            || <NaiveDate as Type<MySql>>::compatible(ty)
            || <NaiveTime as Type<MySql>>::compatible(ty)
    }
}

impl<'r> Decode<'r, MySql> for DbTime {
    fn decode(value: <MySql as HasValueRef<'r>>::ValueRef) -> Result<Self, BoxDynError> {
        let ty = value.type_info().into_owned();
        let at = if <NaiveDate as Type<MySql>>::compatible(&ty) {
            let date = <NaiveDate as Decode<'r, MySql>>::decode(value)?;
            date.and_hms_opt(0, 0, 0).ok_or("invalid midnight")?
        } else if <NaiveTime as Type<MySql>>::compatible(&ty) {
            let time = <NaiveTime as Decode<'r, MySql>>::decode(value)?;
            NaiveDate::from_ymd_opt(1970, 1, 1)
                .ok_or("invalid epoch date")?
                .and_time(time)
        } else {
            <NaiveDateTime as Decode<'r, MySql>>::decode(value)?
        };
        Ok(DbTime(at))
    }
}

// `$read` is the type a column is decoded through before becoming `$inner`
macro_rules! null_type {
    ($(#[$meta:meta])* $name:ident, $inner:ty, $read:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            pub value: $inner,
            pub valid: bool,
        }

        impl $name {
            /// A present value
            pub fn new(value: $inner) -> Self {
                Self { value, valid: true }
            }

            /// An explicit NULL
            pub fn null() -> Self {
                Self::default()
            }

            pub fn is_null(&self) -> bool {
                !self.valid
            }

            pub fn as_option(&self) -> Option<&$inner> {
                if self.valid {
                    Some(&self.value)
                } else {
                    None
                }
            }

            pub fn into_option(self) -> Option<$inner> {
                if self.valid {
                    Some(self.value)
                } else {
                    None
                }
            }
        }

        impl From<Option<$inner>> for $name {
            fn from(value: Option<$inner>) -> Self {
                match value {
                    Some(value) => Self::new(value),
                    None => Self::null(),
                }
            }
        }

        impl From<$name> for Option<$inner> {
            fn from(value: $name) -> Self {
                value.into_option()
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                self.as_option().serialize(serializer)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                Option::<$inner>::deserialize(deserializer).map(Self::from)
            }
        }

        impl Type<MySql> for $name {
            fn type_info() -> MySqlTypeInfo {
                <$read as Type<MySql>>::type_info()
            }

            fn compatible(ty: &MySqlTypeInfo) -> bool {
                <$read as Type<MySql>>::compatible(ty)
            }
        }

        impl<'q> Encode<'q, MySql> for $name {
            fn encode_by_ref(&self, buf: &mut <MySql as HasArguments<'q>>::ArgumentBuffer) -> IsNull {
                if self.valid {
                    <$inner as Encode<'q, MySql>>::encode_by_ref(&self.value, buf)
                } else {
                    IsNull::Yes
                }
            }

            fn produces(&self) -> Option<MySqlTypeInfo> {
                if self.valid {
                    <$inner as Encode<'q, MySql>>::produces(&self.value)
                } else {
                    None
                }
            }
        }

        impl<'r> Decode<'r, MySql> for $name {
            fn decode(value: <MySql as HasValueRef<'r>>::ValueRef) -> Result<Self, BoxDynError> {
                <Option<$read> as Decode<'r, MySql>>::decode(value)
                    .map(|read| Self::from(read.map(<$inner>::from)))
            }
        }
    };
    ($(#[$meta:meta])* $name:ident, $inner:ty) => {
        null_type!($(#[$meta])* $name, $inner, $inner);
    };
}

null_type!(
    /// Nullable integer column
    NullInt64,
    i64,
    DbInt
);

null_type!(
    /// Nullable decimal or floating-point column
    NullFloat64,
    f64,
    DbFloat
);

null_type!(
    /// Nullable character column
    NullString,
    String
);

null_type!(
    /// Nullable boolean column
    NullBool,
    bool
);

null_type!(
    /// Nullable date or time column
    NullTime,
    NaiveDateTime,
    DbTime
);

null_type!(
    /// Nullable binary column
    NullBytes,
    Vec<u8>
);

null_type!(
    /// Nullable JSON column. A JSON `null` document reads back as NULL.
    NullJson,
    JsonValue
);
