//! Convert serde_json::Value to types that sqlx's Any driver can bind.

use serde_json::Value;
use sqlx::any::{Any, AnyTypeInfo};
use sqlx::encode::{Encode, IsNull};
use sqlx::Database;

/// A scalar that can be bound to any supported relational back-end.
/// Arrays and objects are bound as their JSON text rendering; the coarse
/// schema has no composite column types.
#[derive(Clone, Debug)]
pub enum AnyBindValue {
    Null,
    Bool(bool),
    I64(i64),
    F64(f64),
    String(String),
}

impl AnyBindValue {
    pub fn from_json(v: &Value) -> Self {
        match v {
            Value::Null => AnyBindValue::Null,
            Value::Bool(b) => AnyBindValue::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    AnyBindValue::I64(i)
                } else {
                    AnyBindValue::F64(n.as_f64().unwrap_or(0.0))
                }
            }
            Value::String(s) => AnyBindValue::String(s.clone()),
            Value::Array(_) | Value::Object(_) => AnyBindValue::String(v.to_string()),
        }
    }
}

impl<'q> Encode<'q, Any> for AnyBindValue {
    fn encode_by_ref(
        &self,
        buf: &mut <Any as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        Ok(match self {
            AnyBindValue::Null => <Option<i32> as Encode<Any>>::encode_by_ref(&None, buf)?,
            AnyBindValue::Bool(b) => <bool as Encode<Any>>::encode_by_ref(b, buf)?,
            AnyBindValue::I64(n) => <i64 as Encode<Any>>::encode_by_ref(n, buf)?,
            AnyBindValue::F64(n) => <f64 as Encode<Any>>::encode_by_ref(n, buf)?,
            AnyBindValue::String(s) => <String as Encode<Any>>::encode_by_ref(s, buf)?,
        })
    }
}

impl sqlx::Type<Any> for AnyBindValue {
    fn type_info() -> AnyTypeInfo {
        <String as sqlx::Type<Any>>::type_info()
    }
}
