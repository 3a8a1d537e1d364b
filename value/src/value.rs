// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Tagged scalar [`Value`] and its [`DataType`].

use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Serialize};

/// The closed set of scalar types a column may hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Int32,
    Int64,
    Float32,
    Float64,
    Bool,
    String,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Int32 => "int32",
            DataType::Int64 => "int64",
            DataType::Float32 => "float32",
            DataType::Float64 => "float64",
            DataType::Bool => "bool",
            DataType::String => "string",
        };
        write!(f, "{name}")
    }
}

/// A tagged scalar value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Bool(bool),
    String(String),
}

impl Value {
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Int32(_) => DataType::Int32,
            Value::Int64(_) => DataType::Int64,
            Value::Float32(_) => DataType::Float32,
            Value::Float64(_) => DataType::Float64,
            Value::Bool(_) => DataType::Bool,
            Value::String(_) => DataType::String,
        }
    }

    fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int32(v) => Some(*v as i64),
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int32(v) => Some(*v as f64),
            Value::Int64(v) => Some(*v as f64),
            Value::Float32(v) => Some(*v as f64),
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }

    fn is_numeric(&self) -> bool {
        matches!(
            self,
            Value::Int32(_) | Value::Int64(_) | Value::Float32(_) | Value::Float64(_)
        )
    }

    fn is_float(&self) -> bool {
        matches!(self, Value::Float32(_) | Value::Float64(_))
    }

    /// Equality with implicit numeric widening. `None` means the two values
    /// are not comparable at all (e.g. a string against a bool); callers
    /// treat that as "the predicate does not hold", not as a hard error.
    pub fn values_equal(&self, other: &Value) -> Option<bool> {
        if self.is_numeric() && other.is_numeric() {
            return if self.is_float() || other.is_float() {
                Some(self.as_f64().unwrap() == other.as_f64().unwrap())
            } else {
                Some(self.as_i64().unwrap() == other.as_i64().unwrap())
            };
        }
        match (self, other) {
            (Value::String(a), Value::String(b)) => Some(a == b),
            (Value::Bool(a), Value::Bool(b)) => Some(a == b),
            _ => None,
        }
    }

    /// Ordering with implicit numeric widening: two integers compare as
    /// `i64`, any comparison involving a float widens both sides to `f64`.
    /// Strings compare lexicographically. Booleans have no ordering.
    /// `None` means the comparison is undefined for this pair of types.
    pub fn partial_cmp_value(&self, other: &Value) -> Option<Ordering> {
        if self.is_numeric() && other.is_numeric() {
            return if self.is_float() || other.is_float() {
                self.as_f64().unwrap().partial_cmp(&other.as_f64().unwrap())
            } else {
                self.as_i64().unwrap().partial_cmp(&other.as_i64().unwrap())
            };
        }
        match (self, other) {
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Build a value of the given type from a JSON literal, widening
    /// numbers to match the column's declared type.
    pub fn from_json(data_type: DataType, json: &serde_json::Value) -> Option<Value> {
        match (data_type, json) {
            (DataType::Int32, serde_json::Value::Number(n)) => {
                n.as_i64().map(|v| Value::Int32(v as i32))
            }
            (DataType::Int64, serde_json::Value::Number(n)) => n.as_i64().map(Value::Int64),
            (DataType::Float32, serde_json::Value::Number(n)) => {
                n.as_f64().map(|v| Value::Float32(v as f32))
            }
            (DataType::Float64, serde_json::Value::Number(n)) => n.as_f64().map(Value::Float64),
            (DataType::Bool, serde_json::Value::Bool(b)) => Some(Value::Bool(*b)),
            (DataType::String, serde_json::Value::String(s)) => Some(Value::String(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int32(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Float32(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "{v}"),
        }
    }
}
