// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use serde_json::Value;

/// The value of an item's partition key.
///
/// Sent to the service as a JSON array in the `x-ms-documentdb-partitionkey` header.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionKey(Vec<Value>);

impl PartitionKey {
    /// The partition key used by items that have no value at the partition key path.
    pub fn undefined() -> Self {
        Self(vec![Value::Object(Default::default())])
    }

    /// Renders the header value, escaping non-ASCII characters since HTTP headers must be ASCII.
    pub fn to_header_value(&self) -> String {
        let json = Value::Array(self.0.clone()).to_string();
        let mut escaped = String::with_capacity(json.len());
        for c in json.chars() {
            if c.is_ascii() {
                escaped.push(c);
            } else {
                let mut buf = [0u16; 2];
                for unit in c.encode_utf16(&mut buf) {
                    escaped.push_str(&format!("\\u{:04x}", unit));
                }
            }
        }
        escaped
    }
}

impl From<&str> for PartitionKey {
    fn from(value: &str) -> Self {
        Self(vec![Value::from(value)])
    }
}

impl From<String> for PartitionKey {
    fn from(value: String) -> Self {
        Self(vec![Value::from(value)])
    }
}

impl From<&String> for PartitionKey {
    fn from(value: &String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<i64> for PartitionKey {
    fn from(value: i64) -> Self {
        Self(vec![Value::from(value)])
    }
}

impl From<f64> for PartitionKey {
    fn from(value: f64) -> Self {
        Self(vec![Value::from(value)])
    }
}

impl From<bool> for PartitionKey {
    fn from(value: bool) -> Self {
        Self(vec![Value::from(value)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_key() {
        assert_eq!(PartitionKey::from("11229").to_header_value(), r#"["11229"]"#);
    }

    #[test]
    fn empty_string_key() {
        assert_eq!(PartitionKey::from("").to_header_value(), r#"[""]"#);
    }

    #[test]
    fn numeric_and_bool_keys() {
        assert_eq!(PartitionKey::from(42i64).to_header_value(), "[42]");
        assert_eq!(PartitionKey::from(true).to_header_value(), "[true]");
    }

    #[test]
    fn undefined_key() {
        assert_eq!(PartitionKey::undefined().to_header_value(), "[{}]");
    }

    #[test]
    fn non_ascii_is_escaped() {
        assert_eq!(
            PartitionKey::from("Zürich").to_header_value(),
            r#"["Z\u00fcrich"]"#
        );
    }
}
