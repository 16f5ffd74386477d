// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Query strings for list endpoints
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// A single filter/ordering/limit query, serialized in the JSON query syntax
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query {
    method: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    attribute: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    values: Vec<Value>,
}

impl Query {
    /// Match documents whose `attribute` equals `value`
    pub fn equal(attribute: &str, value: impl Into<Value>) -> Self {
        Self {
            method: "equal",
            attribute: Some(attribute.into()),
            values: vec![value.into()],
        }
    }

    /// Order ascending by `attribute`
    pub fn order_asc(attribute: &str) -> Self {
        Self {
            method: "orderAsc",
            attribute: Some(attribute.into()),
            values: vec![],
        }
    }

    /// Limit the number of returned documents
    pub fn limit(limit: u32) -> Self {
        Self {
            method: "limit",
            attribute: None,
            values: vec![limit.into()],
        }
    }

    /// Skip the first `offset` documents
    pub fn offset(offset: u32) -> Self {
        Self {
            method: "offset",
            attribute: None,
            values: vec![offset.into()],
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn json_syntax() {
        assert_eq!(
            Query::equal("email", "a@b.com").to_string(),
            r#"{"method":"equal","attribute":"email","values":["a@b.com"]}"#
        );
        assert_eq!(
            Query::order_asc("$createdAt").to_string(),
            r#"{"method":"orderAsc","attribute":"$createdAt"}"#
        );
        assert_eq!(Query::limit(25).to_string(), r#"{"method":"limit","values":[25]}"#);
        assert_eq!(Query::offset(50).to_string(), r#"{"method":"offset","values":[50]}"#);
    }
}
