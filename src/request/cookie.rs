// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::data_container::DataContainer;

/// Request `Cookie` header as an ordered name/value container
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    values: DataContainer,
}

impl Cookie {
    /// Parse a `Cookie` header value (`a=1; b=2`). Pairs without `=` are dropped.
    pub fn parse(header: &str) -> Self {
        let values = header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .map(|(name, value)| (name.trim(), value.trim()))
            .filter(|(name, _)| !name.is_empty())
            .collect();
        Self { values }
    }

    pub fn from_container(values: DataContainer) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &DataContainer {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn to_header_value(&self) -> String {
        self.values
            .iter()
            .flat_map(|(name, values)| {
                values
                    .iter()
                    .map(move |value| format!("{}={}", name, value.as_text()))
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_header_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_render() {
        let cookie = Cookie::parse("session=abc; theme=dark;broken; =x");
        assert_eq!(cookie.values().len(), 2);
        assert_eq!(cookie.to_header_value(), "session=abc; theme=dark");
    }
}
