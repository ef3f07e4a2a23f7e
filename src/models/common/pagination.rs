use serde::{Deserialize, Serialize};

// Pagination query parameters, accepting numbers or numeric strings
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationQuery {
    #[serde(
        default = "default_page",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub page: i64,
    /// `None` falls back to the configured default page size.
    #[serde(default, deserialize_with = "deserialize_optional_string_to_i64")]
    pub size: Option<i64>,
}

// Pagination info attached to a rendered table page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PaginationInfo {
    /// Builds pagination info for `total` items, clamping `page` into
    /// `1..=total_pages`. An empty set still reports one (empty) page.
    pub fn new(page: i64, page_size: i64, total: i64) -> Self {
        let page_size = page_size.max(1);
        let total = total.max(0);
        let total_pages = ((total + page_size - 1) / page_size).max(1);
        Self {
            page: page.clamp(1, total_pages),
            page_size,
            total,
            total_pages,
        }
    }

    /// Zero-based offset of the first item on the current page.
    pub fn offset(&self) -> usize {
        ((self.page - 1) * self.page_size) as usize
    }
}

fn deserialize_string_to_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{Error, Unexpected, Visitor};
    use std::fmt;

    struct I64Visitor;

    impl<'de> Visitor<'de> for I64Visitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a string containing an integer")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            if value <= i64::MAX as u64 {
                Ok(value as i64)
            } else {
                Err(Error::invalid_value(Unexpected::Unsigned(value), &self))
            }
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            value
                .parse()
                .map_err(|_| Error::invalid_value(Unexpected::Str(value), &self))
        }
    }

    deserializer.deserialize_any(I64Visitor)
}

fn deserialize_optional_string_to_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    deserialize_string_to_i64(deserializer).map(Some)
}

fn default_page() -> i64 {
    1
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: 1,
            size: None,
        }
    }
}
