//! List-query pipeline: turns decoded query-string parameters into a filter,
//! projection, sort and page window, and derives next/prev page descriptors.

use std::collections::{BTreeMap, HashMap};

use bson::{Bson, Document};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use serde::Serialize;
use utoipa::ToSchema;

use crate::constants::{
    DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, DEFAULT_SORT_FIELD, RESERVED_QUERY_KEYS,
};
use crate::query::filter::{Condition, FieldKind, FilterSpec};

/// Bootcamp fields not stored as text.
const NUMBER_FIELDS: [&str; 2] = ["averageCost", "averageRating"];
const BOOLEAN_FIELDS: [&str; 4] = ["housing", "jobAssistance", "jobGuarantee", "acceptGi"];
const OBJECT_ID_FIELDS: [&str; 2] = ["_id", "user"];

lazy_static! {
    /// `field[op]` keys, e.g. `averageCost[lte]`.
    static ref COMPARISON_KEY: Regex =
        Regex::new(r"^([^\[\]]+)\[([a-z]+)\]$").expect("comparison key pattern is valid");
}

/// Page reference used in pagination descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PageRef {
    pub page: u64,
    pub limit: u64,
}

/// Links to neighbouring pages; an absent field means there is no such page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct Pagination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<PageRef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub filter: FilterSpec,
    pub projection: Option<Document>,
    pub sort: Document,
    pub page: u64,
    pub limit: u64,
}

impl ListQuery {
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        // Sorted so the generated filter document is deterministic.
        let ordered: BTreeMap<&str, &str> = params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        let mut filter = FilterSpec::new();
        for (key, value) in ordered.iter() {
            if RESERVED_QUERY_KEYS.contains(key) {
                continue;
            }
            if let Some((field, condition)) = parse_filter_param(key, value) {
                filter.push(field, condition);
            } else {
                debug!("Ignoring query parameter with operator-like key: {}", key);
            }
        }

        let query = Self {
            filter,
            projection: ordered.get("select").and_then(|raw| parse_select(raw)),
            sort: ordered
                .get("sort")
                .and_then(|raw| parse_sort(raw))
                .unwrap_or_else(default_sort),
            page: parse_positive(ordered.get("page").copied()).unwrap_or(DEFAULT_PAGE_NUMBER),
            limit: parse_positive(ordered.get("limit").copied()).unwrap_or(DEFAULT_PAGE_SIZE),
        };

        debug!(
            "Built list query: filter={:?}, projection={:?}, sort={:?}, page={}, limit={}",
            query.filter_document(),
            query.projection,
            query.sort,
            query.page,
            query.limit
        );

        query
    }

    pub fn filter_document(&self) -> Document {
        self.filter.to_document()
    }

    /// Number of matching records to skip before the current page.
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Whether the page starts at or beyond the last matching record.
    pub fn is_past_end(&self, total: u64) -> bool {
        self.skip() >= total
    }

    /// Page descriptors given the number of records matching the filter.
    pub fn pagination(&self, total: u64) -> Pagination {
        let end = self.page.saturating_mul(self.limit);

        Pagination {
            next: (end < total).then(|| PageRef {
                page: self.page + 1,
                limit: self.limit,
            }),
            prev: (self.skip() > 0).then(|| PageRef {
                page: self.page - 1,
                limit: self.limit,
            }),
        }
    }
}

/// Build the full page plan in one step.
#[cfg(test)]
pub fn build_page(params: &HashMap<String, String>, total: u64) -> (ListQuery, Pagination) {
    let query = ListQuery::from_params(params);
    let pagination = query.pagination(total);
    (query, pagination)
}

/// Turn one non-reserved parameter into a field condition.
///
/// Keys starting with `$` are dropped so callers cannot inject top-level
/// query operators.
fn parse_filter_param(key: &str, value: &str) -> Option<(String, Condition)> {
    if key.starts_with('$') {
        return None;
    }

    if let Some(captures) = COMPARISON_KEY.captures(key) {
        let field = &captures[1];
        if let Some(condition) = Condition::from_token(&captures[2], value, field_kind(field)) {
            return Some((field.to_string(), condition));
        }
    }

    Some((
        key.to_string(),
        Condition::Equals(field_kind(key).coerce(value)),
    ))
}

/// Stored kind of a bootcamp field, used to read filter values.
fn field_kind(field: &str) -> FieldKind {
    if NUMBER_FIELDS.contains(&field) {
        FieldKind::Number
    } else if BOOLEAN_FIELDS.contains(&field) {
        FieldKind::Boolean
    } else if OBJECT_ID_FIELDS.contains(&field) {
        FieldKind::ObjectId
    } else {
        FieldKind::Text
    }
}

fn default_sort() -> Document {
    let mut sort = Document::new();
    sort.insert(DEFAULT_SORT_FIELD, -1);
    sort
}

fn field_tokens(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty() && !token.starts_with('$'))
}

fn parse_select(raw: &str) -> Option<Document> {
    let projection: Document = field_tokens(raw)
        .map(|field| (field.to_string(), Bson::Int32(1)))
        .collect();
    (!projection.is_empty()).then_some(projection)
}

fn parse_sort(raw: &str) -> Option<Document> {
    let mut sort = Document::new();
    for token in field_tokens(raw) {
        let (field, direction) = match token.strip_prefix('-') {
            Some(field) => (field.trim(), -1),
            None => (token, 1),
        };
        if field.is_empty() || field.starts_with('$') {
            continue;
        }
        sort.insert(field, direction);
    }
    (!sort.is_empty()).then_some(sort)
}

fn parse_positive(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| *value >= 1)
}
