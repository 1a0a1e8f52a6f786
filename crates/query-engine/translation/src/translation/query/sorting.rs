//! Translate an order-by list, e.g. `createdAt:desc,profile.name:asc`.

use query_engine_descriptor::descriptor::ast::{OrderBy, OrderByElement, OrderDirection};
use query_engine_metadata::metadata::PATH_SEPARATOR;

use crate::translation::error::Error;

const ORDER_BY_FORMAT: &str = "field:asc|desc";

/// Translate a comma-separated list of `field:direction` pairs. The direction defaults to
/// ascending. Input order is kept: the first element is the primary sort key.
pub fn parse_order_by(list: &str) -> Result<OrderBy, Error> {
    let elements = list
        .split(',')
        .map(str::trim)
        .filter(|sort| !sort.is_empty())
        .map(parse_element)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(OrderBy { elements })
}

fn parse_element(sort: &str) -> Result<OrderByElement, Error> {
    let invalid = || Error::InvalidSyntax {
        context: "orderBy",
        input: sort.to_string(),
        expected: ORDER_BY_FORMAT,
    };
    let (field, direction) = match sort.split_once(':') {
        Some((field, direction)) => (field, direction),
        None => (sort, ""),
    };

    let direction = if direction.is_empty() || direction.eq_ignore_ascii_case("asc") {
        OrderDirection::Asc
    } else if direction.eq_ignore_ascii_case("desc") {
        OrderDirection::Desc
    } else {
        return Err(invalid());
    };

    let path = field
        .split(PATH_SEPARATOR)
        .map(str::to_string)
        .collect::<Vec<_>>();
    if path.iter().any(String::is_empty) {
        return Err(invalid());
    }

    Ok(OrderByElement { path, direction })
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use super::*;

    fn json(list: &str) -> serde_json::Value {
        serde_json::to_value(parse_order_by(list).unwrap()).unwrap()
    }

    #[test]
    fn keeps_input_order() {
        assert_eq!(
            json("createdAt:desc,name:asc"),
            serde_json::json!([{"createdAt": "desc"}, {"name": "asc"}])
        );
    }

    #[test]
    fn dotted_fields_nest() {
        assert_eq!(
            json("a.b:desc"),
            serde_json::json!([{"a": {"b": "desc"}}])
        );
    }

    #[test]
    fn direction_is_optional_and_case_insensitive() {
        assert_eq!(
            json("name,age:DESC,id:"),
            serde_json::json!([{"name": "asc"}, {"age": "desc"}, {"id": "asc"}])
        );
    }

    #[test]
    fn empty_segments_are_skipped() {
        assert_eq!(json(" name:desc , ,"), serde_json::json!([{"name": "desc"}]));
        assert!(parse_order_by("").unwrap().elements.is_empty());
    }

    #[test]
    fn rejects_unknown_directions_and_empty_fields() {
        assert_eq!(
            parse_order_by("name:sideways").unwrap_err().to_string(),
            "Invalid orderBy format: name:sideways. Expected format: field:asc|desc"
        );
        assert!(parse_order_by(":desc").is_err());
        assert!(parse_order_by("a..b:asc").is_err());
    }
}
