//! Translate `include` and `select` lists.

use indexmap::IndexMap;

use query_engine_descriptor::descriptor::ast::Projection;

/// Translate a comma-separated list of names into a projection flagging each of them.
/// Names are trimmed and empty names are skipped.
pub fn parse_include(list: &str) -> Projection {
    Projection(
        list.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| (name.to_string(), true))
            .collect::<IndexMap<_, _>>(),
    )
}
