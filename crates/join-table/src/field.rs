use crate::join::{JoinFieldInfo, JoinFieldLookup, SearchContext};

/// Rewrites a logical field into the `alias.column` reference it reads from.
///
/// References that already contain a `.` (e.g. `user.*`) are returned as-is.
pub fn qualify(field: &str, info: &JoinFieldInfo, ctx: &SearchContext) -> String {
    if field.contains('.') {
        return field.to_string();
    }

    let table = ctx.field_table(field).unwrap_or(ctx.base_table());
    let column = match info.lookup(field) {
        JoinFieldLookup::Joined { column, .. } => column,
        JoinFieldLookup::Base => field,
    };
    format!("{table}.{column}")
}
