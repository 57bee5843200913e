//! Emits the joins a search needs and records where each logical field lives.

use std::collections::HashSet;

use crate::join::{
    context::{HopKey, SearchContext},
    spec::{JoinFieldInfo, JoinSpec},
};
use query_builder::builder::QueryBuilder;
use tracing::{debug, trace};

/// Adds a `LEFT JOIN` for every hop of every join whose fields appear in
/// `referenced`, reusing the alias of a hop already taken from the same table
/// alias. Each logical field of a joined spec is mapped to the alias of its
/// path's last table in `ctx`.
pub fn resolve<B: QueryBuilder>(
    builder: &mut B,
    info: &JoinFieldInfo,
    referenced: &HashSet<&str>,
    ctx: &mut SearchContext,
) {
    for spec in info.specs() {
        if !is_needed(spec, referenced) {
            continue;
        }

        let alias = join_path(builder, spec, ctx);
        for field in spec.aliases() {
            ctx.assign_field(field, &alias);
        }
    }

    debug!(joins = ctx.join_count(), "resolved joins");
}

fn is_needed(spec: &JoinSpec, referenced: &HashSet<&str>) -> bool {
    spec.aliases().any(|alias| referenced.contains(alias))
}

fn join_path<B: QueryBuilder>(
    builder: &mut B,
    spec: &JoinSpec,
    ctx: &mut SearchContext,
) -> String {
    let mut current = ctx.base_table().to_string();

    for hop in &spec.path {
        let key = HopKey {
            left_alias: current.clone(),
            left_field: hop.left_field.clone(),
            right_table: hop.table.clone(),
            right_field: hop.right_field.clone(),
        };

        if let Some(alias) = ctx.joined_alias(&key) {
            trace!(table = %hop.table, alias, "reusing joined alias");
            current = alias.to_string();
            continue;
        }

        let alias = ctx.next_alias(&hop.table);
        builder.left_join(
            &hop.table,
            &alias,
            &format!("{current}.{}", hop.left_field),
            &format!("{alias}.{}", hop.right_field),
        );
        ctx.record_join(key, alias.clone());
        current = alias;
    }

    current
}
