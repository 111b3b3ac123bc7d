//! Instance family helpers
//!
//! Default selection runs right after a family list arrives so the size
//! selector is never left blank while data exists.

use crate::gateway::InstanceFamily;
use crate::types::Architecture;

/// First family in `priority` that exists in `families`, else the first
/// fetched family, else `None` for an empty list.
pub fn pick_preferred<'a>(
    families: &'a [InstanceFamily],
    priority: &[&str],
) -> Option<&'a InstanceFamily> {
    priority
        .iter()
        .find_map(|name| families.iter().find(|f| f.name == *name))
        .or_else(|| families.first())
}

/// Default family for an architecture-scoped list.
pub fn default_family(
    families: &[InstanceFamily],
    architecture: Architecture,
) -> Option<&InstanceFamily> {
    pick_preferred(families, architecture.preferred_families())
}

/// Families grouped by category (first-seen category order), sorted by name
/// within each group.
pub fn group_by_category(families: &[InstanceFamily]) -> Vec<(&str, Vec<&InstanceFamily>)> {
    let mut groups: Vec<(&str, Vec<&InstanceFamily>)> = Vec::new();
    for family in families {
        match groups.iter_mut().find(|(cat, _)| *cat == family.category) {
            Some((_, members)) => members.push(family),
            None => groups.push((family.category.as_str(), vec![family])),
        }
    }
    for (_, members) in &mut groups {
        members.sort_by(|a, b| a.name.cmp(&b.name));
    }
    groups
}
