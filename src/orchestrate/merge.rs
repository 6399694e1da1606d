// ABOUTME: Merges registry-declared and config-declared unit lists.
// ABOUTME: Drops disabled units and stable-sorts the rest by order.

use crate::config::UnitDeploy;

/// Produce the final ordered deployment list.
///
/// Registry-declared units are concatenated ahead of config-declared ones,
/// disabled units are dropped with a log line, and the rest is stable-sorted
/// by ascending order, so ties keep registry-before-config arrival order.
/// An empty result is a valid no-op run.
pub fn merge_units(registered: Vec<UnitDeploy>, configured: Vec<UnitDeploy>) -> Vec<UnitDeploy> {
    let mut all = Vec::with_capacity(registered.len() + configured.len());
    all.extend(registered);
    all.extend(configured);

    all.retain(|unit: &UnitDeploy| {
        if unit.options.enabled {
            true
        } else {
            tracing::debug!(
                descriptor = %unit.descriptor,
                qualifier = ?unit.qualifier,
                "skipping disabled unit"
            );
            false
        }
    });

    all.sort_by_key(|unit| unit.options.order);
    all
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(descriptor: &str, order: i32) -> UnitDeploy {
        UnitDeploy::new(descriptor).with_order(order)
    }

    fn descriptors(units: &[UnitDeploy]) -> Vec<&str> {
        units.iter().map(|u| u.descriptor.as_str()).collect()
    }

    #[test]
    fn sorts_by_ascending_order() {
        let merged = merge_units(
            vec![unit("c", 30), unit("a", 10)],
            vec![unit("b", 20)],
        );
        assert_eq!(descriptors(&merged), ["a", "b", "c"]);
    }

    #[test]
    fn ties_keep_registry_before_config() {
        let merged = merge_units(
            vec![unit("reg-1", 5), unit("reg-2", 5)],
            vec![unit("cfg-1", 5), unit("cfg-2", 5)],
        );
        assert_eq!(descriptors(&merged), ["reg-1", "reg-2", "cfg-1", "cfg-2"]);
    }

    #[test]
    fn disabled_units_are_dropped() {
        let merged = merge_units(
            vec![unit("keep", 1), unit("drop", 2).disabled()],
            vec![unit("also-drop", 0).disabled()],
        );
        assert_eq!(descriptors(&merged), ["keep"]);
    }

    #[test]
    fn both_lists_empty_is_valid() {
        assert!(merge_units(vec![], vec![]).is_empty());
    }

    #[test]
    fn negative_orders_sort_first() {
        let merged = merge_units(vec![unit("late", 100)], vec![unit("early", -5)]);
        assert_eq!(descriptors(&merged), ["early", "late"]);
    }
}
