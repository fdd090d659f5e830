use slotmap::new_key_type;

new_key_type! {
    /// Identifies a prefab (object template) in the prefab store.
    pub struct PrefabId;
}

/// Identifies a named placeholder in the mock registry that created it.
/// Cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MockId {
    pub(crate) registry: u32,
    pub(crate) index: u32,
}

impl MockId {
    /// Position of the placeholder in creation order.
    pub fn index(&self) -> u32 {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn mock_id_equality() {
        let a = MockId { registry: 0, index: 0 };
        let b = MockId { registry: 0, index: 0 };
        let c = MockId { registry: 0, index: 1 };
        let d = MockId { registry: 1, index: 0 };
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn prefab_ids_are_distinct() {
        let mut prefabs: SlotMap<PrefabId, ()> = SlotMap::with_key();
        let a = prefabs.insert(());
        let b = prefabs.insert(());
        assert_ne!(a, b);
    }

    #[test]
    fn ids_are_hashable() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(MockId { registry: 0, index: 0 }, "forge");
        map.insert(MockId { registry: 0, index: 1 }, "Wood");
        assert_eq!(map[&MockId { registry: 0, index: 1 }], "Wood");
    }
}
