use helper_core::{EntityId, EntityOracle, EntityView};

/// Flat per-tick list of every active creature, helpers included.
#[derive(Clone, Debug, Default)]
pub struct EntityTable {
    entities: Vec<EntityView>,
}

impl EntityTable {
    pub fn new(entities: Vec<EntityView>) -> Self {
        Self { entities }
    }

    pub fn push(&mut self, entity: EntityView) {
        self.entities.push(entity);
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl EntityOracle for EntityTable {
    fn entities(&self) -> &[EntityView] {
        &self.entities
    }

    fn entity(&self, id: EntityId) -> Option<&EntityView> {
        self.entities.iter().find(|entity| entity.id == id)
    }
}
