use std::sync::Arc;

use crate::{
    controller::{AnimationController, Skeleton},
    sync::SynchronizingGroups,
};

/// Ambient state shared by a whole graph evaluation, nested graphs included.
#[derive(Debug, Clone)]
pub struct GraphContext {
    skeleton: Arc<dyn Skeleton>,
    controller: Arc<dyn AnimationController>,
    sync_groups: SynchronizingGroups,
}

impl GraphContext {
    pub fn new(skeleton: Arc<dyn Skeleton>, controller: Arc<dyn AnimationController>) -> Self {
        Self {
            skeleton,
            controller,
            sync_groups: SynchronizingGroups::default(),
        }
    }

    pub fn with_sync_groups(mut self, sync_groups: SynchronizingGroups) -> Self {
        self.sync_groups = sync_groups;
        self
    }

    pub fn skeleton(&self) -> &dyn Skeleton {
        self.skeleton.as_ref()
    }

    pub fn controller(&self) -> &dyn AnimationController {
        self.controller.as_ref()
    }

    pub fn sync_groups(&self) -> &SynchronizingGroups {
        &self.sync_groups
    }

    pub fn sync_groups_mut(&mut self) -> &mut SynchronizingGroups {
        &mut self.sync_groups
    }
}
