use indexmap::IndexSet;

use crate::{
    errors::{GraphError, GraphResult},
    id::NodeId,
    utils::ordered_map::OrderedMap,
};

/// Set of nodes whose playback is phase-locked to a leader.
///
/// The leader, when present, is always a member.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SynchronizingGroup {
    leader: Option<NodeId>,
    members: IndexSet<NodeId>,
    leader_phase: Option<f32>,
}

impl SynchronizingGroup {
    pub fn leader(&self) -> Option<NodeId> {
        self.leader
    }

    pub fn is_leader(&self, node: NodeId) -> bool {
        self.leader == Some(node)
    }

    pub fn members(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.members.iter().copied()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.members.contains(&node)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Adds a member. The first member of an empty group becomes its leader.
    /// Returns false if the node was already a member.
    pub fn add_node(&mut self, node: NodeId) -> bool {
        let inserted = self.members.insert(node);
        if self.leader.is_none() {
            self.leader = Some(node);
        }
        inserted
    }

    /// Removes a member. Removing the leader promotes the first remaining
    /// member, or leaves the group leaderless when it becomes empty.
    pub fn remove_node(&mut self, node: NodeId) -> bool {
        if !self.members.shift_remove(&node) {
            return false;
        }
        if self.leader == Some(node) {
            self.leader = self.members.first().copied();
            self.leader_phase = None;
        }
        true
    }

    pub fn set_group_leader(&mut self, node: NodeId) -> GraphResult<()> {
        if !self.members.contains(&node) {
            return Err(GraphError::NotAGroupMember(node));
        }
        if self.leader != Some(node) {
            self.leader = Some(node);
            self.leader_phase = None;
        }
        Ok(())
    }

    /// Normalized phase last published by the leader.
    pub fn leader_phase(&self) -> Option<f32> {
        self.leader_phase
    }

    /// Records the leader's phase. Ignored for any other node.
    pub fn publish_phase(&mut self, node: NodeId, phase: f32) -> bool {
        if self.is_leader(node) {
            self.leader_phase = Some(phase);
            true
        } else {
            false
        }
    }
}

/// Named synchronizing groups shared by every graph evaluated with the same
/// context.
#[derive(Debug, Clone, Default)]
pub struct SynchronizingGroups {
    groups: OrderedMap<String, SynchronizingGroup>,
}

impl SynchronizingGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the group with the given name, creating it if needed.
    pub fn add_group(&mut self, name: impl Into<String>) -> &mut SynchronizingGroup {
        self.groups.entry(name.into()).or_default()
    }

    pub fn remove_group(&mut self, name: &str) -> Option<SynchronizingGroup> {
        self.groups.shift_remove(name)
    }

    pub fn group(&self, name: &str) -> Option<&SynchronizingGroup> {
        self.groups.get(name)
    }

    pub fn group_mut(&mut self, name: &str) -> Option<&mut SynchronizingGroup> {
        self.groups.get_mut(name)
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &SynchronizingGroup)> {
        self.groups.iter().map(|(name, group)| (name.as_str(), group))
    }

    /// Name of the first group the node belongs to.
    pub fn group_of(&self, node: NodeId) -> Option<&str> {
        self.groups
            .iter()
            .find(|(_, group)| group.contains(node))
            .map(|(name, _)| name.as_str())
    }

    /// Drops the node from every group it belongs to, promoting a new leader
    /// wherever it led. Returns whether any group contained it.
    pub fn remove_node_everywhere(&mut self, node: NodeId) -> bool {
        self.groups
            .values_mut()
            .fold(false, |removed, group| group.remove_node(node) || removed)
    }

    pub fn set_group_leader(&mut self, name: &str, node: NodeId) -> GraphResult<()> {
        self.groups
            .get_mut(name)
            .ok_or_else(|| GraphError::MissingSyncGroup(name.to_owned()))?
            .set_group_leader(node)
    }
}

#[cfg(test)]
mod test {
    use super::{SynchronizingGroup, SynchronizingGroups};
    use crate::{errors::GraphError, id::NodeId};

    #[test]
    fn first_member_leads() {
        let mut group = SynchronizingGroup::default();
        assert_eq!(group.leader(), None);

        let a = NodeId::generate();
        let b = NodeId::generate();
        assert!(group.add_node(a));
        assert!(group.add_node(b));
        assert!(!group.add_node(b));
        assert_eq!(group.leader(), Some(a));
        assert_eq!(group.len(), 2);
    }

    #[test]
    fn leader_removal_promotes_first_remaining() {
        let mut group = SynchronizingGroup::default();
        let [a, b, c] = [NodeId::generate(), NodeId::generate(), NodeId::generate()];
        group.add_node(a);
        group.add_node(b);
        group.add_node(c);

        group.remove_node(a);
        assert_eq!(group.leader(), Some(b));

        group.remove_node(c);
        assert_eq!(group.leader(), Some(b));

        group.remove_node(b);
        assert_eq!(group.leader(), None);
        assert!(group.is_empty());
    }

    #[test]
    fn leader_stays_a_member_across_edits() {
        let nodes: Vec<NodeId> = (0..5).map(|_| NodeId::generate()).collect();
        let mut group = SynchronizingGroup::default();
        let holds = |group: &SynchronizingGroup| {
            group
                .leader()
                .map_or(group.is_empty(), |leader| group.contains(leader))
        };

        // (add?, node index), mixing leader and follower removals
        let edits = [
            (true, 0),
            (true, 1),
            (true, 2),
            (false, 0),
            (true, 3),
            (false, 2),
            (false, 1),
            (true, 0),
            (false, 4),
            (true, 4),
            (false, 3),
            (false, 0),
            (false, 4),
            (true, 2),
            (true, 2),
            (false, 1),
        ];
        for (add, index) in edits {
            if add {
                group.add_node(nodes[index]);
            } else {
                group.remove_node(nodes[index]);
            }
            assert!(holds(&group), "leader {:?} after {add} {index}", group.leader());
        }
        assert_eq!(group.leader(), Some(nodes[2]));
    }

    #[test]
    fn removal_from_every_group() {
        let mut groups = SynchronizingGroups::new();
        let [a, b, c] = [NodeId::generate(), NodeId::generate(), NodeId::generate()];
        let legs = groups.add_group("legs");
        legs.add_node(a);
        legs.add_node(b);
        legs.publish_phase(a, 0.4);
        let arms = groups.add_group("arms");
        arms.add_node(c);
        arms.add_node(a);

        assert!(groups.remove_node_everywhere(a));
        assert!(!groups.remove_node_everywhere(a));

        let legs = groups.group("legs").unwrap();
        assert_eq!(legs.leader(), Some(b));
        assert_eq!(legs.leader_phase(), None);
        let arms = groups.group("arms").unwrap();
        assert_eq!(arms.leader(), Some(c));
        assert!(!arms.contains(a));
    }

    #[test]
    fn leader_must_be_member() {
        let mut group = SynchronizingGroup::default();
        let a = NodeId::generate();
        let b = NodeId::generate();
        let outsider = NodeId::generate();
        group.add_node(a);
        group.add_node(b);

        assert_eq!(
            group.set_group_leader(outsider),
            Err(GraphError::NotAGroupMember(outsider))
        );
        assert_eq!(group.leader(), Some(a));

        group.set_group_leader(b).unwrap();
        assert_eq!(group.leader(), Some(b));
        assert!(group.leader().is_some_and(|leader| group.contains(leader)));
    }

    #[test]
    fn only_leader_publishes_phase() {
        let mut group = SynchronizingGroup::default();
        let a = NodeId::generate();
        let b = NodeId::generate();
        group.add_node(a);
        group.add_node(b);

        assert!(!group.publish_phase(b, 0.3));
        assert_eq!(group.leader_phase(), None);
        assert!(group.publish_phase(a, 0.3));
        assert_eq!(group.leader_phase(), Some(0.3));
    }

    #[test]
    fn registry_lookup() {
        let mut groups = SynchronizingGroups::new();
        let a = NodeId::generate();
        groups.add_group("locomotion").add_node(a);
        groups.add_group("upper_body");

        assert_eq!(groups.group_of(a), Some("locomotion"));
        assert_eq!(groups.group_of(NodeId::generate()), None);
        assert_eq!(
            groups.set_group_leader("missing", a),
            Err(GraphError::MissingSyncGroup("missing".into()))
        );

        assert!(groups.remove_group("locomotion").is_some());
        assert_eq!(groups.group_of(a), None);
        assert!(groups.group("upper_body").is_some());
        assert!(groups.group_mut("locomotion").is_none());
    }
}
