/// Identifier of a node, unique within the tree that allocated it
pub type NodeId = u64;

/// A source of node identifiers
pub trait UniqueGenerator: std::fmt::Debug {
    type Output: Copy + std::fmt::Debug + std::fmt::Display;

    /// Generate a value never returned before by this generator
    fn generate(&mut self) -> Self::Output;
}

/// Hands out 0, 1, 2, ... Each tree owns one, so ids restart per tree.
#[derive(Default, Debug)]
pub struct SequentialIds {
    next_id: NodeId,
}

impl UniqueGenerator for SequentialIds {
    type Output = NodeId;

    fn generate(&mut self) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut ids = SequentialIds::default();
        assert_eq!(ids.generate(), 0);
        assert_eq!(ids.generate(), 1);
        assert_eq!(SequentialIds::default().generate(), 0);
        assert_eq!(ids.generate(), 2);
    }
}
