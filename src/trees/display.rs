use std::fmt::Write;

use super::{NodeRef, Preorder};

/// Box drawing renderer for trees.
///
/// Each node sits on its own row, indented one column per level, with the payload
/// written by the supplied closure:
///
/// ```text
/// ┏8: root
/// ┃ ┣4: left
/// ┃ ┗10: right
/// ┗
/// ```
///
/// A node with only a right child gets an `∅` row for its empty left slot, so a
/// lone left child and a lone right child draw differently.
pub struct TreeDisplay;

const COLUMN_WIDTH: usize = 2;

fn indent(f: &mut std::fmt::Formatter<'_>, depth: usize) -> std::fmt::Result {
    for i in 0..depth * COLUMN_WIDTH {
        if i % COLUMN_WIDTH == 0 {
            f.write_char('┃')?;
        } else {
            f.write_char(' ')?;
        }
    }
    Ok(())
}

impl TreeDisplay {
    pub fn format<K, V, F>(
        root: Option<NodeRef<K, V>>,
        f: &mut std::fmt::Formatter<'_>,
        data_format: F,
    ) -> std::fmt::Result
    where
        F: Fn(&K, &V, &mut std::fmt::Formatter<'_>) -> std::fmt::Result,
    {
        let mut iter = Preorder::new(root).peekable();

        let mut root_children = false;

        while let Some(node) = iter.next() {
            // Peek at the next node to see if there are siblings
            let has_siblings = iter
                .peek()
                .map(|next_node| node.depth() == next_node.depth())
                .unwrap_or(false);

            let has_children = node.has_children();

            if node.depth() == 0 {
                root_children = has_children;

                if has_children {
                    f.write_char('┏')?;
                } else {
                    f.write_char('━')?;
                }
            } else {
                indent(f, node.depth())?;

                if has_children || has_siblings {
                    f.write_char('┣')?;
                } else {
                    f.write_char('┗')?;
                }
            }

            data_format(&node.key(), &node.value(), f)?;

            f.write_char('\n')?;

            if node.has_right_child() && !node.has_left_child() {
                indent(f, node.depth() + 1)?;
                f.write_str("┣∅\n")?;
            }
        }

        if root_children {
            f.write_str("┗")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::keyed_tree;

    struct Rendered(Option<NodeRef<i32, &'static str>>);

    impl std::fmt::Display for Rendered {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            TreeDisplay::format(self.0.clone(), f, |key, value, f| {
                write!(f, "{}: {}", key, value)
            })
        }
    }

    #[test]
    fn test_render() {
        assert_eq!(
            Rendered(Some(keyed_tree())).to_string(),
            "┏8: eight\n\
             ┃ ┣4: four\n\
             ┃ ┃ ┣2: two\n\
             ┃ ┃ ┣6: six\n\
             ┃ ┃ ┃ ┗5: five\n\
             ┃ ┣10: ten\n\
             ┃ ┃ ┣∅\n\
             ┃ ┃ ┗12: twelve\n\
             ┗"
        );
    }

    #[test]
    fn test_single_and_empty() {
        assert_eq!(Rendered(None).to_string(), "");
        let leaf = NodeRef::new(0, 1, "one");
        assert_eq!(Rendered(Some(leaf)).to_string(), "━1: one\n");
    }

    #[test]
    fn test_lone_child_side() {
        let left = NodeRef::new(0, 2, "two");
        left.set_left(Some(NodeRef::new(1, 1, "one")));
        assert_eq!(Rendered(Some(left)).to_string(), "┏2: two\n┃ ┗1: one\n┗");

        let right = NodeRef::new(0, 2, "two");
        right.set_right(Some(NodeRef::new(1, 3, "three")));
        assert_eq!(
            Rendered(Some(right)).to_string(),
            "┏2: two\n┃ ┣∅\n┃ ┗3: three\n┗"
        );
    }
}
