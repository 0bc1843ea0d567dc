use crate::red::SyntaxElementChildren;
use crate::{NodeOrToken, SyntaxElement, SyntaxNode};

/// Depth-first walk over nodes and tokens. Every element is entered and left
/// exactly once; a token's `Leave` immediately follows its `Enter`.
pub struct Preorder<'a> {
    start: Option<SyntaxNode<'a>>,
    stack: Vec<(SyntaxNode<'a>, SyntaxElementChildren<'a>)>,
    leave_token: Option<SyntaxElement<'a>>,
}

impl<'a> Preorder<'a> {
    pub(crate) fn new(start: SyntaxNode<'a>) -> Self {
        Self { start: Some(start), stack: Vec::new(), leave_token: None }
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = WalkEvent<SyntaxElement<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(start) = self.start.take() {
            self.stack.push((start, start.children_with_tokens()));
            return Some(WalkEvent::Enter(NodeOrToken::Node(start)));
        }

        if let Some(token) = self.leave_token.take() {
            return Some(WalkEvent::Leave(token));
        }

        let (_, children) = self.stack.last_mut()?;
        match children.next() {
            Some(NodeOrToken::Node(child)) => {
                self.stack.push((child, child.children_with_tokens()));
                Some(WalkEvent::Enter(NodeOrToken::Node(child)))
            }
            Some(token @ NodeOrToken::Token(_)) => {
                self.leave_token = Some(token);
                Some(WalkEvent::Enter(token))
            }
            None => {
                let (node, _) = self.stack.pop()?;
                Some(WalkEvent::Leave(NodeOrToken::Node(node)))
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WalkEvent<T> {
    Enter(T),
    Leave(T),
}
