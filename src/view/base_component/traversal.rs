use super::{ElementId, ElementTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalMode {
    /// An element, then its components, then its children.
    #[default]
    Preorder,
    /// Children, then components, then the element itself.
    Postorder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalOptions {
    pub include_self: bool,
    /// Components are only visited together with their owner.
    pub include_components: bool,
    pub mode: TraversalMode,
}

impl Default for TraversalOptions {
    fn default() -> Self {
        Self::everything()
    }
}

impl TraversalOptions {
    pub const fn everything() -> Self {
        Self {
            include_self: true,
            include_components: true,
            mode: TraversalMode::Preorder,
        }
    }

    pub const fn descendants() -> Self {
        Self {
            include_self: false,
            include_components: true,
            mode: TraversalMode::Preorder,
        }
    }

    pub const fn without_components(mut self) -> Self {
        self.include_components = false;
        self
    }

    pub const fn postorder(mut self) -> Self {
        self.mode = TraversalMode::Postorder;
        self
    }
}

enum Frame {
    Visit { id: ElementId, include_self: bool },
    Emit(ElementId),
}

/// Depth-first walk that reads child and component lists lazily as it goes.
pub struct Traverse<'a> {
    tree: &'a ElementTree,
    options: TraversalOptions,
    stack: Vec<Frame>,
}

impl<'a> Traverse<'a> {
    fn new(tree: &'a ElementTree, root: ElementId, options: TraversalOptions) -> Self {
        let stack = if tree.contains(root) {
            vec![Frame::Visit {
                id: root,
                include_self: options.include_self,
            }]
        } else {
            Vec::new()
        };
        Self {
            tree,
            options,
            stack,
        }
    }

    fn expand(&mut self, id: ElementId, include_self: bool) -> Option<ElementId> {
        let visit = |id| Frame::Visit {
            id,
            include_self: true,
        };
        let tree = self.tree;
        let components = (include_self && self.options.include_components)
            .then(|| tree.components(id))
            .unwrap_or_default();
        let children = tree.children(id);

        match self.options.mode {
            TraversalMode::Preorder => {
                self.stack.extend(children.iter().rev().copied().map(visit));
                self.stack
                    .extend(components.iter().rev().map(|slot| visit(slot.element())));
                include_self.then_some(id)
            }
            TraversalMode::Postorder => {
                if include_self {
                    self.stack.push(Frame::Emit(id));
                }
                self.stack
                    .extend(components.iter().rev().map(|slot| visit(slot.element())));
                self.stack.extend(children.iter().rev().copied().map(visit));
                None
            }
        }
    }
}

impl Iterator for Traverse<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        while let Some(frame) = self.stack.pop() {
            let emitted = match frame {
                Frame::Emit(id) => Some(id),
                Frame::Visit { id, include_self } => self.expand(id, include_self),
            };
            if emitted.is_some() {
                return emitted;
            }
        }
        None
    }
}

impl ElementTree {
    pub fn traverse(&self, root: ElementId, options: TraversalOptions) -> Traverse<'_> {
        Traverse::new(self, root, options)
    }

    pub fn find_element(
        &self,
        root: ElementId,
        options: TraversalOptions,
        mut predicate: impl FnMut(&ElementTree, ElementId) -> bool,
    ) -> Option<ElementId> {
        self.traverse(root, options).find(|&id| predicate(self, id))
    }

    pub fn elements(
        &self,
        root: ElementId,
        options: TraversalOptions,
        mut predicate: impl FnMut(&ElementTree, ElementId) -> bool,
    ) -> Vec<ElementId> {
        self.traverse(root, options)
            .filter(|&id| predicate(self, id))
            .collect()
    }

    /// Nearest ancestor (or `id` itself, if `include_self`) matching `predicate`.
    pub fn find_ancestor(
        &self,
        id: ElementId,
        include_self: bool,
        mut predicate: impl FnMut(&ElementTree, ElementId) -> bool,
    ) -> Option<ElementId> {
        let start = if include_self { Some(id) } else { self.parent(id) };
        std::iter::successors(start, |&current| self.parent(current))
            .find(|&candidate| predicate(self, candidate))
    }
}
