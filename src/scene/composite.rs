use super::{NodeRef, NodeStyle, SceneNode};
use crate::error::SceneResult;
use crate::surface::Surface;

/// A node made of sub-nodes, drawn in insertion order.
#[derive(Default)]
pub struct CompositeNode {
    style: NodeStyle,
    children: Vec<NodeRef>,
}

impl CompositeNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, child: NodeRef) -> &mut Self {
        self.children.push(child);
        self
    }

    pub fn children(&self) -> &[NodeRef] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl SceneNode for CompositeNode {
    fn style(&self) -> &NodeStyle {
        &self.style
    }

    fn label(&self) -> &str {
        "composite"
    }

    fn render_self(&self, surface: &mut dyn Surface) -> SceneResult {
        self.children
            .iter()
            .try_for_each(|child| child.draw(&mut *surface))
    }
}
