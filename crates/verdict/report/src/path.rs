//! Member access paths for error keying.

use std::fmt;

use crate::labels::LabelSource;

/// Describes a field/index access chain rooted at a named variable.
///
/// This stands in for inspecting caller code: instead of reflecting over an
/// access expression, the caller spells the same chain out fluently.
/// `MemberPath::root("order").field("items").index(0)` describes
/// `order.items[0]`. The key is derived from the chain's shape alone; the
/// value an error message reports travels separately.
///
/// Only field and index steps exist, so a chain that cannot be keyed is
/// unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberPath {
    root: String,
    steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Field(String),
    Index(String),
}

impl MemberPath {
    /// Start a path at the named root variable.
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            root: name.into(),
            steps: Vec::new(),
        }
    }

    /// Append a field access step.
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.steps.push(Step::Field(name.into()));
        self
    }

    /// Append an index access step. The index only needs a display form.
    pub fn index(mut self, index: impl fmt::Display) -> Self {
        self.steps.push(Step::Index(index.to_string()));
        self
    }

    /// Name of the root variable the chain starts at.
    pub fn root_name(&self) -> &str {
        &self.root
    }

    /// Derive the form key for this chain.
    ///
    /// Walks steps outermost to innermost: a field step contributes the
    /// label `labels` supplies for it (falling back to the field name), an
    /// index step fuses `[i]` onto the trailing segment when one exists and
    /// opens its own segment otherwise. With `include_root` the root name
    /// seeds the segment list, so `list[0]` keeps the root fused while
    /// `a.Length` joins with a dot. Segments join with `.`.
    pub fn render(&self, include_root: bool, labels: &dyn LabelSource) -> String {
        let mut segments: Vec<String> = Vec::new();
        if include_root {
            segments.push(self.root.clone());
        }
        for step in &self.steps {
            match step {
                Step::Field(name) => {
                    segments.push(labels.label(name).unwrap_or_else(|| name.clone()));
                }
                Step::Index(index) => match segments.last_mut() {
                    Some(owner) => {
                        owner.push('[');
                        owner.push_str(index);
                        owner.push(']');
                    }
                    None => segments.push(format!("[{index}]")),
                },
            }
        }
        segments.join(".")
    }
}
