//! Display-label lookup for member names.

/// Supplies human-readable labels for member names.
///
/// Key derivation asks this capability for every field step; a `None`
/// answer falls back to the member's own name. Implementations must be
/// pure and synchronous. The usual host is a closure over whatever label
/// registry the application keeps.
pub trait LabelSource {
    /// Label for `member`, or `None` to use the member name itself.
    fn label(&self, member: &str) -> Option<String>;
}

/// The default source: no labels, every member keeps its own name.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLabels;

impl LabelSource for NoLabels {
    fn label(&self, _member: &str) -> Option<String> {
        None
    }
}

impl<F> LabelSource for F
where
    F: Fn(&str) -> Option<String>,
{
    fn label(&self, member: &str) -> Option<String> {
        self(member)
    }
}
