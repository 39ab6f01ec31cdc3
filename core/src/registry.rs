use netdiag_common::target::Target;
use unicode_width::UnicodeWidthStr;

/// Position of a target in the registry. Stable for the life of the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(usize);

impl TargetId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The fixed, ordered set of targets. Read-only once built.
#[derive(Clone, Debug)]
pub struct TargetRegistry {
    targets: Vec<Target>,
}

impl TargetRegistry {
    pub fn new(targets: Vec<Target>) -> Self {
        Self { targets }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn get(&self, id: TargetId) -> &Target {
        &self.targets[id.0]
    }

    pub fn ids(&self) -> impl Iterator<Item = TargetId> + use<> {
        (0..self.targets.len()).map(TargetId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TargetId, &Target)> {
        self.targets
            .iter()
            .enumerate()
            .map(|(idx, target)| (TargetId(idx), target))
    }

    /// Display width of the widest `"<Kind> <address>"` label.
    pub fn label_width(&self) -> usize {
        self.targets
            .iter()
            .map(|target| UnicodeWidthStr::width(target.label().as_str()))
            .max()
            .unwrap_or(0)
    }
}
