//! Label pairs and metric key derivation.

/// One metric label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelPair {
    pub name: String,
    pub value: String,
}

/// Insertion-ordered label set.
///
/// Order is part of a metric's identity: the same pairs added in a different
/// order form a different series. Call sites that want order-independent
/// identity must canonicalize before labeling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet(Vec<LabelPair>);

impl LabelSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append one pair, keeping insertion order.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push(LabelPair {
            name: name.into(),
            value: value.into(),
        });
    }

    pub fn pairs(&self) -> &[LabelPair] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Separator between key segments: ASCII group separator, which never occurs
/// in well-formed label values. Identical (name, label-values) always derive
/// the same key; distinct value sequences never collide.
const KEY_SEPARATOR: char = '\u{1d}';

/// Derive the registry key for a (name, label-values) identity.
pub(crate) fn make_key(name: &str, labels: &LabelSet) -> String {
    let mut key = String::with_capacity(name.len() + 16 * labels.len());
    key.push_str(name);
    for pair in labels.pairs() {
        key.push(KEY_SEPARATOR);
        key.push_str(&pair.value);
    }
    key
}
