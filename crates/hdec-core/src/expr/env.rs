use std::collections::HashMap;

/// Values of the fields decoded so far in one run, in decode order.
///
/// Bindings are append-only: once a name is bound its value never changes.
///
/// # Examples
/// ```
/// use hdec_core::expr::Environment;
///
/// let mut env = Environment::new();
/// assert!(env.bind("version", 4));
/// assert!(!env.bind("version", 6));
/// assert_eq!(env.get("version"), Some(4));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<u64> {
        self.index.get(name).map(|&i| self.entries[i].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Bind `name` to `value`. Returns `false` and keeps the existing value
    /// when `name` is already bound.
    pub fn bind(&mut self, name: &str, value: u64) -> bool {
        if self.index.contains_key(name) {
            return false;
        }
        self.index.insert(name.to_string(), self.entries.len());
        self.entries.push((name.to_string(), value));
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
    }
}

#[cfg(test)]
mod tests {
    use super::Environment;

    #[test]
    fn iterates_in_bind_order() {
        let mut env = Environment::new();
        env.bind("zeta", 1);
        env.bind("alpha", 2);
        env.bind("mid", 3);
        let names: Vec<&str> = env.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn rebinding_is_ignored() {
        let mut env = Environment::new();
        env.bind("a", 1);
        env.bind("a", 2);
        assert_eq!(env.len(), 1);
        assert_eq!(env.get("a"), Some(1));
    }
}
