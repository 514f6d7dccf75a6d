use levenshtein::levenshtein;
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The maximum number of suggestions offered for a misspelled name.
const MAX_SUGGESTIONS: usize = 3;

/// Returns up to [`MAX_SUGGESTIONS`] names from `known` that are similar to `name`, closest first.
pub(crate) fn similar_names<'a>(name: &str, known: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut similar = known
        .map(|known| (levenshtein(known, name), known))
        .filter(|(distance, _)| *distance < 2)
        .collect::<Vec<_>>();
    similar.sort_unstable();
    similar.into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, known)| known.to_string())
        .collect()
}

/// The values of the variables to use when evaluating an expression.
///
/// A context is always owned by the caller and passed explicitly; nothing shares a default
/// instance behind the scenes.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ctxt {
    /// The variables in the context.
    vars: HashMap<String, f64>,
}

impl Ctxt {
    /// Creates a new empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the context with the given variable added.
    pub fn with_var(mut self, name: &str, value: f64) -> Self {
        self.add_var(name, value);
        self
    }

    /// Add a variable to the context, replacing any previous value.
    pub fn add_var(&mut self, name: &str, value: f64) {
        self.vars.insert(name.to_string(), value);
    }

    /// Get the value of a variable in the context.
    pub fn get_var(&self, name: &str) -> Option<f64> {
        self.vars.get(name).copied()
    }

    /// Returns the variables in the context.
    pub fn get_vars(&self) -> &HashMap<String, f64> {
        &self.vars
    }

    /// Returns the variables in the context with a name similar to the given name.
    pub fn get_similar_vars(&self, name: &str) -> Vec<String> {
        similar_names(name, self.vars.keys().map(String::as_str))
    }
}

impl FromIterator<(String, f64)> for Ctxt {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self { vars: iter.into_iter().collect() }
    }
}

impl Extend<(String, f64)> for Ctxt {
    fn extend<I: IntoIterator<Item = (String, f64)>>(&mut self, iter: I) {
        self.vars.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_and_lookup() {
        let ctxt = Ctxt::new().with_var("x", 4.0).with_var("y", 2.0).with_var("x", 5.0);
        assert_eq!(ctxt.get_var("x"), Some(5.0));
        assert_eq!(ctxt.get_var("y"), Some(2.0));
        assert_eq!(ctxt.get_var("z"), None);
        assert_eq!(ctxt.get_vars().len(), 2);
    }

    #[test]
    fn from_iterator() {
        let ctxt = [("a".to_string(), 1.0), ("b".to_string(), 2.0)].into_iter().collect::<Ctxt>();
        assert_eq!(ctxt, Ctxt::new().with_var("a", 1.0).with_var("b", 2.0));
    }

    #[test]
    fn similar_vars() {
        let ctxt = Ctxt::new()
            .with_var("xa", 1.0)
            .with_var("x", 1.0)
            .with_var("speed", 1.0)
            .with_var("y", 1.0);
        assert_eq!(ctxt.get_similar_vars("xb"), vec!["x", "xa"]);
        assert_eq!(ctxt.get_similar_vars("sped"), vec!["speed"]);
        assert!(ctxt.get_similar_vars("velocity").is_empty());
    }
}
