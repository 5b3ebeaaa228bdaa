//! Per-invocation environment overlay

use std::collections::BTreeMap;

use serde::Deserialize;

/// Named variables layered over the inherited process environment
///
/// The overlay is a value passed with each request: applying it configures
/// the child's spawn and never mutates this process's own environment.
/// Overlay entries win over inherited variables of the same name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct EnvironmentOverlay(BTreeMap<String, String>);

impl EnvironmentOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace one variable, builder style
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Add or replace one variable
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate entries in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Layer this overlay on top of a base overlay
    ///
    /// Entries of `self` win over entries of `base`. Used to combine a
    /// scenario-wide overlay with a per-step one.
    pub fn merged_over(&self, base: &Self) -> Self {
        let mut merged = base.0.clone();
        for (k, v) in &self.0 {
            merged.insert(k.clone(), v.clone());
        }
        Self(merged)
    }
}

impl FromIterator<(String, String)> for EnvironmentOverlay {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_entries_win_over_scenario_entries() {
        let scenario = EnvironmentOverlay::new()
            .with("DOTNET_ROOT", "/opt/dotnet8")
            .with("SHARED", "scenario");
        let step = EnvironmentOverlay::new().with("DOTNET_ROOT", "/opt/dotnet9");

        let merged = step.merged_over(&scenario);
        let vars: Vec<_> = merged.iter().collect();
        assert_eq!(
            vars,
            vec![("DOTNET_ROOT", "/opt/dotnet9"), ("SHARED", "scenario")]
        );
    }

    #[test]
    fn test_merging_does_not_touch_inputs() {
        let base = EnvironmentOverlay::new().with("A", "1");
        let top = EnvironmentOverlay::new().with("A", "2");
        let _ = top.merged_over(&base);
        assert_eq!(base.iter().next(), Some(("A", "1")));
        assert_eq!(top.iter().next(), Some(("A", "2")));
    }
}
