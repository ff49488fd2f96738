//! Job classes that bypass instrumentation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use jobmeter_core::JobClass;

/// Set of class names excluded from instrumentation.
///
/// Entries are stored as plain class-name strings whether they were added by
/// name or by `JobClass` type, so membership only compares names. Duplicates
/// collapse. Deserializes from a single string or a list of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "OneOrMany", into = "Vec<String>")]
pub struct ExcludedClasses(BTreeSet<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl From<OneOrMany> for ExcludedClasses {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(name) => std::iter::once(name).collect(),
            OneOrMany::Many(names) => names.into_iter().collect(),
        }
    }
}

impl From<ExcludedClasses> for Vec<String> {
    fn from(value: ExcludedClasses) -> Self {
        value.0.into_iter().collect()
    }
}

impl ExcludedClasses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, class_name: impl Into<String>) {
        self.0.insert(class_name.into());
    }

    pub fn insert_job<J: JobClass>(&mut self) {
        self.insert(J::CLASS_NAME);
    }

    /// Pure membership check; never fails.
    pub fn contains(&self, class_name: &str) -> bool {
        self.0.contains(class_name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ExcludedClasses {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for ExcludedClasses {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}
