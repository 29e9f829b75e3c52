//! Command descriptors and the read-only catalog the registry dispatches over.
//!
//! A catalog is assembled once at startup from an explicit list of
//! descriptors and never changes afterwards.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::console::Console;

/// Anything that can run a command's trailing arguments to an exit code.
pub trait Handler: Send + Sync {
    fn run(&self, args: &[String], console: &mut Console<'_>) -> i32;
}

impl<F> Handler for F
where
    F: Fn(&[String], &mut Console<'_>) -> i32 + Send + Sync,
{
    fn run(&self, args: &[String], console: &mut Console<'_>) -> i32 {
        self(args, console)
    }
}

/// One registrable command: name, optional category and description, handler.
#[derive(Clone)]
pub struct CommandDescriptor {
    name: String,
    category: Option<String>,
    description: Option<String>,
    handler: Arc<dyn Handler>,
}

impl CommandDescriptor {
    pub fn new(name: impl Into<String>, handler: impl Handler + 'static) -> Self {
        Self {
            name: name.into(),
            category: None,
            description: None,
            handler: Arc::new(handler),
        }
    }

    /// Group the command under `category` in listings. Empty means uncategorized.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Category key used for grouping; absent and empty are the same group.
    pub fn category(&self) -> &str {
        self.category.as_deref().unwrap_or("")
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Run the command with the arguments that follow its name.
    pub fn invoke(&self, args: &[String], console: &mut Console<'_>) -> i32 {
        self.handler.run(args, console)
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Ordered, immutable collection of descriptors.
///
/// Names are expected to be unique; when they are not, lookups resolve to
/// the first registration.
#[derive(Debug, Clone, Default)]
pub struct CommandCatalog {
    commands: Vec<CommandDescriptor>,
}

impl CommandCatalog {
    pub fn new(commands: Vec<CommandDescriptor>) -> Self {
        Self { commands }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Exact, case-sensitive lookup.
    pub fn find(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.iter().find(|cmd| cmd.name == name)
    }

    /// Commands grouped by category key, categories and names both ascending.
    pub fn by_category(&self) -> BTreeMap<&str, Vec<&CommandDescriptor>> {
        let mut groups: BTreeMap<&str, Vec<&CommandDescriptor>> = BTreeMap::new();
        for cmd in &self.commands {
            groups.entry(cmd.category()).or_default().push(cmd);
        }
        for group in groups.values_mut() {
            group.sort_by(|a, b| a.name.cmp(&b.name));
        }
        groups
    }
}

impl FromIterator<CommandDescriptor> for CommandCatalog {
    fn from_iter<I: IntoIterator<Item = CommandDescriptor>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
