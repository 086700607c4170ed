use indexmap::IndexMap;
use semver::Version;
use serde::{Deserialize, Serialize};

/// Extension declarations of one module: extended core class mapped to the
/// ordered extending classes. Order is declaration order; during activation
/// chains of multiple modules concatenate, never overwrite.
pub type ClassExtensions = IndexMap<String, Vec<String>>;

/// Event handlers keyed by event name (`onActivate`, `onDeactivate`, ...).
pub type EventHandlers = IndexMap<String, String>;

/// One template-block override declared by a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateBlock {
    /// Shop template the block lives in.
    pub template: String,
    /// Block name inside the template.
    pub block: String,
    /// Module file rendered instead of the block.
    pub file: String,
}

/// Static declaration of one installed module.
///
/// `id` is the stable identity within a shop; `path` is the directory of the
/// module below the shop's modules root and may differ from the id. A module
/// whose metadata is missing is represented as a configuration with empty
/// collections: it contributes nothing downstream and never causes errors
/// by itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleConfiguration {
    id: String,
    path: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    version: Option<Version>,
    #[serde(default)]
    extensions: ClassExtensions,
    #[serde(default)]
    templates: IndexMap<String, String>,
    #[serde(default)]
    template_blocks: Vec<TemplateBlock>,
    #[serde(default)]
    smarty_plugin_directories: Vec<String>,
    #[serde(default)]
    events: EventHandlers,
}

impl ModuleConfiguration {
    pub fn new(id: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            title: String::new(),
            version: None,
            extensions: ClassExtensions::new(),
            templates: IndexMap::new(),
            template_blocks: Vec::new(),
            smarty_plugin_directories: Vec::new(),
            events: EventHandlers::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    /// Declare an extension of a core class. Repeated calls for the same
    /// extended class append, preserving declaration order.
    pub fn with_extension(
        mut self,
        extended_class: impl Into<String>,
        extending_class: impl Into<String>,
    ) -> Self {
        self.extensions
            .entry(extended_class.into())
            .or_default()
            .push(extending_class.into());
        self
    }

    pub fn with_template(
        mut self,
        name: impl Into<String>,
        file: impl Into<String>,
    ) -> Self {
        self.templates.insert(name.into(), file.into());
        self
    }

    pub fn with_template_block(mut self, block: TemplateBlock) -> Self {
        self.template_blocks.push(block);
        self
    }

    /// Declare a Smarty plugin directory, relative to the module path.
    /// Declaration order is precedence order.
    pub fn with_smarty_plugin_directory(mut self, directory: impl Into<String>) -> Self {
        self.smarty_plugin_directories.push(directory.into());
        self
    }

    pub fn with_event(
        mut self,
        event: impl Into<String>,
        handler: impl Into<String>,
    ) -> Self {
        self.events.insert(event.into(), handler.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn version(&self) -> Option<&Version> {
        self.version.as_ref()
    }

    pub fn extensions(&self) -> &ClassExtensions {
        &self.extensions
    }

    pub fn has_extensions(&self) -> bool {
        !self.extensions.is_empty()
    }

    pub fn templates(&self) -> &IndexMap<String, String> {
        &self.templates
    }

    pub fn template_blocks(&self) -> &[TemplateBlock] {
        &self.template_blocks
    }

    pub fn smarty_plugin_directories(&self) -> &[String] {
        &self.smarty_plugin_directories
    }

    pub fn events(&self) -> &EventHandlers {
        &self.events
    }

    pub fn event_handler(&self, event: &str) -> Option<&str> {
        self.events.get(event).map(String::as_str)
    }
}
