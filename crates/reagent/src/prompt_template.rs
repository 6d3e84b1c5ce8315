use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tera::{Context, Error as TeraError, Tera};

use crate::tools::{ToolInfo, ToolRegistry};

/// The built-in ReAct instructions, rendered with the registry's tools
pub const SYSTEM_PROMPT_TEMPLATE: &str = include_str!("prompts/system.md");

pub fn load_prompt<T: Serialize>(template: &str, context_data: &T) -> Result<String, TeraError> {
    let mut tera = Tera::default();
    tera.add_raw_template("inline_template", template)?;
    let context = Context::from_serialize(context_data)?;
    let rendered = tera.render("inline_template", &context)?;
    Ok(rendered)
}

pub fn load_prompt_file<T: Serialize>(
    template_file: impl Into<PathBuf>,
    context_data: &T,
) -> Result<String, TeraError> {
    let file_path = template_file.into();
    let template_content = fs::read_to_string(&file_path).map_err(|e| {
        TeraError::chain(
            format!("Failed to read template file {}", file_path.display()),
            e,
        )
    })?;
    load_prompt(&template_content, context_data)
}

/// Render `template` with `tools` set to the registry's tool descriptions
pub fn render_system_prompt(template: &str, registry: &ToolRegistry) -> Result<String, TeraError> {
    let mut context: HashMap<&str, Vec<ToolInfo>> = HashMap::new();
    context.insert("tools", registry.infos());
    load_prompt(template, &context)
}
