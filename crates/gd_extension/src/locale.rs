//! Translation catalogs for the display strings of extensions

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::extension::PlatformExtension;
use crate::metadata::{ExpressionMetadata, InstructionMetadata, ParameterMetadata};
use crate::ExtensionError;

/// Message id to translation map, loaded from `locales/<locale>.toml`
///
/// ```toml
/// [strings]
/// "Tile Map" = "Carte de tuiles"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub locale: String,
    #[serde(default)]
    pub strings: HashMap<String, String>,
}

impl Catalog {
    pub fn from_toml(content: &str) -> Result<Self, ExtensionError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ExtensionError> {
        let content = std::fs::read_to_string(path)?;
        let mut catalog = Self::from_toml(&content)?;
        if catalog.locale.is_empty() {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                catalog.locale = stem.to_string();
            }
        }
        Ok(catalog)
    }

    /// Translation of `msgid`, or `msgid` itself when untranslated
    pub fn translate<'a>(&'a self, msgid: &'a str) -> &'a str {
        self.strings
            .get(msgid)
            .map(String::as_str)
            .unwrap_or(msgid)
    }

    fn translate_in_place(&self, text: &mut String) {
        if let Some(translated) = self.strings.get(text.as_str()) {
            *text = translated.clone();
        }
    }

    /// Translate every display string of an extension
    pub fn localize(&self, extension: &mut PlatformExtension) {
        self.translate_in_place(&mut extension.info.full_name);
        self.translate_in_place(&mut extension.info.description);

        for instruction in extension
            .conditions
            .iter_mut()
            .chain(extension.actions.iter_mut())
        {
            self.localize_instruction(instruction);
        }
        for expression in &mut extension.expressions {
            self.localize_expression(expression);
        }

        for object in &mut extension.objects {
            self.translate_in_place(&mut object.full_name);
            self.translate_in_place(&mut object.description);
            for instruction in object.conditions.iter_mut().chain(object.actions.iter_mut()) {
                self.localize_instruction(instruction);
            }
            for expression in &mut object.expressions {
                self.localize_expression(expression);
            }
        }
    }

    fn localize_instruction(&self, instruction: &mut InstructionMetadata) {
        self.translate_in_place(&mut instruction.full_name);
        self.translate_in_place(&mut instruction.description);
        self.translate_in_place(&mut instruction.sentence);
        self.translate_in_place(&mut instruction.group);
        self.localize_parameters(&mut instruction.parameters);
    }

    fn localize_expression(&self, expression: &mut ExpressionMetadata) {
        self.translate_in_place(&mut expression.full_name);
        self.translate_in_place(&mut expression.description);
        self.translate_in_place(&mut expression.group);
        self.localize_parameters(&mut expression.parameters);
    }

    fn localize_parameters(&self, parameters: &mut [ParameterMetadata]) {
        for parameter in parameters {
            self.translate_in_place(&mut parameter.description);
        }
    }
}
