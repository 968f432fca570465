pub mod rust;

use anyhow::{anyhow, Result};
use std::{collections::HashMap, path::Path};
use tree_sitter::{Language, Parser};

use crate::mover::MoverPolicy;

/// Registry to manage all supported languages
pub struct LanguageRegistry {
    languages: HashMap<&'static str, LanguageCommon>,
    extensions: HashMap<&'static str, &'static str>,
}

pub struct LanguageCommon {
    name: &'static str,
    file_extensions: &'static [&'static str],
    language: Language,
    movers: &'static [MoverPolicy],
}

impl LanguageCommon {
    pub fn new(
        name: &'static str,
        file_extensions: &'static [&'static str],
        language: Language,
        movers: &'static [MoverPolicy],
    ) -> Self {
        Self {
            name,
            file_extensions,
            language,
            movers,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn file_extensions(&self) -> &'static [&'static str] {
        self.file_extensions
    }

    pub fn tree_sitter_language(&self) -> &Language {
        &self.language
    }

    pub fn movers(&self) -> &'static [MoverPolicy] {
        self.movers
    }

    pub fn tree_sitter_parser(&self) -> Result<Parser> {
        let mut parser = Parser::new();
        parser.set_language(self.tree_sitter_language())?;
        Ok(parser)
    }
}

impl LanguageRegistry {
    pub fn new() -> Result<Self> {
        let mut registry = Self {
            languages: HashMap::new(),
            extensions: HashMap::new(),
        };

        registry.register_language(rust::language());

        Ok(registry)
    }

    pub fn register_language(&mut self, language: LanguageCommon) {
        let name = language.name();
        for extension in language.file_extensions() {
            self.extensions.insert(extension, name);
        }
        self.languages.insert(name, language);
    }

    pub fn get_language(&self, name: &str) -> Option<&LanguageCommon> {
        self.languages.get(name)
    }

    pub fn get_language_with_hint(
        &self,
        file_path: &str,
        language_hint: Option<&str>,
    ) -> Result<&LanguageCommon> {
        let language_name = language_hint
            .or_else(|| self.detect_language_from_path(file_path))
            .ok_or_else(|| {
                anyhow!("Unable to detect language from file path and no language hint provided")
            })?;
        self.get_language(language_name)
            .ok_or_else(|| anyhow!("Unsupported language {language_name}"))
    }

    pub fn detect_language_from_path(&self, file_path: &str) -> Option<&'static str> {
        let extension = Path::new(file_path).extension()?.to_str()?;
        self.extensions.get(extension).copied()
    }
}
