use modweave::parsers::python::PythonParser;
use modweave::parsers::{LanguageParser, ParserFactory};

#[test]
fn python_parser_extracts_imports_classes_functions() {
    let code = r#"
import os
import numpy as np
import sys, json
from pathlib import Path
from .core import Engine

class A(Base):
    """Doc for A"""
    def m(self, x):
        return helper(x)

def helper(v):
    return v
"#;

    let parser = PythonParser::new().unwrap();
    let result = parser.parse_source(code);

    let imports: Vec<_> = result.imports.iter().map(String::as_str).collect();
    assert_eq!(imports, vec![".core", "numpy as np", "os", "pathlib", "sys"]);
    assert!(result.declared_types.contains("A"));
    assert_eq!(result.declared_types.len(), 1);
    assert!(result.declared_callables.contains("m"));
    assert!(result.declared_callables.contains("helper"));
}

#[test]
fn indented_imports_are_not_collected() {
    let parser = PythonParser::new().unwrap();
    let result = parser.parse_source("def f():\n    import json\n    return json\n");
    assert!(result.imports.is_empty());
}

#[test]
fn definitions_are_matched_anywhere_in_the_text() {
    let code = "# the class Ghost lives in a comment\ntext = \"def phantom\"\nclass Real: pass\nclass Real: pass\n";

    let parser = PythonParser::new().unwrap();
    let result = parser.parse_source(code);

    let types: Vec<_> = result.declared_types.iter().map(String::as_str).collect();
    assert_eq!(types, vec!["Ghost", "Real"]);
    assert!(result.declared_callables.contains("phantom"));
}

#[test]
fn empty_source_yields_no_facts() {
    let parser = PythonParser::new().unwrap();
    let result = parser.parse_source("");
    assert!(result.imports.is_empty());
    assert!(result.declared_types.is_empty());
    assert!(result.declared_callables.is_empty());
}

#[test]
fn import_target_classifies_single_lines() {
    let parser = PythonParser::new().unwrap();
    assert_eq!(parser.import_target("from .b import Base"), Some(".b".to_string()));
    assert_eq!(parser.import_target("from . import b"), Some(".".to_string()));
    assert_eq!(parser.import_target("import pkg.b"), Some("pkg.b".to_string()));
    assert_eq!(parser.import_target("import os  # comment"), Some("os".to_string()));
    assert_eq!(parser.import_target("importlib = None"), None);
    assert_eq!(parser.import_target("x = 1"), None);
}

#[test]
fn factory_rejects_unknown_languages() {
    let factory = ParserFactory::new();
    assert!(factory.get_parser("python").is_ok());
    assert!(matches!(
        factory.get_parser("cobol"),
        Err(modweave::Error::UnsupportedLanguage(lang)) if lang == "cobol"
    ));
}
