// src/structure.rs
//! Shallow class/method classification of one file section.
//!
//! Two line classifiers, no nesting: a class boundary always closes the open
//! class, a method boundary only counts inside a class. Nested classes,
//! classes inside functions and free functions are not attributed; free
//! functions land in `other`.

use crate::config::StructureConfig;
use crate::error::Result;
use crate::types::{ClassRecord, FileStructure, MethodRecord};
use regex::Regex;

#[derive(Debug, Clone)]
pub struct StructureExtractor {
    class_re: Regex,
    method_re: Regex,
}

enum Scope {
    NoClass,
    InClass(ClassRecord),
    InMethod(ClassRecord, MethodRecord),
}

impl StructureExtractor {
    /// # Errors
    /// Returns error if the configured keywords or glyphs do not compile.
    pub fn new(config: &StructureConfig) -> Result<Self> {
        let lead = format!(r"^[\s{}]*", regex::escape(&config.indent_glyphs));
        let class_kw = regex::escape(&config.class_keyword);
        let method_kw = regex::escape(&config.method_keyword);

        Ok(Self {
            class_re: Regex::new(&format!(r"{lead}{class_kw}\s+(\w+)\s*[:(]"))?,
            method_re: Regex::new(&format!(r"{lead}{method_kw}\s+(\w+)\s*\("))?,
        })
    }

    /// Returns the class name if `line` opens a class.
    #[must_use]
    pub fn class_boundary<'a>(&self, line: &'a str) -> Option<&'a str> {
        capture_name(&self.class_re, line)
    }

    /// Returns the method name if `line` opens a method (scope is not checked here).
    #[must_use]
    pub fn method_boundary<'a>(&self, line: &'a str) -> Option<&'a str> {
        capture_name(&self.method_re, line)
    }

    /// Classifies every line of `content` into classes, methods and leftovers.
    #[must_use]
    pub fn extract(&self, content: &str) -> FileStructure {
        let mut classes = Vec::new();
        let mut other: Vec<&str> = Vec::new();
        let mut scope = Scope::NoClass;

        for line in content.lines() {
            scope = if let Some(name) = self.class_boundary(line) {
                if let Some(finished) = close_class(scope) {
                    classes.push(finished);
                }
                Scope::InClass(ClassRecord {
                    name: name.to_string(),
                    class_body: format!("{line}\n"),
                    methods: Vec::new(),
                })
            } else {
                self.advance(scope, line, &mut other)
            };
        }

        if let Some(finished) = close_class(scope) {
            classes.push(finished);
        }

        FileStructure {
            classes,
            other: other.join("\n").trim().to_string(),
        }
    }

    fn advance<'a>(&self, scope: Scope, line: &'a str, other: &mut Vec<&'a str>) -> Scope {
        match scope {
            Scope::NoClass => {
                other.push(line);
                Scope::NoClass
            }
            Scope::InClass(mut class) => match self.method_boundary(line) {
                Some(name) => Scope::InMethod(class, open_method(name, line)),
                None => {
                    push_line(&mut class.class_body, line);
                    Scope::InClass(class)
                }
            },
            Scope::InMethod(mut class, mut method) => match self.method_boundary(line) {
                Some(name) => {
                    class.methods.push(method);
                    Scope::InMethod(class, open_method(name, line))
                }
                None => {
                    push_line(&mut method.code, line);
                    Scope::InMethod(class, method)
                }
            },
        }
    }
}

fn capture_name<'a>(re: &Regex, line: &'a str) -> Option<&'a str> {
    re.captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn open_method(name: &str, line: &str) -> MethodRecord {
    MethodRecord {
        name: name.to_string(),
        code: format!("{line}\n"),
    }
}

fn close_class(scope: Scope) -> Option<ClassRecord> {
    match scope {
        Scope::NoClass => None,
        Scope::InClass(class) => Some(class),
        Scope::InMethod(mut class, method) => {
            class.methods.push(method);
            Some(class)
        }
    }
}

fn push_line(buf: &mut String, line: &str) {
    buf.push_str(line);
    buf.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> StructureExtractor {
        StructureExtractor::new(&StructureConfig::default()).unwrap()
    }

    #[test]
    fn test_boundaries() {
        let x = extractor();
        assert_eq!(x.class_boundary("class Foo:"), Some("Foo"));
        assert_eq!(x.class_boundary("│class Foo(Base):"), Some("Foo"));
        assert_eq!(x.class_boundary("  │  class Foo :"), Some("Foo"));
        assert_eq!(x.class_boundary("classy = 1"), None);
        assert_eq!(x.class_boundary("class Foo"), None);
        assert_eq!(x.method_boundary("│    def bar(self):"), Some("bar"));
        assert_eq!(x.method_boundary("    def bar :"), None);
        assert_eq!(x.method_boundary("# def bar():"), None);
    }

    #[test]
    fn test_no_classes_goes_to_other() {
        let s = extractor().extract("import os\n\ndef free():\n    pass\n");
        assert!(s.classes.is_empty());
        assert_eq!(s.other, "import os\n\ndef free():\n    pass");
    }

    #[test]
    fn test_class_with_method() {
        let s = extractor().extract("class Foo:\n    def bar(self):\n        return 1");
        assert_eq!(
            s.classes,
            vec![ClassRecord {
                name: "Foo".into(),
                class_body: "class Foo:\n".into(),
                methods: vec![MethodRecord {
                    name: "bar".into(),
                    code: "    def bar(self):\n        return 1\n".into(),
                }],
            }]
        );
        assert!(s.other.is_empty());
    }

    #[test]
    fn test_class_body_before_first_method() {
        let s = extractor().extract(
            "class Foo:\n    x = 1\n    def a(self):\n        pass\n    def b(self):\n        pass",
        );
        let class = &s.classes[0];
        assert_eq!(class.class_body, "class Foo:\n    x = 1\n");
        assert_eq!(class.methods.len(), 2);
        assert_eq!(class.methods[1].code, "    def b(self):\n        pass\n");
    }

    #[test]
    fn test_lines_before_first_class_are_other() {
        let s = extractor()
            .extract("import os\nclass A:\n    pass\nclass B(A):\n    def m(self):\n        pass");
        assert_eq!(s.other, "import os");
        assert_eq!(s.classes.len(), 2);
        assert_eq!(s.classes[0].class_body, "class A:\n    pass\n");
        assert_eq!(s.classes[1].methods[0].name, "m");
    }

    #[test]
    fn test_trailing_module_code_stays_in_last_method() {
        let s = extractor().extract(
            "class A:\n    def m(self):\n        pass\n\nif __name__ == '__main__':\n    main()",
        );
        assert!(s.other.is_empty());
        assert!(s.classes[0].methods[0].code.ends_with("    main()\n"));
    }

    #[test]
    fn test_class_nested_in_method_becomes_top_level() {
        let s = extractor()
            .extract("class A:\n    def m(self):\n        class Inner:\n            pass");
        let shape: Vec<_> = s
            .classes
            .iter()
            .map(|c| (c.name.as_str(), c.methods.len()))
            .collect();
        assert_eq!(shape, vec![("A", 1), ("Inner", 0)]);
        assert_eq!(s.classes[0].methods[0].code, "    def m(self):\n");
        assert_eq!(s.classes[1].class_body, "        class Inner:\n            pass\n");
    }

    #[test]
    fn test_class_inside_free_function() {
        let s = extractor().extract("def f():\n    class Local:\n        pass");
        assert_eq!(s.other, "def f():");
        assert_eq!(s.classes.len(), 1);
        assert_eq!(s.classes[0].name, "Local");
    }

    #[test]
    fn test_module_level_def_after_class_is_a_method() {
        let s = extractor().extract("class A:\n    x = 1\n\ndef free():\n    return 2");
        assert_eq!(s.classes[0].class_body, "class A:\n    x = 1\n\n");
        assert_eq!(
            s.classes[0].methods,
            vec![MethodRecord {
                name: "free".into(),
                code: "def free():\n    return 2\n".into(),
            }]
        );
        assert!(s.other.is_empty());
    }

    #[test]
    fn test_custom_keywords() -> Result<()> {
        let config = StructureConfig {
            class_keyword: "struct".into(),
            method_keyword: "fn".into(),
            indent_glyphs: "│⋮".into(),
        };
        let x = StructureExtractor::new(&config)?;
        let s = x.extract("⋮struct Foo:\n│fn go(self)");
        assert_eq!(s.classes[0].name, "Foo");
        assert_eq!(s.classes[0].methods[0].name, "go");
        Ok(())
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(extractor().extract(""), FileStructure::default());
    }
}
