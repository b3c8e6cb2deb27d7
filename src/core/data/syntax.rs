use std::path::Path;

/// Source syntax of a file, inferred from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Syntax {
    /// Vue single-file component.
    Vue,
    /// JavaScript or TypeScript, with or without JSX.
    Script(ScriptDialect),
    /// Blade-like server templates (`{{ }}` echo, `@directives`).
    Blade,
    /// Plain HTML and mustache-style templates.
    Html,
}

/// Dialect passed to the script parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptDialect {
    /// TypeScript without JSX (`.ts`). Allows `<T>expr` assertions.
    Ts,
    /// TypeScript with JSX; also used for plain JavaScript.
    Tsx,
}

impl Syntax {
    /// Infer the syntax from a file path. Returns `None` for unsupported files.
    pub fn from_path(path: &Path) -> Option<Syntax> {
        let file_name = path.file_name()?.to_str()?.to_ascii_lowercase();
        if file_name.ends_with(".blade.php") {
            return Some(Syntax::Blade);
        }
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        Self::from_extension(&extension)
    }

    pub fn from_extension(extension: &str) -> Option<Syntax> {
        match extension {
            "vue" => Some(Syntax::Vue),
            "ts" | "mts" | "cts" => Some(Syntax::Script(ScriptDialect::Ts)),
            "tsx" | "jsx" | "js" | "mjs" | "cjs" => Some(Syntax::Script(ScriptDialect::Tsx)),
            "html" | "htm" | "hbs" | "handlebars" | "njk" | "twig" => Some(Syntax::Html),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Syntax::Vue => "vue",
            Syntax::Script(ScriptDialect::Ts) => "ts",
            Syntax::Script(ScriptDialect::Tsx) => "tsx",
            Syntax::Blade => "blade",
            Syntax::Html => "html",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_path() {
        assert_eq!(Syntax::from_path(Path::new("src/App.vue")), Some(Syntax::Vue));
        assert_eq!(
            Syntax::from_path(Path::new("src/page.tsx")),
            Some(Syntax::Script(ScriptDialect::Tsx))
        );
        assert_eq!(
            Syntax::from_path(Path::new("src/api.ts")),
            Some(Syntax::Script(ScriptDialect::Ts))
        );
        assert_eq!(
            Syntax::from_path(Path::new("resources/views/home.blade.php")),
            Some(Syntax::Blade)
        );
        assert_eq!(Syntax::from_path(Path::new("index.HTML")), Some(Syntax::Html));
        assert_eq!(Syntax::from_path(Path::new("style.css")), None);
        assert_eq!(Syntax::from_path(Path::new("server.php")), None);
        assert_eq!(Syntax::from_path(Path::new("Makefile")), None);
    }
}
