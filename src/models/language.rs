/// Language of a category, derived from its file type tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Language {
    Rust,
    JavaScript,
    TypeScript,
    Python,
    Go,
    Java,
    C,
    Cpp,
    Ruby,
    Bash,
    Sql,
    Markdown,
    Other(String),
}

impl Language {
    pub fn from_filetype(filetype: &str) -> Self {
        match filetype.trim_start_matches('.').to_lowercase().as_str() {
            "rs" => Language::Rust,
            "js" | "mjs" => Language::JavaScript,
            "ts" => Language::TypeScript,
            "py" => Language::Python,
            "go" => Language::Go,
            "java" => Language::Java,
            "c" | "h" => Language::C,
            "cpp" | "cc" | "cxx" => Language::Cpp,
            "rb" => Language::Ruby,
            "sh" | "bash" => Language::Bash,
            "sql" => Language::Sql,
            "md" => Language::Markdown,
            other => Language::Other(other.to_string()),
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Language::Rust => "Rust",
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Python => "Python",
            Language::Go => "Go",
            Language::Java => "Java",
            Language::C => "C",
            Language::Cpp => "C++",
            Language::Ruby => "Ruby",
            Language::Bash => "Bash",
            Language::Sql => "SQL",
            Language::Markdown => "Markdown",
            Language::Other(name) => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_and_unknown_filetypes() {
        assert_eq!(Language::from_filetype("go"), Language::Go);
        assert_eq!(Language::from_filetype(".RS"), Language::Rust);
        assert_eq!(Language::from_filetype("cc").display_name(), "C++");
        assert_eq!(Language::from_filetype("zig").display_name(), "zig");
    }
}
