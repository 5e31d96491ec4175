use crate::cli::BodyArgs;
use crate::models::fs::list_dirs;
use crate::models::metadata::is_valid_name;
use crate::models::{Artifact, Language, Metadata};
use anyhow::{Context, Result, bail};
use colored::Colorize;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

fn bar() -> colored::ColoredString {
    "┃".bright_magenta()
}

/// Opens a category that must already exist; read-only commands should not
/// create directories as a side effect.
fn open_existing(root: &Path, category: &str) -> Result<Metadata> {
    let path = root.join(category);
    if !path.is_dir() {
        bail!("No category named '{}' in {}", category, root.display());
    }
    Ok(Metadata::load(&path, category)?)
}

/// Opens a category, creating it when missing
fn open_or_create(root: &Path, category: &str) -> Result<Metadata> {
    Ok(Metadata::load(root.join(category), category)?)
}

fn require_snippet(metadata: &Metadata, category: &str, name: &str) -> Result<()> {
    if metadata.get_snippet(name).is_none() {
        bail!("No snippet named '{}' in category '{}'", name, category);
    }
    Ok(())
}

pub fn list(root: &Path, category: Option<&str>) -> Result<()> {
    let Some(category) = category else {
        let categories = list_dirs(root)
            .with_context(|| format!("Failed to list categories in {}", root.display()))?;
        if categories.is_empty() {
            println!("{}  No categories in {}", bar(), root.display());
        }
        for name in categories {
            println!("{}  {}", bar(), name.bold());
        }
        return Ok(());
    };

    let metadata = open_existing(root, category)?;
    println!(
        "{}  {} {}",
        bar(),
        category.bold(),
        format!("({})", Language::from_filetype(metadata.filetype()).display_name()).dimmed()
    );
    if metadata.is_empty() {
        println!("{}  No snippets yet", bar());
    }
    for snippet in metadata.snippets() {
        let tags = snippet
            .tags()
            .iter()
            .map(|tag| format!("#{}", tag))
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "{}  {}  {}  {}",
            bar(),
            snippet.name().bright_white(),
            snippet.creation_date().yellow(),
            tags.cyan()
        );
        if !snippet.description().is_empty() {
            println!("{}    {}", bar(), snippet.description().dimmed());
        }
    }
    Ok(())
}

pub fn show(root: &Path, category: &str, name: &str) -> Result<()> {
    let metadata = open_existing(root, category)?;
    let Some(snippet) = metadata.get_snippet(name) else {
        bail!("No snippet named '{}' in category '{}'", name, category);
    };

    println!("{}  {} {}", bar(), snippet.name().bold(), snippet.creation_date().yellow());
    if !snippet.description().is_empty() {
        println!("{}  {}", bar(), snippet.description());
    }
    if !snippet.tags().is_empty() {
        println!("{}  {}", bar(), snippet.tags().join(", ").cyan());
    }
    println!("{}  {}", bar(), format!("uses: {}", snippet.usage_count()).dimmed());

    for kind in Artifact::ALL {
        let body = metadata.artifact(name, kind)?.unwrap_or_default();
        println!("{}", "─".repeat(60).bright_magenta());
        println!(
            "{}  {} {}",
            bar(),
            kind.label().bold(),
            kind.file_name(metadata.filetype()).dimmed()
        );
        if body.is_empty() {
            println!("{}  {}", bar(), "(empty)".dimmed());
        } else {
            println!("{}", body);
        }
    }
    Ok(())
}

pub fn add(root: &Path, category: &str, name: &str, description: &str) -> Result<()> {
    if !is_valid_name(name) {
        bail!("'{}' cannot be used as a snippet name; it must not contain path separators", name);
    }
    let mut metadata = open_or_create(root, category)?;
    if metadata.get_snippet(name).is_some() {
        println!(
            "{}  {} a snippet named '{}' already exists; adding another",
            bar(),
            "warning:".yellow(),
            name
        );
    }
    metadata.add_snippet(name, description);
    metadata.save()?;
    println!("{}  Added {} to {}", bar(), name.bright_white(), category.bold());
    Ok(())
}

pub fn remove(root: &Path, category: &str, name: &str) -> Result<()> {
    let mut metadata = open_existing(root, category)?;
    require_snippet(&metadata, category, name)?;
    metadata.remove_snippet(name);
    metadata.save()?;
    println!("{}  Removed {} from {}", bar(), name.bright_white(), category.bold());
    Ok(())
}

pub fn tag(root: &Path, category: &str, name: &str, tag: &str) -> Result<()> {
    let mut metadata = open_existing(root, category)?;
    require_snippet(&metadata, category, name)?;
    metadata.add_tag(name, tag)?;
    println!("{}  Tagged {} with {}", bar(), name.bright_white(), format!("#{}", tag).cyan());
    Ok(())
}

pub fn untag(root: &Path, category: &str, name: &str, tag: &str) -> Result<()> {
    let mut metadata = open_existing(root, category)?;
    require_snippet(&metadata, category, name)?;
    metadata.remove_tag(name, tag)?;
    println!("{}  Removed {} from {}", bar(), format!("#{}", tag).cyan(), name.bright_white());
    Ok(())
}

pub fn set_tags(root: &Path, category: &str, name: &str, tags: Vec<String>) -> Result<()> {
    let mut metadata = open_existing(root, category)?;
    require_snippet(&metadata, category, name)?;
    metadata.set_tags(name, tags)?;
    println!("{}  Updated tags of {}", bar(), name.bright_white());
    Ok(())
}

pub fn set_body(root: &Path, kind: Artifact, args: BodyArgs) -> Result<()> {
    let mut metadata = open_existing(root, &args.category)?;
    require_snippet(&metadata, &args.category, &args.name)?;

    let body = read_body(args.file.as_ref())?;
    match kind {
        Artifact::Code => metadata.set_code(&args.name, &body)?,
        Artifact::Tests => metadata.set_test(&args.name, &body)?,
        Artifact::Notes => metadata.set_notes(&args.name, &body)?,
    }

    println!(
        "{}  Wrote {}",
        bar(),
        metadata.artifact_path(&args.name, kind).display()
    );
    Ok(())
}

fn read_body(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut body = String::new();
            io::stdin()
                .read_to_string(&mut body)
                .context("Failed to read body from stdin")?;
            Ok(body)
        }
    }
}

pub fn new_category(root: &Path, name: &str, filetype: Option<&str>) -> Result<()> {
    let filetype = filetype.unwrap_or(name);
    let metadata = Metadata::load(root.join(name), filetype)?;
    println!(
        "{}  Category {} ready at {} ({})",
        bar(),
        name.bold(),
        metadata.storage_root().display(),
        metadata.filetype()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn add_tag_and_body_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();

        add(root, "go", "demo", "d").unwrap();
        tag(root, "go", "demo", "x").unwrap();
        tag(root, "go", "demo", "y").unwrap();
        untag(root, "go", "demo", "x").unwrap();

        let source = root.join("input.go");
        fs::write(&source, "print(1)").unwrap();
        set_body(
            root,
            Artifact::Code,
            BodyArgs {
                category: "go".to_string(),
                name: "demo".to_string(),
                file: Some(source),
            },
        )
        .unwrap();

        let metadata = Metadata::load(root.join("go"), "go").unwrap();
        assert_eq!(metadata.get_snippet("demo").unwrap().tags(), ["y"]);
        assert_eq!(
            fs::read_to_string(root.join("go").join("demo").join("code.go")).unwrap(),
            "print(1)"
        );
        show(root, "go", "demo").unwrap();
        list(root, Some("go")).unwrap();
    }

    #[test]
    fn read_commands_do_not_create_categories() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(list(tmp.path(), Some("nope")).is_err());
        assert!(show(tmp.path(), "nope", "x").is_err());
        assert!(!tmp.path().join("nope").exists());
    }

    #[test]
    fn mutations_on_missing_snippet_fail_loudly() {
        let tmp = tempfile::tempdir().unwrap();
        new_category(tmp.path(), "rust", Some("rs")).unwrap();

        assert!(tag(tmp.path(), "rust", "ghost", "x").is_err());
        assert!(remove(tmp.path(), "rust", "ghost").is_err());

        let metadata = Metadata::load(tmp.path().join("rust"), "ignored").unwrap();
        assert_eq!(metadata.filetype(), "rs");
    }

    #[test]
    fn add_rejects_path_like_names() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(add(tmp.path(), "go", "../js", "").is_err());
        assert!(add(tmp.path(), "go", "a/b", "").is_err());
        assert!(!tmp.path().join("go").exists());
    }

    #[test]
    fn remove_persists() {
        let tmp = tempfile::tempdir().unwrap();
        add(tmp.path(), "go", "a", "").unwrap();
        add(tmp.path(), "go", "b", "").unwrap();
        remove(tmp.path(), "go", "a").unwrap();

        let metadata = Metadata::load(tmp.path().join("go"), "go").unwrap();
        assert_eq!(metadata.len(), 1);
        assert!(metadata.get_snippet("b").is_some());
    }
}
