//! Combined shader files.
//!
//! One file holds both stages. A line `#shader vertex` or `#shader fragment`
//! starts a section that runs until the next marker:
//!
//! ```text
//! #shader vertex
//! @vertex fn vs_main(..) -> .. { .. }
//!
//! #shader fragment
//! @fragment fn fs_main(..) -> .. { .. }
//! ```

use anyhow::{Context as _, bail};

const MARKER: &str = "#shader";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShaderProgramSource {
    pub vertex: String,
    pub fragment: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Stage {
    Vertex,
    Fragment,
}

/// Split a combined shader file into its stages.
///
/// Blank lines and `//` comments may precede the first marker; anything else
/// there is an error, as are unknown or repeated stages and missing ones.
pub fn parse_shader(source: &str) -> anyhow::Result<ShaderProgramSource> {
    let mut vertex: Option<String> = None;
    let mut fragment: Option<String> = None;
    let mut current: Option<Stage> = None;

    for (index, line) in source.lines().enumerate() {
        let number = index + 1;
        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix(MARKER) {
            let stage = match rest.trim() {
                "vertex" => Stage::Vertex,
                "fragment" => Stage::Fragment,
                other => bail!("line {number}: unknown shader stage '{other}'"),
            };
            let section = match stage {
                Stage::Vertex => &mut vertex,
                Stage::Fragment => &mut fragment,
            };
            if section.is_some() {
                bail!("line {number}: {stage:?} section declared twice");
            }
            *section = Some(String::new());
            current = Some(stage);
            continue;
        }

        let section = match current {
            Some(Stage::Vertex) => vertex.as_mut(),
            Some(Stage::Fragment) => fragment.as_mut(),
            None => {
                if !(trimmed.is_empty() || trimmed.starts_with("//")) {
                    bail!("line {number}: code before the first '{MARKER}' marker");
                }
                continue;
            }
        };
        if let Some(section) = section {
            section.push_str(line);
            section.push('\n');
        }
    }

    Ok(ShaderProgramSource {
        vertex: vertex.context("shader has no vertex section")?,
        fragment: fragment.context("shader has no fragment section")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_stages_in_order() {
        let source = "\
// header comment

#shader vertex
fn vs_main() {}
#shader fragment
fn fs_main() {}
";
        let parsed = parse_shader(source).unwrap();
        assert_eq!(parsed.vertex, "fn vs_main() {}\n");
        assert_eq!(parsed.fragment, "fn fs_main() {}\n");
    }

    #[test]
    fn fragment_may_come_first() {
        let parsed = parse_shader("#shader fragment\nb\n#shader vertex\na\n").unwrap();
        assert_eq!(parsed.vertex, "a\n");
        assert_eq!(parsed.fragment, "b\n");
    }

    #[test]
    fn markers_tolerate_indentation() {
        let parsed = parse_shader("  #shader   vertex  \na\n\t#shader fragment\nb").unwrap();
        assert_eq!(parsed.vertex, "a\n");
        assert_eq!(parsed.fragment, "b\n");
    }

    #[test]
    fn rejects_malformed_files() {
        assert!(parse_shader("#shader vertex\na\n").is_err());
        assert!(parse_shader("#shader fragment\nb\n").is_err());
        assert!(parse_shader("#shader geometry\nx\n").is_err());
        assert!(parse_shader("#shader vertex\na\n#shader vertex\nb\n#shader fragment\nc\n").is_err());
        assert!(parse_shader("fn stray() {}\n#shader vertex\na\n#shader fragment\nb\n").is_err());
    }
}
