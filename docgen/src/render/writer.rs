//! Namespace page writer

use super::error::RenderError;
use super::html;
use crate::config::compile_time::rendering::MAX_NAMESPACE_PAGES;
use crate::config::constants::{GENERIC_LETTERS, GENERIC_PLACEHOLDER, PAGE_EXTENSION};
use crate::config::runtime::RenderPreferences;
use crate::documentation::{DocumentSet, DocumentedMember};
use crate::identifier::{MemberKind, Parameter};
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Rendered pages keyed by file name, in namespace order
pub type PageMap = BTreeMap<String, String>;

#[derive(Debug, Clone)]
pub struct HtmlWriter {
    preferences: RenderPreferences,
}

impl HtmlWriter {
    pub fn new(preferences: RenderPreferences) -> Self {
        Self { preferences }
    }

    pub fn preferences(&self) -> &RenderPreferences {
        &self.preferences
    }

    /// Render one page per namespace without touching the file system
    pub fn render_pages(&self, set: &DocumentSet) -> Result<PageMap, RenderError> {
        let groups = set.group_by_namespace();

        if groups.len() > MAX_NAMESPACE_PAGES {
            return Err(RenderError::TooManyPages {
                count: groups.len(),
                limit: MAX_NAMESPACE_PAGES,
            });
        }

        let namespaces: Vec<&str> = groups.keys().copied().collect();
        let mut pages = PageMap::new();

        for (namespace, members) in &groups {
            let page = self.render_page(namespace, &namespaces, members);
            pages.insert(page_file_name(namespace), page);
        }

        Ok(pages)
    }

    /// Write rendered pages into the output directory
    pub fn write_pages(&self, pages: &PageMap) -> Result<Vec<PathBuf>, RenderError> {
        let output_dir = &self.preferences.output_dir;

        fs::create_dir_all(output_dir).map_err(|e| {
            let error = RenderError::OutputDirectory {
                path: output_dir.clone(),
                message: e.to_string(),
            };
            log_error!(error.error_code(), "Cannot create output directory",
                "path" => output_dir.display(),
                "error" => &e
            );
            error
        })?;

        let mut written = Vec::with_capacity(pages.len());

        for (file_name, content) in pages {
            let path = output_dir.join(file_name);
            fs::write(&path, content).map_err(|e| {
                let error = RenderError::PageWrite {
                    path: path.clone(),
                    message: e.to_string(),
                };
                log_error!(error.error_code(), "Cannot write page",
                    "path" => path.display(),
                    "error" => &e
                );
                error
            })?;

            log_debug!("Page written", "path" => path.display(), "bytes" => content.len());
            written.push(path);
        }

        log_success!(codes::success::RENDERING_COMPLETE, "Pages written",
            "pages" => written.len(),
            "output_dir" => output_dir.display()
        );

        Ok(written)
    }

    /// Render and write in one step
    pub fn render(&self, set: &DocumentSet) -> Result<Vec<PathBuf>, RenderError> {
        let pages = self.render_pages(set)?;
        self.write_pages(&pages)
    }

    fn render_page(&self, namespace: &str, namespaces: &[&str], members: &[&DocumentedMember]) -> String {
        let mut out = String::new();

        html::page_start(
            &mut out,
            namespace,
            &self.preferences.site_title,
            &self.preferences.stylesheet,
        );

        for nav in namespaces {
            html::nav_entry(&mut out, nav, &page_file_name(nav));
        }

        html::content_start(&mut out);

        for member in members {
            self.render_member(&mut out, member);
        }

        html::page_end(&mut out);
        out
    }

    fn render_member(&self, out: &mut String, member: &DocumentedMember) {
        let record = &member.record;
        let decorations = self.decorations(member);
        let decorations = decorations.as_deref();

        if member.is_class_heading() {
            html::class_heading(out, &record.class_name, &member.summary, decorations);
            return;
        }

        if record.parameters.is_empty() {
            if record.kind == MemberKind::Member {
                let title = match &record.implicit_conversion {
                    Some(conversion) => conversion.to_string(),
                    None => record.member_name.clone(),
                };
                html::function_heading(out, &title, "", decorations);
                keyword_blocks(out, member);
            } else {
                html::summary_title(out, &record.member_name, decorations);
                html::paragraph(out, &member.summary);
                if !member.remarks.is_empty() {
                    html::paragraph(out, &member.remarks);
                }
            }
            return;
        }

        html::function_heading(out, &record.member_name, &format_signature(&record.parameters), decorations);

        if !member.summary.is_empty() {
            html::keyword_block(out, "Summary:", &member.summary);
        }
        if !member.remarks.is_empty() {
            html::keyword_block(out, "Remarks:", &member.remarks);
        }

        let described: Vec<&Parameter> = record
            .parameters
            .iter()
            .filter(|p| !p.description.is_empty())
            .collect();
        if !described.is_empty() {
            html::keyword(out, "Params:");
            for parameter in described {
                html::param_entry(out, &parameter.name, &parameter.description);
            }
        }

        if !member.returns.is_empty() {
            html::keyword_block(out, "Returns:", &member.returns);
        }
    }

    fn decorations(&self, member: &DocumentedMember) -> Option<String> {
        if !self.preferences.include_decorations || member.decorations.is_empty() {
            return None;
        }
        Some(member.decorations.join(" "))
    }
}

impl Default for HtmlWriter {
    fn default() -> Self {
        Self::new(RenderPreferences::default())
    }
}

/// Summary, remarks and returns blocks of a member without parameters
fn keyword_blocks(out: &mut String, member: &DocumentedMember) {
    if !member.summary.is_empty() {
        html::keyword_block(out, "Summary:", &member.summary);
    }
    if !member.remarks.is_empty() {
        html::keyword_block(out, "Remarks:", &member.remarks);
    }
    if !member.returns.is_empty() {
        html::keyword_block(out, "Returns:", &member.returns);
    }
}

/// `T a, Y b` parameter list of a signature
///
/// Each standalone `T` takes the next letter of the generic sequence so
/// distinct type parameters read differently; `TT` collapses to `T`.
pub fn format_signature(parameters: &[Parameter]) -> String {
    let mut letters = GENERIC_LETTERS.chars();

    parameters
        .iter()
        .map(|parameter| {
            let type_token = if parameter.type_token == GENERIC_PLACEHOLDER {
                letters
                    .next()
                    .map(String::from)
                    .unwrap_or_else(|| GENERIC_PLACEHOLDER.to_string())
            } else if parameter.type_token == "TT" {
                GENERIC_PLACEHOLDER.to_string()
            } else {
                parameter.type_token.clone()
            };

            [type_token.as_str(), parameter.name.as_str()]
                .iter()
                .filter(|part| !part.is_empty())
                .copied()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// File name of a namespace page; path separators cannot escape the output directory
pub fn page_file_name(namespace: &str) -> String {
    let stem: String = namespace
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect();

    let stem = if stem.is_empty() || stem.chars().all(|c| c == '.') {
        "_".to_string()
    } else {
        stem
    };

    format!("{}.{}", stem, PAGE_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documentation::assemble;
    use crate::extraction::{DocEntry, ParamDoc};
    use crate::identifier::IdentifierDecoder;
    use crate::utils::Position;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    fn entry(identifier: &str, summary: &str) -> DocEntry {
        DocEntry {
            identifier: identifier.to_string(),
            summary: summary.to_string(),
            position: Position::start(),
            ..Default::default()
        }
    }

    fn preferences(output_dir: PathBuf) -> RenderPreferences {
        RenderPreferences {
            site_title: "MW Unity Namespace".to_string(),
            stylesheet: "CSS/MWUnityNamespace.css".to_string(),
            output_dir,
            include_decorations: true,
        }
    }

    fn sample_set() -> DocumentSet {
        let mut scale = entry("M:MW.Shapes.Circle.Scale(System.Single,System.Single@)", "Scales.");
        scale.parameters = vec![
            ParamDoc::new("x", "Horizontal factor."),
            ParamDoc::new("y", ""),
        ];
        scale.returns = "Nothing.".to_string();

        let mut circle = entry("T:MW.Shapes.Circle", "A circle.");
        circle.decorations = vec!["[Serializable]".to_string()];

        let mut radius = entry("F:MW.Shapes.Circle.Radius", "The radius.");
        radius.remarks = "Always positive.".to_string();

        assemble(
            vec![
                circle,
                scale,
                radius,
                entry("M:MW.Vector2.op_Implicit(MW.Vector2)~MW.Vector3", "Widens."),
                entry("M:MW.Time.Reset", "Resets the clock."),
            ],
            &IdentifierDecoder::standard(),
        )
    }

    #[test]
    fn test_one_page_per_namespace_with_sorted_nav() {
        let writer = HtmlWriter::new(preferences(PathBuf::from("unused")));
        let pages = writer.render_pages(&sample_set()).unwrap();

        let names: Vec<&str> = pages.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Shapes.html", "Time.html", "Vector2.html"]);

        for page in pages.values() {
            let shapes = page.find("<a href=\"Shapes.html\">").unwrap();
            let time = page.find("<a href=\"Time.html\">").unwrap();
            let vector = page.find("<a href=\"Vector2.html\">").unwrap();
            assert!(shapes < time && time < vector);
        }

        assert!(pages["Time.html"].contains("<title>Time | MW Unity Namespace</title>"));
    }

    #[test]
    fn test_members_render_in_document_order() {
        let writer = HtmlWriter::new(preferences(PathBuf::from("unused")));
        let pages = writer.render_pages(&sample_set()).unwrap();
        let shapes = &pages["Shapes.html"];

        let class = shapes.find(">Circle</h1>").unwrap();
        let scale = shapes.find(">Scale (float x, float& y)</h1>").unwrap();
        let radius = shapes.find(">Radius</p>").unwrap();
        assert!(class < scale && scale < radius);
    }

    #[test]
    fn test_member_blocks() {
        let writer = HtmlWriter::new(preferences(PathBuf::from("unused")));
        let pages = writer.render_pages(&sample_set()).unwrap();
        let shapes = &pages["Shapes.html"];

        assert!(shapes.contains("[Serializable]</pre>"));
        assert!(shapes.contains("<p class=\"keyword\">Summary:</p>\n<p class=\"simplePara\">Scales.</p>"));
        assert!(shapes.contains("<p class=\"keyword\">Params:</p>"));
        assert!(shapes.contains(">x: </p>"));
        assert!(!shapes.contains(">y: </p>"));
        assert!(shapes.contains("<p class=\"keyword\">Returns:</p>\n<p class=\"simplePara\">Nothing.</p>"));
        assert!(shapes.contains("<p class=\"simplePara\">Always positive.</p>"));

        let vector = &pages["Vector2.html"];
        assert!(vector.contains(">Vector2 -> Vector3 ()</h1>"));

        let time = &pages["Time.html"];
        assert!(time.contains(">Reset ()</h1>"));
    }

    #[test]
    fn test_documented_conversion_keeps_conversion_heading() {
        let mut widen = entry("M:MW.Vector2.op_Implicit(MW.Vector2)~MW.Vector3", "Widens.");
        widen.parameters = vec![ParamDoc::new("v", "The vector.")];
        let set = assemble(vec![widen], &IdentifierDecoder::standard());

        let writer = HtmlWriter::new(preferences(PathBuf::from("unused")));
        let pages = writer.render_pages(&set).unwrap();
        let vector = &pages["Vector2.html"];

        assert!(vector.contains(">Vector2 -> Vector3 ()</h1>"));
        assert!(!vector.contains("implicit operator"));
        assert!(!vector.contains("Params:"));
    }

    #[test]
    fn test_decorations_can_be_disabled() {
        let mut prefs = preferences(PathBuf::from("unused"));
        prefs.include_decorations = false;

        let pages = HtmlWriter::new(prefs).render_pages(&sample_set()).unwrap();
        assert!(!pages["Shapes.html"].contains("[Serializable]"));
    }

    #[test]
    fn test_generic_letter_substitution() {
        let params = vec![
            Parameter { type_token: "T".to_string(), name: "a".to_string(), description: String::new() },
            Parameter { type_token: "T".to_string(), name: "b".to_string(), description: String::new() },
            Parameter { type_token: "TT".to_string(), name: "c".to_string(), description: String::new() },
            Parameter::typed("int"),
            Parameter { type_token: String::new(), name: "extra".to_string(), description: String::new() },
        ];

        assert_eq!(format_signature(&params), "T a, Y b, T c, int, extra");
    }

    #[test]
    fn test_generic_letters_run_out() {
        let params = vec![Parameter::typed("T"); GENERIC_LETTERS.len() + 1];
        let signature = format_signature(&params);
        assert!(signature.ends_with("R, T"));
    }

    #[test]
    fn test_page_file_name() {
        assert_eq!(page_file_name("Kinetic.Collision"), "Kinetic.Collision.html");
        assert_eq!(page_file_name("a/b"), "a_b.html");
        assert_eq!(page_file_name(""), "_.html");
        assert_eq!(page_file_name(".."), "_.html");
    }

    #[test]
    fn test_write_pages() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("html");
        let writer = HtmlWriter::new(preferences(output.clone()));

        let written = writer.render(&sample_set()).unwrap();
        assert_eq!(written.len(), 3);
        assert!(output.join("Shapes.html").is_file());

        let content = std::fs::read_to_string(output.join("Time.html")).unwrap();
        assert!(content.contains("Resets the clock."));
    }

    #[test]
    fn test_write_pages_reports_directory_failure() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();

        let writer = HtmlWriter::new(preferences(blocker.join("html")));
        let result = writer.write_pages(&PageMap::new());
        assert_matches!(result, Err(RenderError::OutputDirectory { .. }));
    }
}
