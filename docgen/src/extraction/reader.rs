//! Streaming reader for `<doc><members>` documentation exports
//!
//! Walks the `quick-xml` event stream once. Every `<member>` directly under
//! `<members>` becomes one [`DocEntry`]; each child element of a member is a
//! section whose collected text is applied to the entry when it closes.

use super::entry::{DocEntry, ParamDoc};
use super::error::{ExtractionError, ExtractionResult};
use crate::config::compile_time::extraction::{
    MAX_ELEMENT_DEPTH, MAX_IDENTIFIER_LENGTH, MAX_MEMBERS, MAX_TEXT_LENGTH,
};
use crate::normalize::escape_all_braces;
use crate::utils::{Position, SourceMap};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

const MEMBERS_ELEMENT: &str = "members";
const MEMBER_ELEMENT: &str = "member";
const NAME_ATTRIBUTE: &str = "name";

/// A child element of `<member>` whose text is being collected
#[derive(Debug)]
struct Section {
    name: String,
    attribute: Option<String>,
    text: String,
    position: Position,
}

/// The `<member>` currently open
#[derive(Debug)]
struct OpenEntry {
    entry: DocEntry,
    seen_first_section: bool,
}

/// Parser state carried across events
#[derive(Debug, Default)]
struct ReadState {
    /// Local names of the currently open elements
    stack: Vec<String>,
    members_depth: Option<usize>,
    in_members: bool,
    open: Option<OpenEntry>,
    section: Option<Section>,
    entries: Vec<DocEntry>,
}

impl ReadState {
    /// Handle the end of an element at `depth`
    fn close_element(&mut self, depth: usize) -> ExtractionResult<()> {
        let Some(md) = self.members_depth else {
            return Ok(());
        };

        if depth == md + 2 {
            if let (Some(finished), Some(current)) = (self.section.take(), self.open.as_mut()) {
                apply_section(current, finished)?;
            }
        } else if depth == md + 1 {
            if let Some(finished) = self.open.take() {
                self.entries.push(finished.entry);
            }
        } else if depth == md {
            self.in_members = false;
        }

        Ok(())
    }
}

pub struct DocReader<'a> {
    source: &'a str,
    source_map: SourceMap<'a>,
}

impl<'a> DocReader<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            source_map: SourceMap::new(source),
        }
    }

    /// Read every member entry in document order
    pub fn read_entries(&self) -> ExtractionResult<Vec<DocEntry>> {
        let mut reader = Reader::from_str(self.source);
        reader.trim_text(false);

        let mut state = ReadState::default();

        loop {
            let offset = reader.buffer_position();

            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    self.open_element(&mut state, &e, offset, false)?;
                    state.stack.push(local_name(&e));
                }
                Ok(Event::Empty(e)) => {
                    self.open_element(&mut state, &e, offset, true)?;
                    let depth = state.stack.len();
                    state.close_element(depth)?;
                }
                Ok(Event::End(_)) => {
                    state.stack.pop();
                    let depth = state.stack.len();
                    state.close_element(depth)?;
                }
                Ok(Event::Text(t)) => {
                    if let Some(section) = state.section.as_mut() {
                        let text = t.unescape().map_err(|e| {
                            ExtractionError::malformed(self.source_map.position_at(offset), e.to_string())
                        })?;
                        section.text.push_str(&text);
                    }
                }
                Ok(Event::CData(c)) => {
                    if let Some(section) = state.section.as_mut() {
                        section.text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(ExtractionError::malformed(
                        self.source_map.position_at(reader.buffer_position()),
                        e.to_string(),
                    ));
                }
            }
        }

        if let Some(unclosed) = state.stack.last() {
            return Err(ExtractionError::malformed(
                self.source_map.position_at(self.source.len()),
                format!("unexpected end of document, <{}> is not closed", unclosed),
            ));
        }

        if state.members_depth.is_none() {
            return Err(ExtractionError::MissingMembersElement);
        }

        Ok(state.entries)
    }

    /// Handle a start (or empty) tag before it is pushed on the stack
    fn open_element(
        &self,
        state: &mut ReadState,
        e: &BytesStart,
        offset: usize,
        self_closing: bool,
    ) -> ExtractionResult<()> {
        let depth = state.stack.len();
        let position = self.source_map.position_at(self.tag_start(offset));

        if depth >= MAX_ELEMENT_DEPTH {
            return Err(ExtractionError::NestingTooDeep {
                position,
                limit: MAX_ELEMENT_DEPTH,
            });
        }

        let name = local_name(e);

        match state.members_depth {
            None if depth == 1 && name == MEMBERS_ELEMENT => {
                state.members_depth = Some(depth);
                state.in_members = true;
            }
            Some(md) if state.in_members && depth == md + 1 && name == MEMBER_ELEMENT => {
                if state.entries.len() >= MAX_MEMBERS {
                    return Err(ExtractionError::TooManyMembers { limit: MAX_MEMBERS });
                }

                let identifier = self
                    .attribute(e, NAME_ATTRIBUTE, position)?
                    .ok_or(ExtractionError::MissingMemberName { position })?;

                let length = identifier.chars().count();
                if length > MAX_IDENTIFIER_LENGTH {
                    return Err(ExtractionError::IdentifierTooLong {
                        position,
                        length,
                        limit: MAX_IDENTIFIER_LENGTH,
                    });
                }

                state.open = Some(OpenEntry {
                    entry: DocEntry::new(identifier, position),
                    seen_first_section: false,
                });
            }
            Some(md) if state.open.is_some() && depth == md + 2 => {
                state.section = Some(Section {
                    attribute: self.first_attribute(e, position)?,
                    name,
                    text: String::new(),
                    position,
                });
            }
            // Inline elements with content contribute their text instead.
            Some(md) if self_closing && depth > md + 2 => {
                if let Some(section) = state.section.as_mut() {
                    if let Some(inline) = self.inline_text(e, &name, position)? {
                        section.text.push_str(&inline);
                    }
                }
            }
            _ => {}
        }

        Ok(())
    }

    /// The reader may already have consumed the `<` of the next tag when the
    /// preceding event was text.
    fn tag_start(&self, offset: usize) -> usize {
        if self.source.as_bytes().get(offset) == Some(&b'<') {
            return offset;
        }
        self.source
            .get(..offset)
            .and_then(|prefix| prefix.rfind('<'))
            .unwrap_or(offset)
    }

    /// Text contributed by a self-closing element nested inside a section
    ///
    /// `<see cref="T:MW.Vector3"/>` contributes `Vector3`; `<paramref>` and
    /// `<typeparamref>` contribute their name; `<see langword>` its keyword.
    fn inline_text(
        &self,
        e: &BytesStart,
        name: &str,
        position: Position,
    ) -> ExtractionResult<Option<String>> {
        match name {
            "see" | "seealso" => {
                if let Some(cref) = self.attribute(e, "cref", position)? {
                    return Ok(Some(cref_display_name(&cref).to_string()));
                }
                self.attribute(e, "langword", position)
            }
            "paramref" | "typeparamref" => self.attribute(e, NAME_ATTRIBUTE, position),
            _ => Ok(None),
        }
    }

    fn attribute(
        &self,
        e: &BytesStart,
        key: &str,
        position: Position,
    ) -> ExtractionResult<Option<String>> {
        for attr in e.attributes() {
            let attr = attr.map_err(|err| ExtractionError::malformed(position, err.to_string()))?;
            if attr.key.as_ref() == key.as_bytes() {
                let value = attr
                    .unescape_value()
                    .map_err(|err| ExtractionError::malformed(position, err.to_string()))?;
                return Ok(Some(value.into_owned()));
            }
        }
        Ok(None)
    }

    fn first_attribute(&self, e: &BytesStart, position: Position) -> ExtractionResult<Option<String>> {
        match e.attributes().next() {
            Some(attr) => {
                let attr = attr.map_err(|err| ExtractionError::malformed(position, err.to_string()))?;
                let value = attr
                    .unescape_value()
                    .map_err(|err| ExtractionError::malformed(position, err.to_string()))?;
                Ok(Some(value.into_owned()))
            }
            None => Ok(None),
        }
    }
}

/// Apply one finished section to its entry
fn apply_section(current: &mut OpenEntry, section: Section) -> ExtractionResult<()> {
    let text = collapse_whitespace(&section.text);

    let length = text.chars().count();
    if length > MAX_TEXT_LENGTH {
        return Err(ExtractionError::TextTooLong {
            element: section.name,
            position: section.position,
            length,
            limit: MAX_TEXT_LENGTH,
        });
    }

    let entry = &mut current.entry;

    // Every member's first child is its summary unless overridden below
    if !current.seen_first_section {
        entry.summary = text.clone();
        current.seen_first_section = true;
    }

    match section.name.as_str() {
        "docs" => entry.summary = text,
        "param" => entry
            .parameters
            .push(ParamDoc::new(section.attribute.unwrap_or_default(), text)),
        "docreturns" => entry.returns = text,
        "returns" => {
            if entry.returns.is_empty() {
                entry.returns = text;
            }
        }
        "docremarks" | "remarks" => entry.remarks = text,
        "decorations" => {
            if let Some(attribute) = section.attribute {
                entry.decorations.push(escape_all_braces(&attribute));
            }
        }
        _ => {}
    }

    Ok(())
}

fn local_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

/// `T:MW.Kinetic.Body` -> `Body`, `M:MW.Body.Move(System.Single)` -> `Move`
fn cref_display_name(cref: &str) -> &str {
    let without_marker = cref.split_once(':').map(|(_, rest)| rest).unwrap_or(cref);
    let without_params = without_marker
        .split_once('(')
        .map(|(name, _)| name)
        .unwrap_or(without_marker);
    without_params
        .rsplit('.')
        .next()
        .unwrap_or(without_params)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn doc(members: &str) -> String {
        format!(
            "<?xml version=\"1.0\"?>\n<doc>\n  <assembly><name>MW</name></assembly>\n  <members>\n{}\n  </members>\n</doc>\n",
            members
        )
    }

    fn read(source: &str) -> ExtractionResult<Vec<DocEntry>> {
        DocReader::new(source).read_entries()
    }

    #[test]
    fn test_entries_in_document_order() {
        let source = doc(r#"
    <member name="T:MW.Shapes.Circle">
      <summary>A circle.</summary>
    </member>
    <member name="M:MW.Shapes.Circle.Scale(System.Single,System.Single@)">
      <summary>
        Scales the circle.
      </summary>
      <param name="x">Horizontal factor.</param>
      <param name="y">Vertical factor.</param>
      <returns>Nothing useful.</returns>
    </member>"#);

        let entries = read(&source).unwrap();
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].identifier, "T:MW.Shapes.Circle");
        assert_eq!(entries[0].summary, "A circle.");
        assert_eq!(entries[0].marker(), Some('T'));

        let scale = &entries[1];
        assert_eq!(scale.summary, "Scales the circle.");
        assert_eq!(
            scale.parameters,
            vec![
                ParamDoc::new("x", "Horizontal factor."),
                ParamDoc::new("y", "Vertical factor."),
            ]
        );
        assert_eq!(scale.returns, "Nothing useful.");
        assert!(!scale.has_remarks());
    }

    #[test]
    fn test_docs_overrides_summary() {
        let source = doc(r#"
    <member name="P:MW.Time.DeltaTime">
      <summary>Raw summary.</summary>
      <docs>Preferred text.</docs>
    </member>"#);

        let entries = read(&source).unwrap();
        assert_eq!(entries[0].summary, "Preferred text.");
    }

    #[test]
    fn test_docreturns_wins_in_either_order() {
        let source = doc(r#"
    <member name="M:MW.Math.A">
      <summary>a</summary>
      <returns>plain</returns>
      <docreturns>custom</docreturns>
    </member>
    <member name="M:MW.Math.B">
      <summary>b</summary>
      <docreturns>custom</docreturns>
      <returns>plain</returns>
    </member>"#);

        let entries = read(&source).unwrap();
        assert_eq!(entries[0].returns, "custom");
        assert_eq!(entries[1].returns, "custom");
    }

    #[test]
    fn test_last_remarks_wins() {
        let source = doc(r#"
    <member name="M:MW.Math.A">
      <summary>a</summary>
      <docremarks>first</docremarks>
      <remarks>second</remarks>
    </member>"#);

        let entries = read(&source).unwrap();
        assert_eq!(entries[0].remarks, "second");
    }

    #[test]
    fn test_decorations_escape_braces() {
        let source = doc(r#"
    <member name="T:MW.Kinetic.Body">
      <summary>Body.</summary>
      <decorations name="[RequireComponent(typeof(MList{Collider}))]"/>
    </member>"#);

        let entries = read(&source).unwrap();
        assert_eq!(
            entries[0].decorations,
            vec!["[RequireComponent(typeof(MList&lt;Collider&gt;))]".to_string()]
        );
    }

    #[test]
    fn test_inline_elements_contribute_text() {
        let source = doc(r#"
    <member name="M:MW.Kinetic.Body.AddForce(MW.Vector3)">
      <summary>Adds <paramref name="force"/> to the
        <see cref="T:MW.Kinetic.Body"/>, see <c>Mass</c> and <see langword="null"/>.</summary>
    </member>"#);

        let entries = read(&source).unwrap();
        assert_eq!(
            entries[0].summary,
            "Adds force to the Body, see Mass and null."
        );
    }

    #[test]
    fn test_see_with_content_uses_only_its_text() {
        let source = doc(r#"
    <member name="T:MW.Vector2">
      <summary>Use <see cref="T:MW.Vector3">the vector</see> here.</summary>
      <remarks>Pass <paramref name="v">v</paramref> or <see langword="null">nothing</see>.</remarks>
    </member>"#);

        let entries = read(&source).unwrap();
        assert_eq!(entries[0].summary, "Use the vector here.");
        assert_eq!(entries[0].remarks, "Pass v or nothing.");
    }

    #[test]
    fn test_first_child_is_summary_even_without_summary_tag() {
        let source = doc(r#"
    <member name="M:MW.Math.A(System.Int32)">
      <param name="value">The value.</param>
    </member>"#);

        let entries = read(&source).unwrap();
        assert_eq!(entries[0].summary, "The value.");
        assert_eq!(entries[0].parameters.len(), 1);
    }

    #[test]
    fn test_entities_are_unescaped() {
        let source = doc(r#"
    <member name="M:MW.Math.Less(MW.Vector2,MW.Vector2)">
      <summary>True when a &lt; b.</summary>
    </member>"#);

        let entries = read(&source).unwrap();
        assert_eq!(entries[0].summary, "True when a < b.");
    }

    #[test]
    fn test_member_position() {
        let source = doc(r#"<member name="T:MW.Time"><summary>t</summary></member>"#);

        let entries = read(&source).unwrap();
        assert_eq!(entries[0].position.line, 5);
        assert_eq!(entries[0].position.column, 1);
    }

    #[test]
    fn test_empty_members_element() {
        assert!(read(&doc("")).unwrap().is_empty());
        assert!(read("<doc><members/></doc>").unwrap().is_empty());
    }

    #[test]
    fn test_missing_members_element() {
        let result = read("<doc><assembly><name>MW</name></assembly></doc>");
        assert_matches!(result, Err(ExtractionError::MissingMembersElement));
    }

    #[test]
    fn test_member_without_name() {
        let result = read(&doc("<member><summary>x</summary></member>"));
        assert_matches!(result, Err(ExtractionError::MissingMemberName { position }) if position.line == 5);
    }

    #[test]
    fn test_malformed_xml() {
        let result = read("<doc><members><member name=\"T:MW.A\"></members></doc>");
        assert_matches!(result, Err(ExtractionError::MalformedXml { .. }));

        let result = read("<doc><members><member name=\"T:MW.A\">");
        assert_matches!(result, Err(ExtractionError::MalformedXml { message, .. }) if message.contains("not closed"));
    }

    #[test]
    fn test_identifier_too_long() {
        let long = format!("M:MW.{}", "A".repeat(MAX_IDENTIFIER_LENGTH));
        let source = doc(&format!("<member name=\"{}\"><summary>x</summary></member>", long));

        let result = read(&source);
        assert_matches!(result, Err(ExtractionError::IdentifierTooLong { limit, .. }) if limit == MAX_IDENTIFIER_LENGTH);
    }

    #[test]
    fn test_nesting_too_deep() {
        let open = "<c>".repeat(MAX_ELEMENT_DEPTH);
        let close = "</c>".repeat(MAX_ELEMENT_DEPTH);
        let source = doc(&format!(
            "<member name=\"T:MW.A\"><summary>{}x{}</summary></member>",
            open, close
        ));

        let result = read(&source);
        assert_matches!(result, Err(ExtractionError::NestingTooDeep { .. }));
    }

    #[test]
    fn test_cref_display_name() {
        assert_eq!(cref_display_name("T:MW.Kinetic.Body"), "Body");
        assert_eq!(cref_display_name("M:MW.Body.Move(System.Single)"), "Move");
        assert_eq!(cref_display_name("Vector3"), "Vector3");
    }
}
