use crate::error::DescriptorError;
use crate::path::{NodePath, PathStep};
use quick_xml::escape::{partial_escape, unescape};
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::path::Path;
use std::str::{from_utf8, FromStr};
use tokio::fs::read_to_string;
use tracing::debug;

/// A parsed descriptor. Markup is kept as it was written so that
/// serializing an untouched document gives back the original bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    prolog: Vec<Node>,
    root: Element,
    epilog: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Character data, still escaped.
    Text(String),
    CData(String),
    Comment(String),
    Declaration(String),
    ProcessingInstruction(String),
    DocType(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    /// Everything between `<` and `>` of the start tag: name and attributes.
    start: String,
    name_len: usize,
    empty: bool,
    children: Vec<Node>,
}

impl Document {
    pub async fn from_path(path: &Path) -> Result<Self, DescriptorError> {
        let document: Self = read_to_string(path).await?.parse()?;
        debug!(
            "Loaded {} with root element {}",
            path.display(),
            document.root.name()
        );
        Ok(document)
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Serializes the document exactly as held in memory.
    pub fn to_xml_string(&self) -> Result<String, DescriptorError> {
        let mut writer = Writer::new(Vec::new());
        for node in self.prolog.iter() {
            node.write(&mut writer)?;
        }
        self.root.write(&mut writer)?;
        for node in self.epilog.iter() {
            node.write(&mut writer)?;
        }
        Ok(String::from_utf8(writer.into_inner()).map_err(|err| err.utf8_error())?)
    }
}

impl FromStr for Document {
    type Err = DescriptorError;

    fn from_str(xml: &str) -> Result<Self, Self::Err> {
        let mut reader = Reader::from_str(xml);
        let mut prolog = Vec::new();
        let mut epilog = Vec::new();
        let mut root: Option<Element> = None;
        let mut open: Vec<Element> = Vec::new();

        loop {
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(source) => {
                    return Err(DescriptorError::ParseError {
                        position: reader.error_position() as u64,
                        source,
                    })
                }
            };

            let node = match event {
                Event::Start(start) => {
                    open.push(Element::from_start(&start, false)?);
                    continue;
                }
                Event::End(end) => Node::Element(open.pop().ok_or_else(|| {
                    DescriptorError::UnexpectedClosingTag(
                        String::from_utf8_lossy(end.name().as_ref()).into_owned(),
                    )
                })?),
                Event::Empty(start) => Node::Element(Element::from_start(&start, true)?),
                Event::Text(text) => Node::Text(from_utf8(&text)?.to_owned()),
                Event::CData(cdata) => Node::CData(from_utf8(&cdata)?.to_owned()),
                Event::Comment(comment) => Node::Comment(from_utf8(&comment)?.to_owned()),
                Event::Decl(decl) => Node::Declaration(from_utf8(&decl)?.to_owned()),
                Event::PI(pi) => Node::ProcessingInstruction(from_utf8(&pi)?.to_owned()),
                Event::DocType(doctype) => Node::DocType(from_utf8(&doctype)?.to_owned()),
                Event::Eof => break,
            };

            match open.last_mut() {
                Some(parent) => parent.children.push(node),
                None => match node {
                    Node::Element(element) => {
                        if root.is_some() {
                            return Err(DescriptorError::MultipleRootElements(
                                element.name().to_owned(),
                            ));
                        }
                        root = Some(element);
                    }
                    other if root.is_some() => epilog.push(other),
                    other => prolog.push(other),
                },
            }
        }

        if let Some(unclosed) = open.pop() {
            return Err(DescriptorError::UnclosedElement(unclosed.name().to_owned()));
        }

        Ok(Self {
            prolog,
            root: root.ok_or(DescriptorError::NoRootElement)?,
            epilog,
        })
    }
}

impl Element {
    fn from_start(start: &BytesStart, empty: bool) -> Result<Self, DescriptorError> {
        Ok(Self {
            start: from_utf8(start)?.to_owned(),
            name_len: start.name().as_ref().len(),
            empty,
            children: Vec::new(),
        })
    }

    /// Qualified tag name, including any namespace prefix.
    pub fn name(&self) -> &str {
        &self.start[..self.name_len]
    }

    pub fn local_name(&self) -> &str {
        let name = self.name();
        match name.split_once(':') {
            Some((_, local)) => local,
            None => name,
        }
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    pub fn child(&self, index: usize) -> Option<&Element> {
        self.elements().nth(index)
    }

    pub fn child_named(&self, local_name: &str) -> Option<&Element> {
        self.elements().find(|element| element.local_name() == local_name)
    }

    fn step(&self, step: &PathStep) -> Option<&Element> {
        match step {
            PathStep::Index(index) => self.child(*index),
            PathStep::Name(name) => self.child_named(name),
        }
    }

    fn step_mut(&mut self, step: &PathStep) -> Option<&mut Element> {
        match step {
            PathStep::Index(index) => self.elements_mut().nth(*index),
            PathStep::Name(name) => self
                .elements_mut()
                .find(|element| element.local_name() == name),
        }
    }

    pub fn resolve(&self, path: &NodePath) -> Result<&Element, DescriptorError> {
        let mut current = self;
        for step in path.steps() {
            current = current.step(step).ok_or_else(|| DescriptorError::MissingNode {
                path: path.clone(),
                step: step.clone(),
            })?;
        }
        Ok(current)
    }

    pub fn resolve_mut(&mut self, path: &NodePath) -> Result<&mut Element, DescriptorError> {
        let mut current = self;
        for step in path.steps() {
            current = current
                .step_mut(step)
                .ok_or_else(|| DescriptorError::MissingNode {
                    path: path.clone(),
                    step: step.clone(),
                })?;
        }
        Ok(current)
    }

    /// Character data before the first child element, unescaped. `None` when
    /// there is none at all.
    pub fn text(&self) -> Result<Option<String>, DescriptorError> {
        let mut text: Option<String> = None;
        for node in self.children.iter() {
            let chunk = match node {
                Node::Element(_) => break,
                Node::Text(raw) => unescape(raw)?,
                Node::CData(data) => data.as_str().into(),
                _ => continue,
            };
            text.get_or_insert_with(String::new).push_str(&chunk);
        }
        Ok(text)
    }

    /// Replaces the character data before the first child element.
    pub fn set_text(&mut self, text: &str) {
        let first_element = self
            .children
            .iter()
            .position(|node| matches!(node, Node::Element(_)))
            .unwrap_or(self.children.len());
        let tail = self.children.split_off(first_element);
        self.children
            .retain(|node| !matches!(node, Node::Text(_) | Node::CData(_)));
        if !text.is_empty() {
            self.children.insert(0, Node::Text(partial_escape(text).into_owned()));
        }
        self.children.extend(tail);
        self.empty = self.empty && self.children.is_empty();
    }

    fn write(&self, writer: &mut Writer<Vec<u8>>) -> Result<(), DescriptorError> {
        let start = BytesStart::from_content(self.start.as_str(), self.name_len);
        if self.empty {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }
        writer.write_event(Event::Start(start))?;
        for child in self.children.iter() {
            child.write(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new(self.name())))?;
        Ok(())
    }
}

impl Node {
    fn write(&self, writer: &mut Writer<Vec<u8>>) -> Result<(), DescriptorError> {
        let event = match self {
            Self::Element(element) => return element.write(writer),
            Self::Text(raw) => Event::Text(BytesText::from_escaped(raw.as_str())),
            Self::CData(data) => Event::CData(BytesCData::new(data.as_str())),
            Self::Comment(raw) => Event::Comment(BytesText::from_escaped(raw.as_str())),
            Self::Declaration(raw) => Event::Decl(BytesDecl::from_start(BytesStart::from_content(
                raw.as_str(),
                3,
            ))),
            Self::ProcessingInstruction(raw) => Event::PI(BytesPI::new(raw.as_str())),
            Self::DocType(raw) => Event::DocType(BytesText::from_escaped(raw.as_str())),
        };
        writer.write_event(event)?;
        Ok(())
    }
}
