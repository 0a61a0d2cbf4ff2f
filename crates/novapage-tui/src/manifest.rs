//! Page manifest: a TOML description of the page the terminal host renders
//!
//! The manifest lists sections and their content blocks. [`Manifest::build`]
//! turns it into the element registry the page behavior runs against, plus
//! the structural information the widgets need to draw it.

use std::collections::HashSet;
use std::path::Path;

use novapage_core::counter::{COUNT_ATTR, STAT_CLASS};
use novapage_core::cursor::{CURSOR_CLASS, FOLLOWER_CLASS};
use novapage_core::form::CONTACT_FORM_ID;
use novapage_core::lazy::SOURCE_ATTR;
use novapage_core::nav::{HEADER_ID, NAV_LINK_CLASS, NAV_MENU_CLASS, NAV_TOGGLE_CLASS};
use novapage_core::particles::PARTICLES_ID;
use novapage_core::preloader::PRELOADER_ID;
use novapage_core::reveal::{DELAY_ATTR, REVEAL_ATTR};
use novapage_core::{Document, ElementDecl, ElementId, Error, Result};
use serde::Deserialize;

fn default_title() -> String {
    "Untitled page".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    #[serde(default = "default_title")]
    pub title: String,
    /// Short name shown at the left of the header
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub sections: Vec<SectionSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SectionSpec {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Minimum height in rows
    #[serde(default)]
    pub min_rows: u16,
    /// Whether the header links to this section
    #[serde(default = "default_true")]
    pub in_nav: bool,
    #[serde(default)]
    pub blocks: Vec<BlockSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockSpec {
    #[serde(flatten)]
    pub kind: BlockKind,
    /// `id` attribute, for anchor targets
    #[serde(default)]
    pub id: Option<String>,
    /// Reveal animation name; the block stays hidden until revealed
    #[serde(default)]
    pub reveal: Option<String>,
    /// Reveal delay in milliseconds
    #[serde(default)]
    pub delay: Option<String>,
    /// Fixed height in rows instead of the computed one
    #[serde(default)]
    pub rows: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockKind {
    Heading {
        text: String,
    },
    Text {
        text: String,
    },
    /// Receives the typing effect
    Typed {
        texts: Vec<String>,
    },
    Stat {
        label: String,
        count: String,
    },
    Image {
        src: String,
        #[serde(default)]
        alt: String,
    },
    Card {
        title: String,
        #[serde(default)]
        text: String,
    },
    Link {
        text: String,
        href: String,
    },
    Form {
        #[serde(default)]
        action: Option<String>,
    },
}

/// Fixed elements every built page has
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Landmarks {
    pub body: ElementId,
    pub preloader: ElementId,
    pub header: ElementId,
    pub menu: ElementId,
    pub toggle: ElementId,
    pub cursor: ElementId,
    pub follower: ElementId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub element: ElementId,
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    pub element: ElementId,
    pub name: &'static str,
    pub label: &'static str,
    pub rows: u16,
}

/// Contact form fields, in tab order
pub const FORM_FIELDS: [(&str, &str, u16); 3] =
    [("name", "Name", 2), ("email", "Email", 2), ("message", "Message", 4)];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormParts {
    pub form: ElementId,
    pub fields: Vec<FormField>,
    pub button: ElementId,
}

#[derive(Debug, Clone)]
pub struct BuiltBlock {
    pub element: ElementId,
    pub spec: BlockSpec,
    pub form: Option<FormParts>,
}

#[derive(Debug, Clone)]
pub struct BuiltSection {
    pub element: ElementId,
    pub id: String,
    pub title: String,
    pub min_rows: u16,
    pub blocks: Vec<BuiltBlock>,
}

/// Typing target `id` and its phrases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingSpec {
    pub target: String,
    pub texts: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct BuiltPage {
    pub title: String,
    pub brand: String,
    pub document: Document,
    pub landmarks: Landmarks,
    pub nav: Vec<NavEntry>,
    pub sections: Vec<BuiltSection>,
    pub typing: Option<TypingSpec>,
}

impl BuiltPage {
    pub fn form(&self) -> Option<&FormParts> {
        self.blocks().find_map(|b| b.form.as_ref())
    }

    pub fn blocks(&self) -> impl Iterator<Item = &BuiltBlock> {
        self.sections.iter().flat_map(|s| s.blocks.iter())
    }

    pub fn block(&self, element: ElementId) -> Option<&BuiltBlock> {
        self.blocks().find(|b| b.element == element)
    }
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let manifest: Manifest =
            toml::from_str(content).map_err(|e| Error::Manifest(e.to_string()))?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<()> {
        if self.sections.is_empty() {
            return Err(Error::Manifest("page has no sections".to_string()));
        }

        let mut seen = HashSet::new();
        let ids = self
            .sections
            .iter()
            .map(|s| s.id.as_str())
            .chain(self.sections.iter().flat_map(|s| s.blocks.iter().filter_map(|b| b.id.as_deref())));
        for id in ids {
            if id.is_empty() {
                return Err(Error::Manifest("empty id".to_string()));
            }
            if !seen.insert(id) {
                return Err(Error::Manifest(format!("duplicate id '{}'", id)));
            }
        }

        let forms = self
            .sections
            .iter()
            .flat_map(|s| &s.blocks)
            .filter(|b| matches!(b.kind, BlockKind::Form { .. }))
            .count();
        if forms > 1 {
            return Err(Error::Manifest("at most one form block is supported".to_string()));
        }
        Ok(())
    }

    /// Declare every element and assign handles
    pub fn build(&self) -> Result<BuiltPage> {
        let mut builder = Builder::default();

        let body = builder.push(ElementDecl::new(builder.peek(), "body"));
        let preloader = builder.push(
            ElementDecl::new(builder.peek(), "div")
                .with_attr("id", PRELOADER_ID)
                .child_of(body),
        );
        let header = builder.push(
            ElementDecl::new(builder.peek(), "header")
                .with_attr("id", HEADER_ID)
                .child_of(body),
        );
        let toggle = builder.push(
            ElementDecl::new(builder.peek(), "button")
                .with_class(NAV_TOGGLE_CLASS)
                .child_of(header),
        );
        let menu = builder.push(
            ElementDecl::new(builder.peek(), "ul")
                .with_class(NAV_MENU_CLASS)
                .child_of(header),
        );

        let mut nav = Vec::new();
        for section in self.sections.iter().filter(|s| s.in_nav) {
            let label = section.title.clone().unwrap_or_else(|| section.id.clone());
            let href = format!("#{}", section.id);
            let element = builder.push(
                ElementDecl::new(builder.peek(), "a")
                    .with_class(NAV_LINK_CLASS)
                    .with_attr("href", href.clone())
                    .with_text(label.clone())
                    .child_of(menu),
            );
            nav.push(NavEntry {
                element,
                label,
                href,
            });
        }

        let mut sections = Vec::new();
        let mut typing = None;
        for section in &self.sections {
            let element = builder.push(
                ElementDecl::new(builder.peek(), "section")
                    .with_attr("id", section.id.clone())
                    .child_of(body),
            );
            if sections.is_empty() {
                builder.push(
                    ElementDecl::new(builder.peek(), "div")
                        .with_attr("id", PARTICLES_ID)
                        .child_of(element),
                );
            }
            let mut blocks = Vec::new();
            for spec in &section.blocks {
                let (block, typed_id) = builder.block(spec, element);
                if typing.is_none() {
                    if let (Some(target), BlockKind::Typed { texts }) = (typed_id, &spec.kind) {
                        typing = Some(TypingSpec {
                            target,
                            texts: texts.clone(),
                        });
                    }
                }
                blocks.push(block);
            }
            sections.push(BuiltSection {
                element,
                id: section.id.clone(),
                title: section.title.clone().unwrap_or_else(|| section.id.clone()),
                min_rows: section.min_rows,
                blocks,
            });
        }

        let cursor = builder.push(ElementDecl::new(builder.peek(), "div").with_class(CURSOR_CLASS));
        let follower = builder.push(ElementDecl::new(builder.peek(), "div").with_class(FOLLOWER_CLASS));

        tracing::debug!(elements = builder.elements.len(), sections = sections.len(), "Manifest built");
        Ok(BuiltPage {
            title: self.title.clone(),
            brand: self.brand.clone().unwrap_or_else(|| self.title.clone()),
            document: Document::new(builder.elements),
            landmarks: Landmarks {
                body,
                preloader,
                header,
                menu,
                toggle,
                cursor,
                follower,
            },
            nav,
            sections,
            typing,
        })
    }
}

#[derive(Default)]
struct Builder {
    elements: Vec<ElementDecl>,
    next: u32,
}

impl Builder {
    fn peek(&self) -> ElementId {
        ElementId(self.next)
    }

    fn push(&mut self, decl: ElementDecl) -> ElementId {
        let id = decl.id;
        self.next = self.next.max(id.0 + 1);
        self.elements.push(decl);
        id
    }

    /// Declare one block; also returns the typing target `id` for typed blocks
    fn block(&mut self, spec: &BlockSpec, section: ElementId) -> (BuiltBlock, Option<String>) {
        let id = self.peek();
        let (tag, class) = match &spec.kind {
            BlockKind::Heading { .. } => ("h2", None),
            BlockKind::Text { .. } => ("p", None),
            BlockKind::Typed { .. } => ("span", Some("typed-text")),
            BlockKind::Stat { .. } => ("span", Some(STAT_CLASS)),
            BlockKind::Image { .. } => ("img", None),
            BlockKind::Card { .. } => ("div", Some("service-card")),
            BlockKind::Link { .. } => ("a", None),
            BlockKind::Form { .. } => ("form", None),
        };

        let mut decl = ElementDecl::new(id, tag).child_of(section);
        if let Some(class) = class {
            decl = decl.with_class(class);
        }
        if let Some(reveal) = &spec.reveal {
            decl = decl.with_attr(REVEAL_ATTR, reveal.clone());
        }
        if let Some(delay) = &spec.delay {
            decl = decl.with_attr(DELAY_ATTR, delay.clone());
        }

        let mut dom_id = spec.id.clone();
        match &spec.kind {
            BlockKind::Heading { text } | BlockKind::Text { text } => decl = decl.with_text(text.clone()),
            BlockKind::Typed { .. } => {
                dom_id.get_or_insert_with(|| format!("typed-{}", id.0));
            }
            BlockKind::Stat { count, .. } => decl = decl.with_attr(COUNT_ATTR, count.clone()),
            BlockKind::Image { src, alt } => {
                decl = decl.with_attr(SOURCE_ATTR, src.clone()).with_attr("alt", alt.clone())
            }
            BlockKind::Card { title, .. } => decl = decl.with_text(title.clone()),
            BlockKind::Link { text, href } => {
                decl = decl.with_attr("href", href.clone()).with_text(text.clone())
            }
            BlockKind::Form { action } => {
                dom_id = Some(CONTACT_FORM_ID.to_string());
                if let Some(action) = action {
                    decl = decl.with_attr("action", action.clone());
                }
            }
        }
        if let Some(dom_id) = &dom_id {
            decl = decl.with_attr("id", dom_id.clone());
        }
        self.push(decl);

        let form = matches!(spec.kind, BlockKind::Form { .. }).then(|| self.form_parts(id));
        let typed = matches!(spec.kind, BlockKind::Typed { .. }).then(|| dom_id).flatten();
        (
            BuiltBlock {
                element: id,
                spec: spec.clone(),
                form,
            },
            typed,
        )
    }

    fn form_parts(&mut self, form: ElementId) -> FormParts {
        let fields = FORM_FIELDS
            .iter()
            .map(|&(name, label, rows)| {
                let tag = if name == "message" { "textarea" } else { "input" };
                let element = self.push(
                    ElementDecl::new(self.peek(), tag)
                        .with_attr("name", name)
                        .child_of(form),
                );
                FormField {
                    element,
                    name,
                    label,
                    rows,
                }
            })
            .collect();
        let button = self.push(
            ElementDecl::new(self.peek(), "button")
                .with_attr("type", "submit")
                .with_text("Send Message")
                .child_of(form),
        );
        FormParts {
            form,
            fields,
            button,
        }
    }
}
