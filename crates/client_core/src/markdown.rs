//! Markdown answers as a rich-text model.
//!
//! Answers are parsed with `pulldown-cmark` into blocks of styled spans that a
//! front end can draw however it likes. Raw HTML in the answer is kept as
//! literal text, and only `http`, `https` and `mailto` links stay clickable.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use url::Url;

const LINK_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanStyle {
    pub strong: bool,
    pub emphasis: bool,
    pub strikethrough: bool,
    pub code: bool,
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    Heading(u8),
    ListItem { depth: usize, marker: String },
    /// Later paragraphs of a list item, indented like the item's text.
    ListParagraph { depth: usize },
    Quote { depth: usize },
    CodeBlock,
    /// Cells are separated by a ` | ` span.
    TableRow { header: bool },
    Rule,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub spans: Vec<Span>,
}

impl Block {
    pub fn text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedMarkdown {
    pub blocks: Vec<Block>,
}

impl RenderedMarkdown {
    /// Terminal-friendly rendering: list markers, indented code, links as
    /// `text (url)`.
    pub fn plain_text(&self) -> String {
        let mut out = Vec::with_capacity(self.blocks.len());
        for block in &self.blocks {
            let text = block
                .spans
                .iter()
                .map(|span| match &span.style.link {
                    Some(url) if url != &span.text => format!("{} ({url})", span.text),
                    _ => span.text.clone(),
                })
                .collect::<String>();
            let rendered = match &block.kind {
                BlockKind::Paragraph | BlockKind::Heading(_) | BlockKind::TableRow { .. } => text,
                BlockKind::ListItem { depth, marker } => {
                    format!("{}{marker} {text}", "  ".repeat(depth.saturating_sub(1)))
                }
                BlockKind::ListParagraph { depth } => {
                    format!("{}  {text}", "  ".repeat(depth.saturating_sub(1)))
                }
                BlockKind::Quote { depth } => text
                    .lines()
                    .map(|line| format!("{} {line}", ">".repeat(*depth)))
                    .collect::<Vec<_>>()
                    .join("\n"),
                BlockKind::CodeBlock => text
                    .lines()
                    .map(|line| format!("    {line}"))
                    .collect::<Vec<_>>()
                    .join("\n"),
                BlockKind::Rule => "---".to_string(),
            };
            out.push(rendered);
        }
        out.join("\n\n")
    }
}

pub fn render(markdown: &str) -> RenderedMarkdown {
    let mut renderer = Renderer::default();
    for event in Parser::new_ext(markdown, options()) {
        renderer.handle(event);
    }
    renderer.flush();
    RenderedMarkdown {
        blocks: renderer.blocks,
    }
}

fn options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

#[derive(Default)]
struct Renderer {
    blocks: Vec<Block>,
    current: Option<Block>,
    strong: usize,
    emphasis: usize,
    strikethrough: usize,
    // `None` for links whose target is not allowed.
    links: Vec<Option<String>>,
    // `Some(next)` for ordered lists.
    lists: Vec<Option<u64>>,
    open_items: usize,
    quotes: usize,
    in_code_block: bool,
    cells_in_row: usize,
}

impl Renderer {
    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.push_text(&text, self.in_code_block),
            Event::Code(text) => self.push_text(&text, true),
            Event::Html(text) | Event::InlineHtml(text) => self.push_text(&text, false),
            Event::SoftBreak => self.push_text(" ", false),
            Event::HardBreak => self.push_text("\n", false),
            Event::Rule => {
                self.flush();
                self.blocks.push(Block {
                    kind: BlockKind::Rule,
                    spans: Vec::new(),
                });
            }
            Event::TaskListMarker(checked) => {
                self.push_text(if checked { "[x] " } else { "[ ] " }, false)
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                // Loose list items wrap their text in a paragraph.
                let continues_item = matches!(
                    &self.current,
                    Some(Block { kind: BlockKind::ListItem { .. }, spans }) if spans.is_empty()
                );
                if !continues_item {
                    self.open(self.text_block_kind());
                }
            }
            Tag::BlockQuote { .. } => {
                self.flush();
                self.quotes += 1;
            }
            Tag::Heading { level, .. } => self.open(BlockKind::Heading(level as u8)),
            Tag::CodeBlock(_) => {
                self.open(BlockKind::CodeBlock);
                self.in_code_block = true;
            }
            Tag::List(start) => {
                self.flush();
                self.lists.push(start);
            }
            Tag::Item => {
                let depth = self.lists.len();
                let marker = match self.lists.last_mut() {
                    Some(Some(next)) => {
                        let marker = format!("{next}.");
                        *next += 1;
                        marker
                    }
                    _ => "•".to_string(),
                };
                self.open_items += 1;
                self.open(BlockKind::ListItem { depth, marker });
            }
            Tag::Table(_) => self.flush(),
            Tag::TableHead => self.open_row(true),
            Tag::TableRow => self.open_row(false),
            Tag::TableCell => {
                if self.cells_in_row > 0 {
                    self.push_text(" | ", false);
                }
                self.cells_in_row += 1;
            }
            Tag::Emphasis => self.emphasis += 1,
            Tag::Strong => self.strong += 1,
            Tag::Strikethrough => self.strikethrough += 1,
            Tag::Link { dest_url, .. } => self.links.push(allowed_link(&dest_url)),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Item => {
                self.flush();
                self.open_items = self.open_items.saturating_sub(1);
            }
            TagEnd::BlockQuote { .. } => {
                self.flush();
                self.quotes = self.quotes.saturating_sub(1);
            }
            TagEnd::Paragraph
            | TagEnd::Heading(_)
            | TagEnd::TableHead
            | TagEnd::TableRow
            | TagEnd::Table => self.flush(),
            TagEnd::CodeBlock => {
                if let Some(block) = self.current.as_mut() {
                    if let Some(last) = block.spans.last_mut() {
                        let trimmed = last.text.trim_end_matches('\n').len();
                        last.text.truncate(trimmed);
                    }
                }
                self.in_code_block = false;
                self.flush();
            }
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
            }
            TagEnd::Emphasis => self.emphasis = self.emphasis.saturating_sub(1),
            TagEnd::Strong => self.strong = self.strong.saturating_sub(1),
            TagEnd::Strikethrough => self.strikethrough = self.strikethrough.saturating_sub(1),
            TagEnd::Link => {
                self.links.pop();
            }
            _ => {}
        }
    }

    fn open(&mut self, kind: BlockKind) {
        self.flush();
        self.current = Some(Block {
            kind,
            spans: Vec::new(),
        });
    }

    /// Kind for loose text: continues the innermost list item, else quoted, else plain.
    fn text_block_kind(&self) -> BlockKind {
        if self.open_items > 0 && !self.lists.is_empty() {
            BlockKind::ListParagraph {
                depth: self.lists.len(),
            }
        } else if self.quotes > 0 {
            BlockKind::Quote { depth: self.quotes }
        } else {
            BlockKind::Paragraph
        }
    }

    fn open_row(&mut self, header: bool) {
        self.open(BlockKind::TableRow { header });
        self.cells_in_row = 0;
    }

    fn flush(&mut self) {
        if let Some(block) = self.current.take() {
            if !block.spans.is_empty() || block.kind == BlockKind::Rule {
                self.blocks.push(block);
            }
        }
    }

    fn push_text(&mut self, text: &str, code: bool) {
        if text.is_empty() {
            return;
        }
        let style = SpanStyle {
            strong: self.strong > 0,
            emphasis: self.emphasis > 0,
            strikethrough: self.strikethrough > 0,
            code,
            link: self.links.last().cloned().flatten(),
        };
        let kind = self.text_block_kind();
        let block = self.current.get_or_insert_with(|| Block {
            kind,
            spans: Vec::new(),
        });
        match block.spans.last_mut() {
            Some(last) if last.style == style => last.text.push_str(text),
            _ => block.spans.push(Span {
                text: text.to_string(),
                style,
            }),
        }
    }
}

fn allowed_link(dest: &str) -> Option<String> {
    let url = Url::parse(dest.trim()).ok()?;
    LINK_SCHEMES
        .contains(&url.scheme())
        .then(|| dest.trim().to_string())
}
