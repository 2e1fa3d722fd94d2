//! Start/end/text token stream over a parsed page
//!
//! The page is parsed once with `scraper` and then walked depth-first with an
//! explicit stack, emitting the same token sequence a streaming tokenizer
//! would: a start token when an element opens, its children, then an end
//! token.

use scraper::{ElementRef, Html, Node};

/// One markup token in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupToken<'a> {
    /// Element opened (lower-case tag name)
    Start(&'a str),
    /// Element closed (lower-case tag name)
    End(&'a str),
    /// Text content
    Text(&'a str),
}

/// Pending work while walking the tree
enum Frame<'a> {
    Open(ElementRef<'a>),
    Text(&'a str),
    Close(&'a str),
}

/// Emit every token of the document, in order, into `sink`
///
/// The walk keeps its own stack, so nesting depth is bounded by memory rather
/// than by the thread stack.
pub fn walk_document<'a, F>(document: &'a Html, sink: &mut F)
where
    F: FnMut(MarkupToken<'a>),
{
    let mut stack = vec![Frame::Open(document.root_element())];

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Open(element) => {
                let name = element.value().name();
                sink(MarkupToken::Start(name));
                stack.push(Frame::Close(name));

                let children: Vec<Frame<'a>> = element
                    .children()
                    .filter_map(|child| match child.value() {
                        Node::Element(_) => ElementRef::wrap(child).map(Frame::Open),
                        Node::Text(text) => {
                            let text: &'a str = text;
                            Some(Frame::Text(text))
                        }
                        // comments, doctype, processing instructions
                        _ => None,
                    })
                    .collect();
                stack.extend(children.into_iter().rev());
            }
            Frame::Text(text) => sink(MarkupToken::Text(text)),
            Frame::Close(name) => sink(MarkupToken::End(name)),
        }
    }
}
