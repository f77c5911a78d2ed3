//! html5ever TreeSink that keeps only the element skeleton.
//!
//! The scanner needs element names, attributes and nesting. Text is dropped
//! as it arrives, and comments, doctypes and processing instructions become
//! leaf nodes the walk never looks into.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use html5ever::tendril::StrTendril;
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{Attribute as Html5Attribute, QualName};

pub(crate) enum NodeData {
    Document,
    Element {
        name: QualName,
        attrs: RefCell<Vec<Html5Attribute>>,
    },
    Other,
}

pub(crate) struct Node {
    pub(crate) data: NodeData,
    parent: RefCell<Option<Weak<Node>>>,
    pub(crate) children: RefCell<Vec<Rc<Node>>>,
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.data {
            NodeData::Document => f.write_str("#document"),
            NodeData::Element { name, .. } => write!(f, "<{}>", name.local),
            NodeData::Other => f.write_str("#other"),
        }
    }
}

impl Node {
    fn new(data: NodeData) -> Rc<Self> {
        Rc::new(Self {
            data,
            parent: RefCell::new(None),
            children: RefCell::new(Vec::new()),
        })
    }

    /// Local name of an element, lowercased by the parser.
    pub(crate) fn local_name(&self) -> Option<&str> {
        match &self.data {
            NodeData::Element { name, .. } => Some(&*name.local),
            _ => None,
        }
    }

    /// Value of the attribute `key`, if this is an element carrying it.
    pub(crate) fn attr(&self, key: &str) -> Option<String> {
        match &self.data {
            NodeData::Element { attrs, .. } => attrs
                .borrow()
                .iter()
                .find(|attr| &*attr.name.local == key)
                .map(|attr| attr.value.to_string()),
            _ => None,
        }
    }

    fn parent(&self) -> Option<Rc<Node>> {
        self.parent.borrow().as_ref().and_then(Weak::upgrade)
    }

    fn detach(self: &Rc<Self>) {
        if let Some(parent) = self.parent() {
            parent
                .children
                .borrow_mut()
                .retain(|child| !Rc::ptr_eq(child, self));
        }
        *self.parent.borrow_mut() = None;
    }
}

fn append_child(parent: &Rc<Node>, child: Rc<Node>) {
    child.detach();
    *child.parent.borrow_mut() = Some(Rc::downgrade(parent));
    parent.children.borrow_mut().push(child);
}

/// TreeSink building a tree of reference-counted nodes.
///
/// The trait takes `&self` everywhere, so child lists sit behind `RefCell`.
pub(crate) struct SkeletonSink {
    document: Rc<Node>,
}

impl SkeletonSink {
    pub(crate) fn new() -> Self {
        Self {
            document: Node::new(NodeData::Document),
        }
    }

    pub(crate) fn into_document(self) -> Rc<Node> {
        self.document
    }
}

impl TreeSink for SkeletonSink {
    type Handle = Rc<Node>;
    type Output = Self;
    type ElemName<'a>
        = &'a QualName
    where
        Self: 'a;

    fn finish(self) -> Self::Output {
        self
    }

    // Content is scanned the way a browser would render it, errors and all.
    fn parse_error(&self, _msg: std::borrow::Cow<'static, str>) {}

    fn get_document(&self) -> Self::Handle {
        Rc::clone(&self.document)
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> Self::ElemName<'a> {
        static EMPTY: QualName = QualName {
            prefix: None,
            ns: html5ever::ns!(),
            local: html5ever::local_name!(""),
        };
        match &target.data {
            NodeData::Element { name, .. } => name,
            _ => &EMPTY,
        }
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Html5Attribute>,
        _flags: ElementFlags,
    ) -> Self::Handle {
        Node::new(NodeData::Element {
            name,
            attrs: RefCell::new(attrs),
        })
    }

    fn create_comment(&self, _text: StrTendril) -> Self::Handle {
        Node::new(NodeData::Other)
    }

    fn create_pi(&self, _target: StrTendril, _data: StrTendril) -> Self::Handle {
        Node::new(NodeData::Other)
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        if let NodeOrText::AppendNode(node) = child {
            append_child(parent, node);
        }
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        if element.parent().is_some() {
            self.append_before_sibling(element, child);
        } else {
            self.append(prev_element, child);
        }
    }

    fn append_doctype_to_document(
        &self,
        _name: StrTendril,
        _public_id: StrTendril,
        _system_id: StrTendril,
    ) {
        append_child(&self.document, Node::new(NodeData::Other));
    }

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        Rc::clone(target)
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        Rc::ptr_eq(x, y)
    }

    fn set_quirks_mode(&self, _mode: QuirksMode) {}

    fn append_before_sibling(&self, sibling: &Self::Handle, new_node: NodeOrText<Self::Handle>) {
        let NodeOrText::AppendNode(node) = new_node else {
            return;
        };
        let Some(parent) = sibling.parent() else {
            return;
        };
        node.detach();
        *node.parent.borrow_mut() = Some(Rc::downgrade(&parent));
        let mut children = parent.children.borrow_mut();
        let index = children
            .iter()
            .position(|child| Rc::ptr_eq(child, sibling))
            .unwrap_or(children.len());
        children.insert(index, node);
    }

    fn add_attrs_if_missing(&self, target: &Self::Handle, attrs: Vec<Html5Attribute>) {
        if let NodeData::Element {
            attrs: existing, ..
        } = &target.data
        {
            let mut existing = existing.borrow_mut();
            for attr in attrs {
                if !existing.iter().any(|a| a.name == attr.name) {
                    existing.push(attr);
                }
            }
        }
    }

    fn remove_from_parent(&self, target: &Self::Handle) {
        target.detach();
    }

    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle) {
        let children = std::mem::take(&mut *node.children.borrow_mut());
        for child in children {
            *child.parent.borrow_mut() = Some(Rc::downgrade(new_parent));
            new_parent.children.borrow_mut().push(child);
        }
    }
}
