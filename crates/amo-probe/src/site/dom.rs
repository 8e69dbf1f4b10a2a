//! Flat rendered document: selector strings map straight to nodes.
//!
//! The mock site does not parse CSS. Each renderer registers nodes under the
//! exact selector strings the page objects query, in document order.

/// What a click on a node does
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    /// Inert
    None,
    /// Follow a link to a site path (with query)
    Go(String),
    /// Flip a collapsible section open or closed
    Toggle(&'static str),
    /// Open the lightbox on a preview
    ViewerOpen(usize),
    /// Next preview
    ViewerNext,
    /// Previous preview
    ViewerPrev,
    /// Close the lightbox
    ViewerClose,
    /// Submit the login form
    Login,
    /// End the session
    Logout,
    /// Flip a checkbox
    Check(&'static str),
    /// Submit the profile form
    SubmitProfile,
}

/// One rendered element
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub tag: &'static str,
    pub text: String,
    pub attrs: Vec<(&'static str, String)>,
    pub visible: bool,
    pub action: Action,
}

impl Node {
    pub fn new(tag: &'static str, text: impl Into<String>) -> Self {
        Self {
            tag,
            text: text.into(),
            attrs: Vec::new(),
            visible: true,
            action: Action::None,
        }
    }

    /// A link to a site path
    pub fn link(text: impl Into<String>, path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new("a", text)
            .attr("href", path.clone())
            .action(Action::Go(path))
    }

    pub fn input(value: impl Into<String>) -> Self {
        Self::new("input", "").attr("value", value)
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        if let Some(slot) = self.attrs.iter_mut().find(|(k, _)| *k == name) {
            slot.1 = value;
        } else {
            self.attrs.push((name, value));
        }
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// A rendered page
#[derive(Debug, Clone, Default)]
pub(crate) struct Document {
    pub title: String,
    nodes: Vec<(String, Node)>,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            nodes: Vec::new(),
        }
    }

    pub fn add(&mut self, selector: &str, node: Node) {
        self.nodes.push((selector.to_string(), node));
    }

    pub fn matches(&self, selector: &str) -> Vec<&Node> {
        self.nodes
            .iter()
            .filter(|(s, _)| s == selector)
            .map(|(_, n)| n)
            .collect()
    }

    pub fn nth(&self, selector: &str, index: usize) -> Option<&Node> {
        self.matches(selector).into_iter().nth(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_order_is_kept() {
        let mut doc = Document::new("t");
        doc.add("li", Node::new("li", "a"));
        doc.add("p", Node::new("p", "x"));
        doc.add("li", Node::new("li", "b"));
        let texts: Vec<_> = doc.matches("li").iter().map(|n| n.text.clone()).collect();
        assert_eq!(texts, vec!["a", "b"]);
        assert_eq!(doc.nth("li", 1).map(|n| n.text.as_str()), Some("b"));
        assert!(doc.nth("li", 2).is_none());
    }

    #[test]
    fn test_link_carries_href_and_action() {
        let node = Node::link("Extensions", "/en-US/firefox/extensions/");
        assert_eq!(node.get_attr("href"), Some("/en-US/firefox/extensions/"));
        assert_eq!(
            node.action,
            Action::Go("/en-US/firefox/extensions/".to_string())
        );
    }

    #[test]
    fn test_attr_overwrites() {
        let node = Node::new("a", "").attr("class", "x").attr("class", "y");
        assert_eq!(node.get_attr("class"), Some("y"));
        assert_eq!(node.attrs.len(), 1);
    }
}
